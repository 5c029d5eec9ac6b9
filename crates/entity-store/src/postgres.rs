use std::marker::PhantomData;

use async_trait::async_trait;
use common::{RecordId, SortDirection};
use sqlx::{
    PgPool, Postgres, Row,
    postgres::{PgArguments, PgPoolOptions, PgRow},
    query::Query,
};

use crate::{
    Customer, DateRange, Employee, Entity, Product, Result, SearchTerm, Supplier,
    SupplierOrderRecord,
    error::map_write_error,
    store::{
        CustomerRepository, EmployeeRepository, EntityStore, ProductRepository, Repository,
        SupplierOrderRepository, SupplierRepository,
    },
};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// Mapping between an entity and its PostgreSQL table.
///
/// `COLUMNS` lists every column except `id`, in the order `bind_columns`
/// binds them.
pub trait PgEntity: Entity {
    const COLUMNS: &'static [&'static str];

    /// Binds the entity's column values onto `query`.
    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q>;

    /// Builds an entity from a row selected with `id` and `COLUMNS`.
    fn from_row(row: &PgRow) -> Result<Self>;
}

fn select_columns<E: PgEntity>() -> String {
    format!("id, {}", E::COLUMNS.join(", "))
}

fn placeholders(from: usize, count: usize) -> String {
    (from..from + count)
        .map(|n| format!("${n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds `POSITION(LOWER($1) IN LOWER(col)) > 0 OR ...` for a literal,
/// case-insensitive substring search over `columns`.
fn search_condition(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|col| format!("POSITION(LOWER($1) IN LOWER({col})) > 0"))
        .collect::<Vec<_>>()
        .join(" OR ")
}

fn record_id(row: &PgRow) -> Result<RecordId> {
    Ok(RecordId::new(row.try_get::<i64, _>("id")?))
}

impl PgEntity for Supplier {
    const COLUMNS: &'static [&'static str] = &[
        "company_name",
        "company_contact_no",
        "company_address",
        "contact_person_first_name",
        "contact_person_last_name",
        "contact_person_phone",
        "email",
    ];

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.company_name)
            .bind(&self.company_contact_no)
            .bind(&self.company_address)
            .bind(&self.contact_person_first_name)
            .bind(&self.contact_person_last_name)
            .bind(&self.contact_person_phone)
            .bind(&self.email)
    }

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Supplier {
            id: Some(record_id(row)?),
            company_name: row.try_get("company_name")?,
            company_contact_no: row.try_get("company_contact_no")?,
            company_address: row.try_get("company_address")?,
            contact_person_first_name: row.try_get("contact_person_first_name")?,
            contact_person_last_name: row.try_get("contact_person_last_name")?,
            contact_person_phone: row.try_get("contact_person_phone")?,
            email: row.try_get("email")?,
        })
    }
}

impl PgEntity for SupplierOrderRecord {
    const COLUMNS: &'static [&'static str] = &["supplier_id", "items", "total"];

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.supplier_id.as_i64())
            .bind(&self.items)
            .bind(self.total)
    }

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(SupplierOrderRecord {
            id: Some(record_id(row)?),
            supplier_id: RecordId::new(row.try_get("supplier_id")?),
            items: row.try_get("items")?,
            total: row.try_get("total")?,
        })
    }
}

impl PgEntity for Customer {
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "phone_number",
        "address",
        "registration_date",
        "birth_date",
        "loyalty_points",
    ];

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(&self.email)
            .bind(&self.phone_number)
            .bind(&self.address)
            .bind(self.registration_date)
            .bind(self.birth_date)
            .bind(self.loyalty_points)
    }

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Customer {
            id: Some(record_id(row)?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone_number: row.try_get("phone_number")?,
            address: row.try_get("address")?,
            registration_date: row.try_get("registration_date")?,
            birth_date: row.try_get("birth_date")?,
            loyalty_points: row.try_get("loyalty_points")?,
        })
    }
}

impl PgEntity for Product {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "category",
        "price",
        "quantity",
        "supplier",
        "image_url",
    ];

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.name)
            .bind(&self.category)
            .bind(self.price)
            .bind(self.quantity)
            .bind(&self.supplier)
            .bind(&self.image_url)
    }

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Product {
            id: Some(record_id(row)?),
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            price: row.try_get("price")?,
            quantity: row.try_get("quantity")?,
            supplier: row.try_get("supplier")?,
            image_url: row.try_get("image_url")?,
        })
    }
}

impl PgEntity for Employee {
    const COLUMNS: &'static [&'static str] = &[
        "first_name",
        "last_name",
        "email",
        "phone",
        "position",
        "department",
        "role",
        "nic_number",
        "date_of_birth",
        "hire_date",
        "salary",
        "address",
    ];

    fn bind_columns<'q>(&'q self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(&self.first_name)
            .bind(&self.last_name)
            .bind(&self.email)
            .bind(&self.phone)
            .bind(&self.position)
            .bind(&self.department)
            .bind(&self.role)
            .bind(&self.nic_number)
            .bind(self.date_of_birth)
            .bind(self.hire_date)
            .bind(self.salary)
            .bind(&self.address)
    }

    fn from_row(row: &PgRow) -> Result<Self> {
        Ok(Employee {
            id: Some(record_id(row)?),
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            position: row.try_get("position")?,
            department: row.try_get("department")?,
            role: row.try_get("role")?,
            nic_number: row.try_get("nic_number")?,
            date_of_birth: row.try_get("date_of_birth")?,
            hire_date: row.try_get("hire_date")?,
            salary: row.try_get("salary")?,
            address: row.try_get("address")?,
        })
    }
}

/// PostgreSQL-backed repository for one entity type.
pub struct PostgresRepository<E: PgEntity> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E: PgEntity> PostgresRepository<E> {
    /// Creates a repository over the given pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }

    async fn fetch_where(&self, sql_tail: &str, bind: Option<&str>) -> Result<Vec<E>> {
        let sql = format!(
            "SELECT {} FROM {} {sql_tail}",
            select_columns::<E>(),
            E::TABLE
        );
        let mut query = sqlx::query(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(E::from_row).collect()
    }
}

impl<E: PgEntity> Clone for PostgresRepository<E> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

#[async_trait]
impl<E: PgEntity> Repository<E> for PostgresRepository<E> {
    async fn save(&self, mut entity: E) -> Result<E> {
        let columns = E::COLUMNS.join(", ");
        let count = E::COLUMNS.len();

        let row = match entity.id() {
            None => {
                let sql = format!(
                    "INSERT INTO {} ({columns}) VALUES ({}) RETURNING id",
                    E::TABLE,
                    placeholders(1, count)
                );
                entity
                    .bind_columns(sqlx::query(&sql))
                    .fetch_one(&self.pool)
                    .await
            }
            Some(id) => {
                let updates = E::COLUMNS
                    .iter()
                    .map(|col| format!("{col} = EXCLUDED.{col}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!(
                    "INSERT INTO {} (id, {columns}) VALUES ($1, {}) \
                     ON CONFLICT (id) DO UPDATE SET {updates} RETURNING id",
                    E::TABLE,
                    placeholders(2, count)
                );
                entity
                    .bind_columns(sqlx::query(&sql).bind(id.as_i64()))
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| map_write_error(E::TABLE, e))?;

        let id = record_id(&row)?;
        entity.set_id(id);
        Ok(entity)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            select_columns::<E>(),
            E::TABLE
        );
        let row: Option<PgRow> = sqlx::query(&sql)
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(E::from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        self.fetch_where("ORDER BY id ASC", None).await
    }

    async fn exists_by_id(&self, id: RecordId) -> Result<bool> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", E::TABLE);
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id.as_i64())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        sqlx::query(&sql)
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(E::TABLE, e))?;
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for PostgresRepository<Customer> {
    async fn count_registered_between(&self, range: DateRange) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE registration_date >= $1 AND registration_date <= $2
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.max(0) as u64)
    }
}

impl ProductRepository for PostgresRepository<Product> {}

const SUPPLIER_SEARCH_COLUMNS: &[&str] = &[
    "company_name",
    "contact_person_first_name",
    "contact_person_last_name",
    "company_contact_no",
    "contact_person_phone",
    "email",
];

#[async_trait]
impl SupplierRepository for PostgresRepository<Supplier> {
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Supplier>> {
        let tail = format!(
            "WHERE {} ORDER BY id ASC",
            search_condition(SUPPLIER_SEARCH_COLUMNS)
        );
        self.fetch_where(&tail, Some(term.as_str())).await
    }

    async fn find_by_company_name(&self, fragment: &SearchTerm) -> Result<Vec<Supplier>> {
        let tail = format!(
            "WHERE {} ORDER BY id ASC",
            search_condition(&["company_name"])
        );
        self.fetch_where(&tail, Some(fragment.as_str())).await
    }
}

#[async_trait]
impl SupplierOrderRepository for PostgresRepository<SupplierOrderRecord> {
    async fn count_by_supplier(&self, supplier_id: RecordId) -> Result<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM supplier_orders WHERE supplier_id = $1")
                .bind(supplier_id.as_i64())
                .fetch_one(&self.pool)
                .await?;

        Ok(count.max(0) as u64)
    }
}

const EMPLOYEE_SEARCH_COLUMNS: &[&str] = &[
    "first_name",
    "last_name",
    "position",
    "department",
    "email",
    "phone",
];

#[async_trait]
impl EmployeeRepository for PostgresRepository<Employee> {
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Employee>> {
        let tail = format!(
            "WHERE {} ORDER BY id ASC",
            search_condition(EMPLOYEE_SEARCH_COLUMNS)
        );
        self.fetch_where(&tail, Some(term.as_str())).await
    }

    async fn find_all_ordered_by_salary(&self, direction: SortDirection) -> Result<Vec<Employee>> {
        let tail = format!("ORDER BY salary {}, id ASC", direction.as_sql());
        self.fetch_where(&tail, None).await
    }

    async fn find_by_department(&self, department: &str) -> Result<Vec<Employee>> {
        self.fetch_where("WHERE department = $1 ORDER BY id ASC", Some(department))
            .await
    }
}

/// PostgreSQL-backed entity store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL entity store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url` and wraps it in a store.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        tracing::info!(max_connections, "connected to PostgreSQL");
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }
}

impl EntityStore for PostgresStore {
    type Customers = PostgresRepository<Customer>;
    type Products = PostgresRepository<Product>;
    type Suppliers = PostgresRepository<Supplier>;
    type SupplierOrders = PostgresRepository<SupplierOrderRecord>;
    type Employees = PostgresRepository<Employee>;

    fn customers(&self) -> Self::Customers {
        PostgresRepository::new(self.pool.clone())
    }

    fn products(&self) -> Self::Products {
        PostgresRepository::new(self.pool.clone())
    }

    fn suppliers(&self) -> Self::Suppliers {
        PostgresRepository::new(self.pool.clone())
    }

    fn supplier_orders(&self) -> Self::SupplierOrders {
        PostgresRepository::new(self.pool.clone())
    }

    fn employees(&self) -> Self::Employees {
        PostgresRepository::new(self.pool.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_numbered_from_offset() {
        assert_eq!(placeholders(1, 3), "$1, $2, $3");
        assert_eq!(placeholders(2, 2), "$2, $3");
    }

    #[test]
    fn select_columns_leads_with_id() {
        assert_eq!(
            select_columns::<SupplierOrderRecord>(),
            "id, supplier_id, items, total"
        );
    }

    #[test]
    fn search_condition_reuses_first_parameter() {
        assert_eq!(
            search_condition(&["a", "b"]),
            "POSITION(LOWER($1) IN LOWER(a)) > 0 OR POSITION(LOWER($1) IN LOWER(b)) > 0"
        );
    }
}
