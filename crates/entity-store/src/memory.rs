use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{RecordId, SortDirection};
use tokio::sync::RwLock;

use crate::{
    Customer, DateRange, Employee, Entity, Product, Result, SearchTerm, Supplier,
    SupplierOrderRecord,
    store::{
        CustomerRepository, EmployeeRepository, EntityStore, ProductRepository, Repository,
        SupplierOrderRepository, SupplierRepository,
    },
};

struct Table<E> {
    rows: BTreeMap<RecordId, E>,
    last_id: i64,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

/// In-memory repository for one entity type.
///
/// Rows are kept in ID order and IDs are assigned from a sequence starting
/// at 1. Clones share the same table.
pub struct InMemoryRepository<E: Entity> {
    table: Arc<RwLock<Table<E>>>,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rows stored.
    pub async fn row_count(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Removes all rows. The ID sequence keeps counting.
    pub async fn clear(&self) {
        self.table.write().await.rows.clear();
    }

    async fn filtered(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        let table = self.table.read().await;
        table
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table::default())),
        }
    }
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
        }
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for InMemoryRepository<E> {
    async fn save(&self, mut entity: E) -> Result<E> {
        let mut table = self.table.write().await;

        let id = match entity.id() {
            Some(id) => {
                table.last_id = table.last_id.max(id.as_i64());
                id
            }
            None => {
                table.last_id += 1;
                RecordId::new(table.last_id)
            }
        };

        entity.set_id(id);
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<E>> {
        Ok(self.filtered(|_| true).await)
    }

    async fn exists_by_id(&self, id: RecordId) -> Result<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<()> {
        self.table.write().await.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for InMemoryRepository<Customer> {
    async fn count_registered_between(&self, range: DateRange) -> Result<u64> {
        let table = self.table.read().await;
        let count = table
            .rows
            .values()
            .filter_map(|c| c.registration_date)
            .filter(|date| range.contains(*date))
            .count();
        Ok(count as u64)
    }
}

impl ProductRepository for InMemoryRepository<Product> {}

#[async_trait]
impl SupplierRepository for InMemoryRepository<Supplier> {
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Supplier>> {
        Ok(self.filtered(|s| term.matches_any(s.search_fields())).await)
    }

    async fn find_by_company_name(&self, fragment: &SearchTerm) -> Result<Vec<Supplier>> {
        Ok(self.filtered(|s| fragment.matches(&s.company_name)).await)
    }
}

#[async_trait]
impl SupplierOrderRepository for InMemoryRepository<SupplierOrderRecord> {
    async fn count_by_supplier(&self, supplier_id: RecordId) -> Result<u64> {
        let table = self.table.read().await;
        let count = table
            .rows
            .values()
            .filter(|o| o.supplier_id == supplier_id)
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryRepository<Employee> {
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Employee>> {
        Ok(self.filtered(|e| term.matches_any(e.search_fields())).await)
    }

    async fn find_all_ordered_by_salary(&self, direction: SortDirection) -> Result<Vec<Employee>> {
        let mut employees = self.filtered(|_| true).await;
        // Stable sort keeps ID order among equal salaries.
        match direction {
            SortDirection::Ascending => {
                employees.sort_by(|a, b| a.salary.total_cmp(&b.salary));
            }
            SortDirection::Descending => {
                employees.sort_by(|a, b| b.salary.total_cmp(&a.salary));
            }
        }
        Ok(employees)
    }

    async fn find_by_department(&self, department: &str) -> Result<Vec<Employee>> {
        Ok(self.filtered(|e| e.department == department).await)
    }
}

/// In-memory entity store for testing and database-less runs.
///
/// Does not enforce the supplier foreign key; the domain services guard
/// supplier references themselves.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    customers: InMemoryRepository<Customer>,
    products: InMemoryRepository<Product>,
    suppliers: InMemoryRepository<Supplier>,
    supplier_orders: InMemoryRepository<SupplierOrderRecord>,
    employees: InMemoryRepository<Employee>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for InMemoryStore {
    type Customers = InMemoryRepository<Customer>;
    type Products = InMemoryRepository<Product>;
    type Suppliers = InMemoryRepository<Supplier>;
    type SupplierOrders = InMemoryRepository<SupplierOrderRecord>;
    type Employees = InMemoryRepository<Employee>;

    fn customers(&self) -> Self::Customers {
        self.customers.clone()
    }

    fn products(&self) -> Self::Products {
        self.products.clone()
    }

    fn suppliers(&self) -> Self::Suppliers {
        self.suppliers.clone()
    }

    fn supplier_orders(&self) -> Self::SupplierOrders {
        self.supplier_orders.clone()
    }

    fn employees(&self) -> Self::Employees {
        self.employees.clone()
    }
}
