use async_trait::async_trait;
use common::{RecordId, SortDirection};

use crate::{
    Customer, DateRange, Employee, Entity, Product, Result, SearchTerm, Supplier,
    SupplierOrderRecord,
};

/// Core persistence contract shared by every entity.
///
/// All implementations must be thread-safe (Send + Sync). Each call is a
/// single statement; there is no transaction spanning calls.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Persists an entity.
    ///
    /// An entity without an ID is inserted and receives a fresh one. An
    /// entity with an ID replaces the row stored under that ID.
    async fn save(&self, entity: E) -> Result<E>;

    /// Retrieves an entity by ID.
    ///
    /// Returns None if no row has that ID.
    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>>;

    /// Retrieves every stored entity.
    async fn find_all(&self) -> Result<Vec<E>>;

    /// Returns true if a row with this ID exists.
    async fn exists_by_id(&self, id: RecordId) -> Result<bool>;

    /// Deletes the row with this ID.
    ///
    /// Deleting an ID that is not stored is a no-op.
    async fn delete_by_id(&self, id: RecordId) -> Result<()>;
}

/// Customer persistence with registration-date queries.
#[async_trait]
pub trait CustomerRepository: Repository<Customer> {
    /// Counts customers whose registration date falls within `range`.
    async fn count_registered_between(&self, range: DateRange) -> Result<u64>;
}

/// Product persistence.
pub trait ProductRepository: Repository<Product> {}

/// Supplier persistence with free-text search.
#[async_trait]
pub trait SupplierRepository: Repository<Supplier> {
    /// Returns suppliers where any searchable field contains `term`.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Supplier>>;

    /// Returns suppliers whose company name contains `fragment`.
    async fn find_by_company_name(&self, fragment: &SearchTerm) -> Result<Vec<Supplier>>;
}

/// Supplier order persistence.
#[async_trait]
pub trait SupplierOrderRepository: Repository<SupplierOrderRecord> {
    /// Counts orders referencing the given supplier.
    async fn count_by_supplier(&self, supplier_id: RecordId) -> Result<u64>;
}

/// Employee persistence with search and ordered listings.
#[async_trait]
pub trait EmployeeRepository: Repository<Employee> {
    /// Returns employees where any searchable field contains `term`.
    async fn search(&self, term: &SearchTerm) -> Result<Vec<Employee>>;

    /// Returns all employees ordered by salary.
    ///
    /// Employees with equal salaries keep ID order in both directions.
    async fn find_all_ordered_by_salary(&self, direction: SortDirection) -> Result<Vec<Employee>>;

    /// Returns employees working in exactly this department.
    async fn find_by_department(&self, department: &str) -> Result<Vec<Employee>>;
}

/// A storage backend: one repository handle per entity.
///
/// Handles are cheap to clone and share the backend's state, so services
/// can each own the repositories they need.
pub trait EntityStore: Clone + Send + Sync + 'static {
    type Customers: CustomerRepository + Clone + 'static;
    type Products: ProductRepository + Clone + 'static;
    type Suppliers: SupplierRepository + Clone + 'static;
    type SupplierOrders: SupplierOrderRepository + Clone + 'static;
    type Employees: EmployeeRepository + Clone + 'static;

    fn customers(&self) -> Self::Customers;
    fn products(&self) -> Self::Products;
    fn suppliers(&self) -> Self::Suppliers;
    fn supplier_orders(&self) -> Self::SupplierOrders;
    fn employees(&self) -> Self::Employees;
}
