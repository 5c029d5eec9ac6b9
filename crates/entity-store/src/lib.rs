//! Entity store for the management service.
//!
//! Provides the persisted entity shapes, one repository trait per entity,
//! the query types used by searches and date-range counts, and two
//! backends: an in-memory store and a PostgreSQL store.

pub mod error;
pub mod lenient;
pub mod memory;
pub mod model;
pub mod postgres;
pub mod query;
pub mod store;

pub use common::{RecordId, SortDirection};
pub use error::{Result, StoreError};
pub use memory::{InMemoryRepository, InMemoryStore};
pub use model::{Customer, Employee, Entity, Product, Supplier, SupplierOrderRecord};
pub use postgres::{PgEntity, PostgresRepository, PostgresStore};
pub use query::{DateRange, SearchTerm};
pub use store::{
    CustomerRepository, EmployeeRepository, EntityStore, ProductRepository, Repository,
    SupplierOrderRepository, SupplierRepository,
};
