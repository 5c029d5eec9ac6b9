//! Domain layer for the management service.
//!
//! This crate provides the business services on top of the entity store:
//! - CrudHandler for the plain create/read/update/delete operations
//! - Customer, product and employee services with their queries
//! - Supplier service and the supplier order workflow, which keeps every
//!   order pointing at an existing supplier

pub mod crud;
pub mod customer;
pub mod employee;
pub mod error;
pub mod product;
pub mod supplier;

pub use crud::CrudHandler;
pub use customer::CustomerService;
pub use employee::EmployeeService;
pub use error::DomainError;
pub use product::ProductService;
pub use supplier::{NewSupplierOrder, SupplierOrder, SupplierOrderService, SupplierService};
