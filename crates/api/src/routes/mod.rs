//! HTTP route handlers and the state they share.

pub mod customers;
pub mod employees;
pub mod health;
pub mod metrics;
pub mod products;
pub mod supplier_orders;
pub mod suppliers;

use common::RecordId;
use domain::{
    CustomerService, EmployeeService, ProductService, SupplierOrderService, SupplierService,
};
use entity_store::EntityStore;
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: EntityStore> {
    pub customers: CustomerService<S::Customers>,
    pub products: ProductService<S::Products>,
    pub suppliers: SupplierService<S::Suppliers, S::SupplierOrders>,
    pub supplier_orders: SupplierOrderService<S::Suppliers, S::SupplierOrders>,
    pub employees: EmployeeService<S::Employees>,
}

impl<S: EntityStore> AppState<S> {
    /// Builds every service over the repositories of one store.
    pub fn new(store: &S) -> Self {
        Self {
            customers: CustomerService::new(store.customers()),
            products: ProductService::new(store.products()),
            suppliers: SupplierService::new(store.suppliers(), store.supplier_orders()),
            supplier_orders: SupplierOrderService::new(
                store.suppliers(),
                store.supplier_orders(),
            ),
            employees: EmployeeService::new(store.employees()),
        }
    }
}

/// Body returned by the CRUD delete endpoints.
#[derive(Serialize)]
pub struct DeletedResponse {
    pub message: String,
}

impl DeletedResponse {
    pub fn new(entity: &str) -> Self {
        Self {
            message: format!("{entity} deleted successfully"),
        }
    }
}

fn parse_record_id(id: &str) -> Result<RecordId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid ID format: {e}")))
}
