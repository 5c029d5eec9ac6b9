//! Suppliers and the orders placed with them.

mod orders;
mod service;

pub use orders::SupplierOrderService;
pub use service::SupplierService;

use common::RecordId;
use entity_store::{Supplier, SupplierOrderRecord};
use serde::Serialize;

/// A supplier order with its supplier resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrder {
    pub id: Option<RecordId>,
    pub supplier: Supplier,
    pub items: String,
    pub total: Option<f64>,
}

impl SupplierOrder {
    fn from_record(record: SupplierOrderRecord, supplier: Supplier) -> Self {
        Self {
            id: record.id,
            supplier,
            items: record.items,
            total: record.total,
        }
    }
}

/// Request to place a new order with an existing supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplierOrder {
    /// Supplier the order is placed with; must already exist.
    pub supplier_id: RecordId,
    /// Serialized line items, stored verbatim.
    pub items: String,
    pub total: Option<f64>,
}

impl NewSupplierOrder {
    /// Creates a new order request.
    pub fn new(supplier_id: RecordId, items: impl Into<String>, total: Option<f64>) -> Self {
        Self {
            supplier_id,
            items: items.into(),
            total,
        }
    }
}
