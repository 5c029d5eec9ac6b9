//! Domain error types.

use common::RecordId;
use entity_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the entity store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// An order referenced a supplier that does not exist.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(RecordId),

    /// The supplier order does not exist.
    #[error("Supplier order not found: {0}")]
    OrderNotFound(RecordId),

    /// The supplier still has orders and cannot be deleted.
    #[error("Supplier {supplier_id} is referenced by {order_count} order(s)")]
    SupplierInUse {
        supplier_id: RecordId,
        order_count: u64,
    },

    /// A stored order points at a supplier that no longer exists.
    #[error("Supplier order references missing supplier {supplier_id}")]
    DanglingSupplier { supplier_id: RecordId },
}

impl DomainError {
    /// Returns true for the errors that mean "the referenced or targeted
    /// record does not exist".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::SupplierNotFound(_) | DomainError::OrderNotFound(_)
        )
    }
}
