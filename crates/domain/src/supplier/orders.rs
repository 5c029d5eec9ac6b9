//! Supplier order workflow.

use std::collections::HashMap;

use common::RecordId;
use entity_store::{
    StoreError, Supplier, SupplierOrderRecord, SupplierOrderRepository, SupplierRepository,
};

use super::{NewSupplierOrder, SupplierOrder};
use crate::error::DomainError;

/// Service for placing, listing and deleting supplier orders.
///
/// Orders only ever reach the store with a supplier that existed when the
/// order was placed, and are always returned with that supplier loaded.
pub struct SupplierOrderService<S, O>
where
    S: SupplierRepository,
    O: SupplierOrderRepository,
{
    suppliers: S,
    orders: O,
}

impl<S, O> SupplierOrderService<S, O>
where
    S: SupplierRepository,
    O: SupplierOrderRepository,
{
    /// Creates a new supplier order service.
    pub fn new(suppliers: S, orders: O) -> Self {
        Self { suppliers, orders }
    }

    /// Places an order with an existing supplier.
    ///
    /// Fails with `SupplierNotFound` if the supplier does not exist, in which
    /// case nothing is persisted. The returned order carries the stored
    /// supplier, not whatever the caller sent.
    #[tracing::instrument(skip(self, order), fields(supplier_id = %order.supplier_id))]
    pub async fn create_order(
        &self,
        order: NewSupplierOrder,
    ) -> Result<SupplierOrder, DomainError> {
        let supplier_id = order.supplier_id;

        let Some(supplier) = self.suppliers.find_by_id(supplier_id).await? else {
            return Err(self.reject(supplier_id));
        };

        let record = SupplierOrderRecord::new(supplier_id, order.items, order.total);
        let saved = match self.orders.save(record).await {
            Ok(saved) => saved,
            // The supplier was deleted between the lookup and the insert.
            Err(StoreError::ForeignKeyViolation { .. }) => return Err(self.reject(supplier_id)),
            Err(e) => return Err(e.into()),
        };

        metrics::counter!("supplier_orders_created_total").increment(1);
        tracing::info!(order_id = ?saved.id, %supplier_id, "supplier order created");

        Ok(SupplierOrder::from_record(saved, supplier))
    }

    /// Deletes an order.
    ///
    /// Fails with `OrderNotFound` if no order has this ID.
    #[tracing::instrument(skip(self))]
    pub async fn delete_order(&self, id: RecordId) -> Result<(), DomainError> {
        if !self.orders.exists_by_id(id).await? {
            tracing::warn!(order_id = %id, "supplier order not found");
            return Err(DomainError::OrderNotFound(id));
        }

        self.orders.delete_by_id(id).await?;

        metrics::counter!("supplier_orders_deleted_total").increment(1);
        tracing::info!(order_id = %id, "supplier order deleted");
        Ok(())
    }

    /// Returns every order with its supplier resolved.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_orders(&self) -> Result<Vec<SupplierOrder>, DomainError> {
        let records = self.orders.find_all().await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let suppliers: HashMap<RecordId, Supplier> = self
            .suppliers
            .find_all()
            .await?
            .into_iter()
            .filter_map(|s| s.id.map(|id| (id, s)))
            .collect();

        records
            .into_iter()
            .map(|record| {
                let supplier = suppliers.get(&record.supplier_id).cloned().ok_or(
                    DomainError::DanglingSupplier {
                        supplier_id: record.supplier_id,
                    },
                )?;
                Ok(SupplierOrder::from_record(record, supplier))
            })
            .collect()
    }

    fn reject(&self, supplier_id: RecordId) -> DomainError {
        metrics::counter!("supplier_order_rejections_total").increment(1);
        tracing::warn!(%supplier_id, "supplier not found, order rejected");
        DomainError::SupplierNotFound(supplier_id)
    }
}
