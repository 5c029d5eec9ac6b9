//! Supplier service.

use common::RecordId;
use entity_store::{SearchTerm, StoreError, Supplier, SupplierOrderRepository, SupplierRepository};

use crate::crud::CrudHandler;
use crate::error::DomainError;

/// Service for managing suppliers.
///
/// Holds the order repository as well, so that suppliers with orders are
/// never deleted out from under them.
pub struct SupplierService<S, O>
where
    S: SupplierRepository,
    O: SupplierOrderRepository,
{
    handler: CrudHandler<S, Supplier>,
    orders: O,
}

impl<S, O> SupplierService<S, O>
where
    S: SupplierRepository,
    O: SupplierOrderRepository,
{
    /// Creates a new supplier service.
    pub fn new(suppliers: S, orders: O) -> Self {
        Self {
            handler: CrudHandler::new(suppliers),
            orders,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Supplier>, DomainError> {
        self.handler.get_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Supplier>, DomainError> {
        self.handler.get_by_id(id).await
    }

    #[tracing::instrument(skip(self, supplier))]
    pub async fn create(&self, supplier: Supplier) -> Result<Supplier, DomainError> {
        self.handler.create(supplier).await
    }

    /// Replaces a supplier's details; None if the supplier does not exist.
    #[tracing::instrument(skip(self, supplier))]
    pub async fn update(
        &self,
        id: RecordId,
        supplier: Supplier,
    ) -> Result<Option<Supplier>, DomainError> {
        self.handler.update(id, supplier).await
    }

    /// Deletes a supplier.
    ///
    /// Fails with `SupplierInUse` while any order references the supplier.
    /// Deleting a supplier that does not exist is a no-op.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> Result<(), DomainError> {
        let order_count = self.orders.count_by_supplier(id).await?;
        if order_count > 0 {
            return Err(self.in_use(id, order_count));
        }

        match self.handler.repository().delete_by_id(id).await {
            Ok(()) => {
                tracing::info!(supplier_id = %id, "supplier deleted");
                Ok(())
            }
            // An order was placed after the count was taken.
            Err(StoreError::ForeignKeyViolation { .. }) => {
                let order_count = self.orders.count_by_supplier(id).await?;
                Err(self.in_use(id, order_count))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Finds suppliers whose company name, contact names, phone numbers or
    /// email contain `term`, ignoring case. An empty term returns all.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Supplier>, DomainError> {
        Ok(self
            .handler
            .repository()
            .search(&SearchTerm::new(term))
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_company_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<Supplier>, DomainError> {
        Ok(self
            .handler
            .repository()
            .find_by_company_name(&SearchTerm::new(fragment))
            .await?)
    }

    fn in_use(&self, supplier_id: RecordId, order_count: u64) -> DomainError {
        metrics::counter!("supplier_delete_conflicts_total").increment(1);
        tracing::warn!(%supplier_id, order_count, "supplier has orders, delete rejected");
        DomainError::SupplierInUse {
            supplier_id,
            order_count,
        }
    }
}
