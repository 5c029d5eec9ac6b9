//! Product service.

use common::RecordId;
use entity_store::{Product, ProductRepository};

use crate::crud::CrudHandler;
use crate::error::DomainError;

/// Service for managing products.
pub struct ProductService<R: ProductRepository> {
    handler: CrudHandler<R, Product>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Creates a new product service with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            handler: CrudHandler::new(repository),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Product>, DomainError> {
        self.handler.get_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Product>, DomainError> {
        self.handler.get_by_id(id).await
    }

    #[tracing::instrument(skip(self, product))]
    pub async fn create(&self, product: Product) -> Result<Product, DomainError> {
        self.handler.create(product).await
    }

    #[tracing::instrument(skip(self, product))]
    pub async fn update(
        &self,
        id: RecordId,
        product: Product,
    ) -> Result<Option<Product>, DomainError> {
        self.handler.update(id, product).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> Result<(), DomainError> {
        self.handler.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use entity_store::InMemoryRepository;

    use super::*;

    #[tokio::test]
    async fn product_crud_round() {
        let service = ProductService::new(InMemoryRepository::new());

        let created = service
            .create(Product {
                name: "Basmati Rice".to_string(),
                category: "Grocery".to_string(),
                price: 4.5,
                quantity: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = service
            .update(
                id,
                Product {
                    quantity: 18,
                    ..created.clone()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.quantity, 18);
        assert_eq!(updated.name, "Basmati Rice");

        service.delete(id).await.unwrap();
        assert!(service.get_by_id(id).await.unwrap().is_none());
        assert!(service.get_all().await.unwrap().is_empty());
    }
}
