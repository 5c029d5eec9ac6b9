//! Generic create/read/update/delete handling shared by the entity services.

use std::marker::PhantomData;

use common::RecordId;
use entity_store::{Entity, Repository};

use crate::error::DomainError;

/// Handler for the plain CRUD operations of one entity type.
///
/// Absence is not an error here: lookups and updates of missing rows
/// return `None`, and deleting a missing row succeeds.
pub struct CrudHandler<R, E>
where
    R: Repository<E>,
    E: Entity,
{
    repository: R,
    _entity: PhantomData<fn() -> E>,
}

impl<R, E> CrudHandler<R, E>
where
    R: Repository<E>,
    E: Entity,
{
    /// Creates a new handler over the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _entity: PhantomData,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Returns every stored entity.
    pub async fn get_all(&self) -> Result<Vec<E>, DomainError> {
        Ok(self.repository.find_all().await?)
    }

    /// Returns the entity with this ID, if any.
    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<E>, DomainError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Inserts a new entity. Any ID carried by the payload is ignored.
    pub async fn create(&self, mut entity: E) -> Result<E, DomainError> {
        entity.clear_id();
        let saved = self.repository.save(entity).await?;
        tracing::info!(table = E::TABLE, id = ?saved.id(), "created");
        Ok(saved)
    }

    /// Replaces the entity stored under `id`.
    ///
    /// Returns None without writing if no such entity exists.
    pub async fn update(&self, id: RecordId, mut entity: E) -> Result<Option<E>, DomainError> {
        if !self.repository.exists_by_id(id).await? {
            return Ok(None);
        }
        entity.set_id(id);
        let saved = self.repository.save(entity).await?;
        tracing::info!(table = E::TABLE, %id, "updated");
        Ok(Some(saved))
    }

    /// Deletes the entity stored under `id`; a missing entity is a no-op.
    pub async fn delete(&self, id: RecordId) -> Result<(), DomainError> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(table = E::TABLE, %id, "deleted");
        Ok(())
    }
}
