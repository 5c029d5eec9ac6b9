//! Customer service.

use chrono::{Local, NaiveDate};
use common::RecordId;
use entity_store::{Customer, CustomerRepository, DateRange};

use crate::crud::CrudHandler;
use crate::error::DomainError;

/// Service for managing customers.
pub struct CustomerService<R: CustomerRepository> {
    handler: CrudHandler<R, Customer>,
}

impl<R: CustomerRepository> CustomerService<R> {
    /// Creates a new customer service with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            handler: CrudHandler::new(repository),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Customer>, DomainError> {
        self.handler.get_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Customer>, DomainError> {
        self.handler.get_by_id(id).await
    }

    #[tracing::instrument(skip(self, customer))]
    pub async fn create(&self, customer: Customer) -> Result<Customer, DomainError> {
        self.handler.create(customer).await
    }

    /// Replaces a customer's details; None if the customer does not exist.
    #[tracing::instrument(skip(self, customer))]
    pub async fn update(
        &self,
        id: RecordId,
        customer: Customer,
    ) -> Result<Option<Customer>, DomainError> {
        self.handler.update(id, customer).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> Result<(), DomainError> {
        self.handler.delete(id).await
    }

    /// Counts customers registered in the current week (Monday to Sunday),
    /// evaluated against today's local date.
    pub async fn count_registered_this_week(&self) -> Result<u64, DomainError> {
        self.count_registered_in_week_of(Local::now().date_naive()).await
    }

    /// Counts customers registered in the week containing `date`.
    #[tracing::instrument(skip(self))]
    pub async fn count_registered_in_week_of(&self, date: NaiveDate) -> Result<u64, DomainError> {
        let week = DateRange::week_of(date);
        Ok(self
            .handler
            .repository()
            .count_registered_between(week)
            .await?)
    }
}
