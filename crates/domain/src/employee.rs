//! Employee service.

use common::{RecordId, SortDirection};
use entity_store::{Employee, EmployeeRepository, SearchTerm};

use crate::crud::CrudHandler;
use crate::error::DomainError;

/// Service for managing employees.
pub struct EmployeeService<R: EmployeeRepository> {
    handler: CrudHandler<R, Employee>,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a new employee service with the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            handler: CrudHandler::new(repository),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Employee>, DomainError> {
        self.handler.get_all().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecordId) -> Result<Option<Employee>, DomainError> {
        self.handler.get_by_id(id).await
    }

    #[tracing::instrument(skip(self, employee))]
    pub async fn create(&self, employee: Employee) -> Result<Employee, DomainError> {
        self.handler.create(employee).await
    }

    /// Updates an employee's details.
    ///
    /// The hire date is not editable and keeps its stored value. Returns
    /// None if the employee does not exist.
    #[tracing::instrument(skip(self, employee))]
    pub async fn update(
        &self,
        id: RecordId,
        mut employee: Employee,
    ) -> Result<Option<Employee>, DomainError> {
        let repository = self.handler.repository();
        let Some(existing) = repository.find_by_id(id).await? else {
            return Ok(None);
        };

        employee.id = Some(id);
        employee.hire_date = existing.hire_date;
        Ok(Some(repository.save(employee).await?))
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RecordId) -> Result<(), DomainError> {
        self.handler.delete(id).await
    }

    /// Finds employees whose name, position, department, email or phone
    /// contains `term`, ignoring case.
    #[tracing::instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<Employee>, DomainError> {
        Ok(self
            .handler
            .repository()
            .search(&SearchTerm::new(term))
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_by_salary(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<Employee>, DomainError> {
        Ok(self
            .handler
            .repository()
            .find_all_ordered_by_salary(direction)
            .await?)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_department(&self, department: &str) -> Result<Vec<Employee>, DomainError> {
        Ok(self
            .handler
            .repository()
            .find_by_department(department)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use entity_store::InMemoryRepository;

    use super::*;

    fn service() -> EmployeeService<InMemoryRepository<Employee>> {
        EmployeeService::new(InMemoryRepository::new())
    }

    #[tokio::test]
    async fn update_keeps_stored_hire_date() {
        let service = service();
        let hired = NaiveDate::from_ymd_opt(2020, 1, 15);
        let created = service
            .create(Employee {
                first_name: "Nimal".to_string(),
                hire_date: hired,
                salary: 1000.0,
                ..Default::default()
            })
            .await
            .unwrap();
        let id = created.id.unwrap();

        let updated = service
            .update(
                id,
                Employee {
                    first_name: "Nimal".to_string(),
                    hire_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                    salary: 1500.0,
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.hire_date, hired);
        assert_eq!(updated.salary, 1500.0);
    }

    #[tokio::test]
    async fn update_missing_employee_returns_none() {
        let service = service();
        let result = service
            .update(RecordId::new(3), Employee::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let service = service();
        service
            .create(Employee {
                last_name: "Smith".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        service.create(Employee::default()).await.unwrap();

        let upper = service.search("SMITH").await.unwrap();
        let lower = service.search("smith").await.unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(service.search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn list_by_salary_descending() {
        let service = service();
        for salary in [1200.0, 900.0, 3000.0] {
            service
                .create(Employee {
                    salary,
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        let salaries: Vec<f64> = service
            .list_by_salary(SortDirection::Descending)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.salary)
            .collect();
        assert_eq!(salaries, [3000.0, 1200.0, 900.0]);
    }
}
