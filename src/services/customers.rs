//! Customer management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        customer::{CreateCustomer, Customer, CustomerShort, NewCustomer},
        rental::RentalDetails,
    },
    repository::Repository,
};

/// Turn blank strings from dashboard forms into NULLs
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate a customer payload and produce the insertable form
    fn validated(data: CreateCustomer) -> AppResult<NewCustomer> {
        let name = data
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("Il nome è obbligatorio".to_string()))?
            .to_string();

        let payload = CreateCustomer {
            name: Some(name.clone()),
            email: normalize(data.email),
            phone: normalize(data.phone),
            address: normalize(data.address),
        };
        payload
            .validate()
            .map_err(|_| AppError::Validation("Email non valida".to_string()))?;

        Ok(NewCustomer {
            name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
        })
    }

    pub async fn list(&self) -> AppResult<Vec<Customer>> {
        self.repository.customers.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        let customer = Self::validated(data)?;
        self.repository.customers.create(&customer).await
    }

    pub async fn update(&self, id: i32, data: CreateCustomer) -> AppResult<Customer> {
        let customer = Self::validated(data)?;
        self.repository.customers.update(id, &customer).await
    }

    /// Delete a customer; forbidden while any ACTIVE rental references it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.customers.get_by_id(id).await?;

        let active = self.repository.customers.count_active_rentals(id).await?;
        if active > 0 {
            return Err(AppError::Validation(
                "Impossibile eliminare un cliente con noleggi attivi".to_string(),
            ));
        }

        self.repository.customers.delete(id).await
    }

    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<CustomerShort>> {
        self.repository.customers.search(query).await
    }

    /// Rental history for a customer
    pub async fn rentals(&self, id: i32) -> AppResult<Vec<RentalDetails>> {
        // Verify customer exists
        self.repository.customers.get_by_id(id).await?;
        self.repository.rentals.for_customer(id).await
    }
}
