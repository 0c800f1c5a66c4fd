//! Repository layer for database operations

pub mod customers;
pub mod equipment;
pub mod rentals;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub customers: customers::CustomersRepository,
    pub equipment: equipment::EquipmentRepository,
    pub rentals: rentals::RentalsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            customers: customers::CustomersRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            rentals: rentals::RentalsRepository::new(pool.clone()),
            pool,
        }
    }
}
