//! Business logic services

pub mod availability;
pub mod customers;
pub mod dashboard;
pub mod equipment;
pub mod imports;
pub mod rentals;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub customers: customers::CustomersService,
    pub equipment: equipment::EquipmentService,
    pub rentals: rentals::RentalsService,
    pub dashboard: dashboard::DashboardService,
    pub imports: imports::ImportsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            customers: customers::CustomersService::new(repository.clone()),
            equipment: equipment::EquipmentService::new(repository.clone()),
            rentals: rentals::RentalsService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            imports: imports::ImportsService::new(repository),
        }
    }
}
