//! Dashboard aggregates service

use crate::{
    api::dashboard::DashboardStats,
    error::AppResult,
    models::{equipment::TopEquipmentEntry, rental::RentalDetails},
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Headline counters for the dashboard landing page
    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let total_clients = self.repository.customers.count().await?;
        let total_equipment = self.repository.equipment.count().await?;
        let active_rentals = self.repository.rentals.count_active().await?;
        let overdue_rentals = self.repository.rentals.count_overdue().await?;

        Ok(DashboardStats {
            total_clients,
            total_equipment,
            active_rentals,
            overdue_rentals,
        })
    }

    /// Five most recently created rentals
    pub async fn recent_rentals(&self) -> AppResult<Vec<RentalDetails>> {
        self.repository.rentals.recent(5).await
    }

    /// Five most rented equipment of all time
    pub async fn top_equipment(&self) -> AppResult<Vec<TopEquipmentEntry>> {
        self.repository.equipment.most_rented(5).await
    }
}
