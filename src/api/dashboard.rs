//! Dashboard endpoints

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{equipment::TopEquipmentEntry, rental::RentalDetails},
};

/// Headline counters for the dashboard landing page
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Total number of customers
    pub total_clients: i64,
    /// Total number of equipment records
    pub total_equipment: i64,
    /// Rentals currently in ACTIVE status
    pub active_rentals: i64,
    /// ACTIVE rentals past their end date
    pub overdue_rentals: i64,
}

/// Get dashboard statistics
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    responses(
        (status = 200, description = "Dashboard statistics", body = DashboardStats)
    )
)]
pub async fn get_stats(State(state): State<crate::AppState>) -> AppResult<Json<DashboardStats>> {
    let stats = state.services.dashboard.stats().await?;
    Ok(Json(stats))
}

/// Five most recently created rentals
#[utoipa::path(
    get,
    path = "/dashboard/recent-rentals",
    tag = "dashboard",
    responses(
        (status = 200, description = "Recent rentals", body = Vec<RentalDetails>)
    )
)]
pub async fn recent_rentals(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<RentalDetails>>> {
    let rentals = state.services.dashboard.recent_rentals().await?;
    Ok(Json(rentals))
}

/// Five most rented equipment of all time
#[utoipa::path(
    get,
    path = "/dashboard/top-equipment",
    tag = "dashboard",
    responses(
        (status = 200, description = "Most rented equipment", body = Vec<TopEquipmentEntry>)
    )
)]
pub async fn top_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<TopEquipmentEntry>>> {
    let equipment = state.services.dashboard.top_equipment().await?;
    Ok(Json(equipment))
}
