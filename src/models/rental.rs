//! Rental model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::RentalStatus;

/// Rental record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: i32,
    pub customer_id: i32,
    pub equipment_id: i32,
    /// Units reserved by this rental
    pub quantity: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create rental request. Dates arrive as strings because the dashboard
/// sends both bare dates and full timestamps.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRental {
    pub customer_id: Option<i32>,
    pub equipment_id: Option<i32>,
    pub quantity: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Validated rental payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewRental {
    pub customer_id: i32,
    pub equipment_id: i32,
    pub quantity: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Date update request (PUT)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalDates {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Status transition request (PATCH)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalStatus {
    pub status: Option<RentalStatus>,
}

/// Customer fields nested in rental responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalCustomer {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}

/// Equipment fields nested in rental responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalEquipment {
    pub id: i32,
    pub name: String,
    pub category: String,
}

/// Rental with nested customer and equipment for display
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalDetails {
    pub id: i32,
    pub customer_id: i32,
    pub equipment_id: i32,
    pub quantity: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer: RentalCustomer,
    pub equipment: RentalEquipment,
}

/// Upcoming reservation attached to an equipment listing
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FutureRental {
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub quantity: i32,
}
