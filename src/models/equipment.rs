//! Equipment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::EquipmentStatus;
use super::rental::FutureRental;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    /// Total owned units
    pub quantity: i32,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
}

/// Validated equipment payload, ready for insertion
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub quantity: i32,
}

/// Full update request (PUT): name, category and quantity are required,
/// enforced in the service
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<EquipmentStatus>,
}

/// Partial update request (PATCH)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub status: Option<EquipmentStatus>,
}

/// Equipment decorated with effective availability for the list endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentWithAvailability {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub status: EquipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Units on hand right now (total minus currently overlapping rentals)
    pub available_quantity: i32,
    pub total_quantity: i32,
    /// Active rentals that have not started yet, for forward visibility
    pub future_rentals: Vec<FutureRental>,
}

impl EquipmentWithAvailability {
    pub fn new(equipment: Equipment, available_quantity: i32, future_rentals: Vec<FutureRental>) -> Self {
        Self {
            id: equipment.id,
            name: equipment.name,
            category: equipment.category,
            description: equipment.description,
            quantity: equipment.quantity,
            status: equipment.status,
            created_at: equipment.created_at,
            updated_at: equipment.updated_at,
            available_quantity,
            total_quantity: equipment.quantity,
            future_rentals,
        }
    }
}

/// Short equipment payload for the search endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentSearchResult {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub available_quantity: i32,
}

/// Equipment ranked by rental count for the dashboard
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopEquipmentEntry {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub rental_count: i64,
}
