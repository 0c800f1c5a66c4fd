//! API handlers for Noleggio REST endpoints

pub mod customers;
pub mod dashboard;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod rentals;

use serde::Deserialize;
use utoipa::IntoParams;

/// Query string for the search endpoints (`?q=`)
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Search text; filtering kicks in from two characters
    pub q: Option<String>,
}
