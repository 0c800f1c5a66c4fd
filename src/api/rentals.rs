//! Rental API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::rental::{
        CreateRental, Rental, RentalDetails, UpdateRentalDates, UpdateRentalStatus,
    },
};

/// List all rentals with customer and equipment, newest first
#[utoipa::path(
    get,
    path = "/noleggi",
    tag = "rentals",
    responses(
        (status = 200, description = "Rental list", body = Vec<RentalDetails>)
    )
)]
pub async fn list_rentals(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<RentalDetails>>> {
    let rentals = state.services.rentals.list().await?;
    Ok(Json(rentals))
}

/// Get rental by ID
#[utoipa::path(
    get,
    path = "/noleggi/{id}",
    tag = "rentals",
    params(("id" = i32, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental details", body = RentalDetails),
        (status = 404, description = "Rental not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_rental(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RentalDetails>> {
    let rental = state.services.rentals.get_by_id(id).await?;
    Ok(Json(rental))
}

/// Create a rental. The availability check and the insert are atomic;
/// a request exceeding the available quantity is rejected with 400.
#[utoipa::path(
    post,
    path = "/noleggi",
    tag = "rentals",
    request_body = CreateRental,
    responses(
        (status = 201, description = "Rental created", body = Rental),
        (status = 400, description = "Missing data or insufficient availability", body = crate::error::ErrorResponse),
        (status = 404, description = "Customer or equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_rental(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateRental>,
) -> AppResult<(StatusCode, Json<Rental>)> {
    let rental = state.services.rentals.create(data).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

/// Update a rental's dates; only ACTIVE rentals are editable
#[utoipa::path(
    put,
    path = "/noleggi/{id}",
    tag = "rentals",
    params(("id" = i32, Path, description = "Rental ID")),
    request_body = UpdateRentalDates,
    responses(
        (status = 200, description = "Rental updated", body = RentalDetails),
        (status = 400, description = "Invalid dates or rental no longer active", body = crate::error::ErrorResponse),
        (status = 404, description = "Rental not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_rental_dates(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRentalDates>,
) -> AppResult<Json<RentalDetails>> {
    let rental = state.services.rentals.update_dates(id, data).await?;
    Ok(Json(rental))
}

/// Transition a rental's status. Completing or cancelling also resets the
/// linked equipment to AVAILABLE, atomically.
#[utoipa::path(
    patch,
    path = "/noleggi/{id}",
    tag = "rentals",
    params(("id" = i32, Path, description = "Rental ID")),
    request_body = UpdateRentalStatus,
    responses(
        (status = 200, description = "Rental updated", body = RentalDetails),
        (status = 400, description = "Missing status", body = crate::error::ErrorResponse),
        (status = 404, description = "Rental not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_rental_status(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRentalStatus>,
) -> AppResult<Json<RentalDetails>> {
    let rental = state.services.rentals.update_status(id, data).await?;
    Ok(Json(rental))
}
