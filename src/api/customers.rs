//! Customer API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        customer::{CreateCustomer, Customer, CustomerShort},
        import_report::{CustomerImportRow, ImportReport},
        rental::RentalDetails,
    },
};

use super::SearchQuery;

/// Body returned by delete endpoints, matching the dashboard contract
#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

/// List all customers
#[utoipa::path(
    get,
    path = "/clienti",
    tag = "customers",
    responses(
        (status = 200, description = "Customer list", body = Vec<Customer>)
    )
)]
pub async fn list_customers(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Customer>>> {
    let customers = state.services.customers.list().await?;
    Ok(Json(customers))
}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/clienti/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer details", body = Customer),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.get_by_id(id).await?;
    Ok(Json(customer))
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/clienti",
    tag = "customers",
    request_body = CreateCustomer,
    responses(
        (status = 201, description = "Customer created", body = Customer),
        (status = 400, description = "Missing name or invalid email", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_customer(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<Customer>)> {
    let customer = state.services.customers.create(data).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Replace a customer
#[utoipa::path(
    put,
    path = "/clienti/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    request_body = CreateCustomer,
    responses(
        (status = 200, description = "Customer updated", body = Customer),
        (status = 400, description = "Missing name or invalid email", body = crate::error::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<CreateCustomer>,
) -> AppResult<Json<Customer>> {
    let customer = state.services.customers.update(id, data).await?;
    Ok(Json(customer))
}

/// Delete a customer (forbidden while it has active rentals)
#[utoipa::path(
    delete,
    path = "/clienti/{id}",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted", body = DeleteResponse),
        (status = 400, description = "Customer has active rentals", body = crate::error::ErrorResponse),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_customer(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.customers.delete(id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// Search customers by name, email or phone
#[utoipa::path(
    get,
    path = "/clienti/search",
    tag = "customers",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching customers", body = Vec<CustomerShort>)
    )
)]
pub async fn search_customers(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<CustomerShort>>> {
    let customers = state.services.customers.search(query.q.as_deref()).await?;
    Ok(Json(customers))
}

/// Rental history for a customer
#[utoipa::path(
    get,
    path = "/clienti/{id}/noleggi",
    tag = "customers",
    params(("id" = i32, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer's rentals, newest first", body = Vec<RentalDetails>),
        (status = 404, description = "Customer not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_customer_rentals(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<RentalDetails>>> {
    let rentals = state.services.customers.rentals(id).await?;
    Ok(Json(rentals))
}

/// Bulk-import customers from spreadsheet rows.
/// Returns 207 Multi-Status when some rows failed.
#[utoipa::path(
    post,
    path = "/clienti/importa",
    tag = "customers",
    request_body = Vec<CustomerImportRow>,
    responses(
        (status = 200, description = "All rows imported", body = ImportReport),
        (status = 207, description = "Some rows failed", body = ImportReport),
        (status = 400, description = "Empty or invalid payload", body = crate::error::ErrorResponse)
    )
)]
pub async fn import_customers(
    State(state): State<crate::AppState>,
    Json(rows): Json<Vec<CustomerImportRow>>,
) -> AppResult<(StatusCode, Json<ImportReport>)> {
    let report = state.services.imports.import_customers(rows).await?;
    let status = if report.is_partial() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };
    Ok((status, Json(report)))
}
