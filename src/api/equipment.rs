//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        equipment::{
            CreateEquipment, Equipment, EquipmentSearchResult, EquipmentWithAvailability,
            ReplaceEquipment, UpdateEquipment,
        },
        import_report::{EquipmentImportRow, ImportReport},
    },
};

use super::SearchQuery;
use crate::api::customers::DeleteResponse;

/// List all equipment with effective availability and upcoming reservations
#[utoipa::path(
    get,
    path = "/attrezzature",
    tag = "equipment",
    responses(
        (status = 200, description = "Equipment list with availability", body = Vec<EquipmentWithAvailability>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<EquipmentWithAvailability>>> {
    let equipment = state.services.equipment.list_with_availability().await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/attrezzature/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/attrezzature",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Missing name or category", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    let equipment = state.services.equipment.create(data).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Replace equipment (PUT). Status changes and quantity reductions are
/// rejected while the equipment has active rentals.
#[utoipa::path(
    put,
    path = "/attrezzature/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = ReplaceEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Validation failed or rental guard hit", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<ReplaceEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.replace(id, data).await?;
    Ok(Json(equipment))
}

/// Partially update equipment (PATCH), same status guard as PUT
#[utoipa::path(
    patch,
    path = "/attrezzature/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 400, description = "Status change blocked by active rentals", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn patch_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, data).await?;
    Ok(Json(equipment))
}

/// Delete equipment (forbidden while it has active rentals)
#[utoipa::path(
    delete,
    path = "/attrezzature/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted", body = DeleteResponse),
        (status = 400, description = "Equipment has active rentals", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<DeleteResponse>> {
    state.services.equipment.delete(id).await?;
    Ok(Json(DeleteResponse { success: true }))
}

/// Distinct equipment categories
#[utoipa::path(
    get,
    path = "/attrezzature/categorie",
    tag = "equipment",
    responses(
        (status = 200, description = "Sorted category names", body = Vec<String>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<String>>> {
    let categories = state.services.equipment.categories().await?;
    Ok(Json(categories))
}

/// Search equipment by name, with current availability
#[utoipa::path(
    get,
    path = "/attrezzature/search",
    tag = "equipment",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching equipment", body = Vec<EquipmentSearchResult>)
    )
)]
pub async fn search_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<EquipmentSearchResult>>> {
    let results = state.services.equipment.search(query.q.as_deref()).await?;
    Ok(Json(results))
}

/// Bulk-import equipment from spreadsheet rows.
/// Returns 207 Multi-Status when some rows failed.
#[utoipa::path(
    post,
    path = "/attrezzature/importa",
    tag = "equipment",
    request_body = Vec<EquipmentImportRow>,
    responses(
        (status = 200, description = "All rows imported", body = ImportReport),
        (status = 207, description = "Some rows failed", body = ImportReport),
        (status = 400, description = "Empty or invalid payload", body = crate::error::ErrorResponse)
    )
)]
pub async fn import_equipment(
    State(state): State<crate::AppState>,
    Json(rows): Json<Vec<EquipmentImportRow>>,
) -> AppResult<(StatusCode, Json<ImportReport>)> {
    let report = state.services.imports.import_equipment(rows).await?;
    let status = if report.is_partial() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    };
    Ok((status, Json(report)))
}
