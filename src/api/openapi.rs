//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{customers, dashboard, equipment, health, rentals};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Noleggio API",
        version = "1.0.0",
        description = "Medical Equipment Rental Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::search_customers,
        customers::get_customer_rentals,
        customers::import_customers,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::patch_equipment,
        equipment::delete_equipment,
        equipment::list_categories,
        equipment::search_equipment,
        equipment::import_equipment,
        // Rentals
        rentals::list_rentals,
        rentals::get_rental,
        rentals::create_rental,
        rentals::update_rental_dates,
        rentals::update_rental_status,
        // Dashboard
        dashboard::get_stats,
        dashboard::recent_rentals,
        dashboard::top_equipment,
    ),
    components(
        schemas(
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            crate::models::customer::CustomerShort,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::ReplaceEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::EquipmentWithAvailability,
            crate::models::equipment::EquipmentSearchResult,
            crate::models::equipment::TopEquipmentEntry,
            // Rentals
            crate::models::rental::Rental,
            crate::models::rental::RentalDetails,
            crate::models::rental::RentalCustomer,
            crate::models::rental::RentalEquipment,
            crate::models::rental::FutureRental,
            crate::models::rental::CreateRental,
            crate::models::rental::UpdateRentalDates,
            crate::models::rental::UpdateRentalStatus,
            // Enums
            crate::models::enums::EquipmentStatus,
            crate::models::enums::RentalStatus,
            // Imports
            crate::models::import_report::CustomerImportRow,
            crate::models::import_report::EquipmentImportRow,
            crate::models::import_report::ImportRowError,
            crate::models::import_report::ImportReport,
            // Dashboard
            dashboard::DashboardStats,
            // Misc
            customers::DeleteResponse,
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customers", description = "Customer management"),
        (name = "equipment", description = "Equipment inventory management"),
        (name = "rentals", description = "Rental management"),
        (name = "dashboard", description = "Dashboard aggregates")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
