//! API integration tests
//!
//! Run against a live server with a fresh database:
//! cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api";

/// Unique suffix so tests can run repeatedly against the same database
fn unique(label: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{} {}", label, nanos)
}

async fn create_customer(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/clienti", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create customer");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse customer");
    body["id"].as_i64().expect("No customer ID")
}

async fn create_equipment(client: &Client, name: &str, quantity: i64) -> i64 {
    let response = client
        .post(format!("{}/attrezzature", BASE_URL))
        .json(&json!({
            "name": name,
            "category": "Test",
            "quantity": quantity
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse equipment");
    body["id"].as_i64().expect("No equipment ID")
}

async fn create_rental(
    client: &Client,
    customer_id: i64,
    equipment_id: i64,
    quantity: i64,
) -> reqwest::Response {
    client
        .post(format!("{}/noleggi", BASE_URL))
        .json(&json!({
            "customerId": customer_id,
            "equipmentId": equipment_id,
            "quantity": quantity,
            "startDate": "2020-01-01"
        }))
        .send()
        .await
        .expect("Failed to send rental request")
}

async fn get_equipment_availability(client: &Client, equipment_id: i64) -> i64 {
    let response = client
        .get(format!("{}/attrezzature", BASE_URL))
        .send()
        .await
        .expect("Failed to list equipment");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse list");
    body.as_array()
        .expect("Not an array")
        .iter()
        .find(|item| item["id"].as_i64() == Some(equipment_id))
        .expect("Equipment not in list")["availableQuantity"]
        .as_i64()
        .expect("No availableQuantity")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unrented_equipment_is_fully_available() {
    let client = Client::new();
    let equipment_id = create_equipment(&client, &unique("Letto Ospedaliero"), 7).await;

    assert_eq!(get_equipment_availability(&client, equipment_id).await, 7);
}

#[tokio::test]
#[ignore]
async fn test_availability_scenario() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Mario Rossi")).await;
    let equipment_id = create_equipment(&client, &unique("Sedia a Rotelle"), 5).await;

    // First rental for 3 of 5 units succeeds
    let response = create_rental(&client, customer_id, equipment_id, 3).await;
    assert_eq!(response.status(), 201);

    assert_eq!(get_equipment_availability(&client, equipment_id).await, 2);

    // Second rental for 3 units exceeds the remaining 2
    let response = create_rental(&client, customer_id, equipment_id, 3).await;
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse error");
    let error = body["error"].as_str().expect("No error message");
    assert!(error.contains("Disponibili: 2"), "unexpected error: {}", error);
}

#[tokio::test]
#[ignore]
async fn test_rejected_rental_is_not_persisted() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Luca Bianchi")).await;
    let equipment_id = create_equipment(&client, &unique("Deambulatore"), 2).await;

    let response = create_rental(&client, customer_id, equipment_id, 3).await;
    assert_eq!(response.status(), 400);

    // Nothing must have been written for this customer
    let response = client
        .get(format!("{}/clienti/{}/noleggi", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to list customer rentals");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse rentals");
    assert_eq!(body.as_array().expect("Not an array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_completing_rental_resets_equipment_status() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Anna Verdi")).await;
    let equipment_id = create_equipment(&client, &unique("Sollevatore"), 1).await;

    let response = create_rental(&client, customer_id, equipment_id, 1).await;
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    let response = client
        .patch(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({ "status": "COMPLETED" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "COMPLETED");

    // Both writes are atomic: the equipment must be AVAILABLE again
    let response = client
        .get(format!("{}/attrezzature/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to get equipment");
    let equipment: Value = response.json().await.expect("Failed to parse equipment");
    assert_eq!(equipment["status"], "AVAILABLE");

    // And the completed rental no longer reserves stock
    assert_eq!(get_equipment_availability(&client, equipment_id).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_cancelled_rental_frees_stock() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Paolo Neri")).await;
    let equipment_id = create_equipment(&client, &unique("Concentratore"), 2).await;

    let response = create_rental(&client, customer_id, equipment_id, 2).await;
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    assert_eq!(get_equipment_availability(&client, equipment_id).await, 0);

    let response = client
        .patch(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({ "status": "CANCELLED" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    assert_eq!(get_equipment_availability(&client, equipment_id).await, 2);
}

#[tokio::test]
#[ignore]
async fn test_delete_customer_blocked_by_active_rental() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Giulia Russo")).await;
    let equipment_id = create_equipment(&client, &unique("Materasso"), 1).await;

    let response = create_rental(&client, customer_id, equipment_id, 1).await;
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    let response = client
        .delete(format!("{}/clienti/{}", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 400);

    // After completion the delete goes through
    let response = client
        .patch(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({ "status": "COMPLETED" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/clienti/{}", BASE_URL, customer_id))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
}

#[tokio::test]
#[ignore]
async fn test_delete_equipment_blocked_by_active_rental() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Franco Gallo")).await;
    let equipment_id = create_equipment(&client, &unique("Stampelle"), 1).await;

    let response = create_rental(&client, customer_id, equipment_id, 1).await;
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    let response = client
        .delete(format!("{}/attrezzature/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 400);

    let response = client
        .patch(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({ "status": "CANCELLED" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/attrezzature/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_end_date_must_follow_start_date() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Elena Costa")).await;
    let equipment_id = create_equipment(&client, &unique("Montascale"), 1).await;

    let response = client
        .post(format!("{}/noleggi", BASE_URL))
        .json(&json!({
            "customerId": customer_id,
            "equipmentId": equipment_id,
            "quantity": 1,
            "startDate": "2025-06-10",
            "endDate": "2025-06-01"
        }))
        .send()
        .await
        .expect("Failed to send rental request");
    assert_eq!(response.status(), 400);

    // Same rule on the date-update endpoint
    let response = create_rental(&client, customer_id, equipment_id, 1).await;
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    let response = client
        .put(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({
            "startDate": "2025-06-10",
            "endDate": "2025-06-10"
        }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_completed_rental_dates_are_frozen() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Marta Greco")).await;
    let equipment_id = create_equipment(&client, &unique("Lettino"), 1).await;

    let response = create_rental(&client, customer_id, equipment_id, 1).await;
    assert_eq!(response.status(), 201);
    let rental: Value = response.json().await.expect("Failed to parse rental");
    let rental_id = rental["id"].as_i64().expect("No rental ID");

    let response = client
        .patch(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({ "status": "COMPLETED" }))
        .send()
        .await
        .expect("Failed to update status");
    assert!(response.status().is_success());

    let response = client
        .put(format!("{}/noleggi/{}", BASE_URL, rental_id))
        .json(&json!({ "startDate": "2025-01-01" }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_customer_name_is_required() {
    let client = Client::new();

    let response = client
        .post(format!("{}/clienti", BASE_URL))
        .json(&json!({ "email": "nobody@example.com" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Il nome è obbligatorio");
}

#[tokio::test]
#[ignore]
async fn test_equipment_quantity_floor_while_rented() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Sergio Riva")).await;
    let name = unique("Comoda");
    let equipment_id = create_equipment(&client, &name, 5).await;

    let response = create_rental(&client, customer_id, equipment_id, 3).await;
    assert_eq!(response.status(), 201);

    // Reducing below the 3 rented units must fail
    let response = client
        .put(format!("{}/attrezzature/{}", BASE_URL, equipment_id))
        .json(&json!({
            "name": name,
            "category": "Test",
            "quantity": 2
        }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(response.status(), 400);

    // Reducing to exactly the rented total is allowed
    let response = client
        .put(format!("{}/attrezzature/{}", BASE_URL, equipment_id))
        .json(&json!({
            "name": name,
            "category": "Test",
            "quantity": 3
        }))
        .send()
        .await
        .expect("Failed to send update");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_equipment_status_frozen_while_rented() {
    let client = Client::new();
    let customer_id = create_customer(&client, &unique("Ada Villa")).await;
    let equipment_id = create_equipment(&client, &unique("Carrozzina"), 2).await;

    let response = create_rental(&client, customer_id, equipment_id, 1).await;
    assert_eq!(response.status(), 201);

    let response = client
        .patch(format!("{}/attrezzature/{}", BASE_URL, equipment_id))
        .json(&json!({ "status": "MAINTENANCE" }))
        .send()
        .await
        .expect("Failed to send update");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_customer_import_isolates_bad_rows() {
    let client = Client::new();

    let response = client
        .post(format!("{}/clienti/importa", BASE_URL))
        .json(&json!([
            { "nome": "Carla", "cognome": "Fontana", "email": "carla@example.com" },
            { "cognome": "SenzaNome" }
        ]))
        .send()
        .await
        .expect("Failed to send import");
    assert_eq!(response.status(), 207);

    let body: Value = response.json().await.expect("Failed to parse report");
    assert_eq!(body["successes"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["error"], "Il nome è obbligatorio");
}

#[tokio::test]
#[ignore]
async fn test_equipment_import_all_rows() {
    let client = Client::new();

    let response = client
        .post(format!("{}/attrezzature/importa", BASE_URL))
        .json(&json!([
            { "categoria": "Mobilità", "nome": unique("Deambulatore"), "quantita": 4 },
            { "categoria": "Letti", "nome": unique("Letto") }
        ]))
        .send()
        .await
        .expect("Failed to send import");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse report");
    assert_eq!(body["message"], "Importazione completata con successo");
    assert_eq!(body["successes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_empty_import_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/clienti/importa", BASE_URL))
        .json(&json!([]))
        .send()
        .await
        .expect("Failed to send import");
    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Dati non validi");
}

#[tokio::test]
#[ignore]
async fn test_dashboard_stats_shape() {
    let client = Client::new();

    let response = client
        .get(format!("{}/dashboard/stats", BASE_URL))
        .send()
        .await
        .expect("Failed to get stats");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse stats");
    assert!(body["totalClients"].is_number());
    assert!(body["totalEquipment"].is_number());
    assert!(body["activeRentals"].is_number());
    assert!(body["overdueRentals"].is_number());
}

#[tokio::test]
#[ignore]
async fn test_missing_rental_returns_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/noleggi/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    let body: Value = response.json().await.expect("Failed to parse error");
    assert_eq!(body["error"], "Noleggio non trovato");
}
