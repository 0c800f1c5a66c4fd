//! Bulk-import row shapes and per-row outcome reporting.
//!
//! The dashboard uploads spreadsheet rows as JSON arrays; rows are processed
//! independently so one bad row never aborts the batch. Column names are the
//! Italian spreadsheet headers.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Customer import row (clienti spreadsheet)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerImportRow {
    pub nome: Option<String>,
    pub cognome: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub indirizzo: Option<String>,
}

/// Equipment import row (attrezzature spreadsheet)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EquipmentImportRow {
    pub categoria: Option<String>,
    pub nome: Option<String>,
    pub quantita: Option<i32>,
}

/// A row that failed, echoed back for the dashboard to display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportRowError {
    pub error: String,
    pub row: serde_json::Value,
}

/// Report returned by the bulk-import endpoints.
/// Partial success is surfaced as HTTP 207 Multi-Status.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub message: String,
    pub successes: Vec<serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    pub fn new(successes: Vec<serde_json::Value>, errors: Vec<ImportRowError>) -> Self {
        let message = if errors.is_empty() {
            "Importazione completata con successo".to_string()
        } else {
            format!(
                "Importazione completata con {} successi e {} errori",
                successes.len(),
                errors.len()
            )
        };
        Self { message, successes, errors }
    }

    /// Whether any row failed (drives the 207 Multi-Status response)
    pub fn is_partial(&self) -> bool {
        !self.errors.is_empty()
    }
}
