//! Bulk spreadsheet import service.
//!
//! Rows are processed independently: a row that fails validation or
//! insertion is reported back with its payload, and the rest of the batch
//! still goes through.

use crate::{
    error::{AppError, AppResult},
    models::{
        customer::NewCustomer,
        equipment::NewEquipment,
        import_report::{CustomerImportRow, EquipmentImportRow, ImportReport, ImportRowError},
    },
    repository::Repository,
};

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// User-facing message for a failed row; database details stay in the logs
fn row_error_message(err: &AppError) -> String {
    match err {
        AppError::Validation(msg) | AppError::NotFound(msg) => msg.clone(),
        _ => "Errore durante l'importazione".to_string(),
    }
}

#[derive(Clone)]
pub struct ImportsService {
    repository: Repository,
}

impl ImportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Import customer rows (clienti spreadsheet)
    pub async fn import_customers(&self, rows: Vec<CustomerImportRow>) -> AppResult<ImportReport> {
        if rows.is_empty() {
            return Err(AppError::Validation("Dati non validi".to_string()));
        }

        let mut successes = Vec::new();
        let mut errors = Vec::new();

        for row in rows {
            match self.import_customer_row(&row).await {
                Ok(customer) => successes.push(serde_json::to_value(customer).unwrap_or_default()),
                Err(err) => {
                    tracing::warn!("Customer import row failed: {}", err);
                    errors.push(ImportRowError {
                        error: row_error_message(&err),
                        row: serde_json::to_value(&row).unwrap_or_default(),
                    });
                }
            }
        }

        Ok(ImportReport::new(successes, errors))
    }

    async fn import_customer_row(
        &self,
        row: &CustomerImportRow,
    ) -> AppResult<crate::models::customer::Customer> {
        let nome = non_blank(&row.nome)
            .ok_or_else(|| AppError::Validation("Il nome è obbligatorio".to_string()))?;
        let name = match non_blank(&row.cognome) {
            Some(cognome) => format!("{} {}", nome, cognome),
            None => nome,
        };

        let customer = NewCustomer {
            name,
            email: non_blank(&row.email),
            phone: non_blank(&row.telefono),
            address: non_blank(&row.indirizzo),
        };
        self.repository.customers.create(&customer).await
    }

    /// Import equipment rows (attrezzature spreadsheet)
    pub async fn import_equipment(&self, rows: Vec<EquipmentImportRow>) -> AppResult<ImportReport> {
        if rows.is_empty() {
            return Err(AppError::Validation("Dati non validi".to_string()));
        }

        let mut successes = Vec::new();
        let mut errors = Vec::new();

        for row in rows {
            match self.import_equipment_row(&row).await {
                Ok(equipment) => {
                    successes.push(serde_json::to_value(equipment).unwrap_or_default())
                }
                Err(err) => {
                    tracing::warn!("Equipment import row failed: {}", err);
                    errors.push(ImportRowError {
                        error: row_error_message(&err),
                        row: serde_json::to_value(&row).unwrap_or_default(),
                    });
                }
            }
        }

        Ok(ImportReport::new(successes, errors))
    }

    async fn import_equipment_row(
        &self,
        row: &EquipmentImportRow,
    ) -> AppResult<crate::models::equipment::Equipment> {
        let (name, category) = match (non_blank(&row.nome), non_blank(&row.categoria)) {
            (Some(n), Some(c)) => (n, c),
            _ => {
                return Err(AppError::Validation(
                    "Nome e categoria sono obbligatori".to_string(),
                ))
            }
        };

        let equipment = NewEquipment {
            name,
            category,
            description: Some(String::new()),
            quantity: row.quantita.unwrap_or(1),
        };
        self.repository.equipment.create(&equipment).await
    }
}
