//! Rental management service

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{EquipmentStatus, RentalStatus},
        rental::{
            CreateRental, NewRental, Rental, RentalDetails, UpdateRentalDates, UpdateRentalStatus,
        },
    },
    repository::Repository,
    services::availability::{self, Window},
};

/// Parse a dashboard date, either a full RFC 3339 timestamp or a bare
/// `YYYY-MM-DD` date taken as midnight UTC
fn parse_date(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.and_hms_opt(0, 0, 0).unwrap().and_utc())
        })
        .map_err(|_| AppError::Validation("Formato data non valido".to_string()))
}

#[derive(Clone)]
pub struct RentalsService {
    repository: Repository,
}

impl RentalsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<RentalDetails>> {
        self.repository.rentals.list_details().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<RentalDetails> {
        self.repository.rentals.get_details(id).await
    }

    /// Create a rental.
    ///
    /// The availability check and the insert run in one transaction holding
    /// a row lock on the equipment, so two concurrent requests for the last
    /// unit serialize and the loser is rejected.
    pub async fn create(&self, data: CreateRental) -> AppResult<Rental> {
        let (customer_id, equipment_id, quantity, start_date) = match (
            data.customer_id,
            data.equipment_id,
            data.quantity,
            data.start_date.as_deref(),
        ) {
            (Some(c), Some(e), Some(q), Some(s)) if q > 0 => (c, e, q, s),
            _ => {
                return Err(AppError::Validation(
                    "Dati mancanti o non validi".to_string(),
                ))
            }
        };

        let start_date = parse_date(start_date)?;
        let end_date = data.end_date.as_deref().map(parse_date).transpose()?;

        if let Some(end) = end_date {
            if end <= start_date {
                return Err(AppError::Validation(
                    "La data di fine deve essere successiva alla data di inizio".to_string(),
                ));
            }
        }

        // Verify customer exists
        self.repository.customers.get_by_id(customer_id).await?;

        let mut tx = self.repository.pool.begin().await?;

        let equipment = self
            .repository
            .equipment
            .get_for_update(&mut tx, equipment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Attrezzatura non trovata".to_string()))?;

        let active = self
            .repository
            .rentals
            .active_for_equipment(&mut tx, equipment_id)
            .await?;

        let window = Window::range(start_date, end_date);
        let reserved = availability::reserved_quantity(&active, &window);
        let available = availability::available_quantity(equipment.quantity, reserved);

        if quantity > available {
            return Err(AppError::Validation(format!(
                "Quantità richiesta non disponibile. Disponibili: {}",
                available
            )));
        }

        let rental = self
            .repository
            .rentals
            .insert(
                &mut tx,
                &NewRental {
                    customer_id,
                    equipment_id,
                    quantity,
                    start_date,
                    end_date,
                },
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            rental_id = rental.id,
            equipment_id,
            quantity,
            "Rental created"
        );

        Ok(rental)
    }

    /// Update a rental's dates; only ACTIVE rentals are editable
    pub async fn update_dates(&self, id: i32, data: UpdateRentalDates) -> AppResult<RentalDetails> {
        let start_date = data
            .start_date
            .as_deref()
            .ok_or_else(|| AppError::Validation("La data di inizio è obbligatoria".to_string()))?;
        let start_date = parse_date(start_date)?;
        let end_date = data.end_date.as_deref().map(parse_date).transpose()?;

        if let Some(end) = end_date {
            if end <= start_date {
                return Err(AppError::Validation(
                    "La data di fine deve essere successiva alla data di inizio".to_string(),
                ));
            }
        }

        let rental = self.repository.rentals.get_by_id(id).await?;
        if rental.status != RentalStatus::Active {
            return Err(AppError::Validation(
                "Non è possibile modificare un noleggio completato o cancellato".to_string(),
            ));
        }

        self.repository
            .rentals
            .update_dates(id, start_date, end_date)
            .await?;
        self.repository.rentals.get_details(id).await
    }

    /// Transition a rental's status.
    ///
    /// Leaving ACTIVE resets the linked equipment to AVAILABLE; both writes
    /// commit or roll back together.
    pub async fn update_status(
        &self,
        id: i32,
        data: UpdateRentalStatus,
    ) -> AppResult<RentalDetails> {
        let status = data
            .status
            .ok_or_else(|| AppError::Validation("Dati mancanti".to_string()))?;

        let mut tx = self.repository.pool.begin().await?;

        let rental = self
            .repository
            .rentals
            .set_status(&mut tx, id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Noleggio non trovato".to_string()))?;

        if matches!(status, RentalStatus::Completed | RentalStatus::Cancelled) {
            self.repository
                .equipment
                .set_status(&mut tx, rental.equipment_id, EquipmentStatus::Available)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(rental_id = id, %status, "Rental status updated");

        self.repository.rentals.get_details(id).await
    }
}
