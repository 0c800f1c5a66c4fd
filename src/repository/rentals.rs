//! Rentals repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, Pool, Postgres, Row, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::RentalStatus,
        rental::{NewRental, Rental, RentalCustomer, RentalDetails, RentalEquipment},
    },
};

const DETAILS_SELECT: &str = r#"
    SELECT r.id, r.customer_id, r.equipment_id, r.quantity,
           r.start_date, r.end_date, r.status, r.created_at, r.updated_at,
           c.name AS customer_name, c.email AS customer_email,
           e.name AS equipment_name, e.category AS equipment_category
    FROM rentals r
    JOIN customers c ON r.customer_id = c.id
    JOIN equipment e ON r.equipment_id = e.id
"#;

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
}

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn details_from_row(row: &PgRow) -> RentalDetails {
        RentalDetails {
            id: row.get("id"),
            customer_id: row.get("customer_id"),
            equipment_id: row.get("equipment_id"),
            quantity: row.get("quantity"),
            start_date: row.get("start_date"),
            end_date: row.get("end_date"),
            status: row.get("status"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
            customer: RentalCustomer {
                id: row.get("customer_id"),
                name: row.get("customer_name"),
                email: row.get("customer_email"),
            },
            equipment: RentalEquipment {
                id: row.get("equipment_id"),
                name: row.get("equipment_name"),
                category: row.get("equipment_category"),
            },
        }
    }

    /// Get rental by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Rental> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Noleggio non trovato".to_string()))
    }

    /// List all rentals with customer and equipment, newest start first
    pub async fn list_details(&self) -> AppResult<Vec<RentalDetails>> {
        let query = format!("{} ORDER BY r.start_date DESC", DETAILS_SELECT);
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(Self::details_from_row).collect())
    }

    /// Get one rental with customer and equipment
    pub async fn get_details(&self, id: i32) -> AppResult<RentalDetails> {
        let query = format!("{} WHERE r.id = $1", DETAILS_SELECT);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Noleggio non trovato".to_string()))?;
        Ok(Self::details_from_row(&row))
    }

    /// Rental history for a customer, newest start first
    pub async fn for_customer(&self, customer_id: i32) -> AppResult<Vec<RentalDetails>> {
        let query = format!(
            "{} WHERE r.customer_id = $1 ORDER BY r.start_date DESC",
            DETAILS_SELECT
        );
        let rows = sqlx::query(&query)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(Self::details_from_row).collect())
    }

    /// Most recently created rentals (for the dashboard)
    pub async fn recent(&self, limit: i64) -> AppResult<Vec<RentalDetails>> {
        let query = format!("{} ORDER BY r.created_at DESC LIMIT $1", DETAILS_SELECT);
        let rows = sqlx::query(&query)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(Self::details_from_row).collect())
    }

    /// All ACTIVE rentals. Date filtering happens in the availability
    /// module so every caller shares one overlap definition.
    pub async fn active(&self) -> AppResult<Vec<Rental>> {
        let rows = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE status = 'ACTIVE'")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// ACTIVE rentals for a set of equipment ids
    pub async fn active_for_equipment_ids(&self, ids: &[i32]) -> AppResult<Vec<Rental>> {
        let rows = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE status = 'ACTIVE' AND equipment_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// ACTIVE rentals for one equipment, read inside the creation transaction
    pub async fn active_for_equipment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment_id: i32,
    ) -> AppResult<Vec<Rental>> {
        let rows = sqlx::query_as::<_, Rental>(
            "SELECT * FROM rentals WHERE equipment_id = $1 AND status = 'ACTIVE'",
        )
        .bind(equipment_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    /// Insert an ACTIVE rental inside the creation transaction
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &NewRental,
    ) -> AppResult<Rental> {
        let row = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (customer_id, equipment_id, quantity, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5, 'ACTIVE')
            RETURNING *
            "#,
        )
        .bind(data.customer_id)
        .bind(data.equipment_id)
        .bind(data.quantity)
        .bind(data.start_date)
        .bind(data.end_date)
        .fetch_one(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Update a rental's status inside a transaction, returning the updated
    /// row, or None when the rental does not exist
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        status: RentalStatus,
    ) -> AppResult<Option<Rental>> {
        let row = sqlx::query_as::<_, Rental>(
            "UPDATE rentals SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(row)
    }

    /// Update a rental's date range
    pub async fn update_dates(
        &self,
        id: i32,
        start_date: DateTime<Utc>,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<Rental> {
        sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals SET start_date = $1, end_date = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(start_date)
        .bind(end_date)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Noleggio non trovato".to_string()))
    }

    /// Count ACTIVE rentals
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE status = 'ACTIVE'")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Count ACTIVE rentals past their end date
    pub async fn count_overdue(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rentals WHERE status = 'ACTIVE' AND end_date < NOW()",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
