//! Equipment repository for database operations

use sqlx::{Pool, Postgres, Row, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentStatus,
        equipment::{Equipment, NewEquipment, TopEquipmentEntry, UpdateEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment ordered by name
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Attrezzatura non trovata".to_string()))
    }

    /// Get equipment by ID inside a transaction, locking the row.
    /// Serializes concurrent availability checks for the same equipment.
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(row)
    }

    /// Create equipment (starts AVAILABLE)
    pub async fn create(&self, data: &NewEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (name, category, description, quantity, status)
            VALUES ($1, $2, $3, $4, 'AVAILABLE')
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.description)
        .bind(data.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update equipment; only the provided fields are written
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category, "category");
        add_field!(data.description, "description");
        add_field!(data.quantity, "quantity");
        add_field!(data.status, "status");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category);
        bind_field!(data.description);
        bind_field!(data.quantity);
        bind_field!(data.status);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Attrezzatura non trovata".to_string()))
    }

    /// Delete equipment
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Attrezzatura non trovata".to_string()));
        }
        Ok(())
    }

    /// Reset equipment status inside a transaction (rental completion side effect)
    pub async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        status: EquipmentStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE equipment SET status = $1, updated_at = NOW() WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Distinct non-empty categories, sorted
    pub async fn distinct_categories(&self) -> AppResult<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT category FROM equipment WHERE category <> '' ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    /// Search equipment by name. Queries shorter than two characters return
    /// the first page unfiltered, as the dashboard expects.
    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<Equipment>> {
        let rows = match query {
            Some(q) if q.len() >= 2 => {
                let pattern = format!("%{}%", q);
                sqlx::query_as::<_, Equipment>(
                    "SELECT * FROM equipment WHERE name ILIKE $1 ORDER BY name LIMIT 10",
                )
                .bind(pattern)
                .fetch_all(&self.pool)
                .await?
            }
            _ => {
                sqlx::query_as::<_, Equipment>("SELECT * FROM equipment ORDER BY name LIMIT 10")
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Count and summed quantity of ACTIVE rentals for an equipment
    /// (referential guards: delete, status freeze, quantity floor)
    pub async fn active_rental_totals(&self, id: i32) -> AppResult<(i64, i64)> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS count, COALESCE(SUM(quantity), 0)::bigint AS total
            FROM rentals
            WHERE equipment_id = $1 AND status = 'ACTIVE'
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok((row.get("count"), row.get("total")))
    }

    /// Equipment ranked by all-time rental count (for the dashboard)
    pub async fn most_rented(&self, limit: i64) -> AppResult<Vec<TopEquipmentEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.name, e.category, COUNT(r.id) AS rental_count
            FROM equipment e
            LEFT JOIN rentals r ON r.equipment_id = e.id
            GROUP BY e.id, e.name, e.category
            ORDER BY rental_count DESC, e.name
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TopEquipmentEntry {
                id: row.get("id"),
                name: row.get("name"),
                category: row.get("category"),
                rental_count: row.get("rental_count"),
            })
            .collect())
    }

    /// Count all equipment (for dashboard stats)
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
