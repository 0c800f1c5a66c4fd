//! Equipment management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentSearchResult, EquipmentWithAvailability,
        NewEquipment, ReplaceEquipment, UpdateEquipment,
    },
    repository::Repository,
    services::availability::{self, Window},
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List all equipment decorated with effective availability and
    /// upcoming reservations
    pub async fn list_with_availability(&self) -> AppResult<Vec<EquipmentWithAvailability>> {
        let equipment = self.repository.equipment.list().await?;
        let active = self.repository.rentals.active().await?;
        let now = Utc::now();
        let window = Window::at(now);

        let decorated = equipment
            .into_iter()
            .map(|item| {
                let rentals: Vec<_> = active
                    .iter()
                    .filter(|rental| rental.equipment_id == item.id)
                    .cloned()
                    .collect();
                let reserved = availability::reserved_quantity(&rentals, &window);
                let available = availability::available_quantity(item.quantity, reserved);
                let future = availability::future_rentals(&rentals, now);
                EquipmentWithAvailability::new(item, available, future)
            })
            .collect();

        Ok(decorated)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        let name = data
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let category = data
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let (name, category) = match (name, category) {
            (Some(n), Some(c)) => (n.to_string(), c.to_string()),
            _ => {
                return Err(AppError::Validation(
                    "Nome e categoria sono obbligatori".to_string(),
                ))
            }
        };

        let quantity = data.quantity.unwrap_or(1);
        if quantity < 1 {
            return Err(AppError::Validation("Quantità non valida".to_string()));
        }

        let equipment = NewEquipment {
            name,
            category,
            description: data.description,
            quantity,
        };
        self.repository.equipment.create(&equipment).await
    }

    /// Full update (PUT). While ACTIVE rentals exist the status is frozen
    /// and the quantity may not drop below the rented total.
    pub async fn replace(&self, id: i32, data: ReplaceEquipment) -> AppResult<Equipment> {
        let (name, category, quantity) = match (&data.name, &data.category, data.quantity) {
            (Some(n), Some(c), Some(q)) if !n.trim().is_empty() && !c.trim().is_empty() && q > 0 => {
                (n.clone(), c.clone(), q)
            }
            _ => {
                return Err(AppError::Validation(
                    "Nome, categoria e quantità sono obbligatori".to_string(),
                ))
            }
        };

        let current = self.repository.equipment.get_by_id(id).await?;
        let (active_count, rented_total) =
            self.repository.equipment.active_rental_totals(id).await?;

        if active_count > 0 {
            if let Some(status) = data.status {
                if status != current.status {
                    return Err(AppError::Validation(
                        "Non è possibile modificare lo stato di un'attrezzatura noleggiata"
                            .to_string(),
                    ));
                }
            }
            if (quantity as i64) < rented_total {
                return Err(AppError::Validation(format!(
                    "Non è possibile ridurre la quantità sotto {} poiché ci sono {} unità attualmente noleggiate",
                    rented_total, rented_total
                )));
            }
        }

        let update = UpdateEquipment {
            name: Some(name),
            category: Some(category),
            description: data.description,
            quantity: Some(quantity),
            status: data.status,
        };
        self.repository.equipment.update(id, &update).await
    }

    /// Partial update (PATCH), same rental guards as the full update
    pub async fn update(&self, id: i32, data: UpdateEquipment) -> AppResult<Equipment> {
        let current = self.repository.equipment.get_by_id(id).await?;

        let status_change = data.status.map_or(false, |status| status != current.status);
        if status_change || data.quantity.is_some() {
            let (active_count, rented_total) =
                self.repository.equipment.active_rental_totals(id).await?;
            if active_count > 0 {
                if status_change {
                    return Err(AppError::Validation(
                        "Non è possibile modificare lo stato di un'attrezzatura noleggiata"
                            .to_string(),
                    ));
                }
                if let Some(quantity) = data.quantity {
                    if (quantity as i64) < rented_total {
                        return Err(AppError::Validation(format!(
                            "Non è possibile ridurre la quantità sotto {} poiché ci sono {} unità attualmente noleggiate",
                            rented_total, rented_total
                        )));
                    }
                }
            }
        }

        self.repository.equipment.update(id, &data).await
    }

    /// Delete equipment; forbidden while any ACTIVE rental references it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.get_by_id(id).await?;

        let (active_count, _) = self.repository.equipment.active_rental_totals(id).await?;
        if active_count > 0 {
            return Err(AppError::Validation(
                "Impossibile eliminare un'attrezzatura noleggiata".to_string(),
            ));
        }

        self.repository.equipment.delete(id).await
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.repository.equipment.distinct_categories().await
    }

    /// Search equipment by name, returning current availability
    pub async fn search(&self, query: Option<&str>) -> AppResult<Vec<EquipmentSearchResult>> {
        let equipment = self.repository.equipment.search(query).await?;
        if equipment.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = equipment.iter().map(|item| item.id).collect();
        let active = self.repository.rentals.active_for_equipment_ids(&ids).await?;
        let window = Window::at(Utc::now());

        let results = equipment
            .into_iter()
            .map(|item| {
                let rentals: Vec<_> = active
                    .iter()
                    .filter(|rental| rental.equipment_id == item.id)
                    .cloned()
                    .collect();
                let reserved = availability::reserved_quantity(&rentals, &window);
                EquipmentSearchResult {
                    id: item.id,
                    name: item.name,
                    category: item.category,
                    available_quantity: availability::available_quantity(item.quantity, reserved),
                }
            })
            .collect();

        Ok(results)
    }
}
