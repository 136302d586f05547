use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::error::{map_unique_violation, AppError, Result};
use crate::features::vehicles::dtos::{UploadedImage, VehicleFields};
use crate::features::vehicles::models::Vehicle;
use crate::modules::storage::FileStore;

/// Service for vehicle inventory operations
pub struct VehicleService {
    pool: SqlitePool,
    file_store: Arc<FileStore>,
}

impl VehicleService {
    pub fn new(pool: SqlitePool, file_store: Arc<FileStore>) -> Self {
        Self { pool, file_store }
    }

    pub fn file_store(&self) -> &Arc<FileStore> {
        &self.file_store
    }

    /// List all vehicles, oldest first.
    pub async fn list(&self) -> Result<Vec<Vehicle>> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, model_name, plate_number, image_file, rent_per_day,
                   passenger_capacity, ratings, availability, created_at
            FROM vehicles
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list vehicles: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(vehicles)
    }

    /// Get a single vehicle by id.
    pub async fn get(&self, id: i64) -> Result<Vehicle> {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT id, model_name, plate_number, image_file, rent_per_day,
                   passenger_capacity, ratings, availability, created_at
            FROM vehicles
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get vehicle {}: {:?}", id, e);
            AppError::Database(e)
        })?;

        vehicle.ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", id)))
    }

    /// Create a vehicle. The image is validated and saved to the file-store
    /// first; no row is written when the image is rejected. The image write
    /// itself is not transactional with the insert, so a failed insert can
    /// leave an orphan file behind.
    pub async fn create(&self, fields: VehicleFields, image: UploadedImage) -> Result<Vehicle> {
        let image_filename = FileStore::accept_filename(&image.filename)?;
        self.file_store.save(&image_filename, &image.data).await?;

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                model_name, plate_number, image_file, rent_per_day,
                passenger_capacity, ratings, availability
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, model_name, plate_number, image_file, rent_per_day,
                      passenger_capacity, ratings, availability, created_at
            "#,
        )
        .bind(&fields.model_name)
        .bind(&fields.plate_number)
        .bind(&image_filename)
        .bind(fields.rent_per_day)
        .bind(fields.passenger_capacity)
        .bind(fields.ratings)
        .bind(fields.availability)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                &format!(
                    "A vehicle with plate number '{}' already exists",
                    fields.plate_number
                ),
            )
        })?;

        tracing::info!(
            "Vehicle created: id={}, plate_number={}",
            vehicle.id,
            vehicle.plate_number
        );

        Ok(vehicle)
    }

    /// Update a vehicle in place. When `image` is `None` the existing
    /// `image_file` reference is kept; otherwise the replacement goes through
    /// the same allow-list and save-then-reference flow as create.
    pub async fn update(
        &self,
        id: i64,
        fields: VehicleFields,
        image: Option<UploadedImage>,
    ) -> Result<Vehicle> {
        let existing = self.get(id).await?;

        let image_filename = match image {
            Some(image) => {
                let name = FileStore::accept_filename(&image.filename)?;
                self.file_store.save(&name, &image.data).await?;
                name
            }
            None => existing.image_file,
        };

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET model_name = ?, plate_number = ?, image_file = ?,
                rent_per_day = ?, passenger_capacity = ?, ratings = ?,
                availability = ?
            WHERE id = ?
            RETURNING id, model_name, plate_number, image_file, rent_per_day,
                      passenger_capacity, ratings, availability, created_at
            "#,
        )
        .bind(&fields.model_name)
        .bind(&fields.plate_number)
        .bind(&image_filename)
        .bind(fields.rent_per_day)
        .bind(fields.passenger_capacity)
        .bind(fields.ratings)
        .bind(fields.availability)
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(
                e,
                &format!(
                    "A vehicle with plate number '{}' already exists",
                    fields.plate_number
                ),
            )
        })?;

        tracing::info!("Vehicle updated: id={}", vehicle.id);

        Ok(vehicle)
    }

    /// Delete a vehicle row. The image file stays in the file-store.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete vehicle {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Vehicle {} not found", id)));
        }

        tracing::info!("Vehicle deleted: id={}", id);

        Ok(())
    }
}
