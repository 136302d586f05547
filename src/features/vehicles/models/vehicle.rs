use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Database model for vehicles
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Vehicle {
    pub id: i64,
    pub model_name: String,
    pub plate_number: String,
    /// Filename of the vehicle image inside the file-store
    pub image_file: String,
    pub rent_per_day: f64,
    pub passenger_capacity: i64,
    pub ratings: Option<f64>,
    pub availability: bool,
    pub created_at: DateTime<Utc>,
}
