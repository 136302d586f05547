//! Form DTOs and the typed parsing layer for vehicle submissions.
//!
//! The add/update forms post untyped text fields. `VehicleForm` collects
//! them as submitted; `parse` coerces every field and accumulates all the
//! errors before reporting, so the user sees the full list at once instead
//! of one failure per round trip.

use serde::Serialize;

use crate::features::vehicles::models::Vehicle;

/// An uploaded image part from the multipart form
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Raw text fields exactly as posted by the form
#[derive(Debug, Default, Serialize)]
pub struct VehicleForm {
    pub model_name: Option<String>,
    pub plate_number: Option<String>,
    pub rent_per_day: Option<String>,
    pub passenger_capacity: Option<String>,
    pub ratings: Option<String>,
    pub availability: Option<String>,
}

/// Fully coerced vehicle fields, ready for the service layer
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFields {
    pub model_name: String,
    pub plate_number: String,
    pub rent_per_day: f64,
    pub passenger_capacity: i64,
    pub ratings: Option<f64>,
    pub availability: bool,
}

impl VehicleForm {
    /// Coerce the raw form into typed fields, collecting every error.
    pub fn parse(&self) -> Result<VehicleFields, Vec<String>> {
        let mut errors = Vec::new();

        let model_name = match self.model_name.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => {
                errors.push("model_name is required".to_string());
                None
            }
        };

        let plate_number = match self.plate_number.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => Some(s.to_string()),
            _ => {
                errors.push("plate_number is required".to_string());
                None
            }
        };

        let rent_per_day = match self.rent_per_day.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    errors.push("rent_per_day must be a number".to_string());
                    None
                }
            },
            _ => {
                errors.push("rent_per_day is required".to_string());
                None
            }
        };

        let passenger_capacity = match self.passenger_capacity.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse::<i64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    errors.push("passenger_capacity must be an integer".to_string());
                    None
                }
            },
            _ => {
                errors.push("passenger_capacity is required".to_string());
                None
            }
        };

        // Optional: blank means unset, anything else must parse
        let ratings = match self.ratings.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => match s.parse::<f64>() {
                Ok(v) => Some(Some(v)),
                Err(_) => {
                    errors.push("ratings must be a number".to_string());
                    None
                }
            },
            _ => Some(None),
        };

        // Literal match against "true"; absence and anything else is false
        let availability = self.availability.as_deref() == Some("true");

        if !errors.is_empty() {
            return Err(errors);
        }

        // All unwraps are backed by the empty error list above
        Ok(VehicleFields {
            model_name: model_name.unwrap(),
            plate_number: plate_number.unwrap(),
            rent_per_day: rent_per_day.unwrap(),
            passenger_capacity: passenger_capacity.unwrap(),
            ratings: ratings.unwrap(),
            availability,
        })
    }

    /// Rebuild a form from a stored row, for pre-filling the update view.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        Self {
            model_name: Some(vehicle.model_name.clone()),
            plate_number: Some(vehicle.plate_number.clone()),
            rent_per_day: Some(vehicle.rent_per_day.to_string()),
            passenger_capacity: Some(vehicle.passenger_capacity.to_string()),
            ratings: vehicle.ratings.map(|r| r.to_string()),
            availability: Some(if vehicle.availability {
                "true".to_string()
            } else {
                "false".to_string()
            }),
        }
    }
}
