//! HTML handlers for the vehicle inventory pages.
//!
//! Form submissions come in as multipart/form-data. Errors the user can
//! correct (validation, bad image type, duplicate plate) re-render the
//! originating form with the messages; a missing id falls through to the
//! 404 page.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;
use serde::Deserialize;

use crate::core::error::{AppError, Result};
use crate::features::vehicles::dtos::{UploadedImage, VehicleForm};
use crate::features::vehicles::VehiclesState;

/// Flash message carried through a redirect as a query parameter
#[derive(Debug, Deserialize)]
pub struct FlashQuery {
    pub msg: Option<String>,
}

fn redirect_with_msg(msg: &str) -> Response {
    Redirect::to(&format!("/vehicles?msg={}", urlencoding::encode(msg))).into_response()
}

/// List all vehicles
pub async fn list_vehicles(
    State(state): State<VehiclesState>,
    Query(query): Query<FlashQuery>,
) -> Result<Html<String>> {
    let vehicles = state.service.list().await?;
    let html = state.templates.render(
        "view_vehicles.html",
        context! { vehicles => vehicles, msg => query.msg },
    )?;
    Ok(Html(html))
}

/// Show the empty add form
pub async fn show_add_form(State(state): State<VehiclesState>) -> Result<Html<String>> {
    let html = state.templates.render(
        "add_vehicle.html",
        context! { form => VehicleForm::default(), errors => Vec::<String>::new() },
    )?;
    Ok(Html(html))
}

/// Handle the add form submission
pub async fn add_vehicle(
    State(state): State<VehiclesState>,
    multipart: Multipart,
) -> Result<Response> {
    let (form, image) = read_vehicle_form(multipart).await?;

    let outcome = match (form.parse(), image) {
        (Ok(fields), Some(image)) => state.service.create(fields, image).await.map(|_| ()),
        (Ok(_), None) => Err(AppError::Validation(vec![
            "An image file is required".to_string(),
        ])),
        (Err(mut errors), image) => {
            if image.is_none() {
                errors.push("An image file is required".to_string());
            }
            Err(AppError::Validation(errors))
        }
    };

    match outcome {
        Ok(()) => Ok(redirect_with_msg("Vehicle added successfully!")),
        Err(e) if e.is_user_correctable() => {
            let html = state.templates.render(
                "add_vehicle.html",
                context! { form => form, errors => e.user_messages() },
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Show the update form pre-filled from the stored row, or 404
pub async fn show_update_form(
    State(state): State<VehiclesState>,
    Path(id): Path<i64>,
) -> Result<Html<String>> {
    let vehicle = state.service.get(id).await?;
    let html = state.templates.render(
        "update_vehicle.html",
        context! {
            id => id,
            form => VehicleForm::from_vehicle(&vehicle),
            image_file => vehicle.image_file,
            errors => Vec::<String>::new(),
        },
    )?;
    Ok(Html(html))
}

/// Handle the update form submission
pub async fn update_vehicle(
    State(state): State<VehiclesState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response> {
    // Missing id is a 404 regardless of what was posted
    let existing = state.service.get(id).await?;

    let (form, image) = read_vehicle_form(multipart).await?;

    let outcome = match form.parse() {
        Ok(fields) => state.service.update(id, fields, image).await.map(|_| ()),
        Err(errors) => Err(AppError::Validation(errors)),
    };

    match outcome {
        Ok(()) => Ok(redirect_with_msg("Vehicle updated successfully!")),
        Err(e) if e.is_user_correctable() => {
            let html = state.templates.render(
                "update_vehicle.html",
                context! {
                    id => id,
                    form => form,
                    image_file => existing.image_file,
                    errors => e.user_messages(),
                },
            )?;
            Ok((StatusCode::BAD_REQUEST, Html(html)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Delete a vehicle, then back to the list
pub async fn delete_vehicle(
    State(state): State<VehiclesState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.service.delete(id).await?;
    Ok(redirect_with_msg("Vehicle deleted successfully!"))
}

/// Collect the vehicle form fields and the optional image part from a
/// multipart submission. An image part with an empty filename (the browser
/// sends one when the file input is left blank) counts as no image.
async fn read_vehicle_form(
    mut multipart: Multipart,
) -> Result<(VehicleForm, Option<UploadedImage>)> {
    let mut form = VehicleForm::default();
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Failed to read multipart field: {}", e);
        AppError::Validation(vec![format!("Failed to read form data: {}", e)])
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "image" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::debug!("Failed to read image bytes: {}", e);
                    AppError::Validation(vec![format!("Failed to read image data: {}", e)])
                })?;
                if !filename.is_empty() && !data.is_empty() {
                    image = Some(UploadedImage {
                        filename,
                        data: data.to_vec(),
                    });
                }
            }
            name @ ("model_name" | "plate_number" | "rent_per_day" | "passenger_capacity"
            | "ratings" | "availability") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(vec![format!("Failed to read field {}: {}", name, e)])
                })?;
                let value = Some(text);
                match name {
                    "model_name" => form.model_name = value,
                    "plate_number" => form.plate_number = value,
                    "rent_per_day" => form.rent_per_day = value,
                    "passenger_capacity" => form.passenger_capacity = value,
                    "ratings" => form.ratings = value,
                    "availability" => form.availability = value,
                    _ => unreachable!(),
                }
            }
            other => {
                tracing::debug!("Ignoring unknown field: {}", other);
            }
        }
    }

    Ok((form, image))
}
