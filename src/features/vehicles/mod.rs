pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use crate::shared::templates::TemplateEngine;
pub use services::VehicleService;

/// Router state for the vehicle pages: the record service plus the template
/// engine, constructed once in `main` and cloned into the handlers.
#[derive(Clone)]
pub struct VehiclesState {
    pub service: Arc<VehicleService>,
    pub templates: Arc<TemplateEngine>,
}
