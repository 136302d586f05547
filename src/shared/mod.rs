pub mod templates;
pub mod validation;
