//! HTML template engine for the server-rendered views.
//!
//! Templates live in `templates/` and are loaded once at startup into a
//! [`TemplateEngine`] that is constructed in `main` and passed down through
//! the router state, rather than living in a process-wide global.

use minijinja::{Environment, Value};
use std::path::Path;

use crate::core::error::{AppError, Result};

/// Template directory relative to the project root
const TEMPLATE_DIR: &str = "templates";

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Load every `.html` template from the template directory.
    pub fn from_dir() -> Result<Self> {
        Self::from_path(Path::new(TEMPLATE_DIR))
    }

    pub fn from_path(dir: &Path) -> Result<Self> {
        let mut env = Environment::new();

        let entries = std::fs::read_dir(dir).map_err(|e| {
            AppError::Internal(format!(
                "Failed to read template directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "html") {
                let name = match path.file_name() {
                    Some(name) => name.to_string_lossy().to_string(),
                    None => continue,
                };
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    AppError::Internal(format!("Failed to read template {}: {}", name, e))
                })?;

                // Convert to 'static str by leaking (safe for long-lived templates)
                let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
                let static_content: &'static str = Box::leak(content.into_boxed_str());
                env.add_template(static_name, static_content)
                    .map_err(|e| {
                        AppError::Internal(format!("Failed to load template {}: {}", name, e))
                    })?;
                tracing::debug!("Loaded template: {}", name);
            }
        }

        Ok(Self { env })
    }

    /// Render a template by name with the given context.
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String> {
        let template = self.env.get_template(template_name).map_err(|_| {
            AppError::Internal(format!("Template '{}' not found", template_name))
        })?;

        template
            .render(ctx)
            .map_err(|e| AppError::Internal(format!("Failed to render template: {}", e)))
    }

    #[allow(dead_code)]
    pub fn template_exists(&self, template_name: &str) -> bool {
        self.env.get_template(template_name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn loads_and_renders_the_shipped_templates() {
        let engine = TemplateEngine::from_dir().unwrap();
        assert!(engine.template_exists("home.html"));
        assert!(engine.template_exists("view_vehicles.html"));
        assert!(engine.template_exists("add_vehicle.html"));
        assert!(engine.template_exists("update_vehicle.html"));

        let html = engine
            .render(
                "view_vehicles.html",
                context! { vehicles => Vec::<i32>::new(), msg => "saved" },
            )
            .unwrap();
        assert!(html.contains("saved"));
    }

    #[test]
    fn missing_template_is_an_internal_error() {
        let engine = TemplateEngine::from_dir().unwrap();
        let err = engine.render("nope.html", context! {}).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
