pub mod handlers;
pub mod routes;

use std::sync::Arc;

use crate::modules::storage::FileStore;
use crate::shared::templates::TemplateEngine;

#[derive(Clone)]
pub struct PagesState {
    pub templates: Arc<TemplateEngine>,
    pub file_store: Arc<FileStore>,
}
