use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;

use crate::core::error::Result;
use crate::features::pages::PagesState;
use crate::modules::storage::FileStore;

/// Static home page
pub async fn home(State(state): State<PagesState>) -> Result<Html<String>> {
    let html = state.templates.render("home.html", context! {})?;
    Ok(Html(html))
}

/// Serve a raw image from the file-store by name
pub async fn serve_upload(
    State(state): State<PagesState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let bytes = state.file_store.read(&filename).await?;
    let content_type = FileStore::content_type_for(&filename);

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Liveness check
pub async fn health() -> StatusCode {
    StatusCode::OK
}
