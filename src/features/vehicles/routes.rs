//! Vehicle inventory routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::vehicles::handlers;
use crate::features::vehicles::VehiclesState;

/// Create routes for the vehicles feature
pub fn routes(state: VehiclesState) -> Router {
    Router::new()
        .route("/vehicles", get(handlers::list_vehicles))
        .route(
            "/add_vehicle",
            get(handlers::show_add_form).post(handlers::add_vehicle),
        )
        .route(
            "/update_vehicle/{id}",
            get(handlers::show_update_form).post(handlers::update_vehicle),
        )
        .route("/delete_vehicle/{id}", post(handlers::delete_vehicle))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use sqlx::sqlite::SqlitePoolOptions;

    use crate::features::pages::{routes as pages_routes, PagesState};
    use crate::features::vehicles::VehicleService;
    use crate::modules::storage::FileStore;
    use crate::shared::templates::TemplateEngine;

    async fn test_server() -> (TestServer, Arc<VehicleService>, tempfile::TempDir) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let file_store = Arc::new(FileStore::new(dir.path()).await.unwrap());
        let templates = Arc::new(TemplateEngine::from_dir().unwrap());
        let service = Arc::new(VehicleService::new(pool, Arc::clone(&file_store)));

        let app = Router::new()
            .merge(routes(VehiclesState {
                service: Arc::clone(&service),
                templates: Arc::clone(&templates),
            }))
            .merge(pages_routes::routes(PagesState {
                templates,
                file_store,
            }));

        (TestServer::new(app).unwrap(), service, dir)
    }

    fn civic_form(image_name: &str) -> MultipartForm {
        MultipartForm::new()
            .add_text("model_name", "Civic")
            .add_text("plate_number", "ABC-123")
            .add_text("rent_per_day", "45.0")
            .add_text("passenger_capacity", "5")
            .add_text("ratings", "4.5")
            .add_text("availability", "true")
            .add_part(
                "image",
                Part::bytes(b"\xff\xd8\xff\xe0 fake jpeg".to_vec())
                    .file_name(image_name.to_string())
                    .mime_type("image/jpeg"),
            )
    }

    #[tokio::test]
    async fn add_vehicle_redirects_and_serves_the_image() {
        let (server, service, _dir) = test_server().await;

        let res = server.post("/add_vehicle").multipart(civic_form("car.jpg")).await;
        assert_eq!(res.status_code(), 303);
        let location = res.header("location");
        assert!(location.to_str().unwrap().starts_with("/vehicles?msg="));

        let list = server.get("/vehicles").await;
        assert_eq!(list.status_code(), 200);
        assert!(list.text().contains("Civic"));
        assert!(list.text().contains("ABC-123"));

        let image = server.get("/uploads/car.jpg").await;
        assert_eq!(image.status_code(), 200);
        assert_eq!(image.header("content-type").to_str().unwrap(), "image/jpeg");

        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn flash_message_shows_on_the_list_page() {
        let (server, _service, _dir) = test_server().await;
        let res = server.get("/vehicles?msg=Vehicle%20added%20successfully!").await;
        assert_eq!(res.status_code(), 200);
        assert!(res.text().contains("Vehicle added successfully!"));
    }

    #[tokio::test]
    async fn bad_image_extension_rerenders_the_form() {
        let (server, service, _dir) = test_server().await;

        let res = server.post("/add_vehicle").multipart(civic_form("car.svg")).await;
        assert_eq!(res.status_code(), 400);
        assert!(res.text().contains("Allowed types"));

        assert!(service.list().await.unwrap().is_empty());
        assert!(!service.file_store().exists("car.svg").await);
    }

    #[tokio::test]
    async fn invalid_fields_are_all_reported_at_once() {
        let (server, _service, _dir) = test_server().await;

        let form = MultipartForm::new()
            .add_text("model_name", "")
            .add_text("plate_number", "ABC-123")
            .add_text("rent_per_day", "cheap")
            .add_text("passenger_capacity", "many")
            .add_text("availability", "true");
        let res = server.post("/add_vehicle").multipart(form).await;

        assert_eq!(res.status_code(), 400);
        let body = res.text();
        assert!(body.contains("model_name is required"));
        assert!(body.contains("rent_per_day must be a number"));
        assert!(body.contains("passenger_capacity must be an integer"));
        assert!(body.contains("An image file is required"));
        // submitted values survive the re-render
        assert!(body.contains("ABC-123"));
    }

    #[tokio::test]
    async fn duplicate_plate_rerenders_with_conflict_message() {
        let (server, service, _dir) = test_server().await;

        server.post("/add_vehicle").multipart(civic_form("car.jpg")).await;
        let res = server.post("/add_vehicle").multipart(civic_form("car2.jpg")).await;

        assert_eq!(res.status_code(), 400);
        assert!(res.text().contains("already exists"));
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_form_is_prefilled() {
        let (server, service, _dir) = test_server().await;
        server.post("/add_vehicle").multipart(civic_form("car.jpg")).await;
        let id = service.list().await.unwrap()[0].id;

        let res = server.get(&format!("/update_vehicle/{}", id)).await;
        assert_eq!(res.status_code(), 200);
        assert!(res.text().contains("ABC-123"));
        assert!(res.text().contains("car.jpg"));
    }

    #[tokio::test]
    async fn update_without_image_keeps_the_reference() {
        let (server, service, _dir) = test_server().await;
        server.post("/add_vehicle").multipart(civic_form("car.jpg")).await;
        let id = service.list().await.unwrap()[0].id;

        let form = MultipartForm::new()
            .add_text("model_name", "Civic Type R")
            .add_text("plate_number", "ABC-123")
            .add_text("rent_per_day", "80")
            .add_text("passenger_capacity", "4")
            .add_text("ratings", "")
            .add_text("availability", "false");
        let res = server
            .post(&format!("/update_vehicle/{}", id))
            .multipart(form)
            .await;
        assert_eq!(res.status_code(), 303);

        let updated = service.get(id).await.unwrap();
        assert_eq!(updated.model_name, "Civic Type R");
        assert_eq!(updated.image_file, "car.jpg");
        assert_eq!(updated.ratings, None);
        assert!(!updated.availability);
    }

    #[tokio::test]
    async fn update_missing_id_is_404() {
        let (server, _service, _dir) = test_server().await;

        let res = server.get("/update_vehicle/99").await;
        assert_eq!(res.status_code(), 404);

        let form = MultipartForm::new().add_text("model_name", "Ghost");
        let res = server.post("/update_vehicle/99").multipart(form).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn delete_flow() {
        let (server, service, _dir) = test_server().await;
        server.post("/add_vehicle").multipart(civic_form("car.jpg")).await;
        let id = service.list().await.unwrap()[0].id;

        let missing = server.post("/delete_vehicle/999").await;
        assert_eq!(missing.status_code(), 404);
        assert_eq!(service.list().await.unwrap().len(), 1);

        let res = server.post(&format!("/delete_vehicle/{}", id)).await;
        assert_eq!(res.status_code(), 303);
        assert!(service.list().await.unwrap().is_empty());
        // the orphan image stays in the file-store
        assert!(service.file_store().exists("car.jpg").await);
    }
}
