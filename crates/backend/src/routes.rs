use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Project handlers
        .route("/api/project", get(handlers::a001_project::list_all))
        .route("/api/project/:id", get(handlers::a001_project::get_by_id))
        .route(
            "/api/project/:id/progress",
            get(handlers::a001_project::get_progress),
        )
        // A002 Translation item handlers
        .route(
            "/api/project/:id/items",
            get(handlers::a002_translation_item::list_by_project),
        )
        .route(
            "/api/translation_item/:id/translation",
            post(handlers::a002_translation_item::save_translation),
        )
        // A003 Glossary handlers
        .route(
            "/api/project/:id/glossary",
            get(handlers::a003_glossary_term::list_by_project),
        )
}
