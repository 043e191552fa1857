use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Create routes for the categories feature
///
/// Reads are public. Writes take an `AuthenticatedUser`, so they need the identity
/// middleware layered on the final router.
///
/// GET `/{slug}` and PUT/DELETE `/{id}` share one path segment; the handlers
/// extract it as a slug or an id respectively.
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route("/api/categories/roots", get(handlers::list_root_categories))
        .route("/api/categories/tree", get(handlers::get_category_tree))
        .route("/api/categories/search", get(handlers::search_categories))
        .route("/api/categories/id/{id}", get(handlers::get_category_by_id))
        .route(
            "/api/categories/id/{id}/count",
            get(handlers::get_category_post_count),
        )
        .route(
            "/api/categories/{slug}",
            get(handlers::get_category_by_slug)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .with_state(service)
}
