//! Route definitions

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{health, home, themes, trees},
    middleware::{logging_middleware, scope_middleware, session_middleware, use_theme},
    state::AppState,
};

/// Routes rendered with a theme
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/themes", get(themes::list_themes))
        .route("/theme/:id", post(themes::select_theme))
}

/// Routes outside the theme pipeline
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/trees", get(trees::list_trees))
}

/// The complete application.
///
/// Page requests run logging, session, request scope and theme middleware in
/// that order before reaching their handler.
pub fn app(state: AppState) -> Router {
    // Layers wrap outside-in, so the last one added runs first.
    let pages = page_routes()
        .layer(from_fn_with_state(state.clone(), use_theme))
        .layer(from_fn_with_state(state.clone(), scope_middleware))
        .layer(from_fn_with_state(state.clone(), session_middleware));

    Router::new()
        .merge(pages)
        .merge(service_routes())
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
