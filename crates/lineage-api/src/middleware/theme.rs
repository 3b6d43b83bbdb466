//! Theme middleware
//!
//! Picks the theme for the request and binds it into the request scope as an
//! [`lineage_themes::ActiveTheme`]. The current tree comes from the `tree`
//! query parameter and is only looked up if the session names no installed
//! theme.

use axum::{
    extract::{rejection::QueryRejection, Query, Request, State},
    middleware::Next,
    response::Response,
    Extension,
};
use lineage_sessions::Session;
use lineage_trees::RequestedTree;
use serde::Deserialize;

use crate::{
    error::{ApiError, ApiResult},
    middleware::scope::RequestScope,
    state::AppState,
};

/// Query parameter naming the current tree
#[derive(Debug, Default, Deserialize)]
pub struct TreeQuery {
    /// Tree name
    pub tree: Option<String>,
}

/// Bind the request's theme, then run the rest of the pipeline.
///
/// An unknown tree name fails the request with the tree error and a malformed
/// query fails it as a bad request. The handler is not run in either case.
pub async fn use_theme(
    State(state): State<AppState>,
    query: Result<Query<TreeQuery>, QueryRejection>,
    Extension(session): Extension<Session>,
    Extension(scope): Extension<RequestScope>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let response = {
        let trees = RequestedTree::new(&state.trees, query.tree.as_deref());
        state
            .resolver
            .handle(&session, &trees, &state.site, &scope, request, |request| {
                next.run(request)
            })?
    };

    Ok(response.await)
}
