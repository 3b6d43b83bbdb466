//! Tree listing

use axum::{extract::State, Json};

use crate::{models::TreeListResponse, state::AppState};

/// List the hosted trees
pub async fn list_trees(State(state): State<AppState>) -> Json<TreeListResponse> {
    let trees = state.trees.all();
    Json(TreeListResponse {
        total: trees.len(),
        trees,
    })
}
