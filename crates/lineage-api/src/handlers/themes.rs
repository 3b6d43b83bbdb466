//! Theme listing and selection

use axum::{
    extract::{Path, State},
    http::{header::REFERER, HeaderMap},
    response::Redirect,
    Extension, Json,
};
use lineage_sessions::{Session, SessionStore};
use lineage_themes::{ActiveTheme, ThemeError, SESSION_THEME_KEY};
use tracing::info;

use crate::{
    error::ApiResult,
    middleware::RequestScope,
    models::{ThemeInfo, ThemeListResponse},
    state::AppState,
};

/// Installed themes and the one applied to this request
pub async fn list_themes(
    State(state): State<AppState>,
    Extension(scope): Extension<RequestScope>,
) -> ApiResult<Json<ThemeListResponse>> {
    let active = scope.resolve::<ActiveTheme>()?;

    let themes = state
        .resolver
        .catalog()
        .iter()
        .map(|theme| ThemeInfo {
            name: theme.name().to_string(),
            title: theme.title().to_string(),
        })
        .collect();

    Ok(Json(ThemeListResponse {
        active: active.name().to_string(),
        themes,
    }))
}

/// Remember the visitor's choice of theme, then send them back where they
/// came from
pub async fn select_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(session): Extension<Session>,
    headers: HeaderMap,
) -> ApiResult<Redirect> {
    if !state.resolver.catalog().contains(&id) {
        return Err(ThemeError::NotFound(id).into());
    }

    session.put(SESSION_THEME_KEY, &id);
    info!("Session {} switched to theme {}", session.id(), id);

    let back = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(local_path)
        .unwrap_or("/");

    Ok(Redirect::to(back))
}

/// `target` if it is a path on this site, never another origin
fn local_path(target: &str) -> Option<&str> {
    let same_site = target.starts_with('/')
        && !target.starts_with("//")
        && !target.starts_with("/\\")
        && !target.chars().any(|c| c.is_control());
    same_site.then_some(target)
}
