//! Per-request service scope

use std::ops::Deref;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use lineage_di::DIContainer;

use crate::state::AppState;

/// The child container living for one request.
///
/// Bindings made here (such as the active theme) shadow the root container
/// and are dropped with the request.
#[derive(Debug, Clone)]
pub struct RequestScope(pub Arc<DIContainer>);

impl Deref for RequestScope {
    type Target = DIContainer;

    fn deref(&self) -> &DIContainer {
        &self.0
    }
}

/// Open a request scope under the root container
pub async fn scope_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let scope = RequestScope(Arc::new(state.container.create_scope()));
    request.extensions_mut().insert(scope);
    next.run(request).await
}
