//! Home page, rendered through the active theme

use axum::{
    extract::{Query, State},
    response::Html,
    Extension,
};
use lineage_themes::{escape_html, ActiveTheme};

use crate::{
    error::ApiResult,
    middleware::{RequestScope, TreeQuery},
    state::AppState,
};

/// Welcome page for the site or, with `?tree=`, for one tree
pub async fn home(
    State(state): State<AppState>,
    Query(query): Query<TreeQuery>,
    Extension(scope): Extension<RequestScope>,
) -> ApiResult<Html<String>> {
    let theme = scope.resolve::<ActiveTheme>()?;

    let title = match query.tree.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => state.trees.find(name)?.title().to_string(),
        None => "Lineage".to_string(),
    };

    let mut body = format!("<h1>{}</h1>\n<ul class=\"trees\">\n", escape_html(&title));
    for tree in state.trees.all() {
        body.push_str(&format!(
            "<li><a href=\"/?tree={}\">{}</a></li>\n",
            escape_html(&tree.name),
            escape_html(&tree.title)
        ));
    }
    body.push_str("</ul>\n<ul class=\"themes\">\n");

    for option in state.resolver.catalog().iter() {
        let current = if option.name() == theme.name() {
            " aria-current=\"true\""
        } else {
            ""
        };
        body.push_str(&format!(
            "<li><form method=\"post\" action=\"/theme/{}\"><button{}>{}</button></form></li>\n",
            escape_html(option.name()),
            current,
            escape_html(option.title())
        ));
    }
    body.push_str("</ul>");

    Ok(Html(theme.render_page(&title, &body)))
}
