//! Request pipeline middleware, applied in this order:
//! logging, session, request scope, theme.

pub mod logging;
pub mod scope;
pub mod session;
pub mod theme;

pub use logging::logging_middleware;
pub use scope::{scope_middleware, RequestScope};
pub use session::{cookie_value, session_middleware};
pub use theme::{use_theme, TreeQuery};
