//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)

pub mod auth;
pub mod session;

pub use auth::{
    OptionalUser, RequireCustomer, RequireDriver, RequireOwner, RequireUser, clear_current_user,
    set_current_user,
};
pub use session::session_layer;
