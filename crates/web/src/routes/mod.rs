//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to role home or /login
//! GET  /health                 - Liveness check (in main)
//! GET  /health/ready           - Readiness check (in main)
//!
//! # Auth
//! GET  /register               - Registration form
//! POST /register               - Register action (redirect → /login)
//! GET  /login                  - Login form
//! POST /login                  - Login action (redirect → role home)
//! POST /logout                 - Logout action (redirect → /login)
//! GET  /check-session          - Plaintext session summary
//!
//! # Customer
//! GET  /customer-home          - Restaurant listing        [customer]
//! POST /order                  - Place order               [customer]
//! GET  /orders                 - Joined orders listing     [any session]
//!
//! # Restaurant owner
//! GET  /restaurant-owner-home  - Owner's restaurant page   [restaurant_owner]
//! GET  /menu                   - Menu listing              [restaurant_owner]
//! POST /menu                   - Add menu item             [restaurant_owner]
//! GET  /details                - Restaurant profile form   [restaurant_owner]
//! POST /details                - Upsert profile            [restaurant_owner]
//!
//! # Delivery person
//! GET  /driver-home            - Assigned orders           [delivery_person]
//!
//! # Public
//! GET  /restaurant/{id}        - Restaurant menu page
//! ```

pub mod auth;
pub mod customer;
pub mod driver;
pub mod menu;
pub mod orders;
pub mod owner;
pub mod restaurants;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{middleware::OptionalUser, state::AppState};

/// Root: logged-in accounts go to their role's home page, everyone else
/// to the login form.
async fn index(OptionalUser(user): OptionalUser) -> Redirect {
    match user {
        Some(current) => Redirect::to(current.role.home_path()),
        None => Redirect::to("/login"),
    }
}

/// Create all application routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        // Auth
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check-session", get(auth::check_session))
        // Customer
        .route("/customer-home", get(customer::home))
        .route("/order", post(orders::place))
        .route("/orders", get(orders::index))
        // Restaurant owner
        .route("/restaurant-owner-home", get(owner::home))
        .route("/menu", get(menu::index).post(menu::add))
        .route("/details", get(owner::details_page).post(owner::save_details))
        // Delivery person
        .route("/driver-home", get(driver::home))
        // Public
        .route("/restaurant/{id}", get(restaurants::show))
}
