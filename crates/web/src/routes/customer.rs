//! Customer home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::{
    db::RestaurantRepository, error::Result, middleware::RequireCustomer, models::Restaurant,
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "customer_home.html")]
pub struct CustomerHomeTemplate {
    restaurants: Vec<Restaurant>,
    logged_in: bool,
}

/// Restaurant listing for logged-in customers.
pub async fn home(
    State(state): State<AppState>,
    RequireCustomer(_user): RequireCustomer,
) -> Result<CustomerHomeTemplate> {
    let restaurants = RestaurantRepository::new(state.pool()).list_all().await?;
    Ok(CustomerHomeTemplate {
        restaurants,
        logged_in: true,
    })
}
