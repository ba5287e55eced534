//! Delivery person home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::{
    db::OrderRepository, error::Result, filters, middleware::RequireDriver, models::Order,
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "driver_home.html")]
pub struct DriverHomeTemplate {
    orders: Vec<Order>,
    logged_in: bool,
}

/// Orders assigned to the logged-in delivery person.
///
/// Assignment itself happens out of band; this page only reads
/// `delivery_person_id`.
pub async fn home(
    State(state): State<AppState>,
    RequireDriver(user): RequireDriver,
) -> Result<DriverHomeTemplate> {
    let orders = OrderRepository::new(state.pool())
        .list_by_delivery_person(user.id)
        .await?;
    Ok(DriverHomeTemplate {
        orders,
        logged_in: true,
    })
}
