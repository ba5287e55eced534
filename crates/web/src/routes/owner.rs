//! Restaurant owner home page and profile management.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tiffin_core::Address;

use crate::{
    db::{MenuItemRepository, RestaurantRepository},
    error::Result,
    filters,
    middleware::RequireOwner,
    models::{MenuItem, Restaurant},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "owner_home.html")]
pub struct OwnerHomeTemplate {
    restaurant: Option<Restaurant>,
    items: Vec<MenuItem>,
    logged_in: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "details.html")]
pub struct DetailsTemplate {
    restaurant: Option<Restaurant>,
    logged_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct DetailsForm {
    name: String,
    street: String,
    city: String,
    state: String,
    pincode: String,
}

/// Owner dashboard: the owner's restaurant profile plus its menu.
pub async fn home(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> Result<OwnerHomeTemplate> {
    let restaurants = RestaurantRepository::new(state.pool());
    let restaurant = restaurants.find_by_owner(user.id).await?;

    let items = match &restaurant {
        Some(r) => {
            MenuItemRepository::new(state.pool())
                .list_by_restaurant(r.id)
                .await?
        }
        None => Vec::new(),
    };

    Ok(OwnerHomeTemplate {
        restaurant,
        items,
        logged_in: true,
    })
}

/// Restaurant profile form, pre-filled when a profile already exists.
pub async fn details_page(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> Result<DetailsTemplate> {
    let restaurant = RestaurantRepository::new(state.pool())
        .find_by_owner(user.id)
        .await?;
    Ok(DetailsTemplate {
        restaurant,
        logged_in: true,
    })
}

/// Create or update the owner's restaurant profile.
///
/// Idempotent per owner: repeated submissions update the single existing
/// row rather than creating new restaurants.
pub async fn save_details(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    Form(form): Form<DetailsForm>,
) -> Result<Redirect> {
    let address = Address::new(form.street, form.city, form.state, form.pincode);
    let restaurant = RestaurantRepository::new(state.pool())
        .upsert_details(user.id, &form.name, &address)
        .await?;

    tracing::info!(
        restaurant_id = %restaurant.id,
        owner_id = %user.id,
        "restaurant details saved"
    );
    Ok(Redirect::to("/restaurant-owner-home"))
}
