//! Menu management for restaurant owners.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    db::{MenuItemRepository, RestaurantRepository},
    error::{AppError, Result},
    filters,
    middleware::RequireOwner,
    models::{MenuItem, NewMenuItem, Restaurant},
    state::AppState,
};

const NO_RESTAURANT_MESSAGE: &str = "No restaurant found for the logged-in owner";

#[derive(Template, WebTemplate)]
#[template(path = "menu.html")]
pub struct MenuTemplate {
    restaurant: Restaurant,
    items: Vec<MenuItem>,
    logged_in: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddMenuItemForm {
    name: String,
    description: String,
    price: String,
    category: String,
    availability: Option<String>,
}

/// Parse a submitted price. Must be a non-negative decimal.
fn parse_price(raw: &str) -> Result<Decimal> {
    let price: Decimal = raw
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid price: {raw}")))?;
    if price.is_sign_negative() {
        return Err(AppError::BadRequest(format!("Invalid price: {raw}")));
    }
    Ok(price)
}

/// Checkbox-style availability: present and "true" means available.
fn parse_availability(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// Menu listing for the owner's restaurant.
///
/// Owners without a restaurant profile get a 400 pointing them at the
/// details form first.
pub async fn index(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
) -> Result<MenuTemplate> {
    let restaurant = RestaurantRepository::new(state.pool())
        .find_by_owner(user.id)
        .await?
        .ok_or_else(|| AppError::BadRequest(NO_RESTAURANT_MESSAGE.to_string()))?;

    let items = MenuItemRepository::new(state.pool())
        .list_by_restaurant(restaurant.id)
        .await?;

    Ok(MenuTemplate {
        restaurant,
        items,
        logged_in: true,
    })
}

/// Add a menu item to the owner's restaurant.
pub async fn add(
    State(state): State<AppState>,
    RequireOwner(user): RequireOwner,
    Form(form): Form<AddMenuItemForm>,
) -> Result<Redirect> {
    let restaurant = RestaurantRepository::new(state.pool())
        .find_by_owner(user.id)
        .await?
        .ok_or_else(|| AppError::BadRequest(NO_RESTAURANT_MESSAGE.to_string()))?;

    let item = NewMenuItem {
        restaurant_id: restaurant.id,
        name: form.name,
        description: form.description,
        price: parse_price(&form.price)?,
        category: form.category,
        availability: parse_availability(form.availability.as_deref()),
    };

    let created = MenuItemRepository::new(state.pool()).create(&item).await?;
    tracing::info!(
        menu_item_id = %created.id,
        restaurant_id = %restaurant.id,
        "menu item added"
    );
    Ok(Redirect::to("/restaurant-owner-home"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_accepts_decimals() {
        assert_eq!(parse_price("120").unwrap(), Decimal::new(120, 0));
        assert_eq!(parse_price("99.50").unwrap(), Decimal::new(9950, 2));
        assert_eq!(parse_price(" 0 ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_price_rejects_garbage_and_negatives() {
        assert!(parse_price("free").is_err());
        assert!(parse_price("").is_err());
        assert!(parse_price("-5").is_err());
    }

    #[test]
    fn test_parse_availability() {
        assert!(parse_availability(Some("true")));
        assert!(!parse_availability(Some("false")));
        assert!(!parse_availability(Some("on")));
        assert!(!parse_availability(None));
    }
}
