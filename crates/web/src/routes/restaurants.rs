//! Public restaurant page with the order form.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use crate::{
    db::{MenuItemRepository, RestaurantRepository},
    error::Result,
    filters,
    middleware::OptionalUser,
    models::{CurrentUser, MenuItem, Restaurant},
    state::AppState,
};
use tiffin_core::RestaurantId;

#[derive(Template, WebTemplate)]
#[template(path = "restaurant.html")]
pub struct RestaurantTemplate {
    restaurant: Option<Restaurant>,
    items: Vec<MenuItem>,
    user: Option<CurrentUser>,
    logged_in: bool,
}

/// Public restaurant page.
///
/// Renders a "not found" body (status 200) for unknown IDs rather than a
/// 404, so stale links still get a friendly page. The order form posts to
/// `/order`, which requires a customer session.
pub async fn show(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
    Path(id): Path<RestaurantId>,
) -> Result<RestaurantTemplate> {
    let restaurant = RestaurantRepository::new(state.pool()).find_by_id(id).await?;

    let items = match &restaurant {
        Some(r) => {
            MenuItemRepository::new(state.pool())
                .list_by_restaurant(r.id)
                .await?
        }
        None => Vec::new(),
    };

    Ok(RestaurantTemplate {
        restaurant,
        items,
        logged_in: user.is_some(),
        user,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;
    use tiffin_core::{Address, MenuItemId, Role, UserId};

    use super::*;

    fn fixture_restaurant() -> Restaurant {
        Restaurant {
            id: RestaurantId::new(5),
            owner_id: UserId::new(1),
            name: "Asha's Kitchen".to_string(),
            address: Address::new(
                "12 MG Road".to_string(),
                "Bengaluru".to_string(),
                "Karnataka".to_string(),
                "560001".to_string(),
            ),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fixture_item(id: i32, name: &str, available: bool) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            restaurant_id: RestaurantId::new(5),
            name: name.to_string(),
            description: "Tasty".to_string(),
            price: Decimal::new(8000, 2),
            category: "Tiffin".to_string(),
            availability: available,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_form_fields() {
        let page = RestaurantTemplate {
            restaurant: Some(fixture_restaurant()),
            items: vec![fixture_item(3, "Masala Dosa", true)],
            user: Some(CurrentUser {
                id: UserId::new(2),
                role: Role::Customer,
            }),
            logged_in: true,
        }
        .render()
        .expect("render failed");

        assert!(page.contains("Asha&#x27;s Kitchen") || page.contains("Asha's Kitchen"));
        assert!(page.contains(r#"name="restaurant_id" value="5""#));
        assert!(page.contains(r#"name="menu_items" value="3""#));
        assert!(page.contains(r#"name="quantity[3]""#));
        assert!(page.contains("\u{20b9}80.00"));
        assert!(page.contains("Place order"));
    }

    #[test]
    fn test_unavailable_item_has_no_checkbox() {
        let page = RestaurantTemplate {
            restaurant: Some(fixture_restaurant()),
            items: vec![fixture_item(4, "Veg Thali", false)],
            user: None,
            logged_in: false,
        }
        .render()
        .expect("render failed");

        assert!(!page.contains(r#"name="menu_items""#));
        assert!(page.contains("(unavailable)"));
        assert!(page.contains("Log in"));
    }

    #[test]
    fn test_unknown_restaurant_renders_not_found_body() {
        let page = RestaurantTemplate {
            restaurant: None,
            items: Vec::new(),
            user: None,
            logged_in: false,
        }
        .render()
        .expect("render failed");

        assert!(page.contains("Restaurant not found"));
    }
}
