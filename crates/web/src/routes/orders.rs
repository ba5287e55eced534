//! Order placement and the joined orders listing.

use std::collections::HashMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tiffin_core::{MenuItemId, RestaurantId};

use crate::{
    db::{MenuItemRepository, OrderRepository},
    error::{AppError, Result},
    filters,
    middleware::{RequireCustomer, RequireUser},
    models::{DEFAULT_ORDER_STATUS, NewOrder, OrderListing},
    state::AppState,
};

#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    orders: Vec<OrderListing>,
    logged_in: bool,
}

/// Errors from decoding the order form's field pairs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderFormError {
    #[error("missing restaurant_id")]
    MissingRestaurantId,
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}

/// The decoded order form.
///
/// The page submits one checkbox per selected item (`menu_items`, repeated)
/// plus a per-item quantity field (`quantity[<id>]`) and a hidden
/// `restaurant_id`. Every quantity entry must be a positive integer, even
/// for items that were not selected; a selected item without a quantity
/// field defaults to one.
#[derive(Debug)]
pub struct PlaceOrderForm {
    pub restaurant_id: RestaurantId,
    pub menu_items: Vec<MenuItemId>,
    quantities: HashMap<MenuItemId, i32>,
}

impl PlaceOrderForm {
    /// Decode the raw urlencoded pairs.
    pub fn from_pairs(pairs: &[(String, String)]) -> std::result::Result<Self, OrderFormError> {
        let mut restaurant_id = None;
        let mut menu_items = Vec::new();
        let mut quantities = HashMap::new();

        for (key, value) in pairs {
            match key.as_str() {
                "restaurant_id" => {
                    let id = value
                        .parse::<RestaurantId>()
                        .map_err(|_| OrderFormError::InvalidId(value.clone()))?;
                    restaurant_id = Some(id);
                }
                "menu_items" => {
                    let id = value
                        .parse::<MenuItemId>()
                        .map_err(|_| OrderFormError::InvalidId(value.clone()))?;
                    menu_items.push(id);
                }
                key => {
                    if let Some(raw_id) = key
                        .strip_prefix("quantity[")
                        .and_then(|rest| rest.strip_suffix(']'))
                    {
                        let id = raw_id
                            .parse::<MenuItemId>()
                            .map_err(|_| OrderFormError::InvalidId(raw_id.to_string()))?;
                        let quantity = value
                            .parse::<i32>()
                            .ok()
                            .filter(|q| *q >= 1)
                            .ok_or_else(|| OrderFormError::InvalidQuantity(value.clone()))?;
                        quantities.insert(id, quantity);
                    }
                    // Unknown fields are ignored.
                }
            }
        }

        let restaurant_id = restaurant_id.ok_or(OrderFormError::MissingRestaurantId)?;
        Ok(Self {
            restaurant_id,
            menu_items,
            quantities,
        })
    }

    /// Quantity for a selected item, defaulting to one.
    pub fn quantity_for(&self, id: MenuItemId) -> i32 {
        self.quantities.get(&id).copied().unwrap_or(1)
    }
}

/// Joined listing of all orders, visible to any logged-in account.
pub async fn index(
    State(state): State<AppState>,
    RequireUser(_user): RequireUser,
) -> Result<OrdersTemplate> {
    let orders = OrderRepository::new(state.pool()).list_joined().await?;
    Ok(OrdersTemplate {
        orders,
        logged_in: true,
    })
}

/// Place an order: one row per selected menu item, inserted in a single
/// transaction with a shared creation timestamp.
pub async fn place(
    State(state): State<AppState>,
    RequireCustomer(user): RequireCustomer,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect> {
    let form = PlaceOrderForm::from_pairs(&pairs)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if form.menu_items.is_empty() {
        return Err(AppError::BadRequest("No menu items selected".to_string()));
    }

    let menu_items = MenuItemRepository::new(state.pool());
    let created_at = Utc::now();
    let mut orders = Vec::with_capacity(form.menu_items.len());

    for &item_id in &form.menu_items {
        let item = menu_items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Menu item not found".to_string()))?;

        let quantity = form.quantity_for(item_id);
        orders.push(NewOrder {
            customer_id: user.id,
            restaurant_id: form.restaurant_id,
            menu_item_id: item.id,
            quantity,
            total_price: item.price * Decimal::from(quantity),
            status: DEFAULT_ORDER_STATUS.to_string(),
            created_at,
        });
    }

    let ids = OrderRepository::new(state.pool()).insert_batch(&orders).await?;
    tracing::info!(
        customer_id = %user.id,
        restaurant_id = %form.restaurant_id,
        order_count = ids.len(),
        "order placed"
    );
    Ok(Redirect::to("/orders"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_from_pairs_full_form() {
        let form = PlaceOrderForm::from_pairs(&pairs(&[
            ("restaurant_id", "7"),
            ("menu_items", "3"),
            ("menu_items", "5"),
            ("quantity[3]", "2"),
            ("quantity[5]", "1"),
            ("quantity[9]", "4"),
        ]))
        .unwrap();

        assert_eq!(form.restaurant_id, RestaurantId::new(7));
        assert_eq!(
            form.menu_items,
            vec![MenuItemId::new(3), MenuItemId::new(5)]
        );
        assert_eq!(form.quantity_for(MenuItemId::new(3)), 2);
        assert_eq!(form.quantity_for(MenuItemId::new(5)), 1);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        let form = PlaceOrderForm::from_pairs(&pairs(&[
            ("restaurant_id", "1"),
            ("menu_items", "2"),
        ]))
        .unwrap();
        assert_eq!(form.quantity_for(MenuItemId::new(2)), 1);
    }

    #[test]
    fn test_empty_selection_is_allowed_by_decoding() {
        // The handler turns this into a 400; decoding itself succeeds.
        let form = PlaceOrderForm::from_pairs(&pairs(&[("restaurant_id", "1")])).unwrap();
        assert!(form.menu_items.is_empty());
    }

    #[test]
    fn test_missing_restaurant_id() {
        let err = PlaceOrderForm::from_pairs(&pairs(&[("menu_items", "2")])).unwrap_err();
        assert_eq!(err, OrderFormError::MissingRestaurantId);
    }

    #[test]
    fn test_invalid_quantity() {
        let err = PlaceOrderForm::from_pairs(&pairs(&[
            ("restaurant_id", "1"),
            ("menu_items", "2"),
            ("quantity[2]", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, OrderFormError::InvalidQuantity("0".to_string()));

        let err = PlaceOrderForm::from_pairs(&pairs(&[
            ("restaurant_id", "1"),
            ("quantity[2]", "lots"),
        ]))
        .unwrap_err();
        assert_eq!(err, OrderFormError::InvalidQuantity("lots".to_string()));
    }

    #[test]
    fn test_orders_template_renders_listing() {
        let page = OrdersTemplate {
            orders: vec![OrderListing {
                id: tiffin_core::OrderId::new(9),
                quantity: 2,
                total_price: Decimal::new(16000, 2),
                status: DEFAULT_ORDER_STATUS.to_string(),
                created_at: Utc::now(),
                menu_item_name: "Masala Dosa".to_string(),
                menu_item_price: Decimal::new(8000, 2),
                customer_name: "ravi".to_string(),
                customer_email: "ravi@example.com".to_string(),
            }],
            logged_in: true,
        }
        .render()
        .expect("render failed");

        assert!(page.contains("Masala Dosa"));
        assert!(page.contains("\u{20b9}160.00"));
        assert!(page.contains("Pending"));
        assert!(page.contains("ravi@example.com"));
    }

    #[test]
    fn test_orders_template_empty_state() {
        let page = OrdersTemplate {
            orders: Vec::new(),
            logged_in: true,
        }
        .render()
        .expect("render failed");
        assert!(page.contains("No orders yet"));
    }

    #[test]
    fn test_logged_in_nav_hides_login_links() {
        let page = OrdersTemplate {
            orders: Vec::new(),
            logged_in: true,
        }
        .render()
        .expect("render failed");
        assert!(page.contains(r#"action="/logout""#));
        assert!(!page.contains(r#"<a href="/login">Login</a>"#));
        assert!(!page.contains(r#"<a href="/register">Register</a>"#));
    }

    #[test]
    fn test_invalid_ids() {
        assert!(matches!(
            PlaceOrderForm::from_pairs(&pairs(&[("restaurant_id", "abc")])).unwrap_err(),
            OrderFormError::InvalidId(_)
        ));
        assert!(matches!(
            PlaceOrderForm::from_pairs(&pairs(&[
                ("restaurant_id", "1"),
                ("menu_items", "x"),
            ]))
            .unwrap_err(),
            OrderFormError::InvalidId(_)
        ));
    }

    mod persistence {
        use axum::extract::State;
        use chrono::DateTime;
        use secrecy::SecretString;
        use sqlx::PgPool;
        use tiffin_core::{Address, Role};

        use super::*;
        use crate::config::AppConfig;
        use crate::db::{RestaurantRepository, UserRepository};
        use crate::models::{CurrentUser, MenuItem, NewMenuItem, NewUser, User};

        fn test_config() -> AppConfig {
            AppConfig {
                database_url: SecretString::from("postgres://unused"),
                host: "127.0.0.1".parse().unwrap(),
                port: 0,
                base_url: "http://localhost:3000".to_string(),
                sentry_dsn: None,
                sentry_environment: None,
            }
        }

        fn address() -> Address {
            Address::new(
                "1 Demo Street".to_string(),
                "Bengaluru".to_string(),
                "Karnataka".to_string(),
                "560001".to_string(),
            )
        }

        async fn create_user(pool: &PgPool, name: &str, role: Role) -> User {
            UserRepository::new(pool)
                .create(
                    &NewUser {
                        name: name.to_string(),
                        email: format!("{name}@example.com"),
                        phone: "9000000000".to_string(),
                        role,
                        address: address(),
                    },
                    "not-a-real-hash",
                )
                .await
                .unwrap()
        }

        /// Seeds a customer plus a restaurant with two menu items.
        async fn seed(pool: &PgPool) -> (CurrentUser, RestaurantId, Vec<MenuItem>) {
            let customer = create_user(pool, "ravi", Role::Customer).await;
            let owner = create_user(pool, "asha", Role::RestaurantOwner).await;

            let restaurant = RestaurantRepository::new(pool)
                .upsert_details(owner.id, "Asha's Kitchen", &address())
                .await
                .unwrap();

            let menu_items = MenuItemRepository::new(pool);
            let mut items = Vec::new();
            for (name, price) in [("Masala Dosa", "80.00"), ("Filter Coffee", "25.00")] {
                items.push(
                    menu_items
                        .create(&NewMenuItem {
                            restaurant_id: restaurant.id,
                            name: name.to_string(),
                            description: "Tasty".to_string(),
                            price: price.parse().unwrap(),
                            category: "Tiffin".to_string(),
                            availability: true,
                        })
                        .await
                        .unwrap(),
                );
            }

            let session = CurrentUser {
                id: customer.id,
                role: customer.role,
            };
            (session, restaurant.id, items)
        }

        async fn order_count(pool: &PgPool) -> i64 {
            let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM orders")
                .fetch_one(pool)
                .await
                .unwrap();
            count
        }

        #[sqlx::test]
        async fn test_place_persists_one_row_per_item(pool: PgPool) {
            let (session, restaurant_id, items) = seed(&pool).await;
            let state = AppState::new(test_config(), pool.clone());

            let first = items.first().unwrap();
            let second = items.get(1).unwrap();
            let body = vec![
                ("restaurant_id".to_string(), restaurant_id.to_string()),
                ("menu_items".to_string(), first.id.to_string()),
                ("menu_items".to_string(), second.id.to_string()),
                (format!("quantity[{}]", first.id), "3".to_string()),
            ];

            place(State(state), RequireCustomer(session), Form(body))
                .await
                .unwrap();

            assert_eq!(order_count(&pool).await, 2);

            let rows: Vec<(Decimal, DateTime<Utc>)> =
                sqlx::query_as("SELECT total_price, created_at FROM orders ORDER BY id")
                    .fetch_all(&pool)
                    .await
                    .unwrap();
            let (first_total, first_ts) = rows.first().unwrap();
            let (second_total, second_ts) = rows.get(1).unwrap();
            assert_eq!(*first_total, first.price * Decimal::from(3));
            assert_eq!(*second_total, second.price);
            assert_eq!(first_ts, second_ts);
        }

        #[sqlx::test]
        async fn test_place_with_missing_item_persists_nothing(pool: PgPool) {
            let (session, restaurant_id, items) = seed(&pool).await;
            let state = AppState::new(test_config(), pool.clone());

            let valid = items.first().unwrap();
            let missing = MenuItemId::new(valid.id.as_i32() + 999);
            let body = vec![
                ("restaurant_id".to_string(), restaurant_id.to_string()),
                ("menu_items".to_string(), valid.id.to_string()),
                ("menu_items".to_string(), missing.to_string()),
            ];

            let err = place(State(state), RequireCustomer(session), Form(body))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Menu item not found"));

            assert_eq!(order_count(&pool).await, 0);
        }
    }
}
