//! Seed the database with demo data.
//!
//! Creates one account per role (all with the password `password123`),
//! a demo restaurant for the owner, and a small menu. Safe to re-run:
//! existing demo accounts are detected by name and reused.

use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;

use tiffin_core::{Address, Role};
use tiffin_web::db::{MenuItemRepository, RestaurantRepository, UserRepository};
use tiffin_web::models::{NewMenuItem, NewUser, User};
use tiffin_web::services::auth::hash_password;

use super::{CommandError, connect};

const DEMO_PASSWORD: &str = "password123";

/// Seed demo accounts, a restaurant and its menu.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    let owner = ensure_user(&pool, "asha", "asha@example.com", Role::RestaurantOwner).await?;
    let customer = ensure_user(&pool, "ravi", "ravi@example.com", Role::Customer).await?;
    let driver = ensure_user(&pool, "dev", "dev@example.com", Role::DeliveryPerson).await?;

    let restaurants = RestaurantRepository::new(&pool);
    let restaurant = restaurants
        .upsert_details(
            owner.id,
            "Asha's Kitchen",
            &Address::new(
                "12 MG Road".to_string(),
                "Bengaluru".to_string(),
                "Karnataka".to_string(),
                "560001".to_string(),
            ),
        )
        .await
        .map_err(|e| CommandError::Seed(e.to_string()))?;

    let menu_items = MenuItemRepository::new(&pool);
    let existing = menu_items
        .list_by_restaurant(restaurant.id)
        .await
        .map_err(|e| CommandError::Seed(e.to_string()))?;

    if existing.is_empty() {
        for (name, description, price, category) in [
            ("Masala Dosa", "Crisp dosa with potato filling", "80.00", "Tiffin"),
            ("Idli Vada", "Two idlis, one vada, sambar", "60.00", "Tiffin"),
            ("Veg Thali", "Rice, rotis, three curries, dessert", "150.00", "Meals"),
            ("Filter Coffee", "Strong south Indian coffee", "25.00", "Beverages"),
        ] {
            let price: Decimal = price
                .parse()
                .map_err(|_| CommandError::Seed(format!("bad seed price: {price}")))?;
            menu_items
                .create(&NewMenuItem {
                    restaurant_id: restaurant.id,
                    name: name.to_string(),
                    description: description.to_string(),
                    price,
                    category: category.to_string(),
                    availability: true,
                })
                .await
                .map_err(|e| CommandError::Seed(e.to_string()))?;
        }
        info!(restaurant_id = %restaurant.id, "Seeded demo menu");
    }

    info!(
        owner = %owner.id,
        customer = %customer.id,
        driver = %driver.id,
        "Seed complete; all demo accounts use password {DEMO_PASSWORD:?}"
    );
    Ok(())
}

/// Create a demo account unless one with the same name already exists.
async fn ensure_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    role: Role,
) -> Result<User, CommandError> {
    let users = UserRepository::new(pool);

    if let Some((user, _)) = users
        .find_first_by_name(name)
        .await
        .map_err(|e| CommandError::Seed(e.to_string()))?
    {
        info!(user_id = %user.id, name, "Demo account already exists");
        return Ok(user);
    }

    let password_hash =
        hash_password(DEMO_PASSWORD).map_err(|e| CommandError::Seed(e.to_string()))?;
    let user = users
        .create(
            &NewUser {
                name: name.to_string(),
                email: email.to_string(),
                phone: "9000000000".to_string(),
                role,
                address: Address::new(
                    "1 Demo Street".to_string(),
                    "Bengaluru".to_string(),
                    "Karnataka".to_string(),
                    "560001".to_string(),
                ),
            },
            &password_hash,
        )
        .await
        .map_err(|e| CommandError::Seed(e.to_string()))?;

    info!(user_id = %user.id, name, %role, "Created demo account");
    Ok(user)
}
