//! Menu item repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tiffin_core::{MenuItemId, RestaurantId};

use super::RepositoryError;
use crate::models::menu_item::{MenuItem, NewMenuItem};

#[derive(sqlx::FromRow)]
struct MenuItemRow {
    id: MenuItemId,
    restaurant_id: RestaurantId,
    name: String,
    description: String,
    price: Decimal,
    category: String,
    availability: bool,
    created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            availability: row.availability,
            created_at: row.created_at,
        }
    }
}

const MENU_ITEM_COLUMNS: &str =
    "id, restaurant_id, name, description, price, category, availability, created_at";

/// Repository for menu item database operations.
pub struct MenuItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the menu items belonging to a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            r"
            SELECT {MENU_ITEM_COLUMNS}
            FROM menu_items
            WHERE restaurant_id = $1
            ORDER BY category, name, id
            "
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(MenuItem::from).collect())
    }

    /// Get a menu item by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(MenuItem::from))
    }

    /// Insert a new menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_item: &NewMenuItem) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            r"
            INSERT INTO menu_items (restaurant_id, name, description, price, category, availability)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {MENU_ITEM_COLUMNS}
            "
        ))
        .bind(new_item.restaurant_id)
        .bind(&new_item.name)
        .bind(&new_item.description)
        .bind(new_item.price)
        .bind(&new_item.category)
        .bind(new_item.availability)
        .fetch_one(self.pool)
        .await?;

        Ok(MenuItem::from(row))
    }
}
