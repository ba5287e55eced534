//! Menu item domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tiffin_core::{MenuItemId, RestaurantId};

/// A menu item scoped to a restaurant (domain type).
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Unique menu item ID.
    pub id: MenuItemId,
    /// The restaurant this item belongs to.
    pub restaurant_id: RestaurantId,
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Unit price. Non-negative.
    pub price: Decimal,
    /// Item category (free text, e.g. "Starters").
    pub category: String,
    /// Whether the item is currently orderable.
    pub availability: bool,
    /// When the item was added.
    pub created_at: DateTime<Utc>,
}

/// Data required to add a menu item.
#[derive(Debug, Clone)]
pub struct NewMenuItem {
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub availability: bool,
}
