//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use tiffin_core::{MenuItemId, OrderId, RestaurantId, UserId};

/// Default status for freshly placed orders.
pub const DEFAULT_ORDER_STATUS: &str = "Pending";

/// A placed order (domain type).
///
/// One row per selected menu item. Immutable once created: no handler in
/// this application updates an order, and `delivery_person_id` is read by
/// the driver home page but written nowhere (assignment is an explicit
/// extension point).
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The customer who placed the order.
    pub customer_id: UserId,
    /// The restaurant the item was ordered from.
    pub restaurant_id: RestaurantId,
    /// The ordered menu item.
    pub menu_item_id: MenuItemId,
    /// Requested quantity. Positive.
    pub quantity: i32,
    /// Unit price × quantity, computed at creation.
    pub total_price: Decimal,
    /// Free-text status, defaults to `Pending`.
    pub status: String,
    /// Assigned delivery person, if any.
    pub delivery_person_id: Option<UserId>,
    /// Creation timestamp; shared by every order of one batch.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: UserId,
    pub restaurant_id: RestaurantId,
    pub menu_item_id: MenuItemId,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// An order joined with its menu item and customer for the orders listing.
///
/// Produced by an inner join, so orders whose menu item or customer row
/// has been deleted never appear here.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderListing {
    pub id: OrderId,
    pub quantity: i32,
    pub total_price: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub menu_item_name: String,
    pub menu_item_price: Decimal,
    pub customer_name: String,
    pub customer_email: String,
}
