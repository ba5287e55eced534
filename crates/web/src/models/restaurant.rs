//! Restaurant domain type.

use chrono::{DateTime, Utc};

use tiffin_core::{Address, RestaurantId, UserId};

/// A restaurant profile (domain type).
///
/// At most one row exists per owner; the details handler upserts on
/// `owner_id`.
#[derive(Debug, Clone)]
pub struct Restaurant {
    /// Unique restaurant ID.
    pub id: RestaurantId,
    /// The owning `restaurant_owner` account.
    pub owner_id: UserId,
    /// Restaurant display name.
    pub name: String,
    /// Embedded postal address.
    pub address: Address,
    /// When the profile was first created.
    pub created_at: DateTime<Utc>,
    /// When the profile was last upserted.
    pub updated_at: DateTime<Utc>,
}
