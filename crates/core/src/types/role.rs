//! User role enumeration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Role`] from a string.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct RoleError(pub String);

/// The role of a registered user.
///
/// This is a closed set: every handler that branches on a role must cover
/// all three variants, so a request can never fall through unanswered.
/// The wire and database representation is the snake_case string form.
///
/// ## Examples
///
/// ```
/// use tiffin_core::Role;
///
/// let role = Role::parse("restaurant_owner").unwrap();
/// assert_eq!(role, Role::RestaurantOwner);
/// assert_eq!(role.as_str(), "restaurant_owner");
/// assert!(Role::parse("admin").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses restaurants and places orders.
    Customer,
    /// Manages one restaurant profile and its menu.
    RestaurantOwner,
    /// Views orders assigned for delivery.
    DeliveryPerson,
}

impl Role {
    /// Parse a `Role` from its snake_case string form.
    ///
    /// # Errors
    ///
    /// Returns [`RoleError`] for any string outside the three known roles.
    pub fn parse(s: &str) -> Result<Self, RoleError> {
        match s {
            "customer" => Ok(Self::Customer),
            "restaurant_owner" => Ok(Self::RestaurantOwner),
            "delivery_person" => Ok(Self::DeliveryPerson),
            other => Err(RoleError(other.to_owned())),
        }
    }

    /// Returns the snake_case string form stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::RestaurantOwner => "restaurant_owner",
            Self::DeliveryPerson => "delivery_person",
        }
    }

    /// Returns the landing page a freshly logged-in user of this role is
    /// redirected to.
    #[must_use]
    pub const fn home_path(&self) -> &'static str {
        match self {
            Self::Customer => "/customer-home",
            Self::RestaurantOwner => "/restaurant-owner-home",
            Self::DeliveryPerson => "/driver-home",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("customer").unwrap(), Role::Customer);
        assert_eq!(
            Role::parse("restaurant_owner").unwrap(),
            Role::RestaurantOwner
        );
        assert_eq!(
            Role::parse("delivery_person").unwrap(),
            Role::DeliveryPerson
        );
    }

    #[test]
    fn test_parse_unknown_role() {
        let err = Role::parse("admin").unwrap_err();
        assert_eq!(err, RoleError("admin".to_owned()));
    }

    #[test]
    fn test_display_roundtrip() {
        for role in [Role::Customer, Role::RestaurantOwner, Role::DeliveryPerson] {
            assert_eq!(Role::parse(&role.to_string()).unwrap(), role);
        }
    }

    #[test]
    fn test_home_path() {
        assert_eq!(Role::Customer.home_path(), "/customer-home");
        assert_eq!(Role::RestaurantOwner.home_path(), "/restaurant-owner-home");
        assert_eq!(Role::DeliveryPerson.home_path(), "/driver-home");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Role::DeliveryPerson).unwrap();
        assert_eq!(json, "\"delivery_person\"");
        let parsed: Role = serde_json::from_str("\"restaurant_owner\"").unwrap();
        assert_eq!(parsed, Role::RestaurantOwner);
    }
}
