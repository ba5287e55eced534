//! Embedded postal address value type.

use serde::{Deserialize, Serialize};

/// A postal address embedded in a user or restaurant record.
///
/// Fields are free text from registration and profile forms; no format
/// validation is applied beyond presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

impl Address {
    /// Create an address from its four components.
    #[must_use]
    pub const fn new(street: String, city: String, state: String, pincode: String) -> Self {
        Self {
            street,
            city,
            state,
            pincode,
        }
    }
}
