//! User domain types.

use chrono::{DateTime, Utc};

use tiffin_core::{Address, Role, UserId};

/// A registered account (domain type).
///
/// The password hash is deliberately not part of this type; it is only
/// surfaced by the auth lookup in the user repository.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display/login name. Not guaranteed unique.
    pub name: String,
    /// Contact email. Free text, not validated or unique.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// The account's role.
    pub role: Role,
    /// Embedded postal address.
    pub address: Address,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub address: Address,
}
