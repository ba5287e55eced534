//! User repository for database operations.
//!
//! Queries use the runtime sqlx API with `FromRow` row types that are
//! mapped into domain models; stored role strings outside the known set
//! surface as data corruption rather than panicking.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tiffin_core::{Address, Role, UserId};

use super::RepositoryError;
use crate::models::user::{NewUser, User};

/// Database row for a user, including the password hash.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    phone: String,
    password_hash: String,
    role: String,
    street: String,
    city: String,
    state: String,
    pincode: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    /// Split the row into the domain user and its password hash.
    fn into_domain(self) -> Result<(User, String), RepositoryError> {
        let role = Role::parse(&self.role).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        let user = User {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            role,
            address: Address::new(self.street, self.city, self.state, self.pincode),
            created_at: self.created_at,
        };

        Ok((user, self.password_hash))
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user with the given (already hashed) password.
    ///
    /// Names are not unique; registration never conflicts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        new_user: &NewUser,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (name, email, phone, password_hash, role,
                               street, city, state, pincode)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, name, email, phone, password_hash, role,
                      street, city, state, pincode, created_at
            ",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(password_hash)
        .bind(new_user.role.as_str())
        .bind(&new_user.address.street)
        .bind(&new_user.address.city)
        .bind(&new_user.address.state)
        .bind(&new_user.address.pincode)
        .fetch_one(self.pool)
        .await?;

        let (user, _) = row.into_domain()?;
        Ok(user)
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, phone, password_hash, role,
                   street, city, state, pincode, created_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| r.into_domain().map(|(user, _)| user)).transpose()
    }

    /// Get the first user with the given login name, along with their
    /// password hash.
    ///
    /// Names are not unique; when several accounts share one, the earliest
    /// registration wins, matching the store's first-match lookup.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored role is invalid.
    pub async fn find_first_by_name(
        &self,
        name: &str,
    ) -> Result<Option<(User, String)>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, name, email, phone, password_hash, role,
                   street, city, state, pincode, created_at
            FROM users
            WHERE name = $1
            ORDER BY id
            LIMIT 1
            ",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        row.map(UserRow::into_domain).transpose()
    }
}
