//! Restaurant repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use tiffin_core::{Address, RestaurantId, UserId};

use super::RepositoryError;
use crate::models::restaurant::Restaurant;

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: RestaurantId,
    owner_id: UserId,
    name: String,
    street: String,
    city: String,
    state: String,
    pincode: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            address: Address::new(row.street, row.city, row.state, row.pincode),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const RESTAURANT_COLUMNS: &str =
    "id, owner_id, name, street, city, state, pincode, created_at, updated_at";

/// Repository for restaurant database operations.
pub struct RestaurantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RestaurantRepository<'a> {
    /// Create a new restaurant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every restaurant, unfiltered and unpaginated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let rows = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY name, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    /// Get the restaurant owned by the given user, if any.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Option<Restaurant>, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE owner_id = $1"
        ))
        .bind(owner_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Restaurant::from))
    }

    /// Get a restaurant by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Restaurant::from))
    }

    /// Insert or update the restaurant profile for an owner.
    ///
    /// Keyed on the unique `owner_id`, so repeated calls leave exactly one
    /// row per owner carrying the latest submitted name and address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert_details(
        &self,
        owner_id: UserId,
        name: &str,
        address: &Address,
    ) -> Result<Restaurant, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            r"
            INSERT INTO restaurants (owner_id, name, street, city, state, pincode)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (owner_id) DO UPDATE
            SET name = EXCLUDED.name,
                street = EXCLUDED.street,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode,
                updated_at = now()
            RETURNING {RESTAURANT_COLUMNS}
            "
        ))
        .bind(owner_id)
        .bind(name)
        .bind(&address.street)
        .bind(&address.city)
        .bind(&address.state)
        .bind(&address.pincode)
        .fetch_one(self.pool)
        .await?;

        Ok(Restaurant::from(row))
    }
}
