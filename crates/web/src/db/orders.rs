//! Order repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use tiffin_core::{MenuItemId, OrderId, RestaurantId, UserId};

use super::RepositoryError;
use crate::models::order::{NewOrder, Order, OrderListing};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    customer_id: UserId,
    restaurant_id: RestaurantId,
    menu_item_id: MenuItemId,
    quantity: i32,
    total_price: Decimal,
    status: String,
    delivery_person_id: Option<UserId>,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            restaurant_id: row.restaurant_id,
            menu_item_id: row.menu_item_id,
            quantity: row.quantity,
            total_price: row.total_price,
            status: row.status,
            delivery_person_id: row.delivery_person_id,
            created_at: row.created_at,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a batch of orders in a single transaction.
    ///
    /// Either every order persists or none does; a failure partway through
    /// rolls the whole batch back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn insert_batch(&self, orders: &[NewOrder]) -> Result<Vec<OrderId>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let mut ids = Vec::with_capacity(orders.len());
        for order in orders {
            let (id,) = sqlx::query_as::<_, (OrderId,)>(
                r"
                INSERT INTO orders (customer_id, restaurant_id, menu_item_id,
                                    quantity, total_price, status, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id
                ",
            )
            .bind(order.customer_id)
            .bind(order.restaurant_id)
            .bind(order.menu_item_id)
            .bind(order.quantity)
            .bind(order.total_price)
            .bind(&order.status)
            .bind(order.created_at)
            .fetch_one(&mut *tx)
            .await?;

            ids.push(id);
        }

        tx.commit().await?;

        Ok(ids)
    }

    /// List every order joined with its menu item and customer.
    ///
    /// Inner-join semantics: orders whose menu item or customer row no
    /// longer exists are silently dropped from the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_joined(&self) -> Result<Vec<OrderListing>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderListing>(
            r"
            SELECT o.id, o.quantity, o.total_price, o.status, o.created_at,
                   m.name AS menu_item_name, m.price AS menu_item_price,
                   u.name AS customer_name, u.email AS customer_email
            FROM orders o
            JOIN menu_items m ON m.id = o.menu_item_id
            JOIN users u ON u.id = o.customer_id
            ORDER BY o.created_at DESC, o.id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// List the orders assigned to a delivery person.
    ///
    /// Nothing in this application writes `delivery_person_id`; assignment
    /// happens out of band.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_delivery_person(
        &self,
        delivery_person_id: UserId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, customer_id, restaurant_id, menu_item_id,
                   quantity, total_price, status, delivery_person_id, created_at
            FROM orders
            WHERE delivery_person_id = $1
            ORDER BY created_at DESC, id
            ",
        )
        .bind(delivery_person_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tiffin_core::Role;

    use super::*;
    use crate::db::{MenuItemRepository, RestaurantRepository, UserRepository};
    use crate::models::{DEFAULT_ORDER_STATUS, MenuItem, NewMenuItem, NewUser, User};
    use tiffin_core::Address;

    fn address() -> Address {
        Address::new(
            "1 Demo Street".to_string(),
            "Bengaluru".to_string(),
            "Karnataka".to_string(),
            "560001".to_string(),
        )
    }

    async fn create_user(pool: &PgPool, name: &str, role: Role) -> User {
        UserRepository::new(pool)
            .create(
                &NewUser {
                    name: name.to_string(),
                    email: format!("{name}@example.com"),
                    phone: "9000000000".to_string(),
                    role,
                    address: address(),
                },
                "not-a-real-hash",
            )
            .await
            .unwrap()
    }

    /// Seeds a customer, an owner with a restaurant, and two menu items.
    async fn seed(pool: &PgPool) -> (User, RestaurantId, Vec<MenuItem>) {
        let customer = create_user(pool, "ravi", Role::Customer).await;
        let owner = create_user(pool, "asha", Role::RestaurantOwner).await;

        let restaurant = RestaurantRepository::new(pool)
            .upsert_details(owner.id, "Asha's Kitchen", &address())
            .await
            .unwrap();

        let menu_items = MenuItemRepository::new(pool);
        let mut items = Vec::new();
        for (name, price) in [("Masala Dosa", "80.00"), ("Filter Coffee", "25.00")] {
            items.push(
                menu_items
                    .create(&NewMenuItem {
                        restaurant_id: restaurant.id,
                        name: name.to_string(),
                        description: "Tasty".to_string(),
                        price: price.parse().unwrap(),
                        category: "Tiffin".to_string(),
                        availability: true,
                    })
                    .await
                    .unwrap(),
            );
        }

        (customer, restaurant.id, items)
    }

    fn new_order(
        customer: &User,
        restaurant_id: RestaurantId,
        item: &MenuItem,
        quantity: i32,
        created_at: DateTime<Utc>,
    ) -> NewOrder {
        NewOrder {
            customer_id: customer.id,
            restaurant_id,
            menu_item_id: item.id,
            quantity,
            total_price: item.price * Decimal::from(quantity),
            status: DEFAULT_ORDER_STATUS.to_string(),
            created_at,
        }
    }

    #[sqlx::test]
    async fn test_insert_batch_persists_all_rows_with_shared_timestamp(pool: PgPool) {
        let (customer, restaurant_id, items) = seed(&pool).await;
        let created_at = Utc::now();

        let orders: Vec<NewOrder> = items
            .iter()
            .map(|item| new_order(&customer, restaurant_id, item, 2, created_at))
            .collect();

        let ids = OrderRepository::new(&pool).insert_batch(&orders).await.unwrap();
        assert_eq!(ids.len(), items.len());

        let (distinct_timestamps,): (i64,) =
            sqlx::query_as("SELECT count(DISTINCT created_at) FROM orders")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(distinct_timestamps, 1);

        let listing = OrderRepository::new(&pool).list_joined().await.unwrap();
        assert_eq!(listing.len(), items.len());
        for row in &listing {
            assert_eq!(row.total_price, row.menu_item_price * Decimal::from(row.quantity));
            assert_eq!(row.customer_name, "ravi");
            assert_eq!(row.status, DEFAULT_ORDER_STATUS);
        }
    }

    #[sqlx::test]
    async fn test_list_joined_drops_orders_with_missing_references(pool: PgPool) {
        let (customer, restaurant_id, items) = seed(&pool).await;
        let created_at = Utc::now();
        let repo = OrderRepository::new(&pool);

        let orders: Vec<NewOrder> = items
            .iter()
            .map(|item| new_order(&customer, restaurant_id, item, 1, created_at))
            .collect();
        repo.insert_batch(&orders).await.unwrap();

        // Deleting one menu item drops only that order from the listing.
        sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(items.first().unwrap().id)
            .execute(&pool)
            .await
            .unwrap();
        let listing = repo.list_joined().await.unwrap();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.first().unwrap().menu_item_name, "Filter Coffee");

        // Deleting the customer drops the rest.
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(customer.id)
            .execute(&pool)
            .await
            .unwrap();
        assert!(repo.list_joined().await.unwrap().is_empty());

        // The rows themselves are still persisted.
        let (count,): (i64,) = sqlx::query_as("SELECT count(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[sqlx::test]
    async fn test_list_by_delivery_person_filters_on_assignment(pool: PgPool) {
        let (customer, restaurant_id, items) = seed(&pool).await;
        let driver = create_user(&pool, "dev", Role::DeliveryPerson).await;
        let repo = OrderRepository::new(&pool);

        let ids = repo
            .insert_batch(&[new_order(
                &customer,
                restaurant_id,
                items.first().unwrap(),
                1,
                Utc::now(),
            )])
            .await
            .unwrap();

        assert!(repo.list_by_delivery_person(driver.id).await.unwrap().is_empty());

        // Assignment happens out of band; emulate it directly.
        sqlx::query("UPDATE orders SET delivery_person_id = $1 WHERE id = $2")
            .bind(driver.id)
            .bind(*ids.first().unwrap())
            .execute(&pool)
            .await
            .unwrap();

        let assigned = repo.list_by_delivery_person(driver.id).await.unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned.first().unwrap().customer_id, customer.id);
    }
}
