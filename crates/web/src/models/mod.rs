//! Domain models.
//!
//! These types represent validated domain objects separate from database
//! row types; repositories map rows into them.

pub mod menu_item;
pub mod order;
pub mod restaurant;
pub mod session;
pub mod user;

pub use menu_item::{MenuItem, NewMenuItem};
pub use order::{DEFAULT_ORDER_STATUS, NewOrder, Order, OrderListing};
pub use restaurant::Restaurant;
pub use session::{CurrentUser, session_keys};
pub use user::{NewUser, User};
