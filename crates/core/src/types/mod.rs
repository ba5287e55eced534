//! Core types for Tiffin.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod role;

pub use address::Address;
pub use id::*;
pub use role::{Role, RoleError};
