//! Tiffin Core - Shared types library.
//!
//! This crate provides common types used across all Tiffin components:
//! - `web` - The server-rendered food-delivery application
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the [`types::Role`] enumeration, and the
//!   embedded [`types::Address`] value type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
