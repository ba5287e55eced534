//! Tiffin web application library.
//!
//! This crate provides the food-delivery application as a library,
//! allowing it to be tested and reused by the CLI tools.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
