//! Custom Askama template filters.

use std::fmt::Display;

/// Formats a decimal amount as a rupee price.
///
/// Usage in templates: `{{ item.price|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format!("\u{20b9}{amount}"))
}
