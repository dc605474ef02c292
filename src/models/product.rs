//! Represents a product row as read from the catalog.

use rust_decimal::Decimal;
use sqlx::FromRow;

/// A single product listed on the index page.
///
/// Rows are inserted by an external tool; this service only reads them.
#[derive(Clone, FromRow, Debug, PartialEq)]
pub struct Product {
    /// Auto-incremented primary key.
    pub id: i32,

    /// Display name (required).
    pub name: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Fixed-point price, stored as `DECIMAL(10,2)`.
    pub price: Decimal,
}

impl Product {
    /// Price formatted with exactly two fraction digits.
    pub fn display_price(&self) -> String {
        format!("{:.2}", self.price)
    }
}
