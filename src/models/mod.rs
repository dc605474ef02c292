//! Core data models for the product showcase.
//!
//! `Product` maps onto the `products` table via `sqlx::FromRow`; `SignedUrl`
//! is produced fresh on each request and never stored.

pub mod product;
pub mod signed_url;
