//! Shopify Admin API catalog orchestration (HIGH PRIVILEGE).
//!
//! Translates high-level catalog intents - split a product per color,
//! replace description images, set inventory for a SKU - into the
//! correct sequence of Admin GraphQL mutations, with natural-key
//! lookups, staged-upload choreography, and poll-based waiting for
//! asynchronous media processing.
//!
//! # Example
//!
//! ```rust,ignore
//! use apricot_admin::{AdminClient, Config};
//!
//! let client = AdminClient::new(&Config::from_env()?);
//!
//! // Split a two-axis product into one product per color
//! let new_ids = client.split_product_by_color("Spring Coat", "DRAFT").await?;
//!
//! // Set absolute stock
//! client.set_available_quantity("ABC-1", "Tokyo Warehouse", 12).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod shopify;

pub use config::{Config, ConfigError};
pub use shopify::{AdminClient, AdminError};
