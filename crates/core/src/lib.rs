//! Shared catalog types for Apricot Studios shop automation.
//!
//! This crate holds the pure, I/O-free building blocks used by the
//! Admin API client and the CLI:
//!
//! - [`types::id`] - typed Shopify global IDs and normalization
//! - [`types::search`] - Admin search-grammar term builders
//! - [`types::media_name`] - image filename sanitization and the
//!   description-HTML fragment builder
//! - [`types::richtext`] - rich-text metafield document builder

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::id::{Gid, IdError, ResourceKind};
