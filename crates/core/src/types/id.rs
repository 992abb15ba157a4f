//! Typed Shopify global IDs.
//!
//! Operator input arrives either as a bare numeric string ("12345") or
//! as a fully qualified global ID (`gid://shopify/Product/12345`). Both
//! forms normalize into a [`Gid`], which pairs the numeric part with its
//! [`ResourceKind`] so that an ID can never silently cross entity types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const GID_PREFIX: &str = "gid://shopify/";

/// Shopify entity types addressable by global ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Product,
    ProductVariant,
    Metafield,
    MediaImage,
    File,
    Location,
    InventoryItem,
}

impl ResourceKind {
    /// The type segment as it appears inside a global ID.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::ProductVariant => "ProductVariant",
            Self::Metafield => "Metafield",
            Self::MediaImage => "MediaImage",
            Self::File => "File",
            Self::Location => "Location",
            Self::InventoryItem => "InventoryItem",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from parsing or normalizing a global ID.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// Input is neither numeric nor a `gid://shopify/...` URI.
    #[error("malformed identifier: {0}")]
    Malformed(String),

    /// A global ID was supplied for a different entity type.
    #[error("expected a {expected} id, got a {found} id")]
    KindMismatch { expected: ResourceKind, found: String },
}

/// A normalized Shopify global ID.
///
/// Displays as `gid://shopify/<Kind>/<numeric>`; parsing the displayed
/// form back with the same expected kind is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gid {
    kind: ResourceKind,
    id: u64,
}

impl Gid {
    /// Build a global ID from its parts.
    #[must_use]
    pub const fn new(kind: ResourceKind, id: u64) -> Self {
        Self { kind, id }
    }

    /// Normalize an operator-supplied identifier against an expected kind.
    ///
    /// Numeric strings are qualified with the expected kind; fully
    /// qualified IDs must already carry that kind.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::KindMismatch`] when a global ID names another
    /// entity type, and [`IdError::Malformed`] for anything that is
    /// neither numeric nor a well-formed `gid://shopify/...` URI.
    pub fn parse(input: &str, expected: ResourceKind) -> Result<Self, IdError> {
        let input = input.trim();
        if !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit()) {
            let id = input
                .parse::<u64>()
                .map_err(|_| IdError::Malformed(input.to_string()))?;
            return Ok(Self::new(expected, id));
        }

        let rest = input
            .strip_prefix(GID_PREFIX)
            .ok_or_else(|| IdError::Malformed(input.to_string()))?;
        let (kind, numeric) = rest
            .split_once('/')
            .ok_or_else(|| IdError::Malformed(input.to_string()))?;
        if kind != expected.as_str() {
            return Err(IdError::KindMismatch {
                expected,
                found: kind.to_string(),
            });
        }
        let id = numeric
            .parse::<u64>()
            .map_err(|_| IdError::Malformed(input.to_string()))?;
        Ok(Self::new(expected, id))
    }

    /// The entity type of this ID.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// The trailing numeric segment, for the legacy search grammar
    /// (`product_id:<n>`).
    #[must_use]
    pub const fn numeric(&self) -> u64 {
        self.id
    }
}

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{GID_PREFIX}{}/{}", self.kind.as_str(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_input_is_qualified() {
        let gid = Gid::parse("12345", ResourceKind::Product).unwrap();
        assert_eq!(gid.to_string(), "gid://shopify/Product/12345");
        assert_eq!(gid.numeric(), 12345);
    }

    #[test]
    fn qualified_input_passes_through() {
        let gid = Gid::parse("gid://shopify/ProductVariant/9", ResourceKind::ProductVariant)
            .unwrap();
        assert_eq!(gid.to_string(), "gid://shopify/ProductVariant/9");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = Gid::parse("777", ResourceKind::Location).unwrap();
        let twice = Gid::parse(&once.to_string(), ResourceKind::Location).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let err = Gid::parse("gid://shopify/Product/1", ResourceKind::ProductVariant)
            .unwrap_err();
        assert_eq!(
            err,
            IdError::KindMismatch {
                expected: ResourceKind::ProductVariant,
                found: "Product".to_string(),
            }
        );
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            Gid::parse("not-an-id", ResourceKind::Product),
            Err(IdError::Malformed(_))
        ));
        assert!(matches!(
            Gid::parse("gid://shopify/Product/abc", ResourceKind::Product),
            Err(IdError::Malformed(_))
        ));
        assert!(matches!(
            Gid::parse("", ResourceKind::Product),
            Err(IdError::Malformed(_))
        ));
    }
}
