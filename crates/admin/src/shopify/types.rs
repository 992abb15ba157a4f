//! Typed views of Admin API response nodes.
//!
//! Only the fields the orchestration layer actually reads are modeled;
//! everything else stays in the JSON it arrived in.

use serde::Deserialize;
use serde_json::Value;

/// Generic `{ nodes: [...] }` connection shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Nodes<T> {
    pub nodes: Vec<T>,
}

impl<T> Default for Nodes<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// One `selectedOptions` entry on a variant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

/// `MediaImage.image`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// Media processing status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    Uploaded,
    Processing,
    Ready,
    Failed,
}

/// A media node as returned by the product media query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaNode {
    pub id: String,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub media_content_type: Option<String>,
    pub status: MediaStatus,
    #[serde(default)]
    pub media_errors: Value,
    #[serde(default)]
    pub media_warnings: Value,
}

/// A media reference inside a variant's `media` connection (no status).
#[derive(Debug, Clone, Deserialize)]
pub struct MediaRef {
    pub id: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// A variant node from the `productVariants` by-product query.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub media: Nodes<MediaRef>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

impl VariantNode {
    /// The value of the named option on this variant, if present.
    #[must_use]
    pub fn option_value(&self, option_name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|so| so.name == option_name)
            .map(|so| so.value.as_str())
    }
}

/// A variant fetched by ID (`productVariant(id:)`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetail {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub media: Nodes<MediaRef>,
}

/// Bare product reference nested in other nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRef {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

/// A variant node from the SKU search, carrying its product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantWithProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub product: ProductRef,
}

/// A metafield node on a product.
#[derive(Debug, Clone, Deserialize)]
pub struct MetafieldNode {
    pub id: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
}

/// A product summary from the `products` search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metafields: Nodes<MetafieldNode>,
}

/// A product option definition.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductOptionNode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// The `newProduct` payload of `productDuplicate`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatedProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub variants: Nodes<VariantNode>,
    pub options: Vec<ProductOptionNode>,
}

/// One name/value form field of a staged upload target.
#[derive(Debug, Clone, Deserialize)]
pub struct StagedUploadParameter {
    pub name: String,
    pub value: String,
}

/// An ephemeral staged upload target.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadTarget {
    pub url: String,
    pub resource_url: String,
    pub parameters: Vec<StagedUploadParameter>,
}

/// A shop file-library node (only the id and image URL are read).
#[derive(Debug, Clone, Deserialize)]
pub struct FileNode {
    pub id: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

/// `inventoryAdjustmentGroup` from `inventorySetQuantities`; null when
/// the write was a no-op.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAdjustmentGroup {
    pub id: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub changes: Vec<InventoryChange>,
}

/// One change entry of an inventory adjustment group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryChange {
    pub name: String,
    pub delta: i64,
    #[serde(default)]
    pub quantity_after_change: Option<i64>,
}
