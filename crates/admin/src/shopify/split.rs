//! The split-by-color workflow.
//!
//! Turns one multi-color product into a family of single-color
//! products: duplicate once per color, prune the foreign variants and
//! media from each duplicate, drop the color option, rewrite the
//! handle, and cross-link the family through metafields.
//!
//! Duplicates are created in DRAFT status so a failure mid-run leaves
//! nothing customer-visible; the source product is never modified.

use tracing::{info, instrument};

use super::types::{DuplicatedProduct, VariantNode};
use super::{AdminClient, AdminError};

/// The option that encodes color on this shop's products.
pub const COLOR_OPTION: &str = "カラー";

/// The distinct color values across a variant set, in first-seen order.
fn color_values(variants: &[VariantNode]) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for variant in variants {
        if let Some(value) = variant.option_value(COLOR_OPTION) {
            if !colors.iter().any(|c| c == value) {
                colors.push(value.to_string());
            }
        }
    }
    colors
}

/// Split a duplicate's variants into the IDs to keep (matching the
/// color) and the IDs to remove (everything else).
fn partition_by_color(variants: &[VariantNode], color: &str) -> (Vec<String>, Vec<String>) {
    let (keep, remove): (Vec<&VariantNode>, Vec<&VariantNode>) = variants
        .iter()
        .partition(|v| v.option_value(COLOR_OPTION) == Some(color));
    (
        keep.into_iter().map(|v| v.id.clone()).collect(),
        remove.into_iter().map(|v| v.id.clone()).collect(),
    )
}

/// The handle suffix for a color value: lowercased, whitespace runs
/// joined with hyphens.
fn handle_suffix(color: &str) -> String {
    color
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl AdminClient {
    /// Split a product into one single-color product per color value.
    ///
    /// The source product is resolved by title and left untouched;
    /// duplicates are created in `new_status` (DRAFT by default at the
    /// CLI). Returns the new product IDs in color order.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup, mutation, or media wait fails,
    /// or if a duplicate does not carry exactly one color option.
    #[instrument(skip(self), fields(title = %title))]
    pub async fn split_product_by_color(
        &self,
        title: &str,
        new_status: &str,
    ) -> Result<Vec<String>, AdminError> {
        let product = self.product_by_title(title).await?;
        let variants = self.product_variants_by_product_id(&product.id).await?;
        let colors = color_values(&variants);
        info!(product_id = %product.id, ?colors, "splitting product by color");

        let mut new_product_ids = Vec::with_capacity(colors.len());
        for color in &colors {
            let new_id = self
                .split_one_color(&product.id, &product.handle, title, color, new_status)
                .await?;
            new_product_ids.push(new_id);
        }

        // Second pass so every family member lists the complete family.
        for new_product_id in &new_product_ids {
            self.set_variation_products(new_product_id, &new_product_ids)
                .await?;
        }
        Ok(new_product_ids)
    }

    /// Create and prune the duplicate for one color value.
    async fn split_one_color(
        &self,
        product_id: &str,
        product_handle: &str,
        title: &str,
        color: &str,
        new_status: &str,
    ) -> Result<String, AdminError> {
        let new_product = self
            .duplicate_product(product_id, title, true, new_status)
            .await?;
        info!(new_product_id = %new_product.id, color = %color, "duplicated product");

        let color_option_id = color_option_id(&new_product)?;
        let (keep, remove) = partition_by_color(&new_product.variants.nodes, color);
        let first_kept = keep.first().ok_or_else(|| {
            AdminError::Assertion(format!(
                "duplicate {} has no variant for color {color}",
                new_product.id
            ))
        })?;

        self.remove_unrelated_media(&new_product.id, first_kept)
            .await?;
        self.remove_product_variants(&new_product.id, &remove)
            .await?;
        self.delete_product_options(&new_product.id, &[color_option_id])
            .await?;

        let new_handle = format!("{product_handle}-{}", handle_suffix(color));
        self.update_product_handle(&new_product.id, &new_handle)
            .await?;
        self.set_variation_value(&new_product.id, color).await?;
        Ok(new_product.id)
    }

    /// Delete every media on the duplicate that does not belong to the
    /// kept variant's slice.
    async fn remove_unrelated_media(
        &self,
        new_product_id: &str,
        kept_variant_id: &str,
    ) -> Result<(), AdminError> {
        let all_media = self.medias_by_product_id(new_product_id).await?;
        let keep_media = self.medias_by_variant_id(kept_variant_id).await?;
        let to_remove: Vec<String> = all_media
            .into_iter()
            .filter(|m| !keep_media.iter().any(|km| km.id == m.id))
            .map(|m| m.id)
            .collect();
        self.delete_product_media(new_product_id, Some(to_remove))
            .await
    }
}

/// The duplicate's color option ID; exactly one option named カラー must
/// exist.
fn color_option_id(product: &DuplicatedProduct) -> Result<String, AdminError> {
    let ids: Vec<&str> = product
        .options
        .iter()
        .filter(|o| o.name == COLOR_OPTION)
        .map(|o| o.id.as_str())
        .collect();
    match ids.as_slice() {
        [id] => Ok((*id).to_string()),
        [] => Err(AdminError::Assertion(format!(
            "No option {COLOR_OPTION} for {}",
            product.id
        ))),
        _ => Err(AdminError::Assertion(format!(
            "Multiple option {COLOR_OPTION} for {}",
            product.id
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shopify::types::{Nodes, ProductOptionNode, SelectedOption};

    fn variant(id: &str, color: Option<&str>, size: &str) -> VariantNode {
        let mut selected_options = vec![SelectedOption {
            name: "サイズ".to_string(),
            value: size.to_string(),
        }];
        if let Some(color) = color {
            selected_options.push(SelectedOption {
                name: COLOR_OPTION.to_string(),
                value: color.to_string(),
            });
        }
        VariantNode {
            id: id.to_string(),
            title: id.to_string(),
            display_name: None,
            sku: None,
            media: Nodes::default(),
            selected_options,
        }
    }

    #[test]
    fn colors_keep_first_seen_order_without_duplicates() {
        let variants = vec![
            variant("v1", Some("Ivory"), "S"),
            variant("v2", Some("Ivory"), "M"),
            variant("v3", Some("Dark Navy"), "S"),
            variant("v4", Some("Dark Navy"), "M"),
            variant("v5", Some("Ivory"), "L"),
        ];
        assert_eq!(color_values(&variants), ["Ivory", "Dark Navy"]);
    }

    #[test]
    fn variants_without_the_option_yield_no_colors() {
        let variants = vec![variant("v1", None, "S"), variant("v2", None, "M")];
        assert!(color_values(&variants).is_empty());
    }

    #[test]
    fn partition_separates_keep_from_remove() {
        let variants = vec![
            variant("v1", Some("Ivory"), "S"),
            variant("v2", Some("Dark Navy"), "S"),
            variant("v3", Some("Ivory"), "M"),
        ];
        let (keep, remove) = partition_by_color(&variants, "Ivory");
        assert_eq!(keep, ["v1", "v3"]);
        assert_eq!(remove, ["v2"]);
    }

    #[test]
    fn handle_suffix_lowercases_and_hyphenates() {
        assert_eq!(handle_suffix("Dark Navy"), "dark-navy");
        assert_eq!(handle_suffix("Ivory"), "ivory");
        assert_eq!(handle_suffix("  Off   White "), "off-white");
    }

    #[test]
    fn color_option_must_be_unique() {
        let option = |id: &str| ProductOptionNode {
            id: id.to_string(),
            name: COLOR_OPTION.to_string(),
            values: vec![],
        };
        let mut product = DuplicatedProduct {
            id: "gid://shopify/Product/1".to_string(),
            handle: "coat".to_string(),
            title: "Coat".to_string(),
            variants: Nodes::default(),
            options: vec![option("o1")],
        };
        assert_eq!(color_option_id(&product).unwrap(), "o1");

        product.options.push(option("o2"));
        let err = color_option_id(&product).unwrap_err();
        assert!(err.to_string().contains("Multiple option"));

        product.options.clear();
        let err = color_option_id(&product).unwrap_err();
        assert!(err.to_string().contains("No option"));
    }
}
