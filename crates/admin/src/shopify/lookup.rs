//! Natural-key lookups with single-result enforcement.
//!
//! Every resolver runs a bounded search query and requires exactly one
//! match: zero results raise [`AdminError::NotFound`], several raise
//! [`AdminError::Ambiguous`], so callers can branch on the two cases.

use std::fmt::Debug;

use serde_json::json;
use tracing::instrument;

use apricot_core::types::search;
use apricot_core::{Gid, ResourceKind};

use super::queries;
use super::types::{
    FileNode, Nodes, ProductSummary, VariantDetail, VariantNode, VariantWithProduct,
};
use super::{AdminClient, AdminError};

/// Enforce the exactly-one-result contract of a natural-key lookup.
fn single<T: Debug>(mut items: Vec<T>, what: &str, key: &str) -> Result<T, AdminError> {
    match items.len() {
        1 => Ok(items.remove(0)),
        0 => Err(AdminError::NotFound(format!("No {what} found for {key}"))),
        _ => Err(AdminError::Ambiguous(format!(
            "Multiple {what} found for {key}: {items:?}"
        ))),
    }
}

impl AdminClient {
    /// All products matching an Admin search query (bounded at 10).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products_by_query(
        &self,
        query_string: &str,
    ) -> Result<Vec<ProductSummary>, AdminError> {
        let products: Nodes<ProductSummary> = self
            .query_field(
                queries::PRODUCTS_BY_QUERY,
                json!({ "query_string": query_string }),
                "products",
            )
            .await?;
        Ok(products.nodes)
    }

    /// Exactly one product matching an Admin search query.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    pub async fn product_by_query(
        &self,
        query_string: &str,
    ) -> Result<ProductSummary, AdminError> {
        let products = self.products_by_query(query_string).await?;
        single(products, "products", query_string)
    }

    /// Resolve a product by its (near-unique) title.
    ///
    /// # Errors
    ///
    /// See [`Self::product_by_query`].
    pub async fn product_by_title(&self, title: &str) -> Result<ProductSummary, AdminError> {
        self.product_by_query(&search::title(title)).await
    }

    /// Product ID by title.
    ///
    /// # Errors
    ///
    /// See [`Self::product_by_query`].
    pub async fn product_id_by_title(&self, title: &str) -> Result<String, AdminError> {
        Ok(self.product_by_title(title).await?.id)
    }

    /// Resolve a product by its unique handle.
    ///
    /// # Errors
    ///
    /// See [`Self::product_by_query`].
    pub async fn product_by_handle(&self, handle: &str) -> Result<ProductSummary, AdminError> {
        self.product_by_query(&search::handle(handle)).await
    }

    /// Product ID by handle.
    ///
    /// # Errors
    ///
    /// See [`Self::product_by_query`].
    pub async fn product_id_by_handle(&self, handle: &str) -> Result<String, AdminError> {
        Ok(self.product_by_handle(handle).await?.id)
    }

    /// Resolve a product by numeric or global ID through the search
    /// grammar's `id:` term.
    ///
    /// # Errors
    ///
    /// See [`Self::product_by_query`].
    pub async fn product_by_id(&self, product_id: &str) -> Result<ProductSummary, AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        self.product_by_query(&search::id(gid.numeric())).await
    }

    /// All products carrying a tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn products_by_tag(&self, tag: &str) -> Result<Vec<ProductSummary>, AdminError> {
        self.products_by_query(&search::tag(tag)).await
    }

    /// Exactly one product carrying a tag.
    ///
    /// # Errors
    ///
    /// See [`Self::product_by_query`].
    pub async fn product_by_tag(&self, tag: &str) -> Result<ProductSummary, AdminError> {
        self.product_by_query(&search::tag(tag)).await
    }

    /// All variants of a product, with selected options and media refs.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the ID is not a
    /// product ID.
    #[instrument(skip(self))]
    pub async fn product_variants_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<Vec<VariantNode>, AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let variants: Nodes<VariantNode> = self
            .query_field(
                &queries::product_variants_by_product(gid.numeric()),
                json!(null),
                "productVariants",
            )
            .await?;
        Ok(variants.nodes)
    }

    /// A variant by its global or numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no variant exists.
    #[instrument(skip(self))]
    pub async fn variant_by_id(&self, variant_id: &str) -> Result<VariantDetail, AdminError> {
        let gid = Gid::parse(variant_id, ResourceKind::ProductVariant)?;
        let variant: Option<VariantDetail> = self
            .query_field(
                queries::PRODUCT_VARIANT_BY_ID,
                json!({ "id": gid.to_string() }),
                "productVariant",
            )
            .await?;
        variant.ok_or_else(|| AdminError::NotFound(format!("No variant found for {gid}")))
    }

    /// The owning product's ID for a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no variant exists.
    #[instrument(skip(self))]
    pub async fn product_id_by_variant_id(&self, variant_id: &str) -> Result<String, AdminError> {
        let gid = Gid::parse(variant_id, ResourceKind::ProductVariant)?;
        let data = self
            .run_query(queries::PRODUCT_OF_VARIANT, json!({ "id": gid.to_string() }))
            .await?;
        data["productVariant"]["product"]["id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| AdminError::NotFound(format!("No variant found for {gid}")))
    }

    /// Raw SKU search (bounded at 10, not single-enforced).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn variants_by_sku(&self, sku: &str) -> Result<Vec<VariantWithProduct>, AdminError> {
        let variants: Nodes<VariantWithProduct> = self
            .query_field(
                queries::PRODUCT_VARIANTS_BY_QUERY,
                json!({ "query_string": search::sku(sku) }),
                "productVariants",
            )
            .await?;
        Ok(variants.nodes)
    }

    /// The unique variant ID for a SKU.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    #[instrument(skip(self))]
    pub async fn variant_id_by_sku(&self, sku: &str) -> Result<String, AdminError> {
        let variants = self.variants_by_sku(sku).await?;
        Ok(single(variants, "variants", sku)?.id)
    }

    /// The owning product's ID for a SKU.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    #[instrument(skip(self))]
    pub async fn product_id_by_sku(&self, sku: &str) -> Result<String, AdminError> {
        let variants = self.variants_by_sku(sku).await?;
        Ok(single(variants, "variants", sku)?.product.id)
    }

    /// A shop file-library ID by (sanitized) filename.
    ///
    /// The `filename:` search matches the basename without extension,
    /// so when several files share a stem the image URL suffix picks
    /// the exact one.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    #[instrument(skip(self))]
    pub async fn file_id_by_file_name(&self, file_name: &str) -> Result<String, AdminError> {
        let files: Nodes<FileNode> = self
            .query_field(
                queries::FILES_BY_QUERY,
                json!({ "query_string": search::filename(file_name) }),
                "files",
            )
            .await?;
        let mut files = files.nodes;
        if files.len() > 1 {
            files.retain(|f| {
                f.image.as_ref().is_some_and(|image| {
                    image
                        .url
                        .split('?')
                        .next()
                        .is_some_and(|url| url.ends_with(file_name))
                })
            });
        }
        Ok(single(files, "files", file_name)?.id)
    }

    /// A metafield definition ID by namespace and key.
    ///
    /// `owner_type` defaults to `PRODUCT`.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    #[instrument(skip(self))]
    pub async fn metafield_definition_id(
        &self,
        namespace: &str,
        key: &str,
        owner_type: Option<&str>,
    ) -> Result<String, AdminError> {
        let owner_type = owner_type.unwrap_or("PRODUCT");
        let definitions: Nodes<serde_json::Value> = self
            .query_field(
                queries::METAFIELD_DEFINITIONS,
                json!({ "ownerType": owner_type, "namespace": namespace, "key": key }),
                "metafieldDefinitions",
            )
            .await?;
        let node = single(
            definitions.nodes,
            "metafield definitions",
            &format!("{namespace}:{key}"),
        )?;
        node["id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| {
                AdminError::Assertion(format!(
                    "metafield definition for {namespace}:{key} has no id"
                ))
            })
    }

    /// A location ID by its name.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    #[instrument(skip(self))]
    pub async fn location_id_by_name(&self, name: &str) -> Result<String, AdminError> {
        let locations: Nodes<serde_json::Value> = self
            .query_field(
                queries::LOCATIONS_BY_QUERY,
                json!({ "query_string": search::location_name(name) }),
                "locations",
            )
            .await?;
        let node = single(locations.nodes, "locations", name)?;
        node["id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| AdminError::Assertion(format!("location {name} has no id")))
    }

    /// An inventory item ID by SKU.
    ///
    /// # Errors
    ///
    /// [`AdminError::NotFound`] / [`AdminError::Ambiguous`] on zero or
    /// several matches.
    #[instrument(skip(self))]
    pub async fn inventory_item_id_by_sku(&self, sku: &str) -> Result<String, AdminError> {
        let items: Nodes<serde_json::Value> = self
            .query_field(
                queries::INVENTORY_ITEMS_BY_QUERY,
                json!({ "query_string": search::sku(sku) }),
                "inventoryItems",
            )
            .await?;
        let node = single(items.nodes, "inventoryItems", sku)?;
        node["id"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| AdminError::Assertion(format!("inventory item for {sku} has no id")))
    }
}
