//! Product mutations: duplication, attribute writes, variant and
//! option pruning.

use serde_json::{Value, json};
use tracing::instrument;

use apricot_core::{Gid, ResourceKind};

use super::types::DuplicatedProduct;
use super::{AdminClient, AdminError, check_user_errors, queries};

impl AdminClient {
    /// Duplicate a product, returning the new product with its variants
    /// and options.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn duplicate_product(
        &self,
        product_id: &str,
        new_title: &str,
        include_images: bool,
        new_status: &str,
    ) -> Result<DuplicatedProduct, AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                queries::PRODUCT_DUPLICATE,
                json!({
                    "productId": gid.to_string(),
                    "newTitle": new_title,
                    "includeImages": include_images,
                    "newStatus": new_status,
                }),
            )
            .await?;
        check_user_errors(&data, "productDuplicate", "userErrors")?;
        let new_product = data["productDuplicate"]["newProduct"].clone();
        if new_product.is_null() {
            return Err(AdminError::Assertion(format!(
                "productDuplicate returned no newProduct for {gid}"
            )));
        }
        Ok(serde_json::from_value(new_product)?)
    }

    /// Write a single product attribute through `productSet`.
    ///
    /// The attribute name is templated into the mutation text (see
    /// [`queries::product_set_attribute`]); the value travels as a
    /// variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self, value), fields(product_id = %product_id))]
    pub async fn update_product_attribute(
        &self,
        product_id: &str,
        attribute: &str,
        value: Value,
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                &queries::product_set_attribute(attribute),
                json!({
                    "productSet": {
                        "id": gid.to_string(),
                        attribute: value,
                    }
                }),
            )
            .await?;
        check_user_errors(&data, "productSet", "userErrors")
    }

    /// Replace the product's tag set.
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_attribute`].
    pub async fn update_product_tags(
        &self,
        product_id: &str,
        tags: &[String],
    ) -> Result<(), AdminError> {
        self.update_product_attribute(product_id, "tags", json!(tags))
            .await
    }

    /// Replace the product's `descriptionHtml`.
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_attribute`].
    pub async fn update_product_description(
        &self,
        product_id: &str,
        description_html: &str,
    ) -> Result<(), AdminError> {
        self.update_product_attribute(product_id, "descriptionHtml", json!(description_html))
            .await
    }

    /// Rewrite the product's URL handle.
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_attribute`].
    pub async fn update_product_handle(
        &self,
        product_id: &str,
        handle: &str,
    ) -> Result<(), AdminError> {
        self.update_product_attribute(product_id, "handle", json!(handle))
            .await
    }

    /// Read a product's `descriptionHtml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the product does
    /// not exist.
    #[instrument(skip(self))]
    pub async fn product_description_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<String, AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                queries::PRODUCT_DESCRIPTION_HTML,
                json!({ "productId": gid.to_string() }),
            )
            .await?;
        data["product"]["descriptionHtml"]
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| AdminError::NotFound(format!("No product found for {gid}")))
    }

    /// Bulk-delete variants from a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self, variant_ids), fields(product_id = %product_id, count = variant_ids.len()))]
    pub async fn remove_product_variants(
        &self,
        product_id: &str,
        variant_ids: &[String],
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                queries::PRODUCT_VARIANTS_BULK_DELETE,
                json!({
                    "productId": gid.to_string(),
                    "variantsIds": variant_ids,
                }),
            )
            .await?;
        check_user_errors(&data, "productVariantsBulkDelete", "userErrors")
    }

    /// Delete option definitions from a product (strategy DEFAULT).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self, option_ids), fields(product_id = %product_id))]
    pub async fn delete_product_options(
        &self,
        product_id: &str,
        option_ids: &[String],
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                queries::PRODUCT_OPTIONS_DELETE,
                json!({
                    "productId": gid.to_string(),
                    "options": option_ids,
                }),
            )
            .await?;
        check_user_errors(&data, "productOptionsDelete", "userErrors")
    }
}
