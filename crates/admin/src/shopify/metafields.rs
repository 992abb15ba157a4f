//! Typed custom-field writers.
//!
//! All of the shop's custom fields live in the `custom` namespace; each
//! writer here pins one key to the value shape its definition expects
//! (plain text, JSON product-reference list, or a rich-text document).

use serde_json::json;
use tracing::instrument;

use apricot_core::types::richtext::ProductDescription;
use apricot_core::{Gid, ResourceKind};

use super::{AdminClient, AdminError, check_user_errors, queries};

const NAMESPACE: &str = "custom";

impl AdminClient {
    /// Write one metafield on a product through `productUpdate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self, value), fields(product_id = %product_id))]
    pub async fn update_product_metafield(
        &self,
        product_id: &str,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                queries::PRODUCT_UPDATE_METAFIELD,
                json!({
                    "input": {
                        "id": gid.to_string(),
                        "metafields": [{
                            "namespace": namespace,
                            "key": key,
                            "value": value,
                        }],
                    }
                }),
            )
            .await?;
        check_user_errors(&data, "productUpdate", "userErrors")
    }

    /// Write `custom.variation_value`, the color label a split product
    /// represents.
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_metafield`].
    pub async fn set_variation_value(
        &self,
        product_id: &str,
        value: &str,
    ) -> Result<(), AdminError> {
        self.update_product_metafield(product_id, NAMESPACE, "variation_value", value)
            .await
    }

    /// Write `custom.variation_products`, the sibling-product list that
    /// cross-links one color family. The value is a JSON array of
    /// product GIDs, order preserved.
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_metafield`]; also fails if the ID
    /// list cannot be serialized.
    pub async fn set_variation_products(
        &self,
        product_id: &str,
        product_ids: &[String],
    ) -> Result<(), AdminError> {
        let value = serde_json::to_string(product_ids)?;
        self.update_product_metafield(product_id, NAMESPACE, "variation_products", &value)
            .await
    }

    /// Write `custom.size_table_html` (multi-line text).
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_metafield`].
    pub async fn set_size_table_html(
        &self,
        product_id: &str,
        html_text: &str,
    ) -> Result<(), AdminError> {
        self.update_product_metafield(product_id, NAMESPACE, "size_table_html", html_text)
            .await
    }

    /// Write `custom.product_description` as a rich-text document
    /// through `productUpdate`.
    ///
    /// # Errors
    ///
    /// See [`Self::update_product_metafield`].
    pub async fn set_product_description_document(
        &self,
        product_id: &str,
        description: &ProductDescription,
    ) -> Result<(), AdminError> {
        let value = serde_json::to_string(&description.to_document())?;
        self.update_product_metafield(product_id, NAMESPACE, "product_description", &value)
            .await
    }

    /// Write `custom.product_description` through `metafieldsSet`,
    /// addressing the product as `ownerId` instead of going through
    /// `productUpdate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self, description), fields(product_id = %product_id))]
    pub async fn set_product_description_metafield(
        &self,
        product_id: &str,
        description: &ProductDescription,
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let value = serde_json::to_string(&description.to_document())?;
        let data = self
            .run_query(
                queries::METAFIELDS_SET,
                json!({
                    "metafields": [{
                        "key": "product_description",
                        "namespace": NAMESPACE,
                        "ownerId": gid.to_string(),
                        "value": value,
                    }]
                }),
            )
            .await?;
        check_user_errors(&data, "metafieldsSet", "userErrors")
    }

    /// Write the rich-text description and the size table in one
    /// `productSet` call, resolving both definition IDs first.
    ///
    /// # Errors
    ///
    /// Returns an error if a definition lookup fails, the API request
    /// fails, or the mutation reports user errors.
    #[instrument(skip(self, description, size_table_html), fields(product_id = %product_id))]
    pub async fn update_description_and_size_table(
        &self,
        product_id: &str,
        description: &ProductDescription,
        size_table_html: &str,
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let description_id = self
            .metafield_definition_id(NAMESPACE, "product_description", None)
            .await?;
        let size_table_id = self
            .metafield_definition_id(NAMESPACE, "size_table_html", None)
            .await?;
        let value = serde_json::to_string(&description.to_document())?;
        let data = self
            .run_query(
                queries::PRODUCT_SET_METAFIELDS,
                json!({
                    "productSet": {
                        "id": gid.to_string(),
                        "metafields": [
                            {
                                "id": description_id,
                                "namespace": NAMESPACE,
                                "key": "product_description",
                                "type": "rich_text_field",
                                "value": value,
                            },
                            {
                                "id": size_table_id,
                                "namespace": NAMESPACE,
                                "key": "size_table_html",
                                "type": "multi_line_text_field",
                                "value": size_table_html,
                            },
                        ],
                    }
                }),
            )
            .await?;
        check_user_errors(&data, "productSet", "userErrors")
    }
}
