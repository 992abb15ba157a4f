//! Absolute stock writer.

use serde_json::json;
use tracing::{info, instrument};

use super::types::InventoryAdjustmentGroup;
use super::{AdminClient, AdminError, check_user_errors, queries};

impl AdminClient {
    /// Set the available quantity of a SKU at a named location to an
    /// absolute value.
    ///
    /// The write ignores compare-quantity conflicts and is recorded
    /// with reason `correction`. When the stock already matches, the
    /// platform returns no adjustment group; that is a no-op, not an
    /// error, and `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the SKU or location cannot be resolved
    /// uniquely, the API request fails, or the mutation reports user
    /// errors.
    #[instrument(skip(self))]
    pub async fn set_available_quantity(
        &self,
        sku: &str,
        location_name: &str,
        quantity: i64,
    ) -> Result<Option<InventoryAdjustmentGroup>, AdminError> {
        let inventory_item_id = self.inventory_item_id_by_sku(sku).await?;
        let location_id = self.location_id_by_name(location_name).await?;

        let data = self
            .run_query(
                queries::INVENTORY_SET_QUANTITIES,
                json!({
                    "inventoryItemId": inventory_item_id,
                    "locationId": location_id,
                    "quantity": quantity,
                }),
            )
            .await?;
        check_user_errors(&data, "inventorySetQuantities", "userErrors")?;

        let group = data["inventorySetQuantities"]["inventoryAdjustmentGroup"].clone();
        if group.is_null() {
            info!(sku, location_name, quantity, "stock already at requested quantity");
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(group)?))
    }
}
