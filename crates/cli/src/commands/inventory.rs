//! `apricot inventory` - stock management.

use apricot_admin::AdminClient;

pub async fn set(
    client: &AdminClient,
    sku: &str,
    location: &str,
    quantity: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    match client.set_available_quantity(sku, location, quantity).await? {
        Some(group) => {
            for change in &group.changes {
                tracing::info!(
                    name = %change.name,
                    delta = change.delta,
                    after = ?change.quantity_after_change,
                    "adjusted"
                );
            }
        }
        None => tracing::info!(sku, location, quantity, "already at requested quantity"),
    }
    Ok(())
}
