//! `apricot split` - split a product into single-color products.

use apricot_admin::AdminClient;

pub async fn run(
    client: &AdminClient,
    title: &str,
    status: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let new_product_ids = client.split_product_by_color(title, status).await?;
    for id in &new_product_ids {
        tracing::info!(%id, "created product");
    }
    tracing::info!(count = new_product_ids.len(), "split complete");
    Ok(())
}
