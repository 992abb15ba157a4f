//! `apricot media` - file-library and description-image management.

use std::path::{Path, PathBuf};

use apricot_admin::AdminClient;

pub async fn replace_files(
    client: &AdminClient,
    paths: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Err("no image files given".into());
    }
    let paths: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    client.replace_image_files(&paths).await?;
    tracing::info!(count = paths.len(), "replaced library images");
    Ok(())
}

pub async fn replace_description_images(
    client: &AdminClient,
    product_id: &str,
    paths: &[PathBuf],
) -> Result<(), Box<dyn std::error::Error>> {
    if paths.is_empty() {
        return Err("no image files given".into());
    }
    let dummy_product_id = client.dummy_product_id()?.to_string();
    let url_prefix = client.url_prefix()?.to_string();
    let paths: Vec<&Path> = paths.iter().map(PathBuf::as_path).collect();
    client
        .replace_description_images(product_id, &paths, &dummy_product_id, &url_prefix)
        .await?;
    tracing::info!(product_id, count = paths.len(), "description images replaced");
    Ok(())
}
