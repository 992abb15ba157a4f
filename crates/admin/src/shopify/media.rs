//! Media pipeline: staged uploads, byte transfer, attach/detach, and
//! the processing wait.
//!
//! Create and delete of product media are asynchronous on the platform
//! side; every mutation here is followed by a poll of the product's
//! media set until nothing is left in PROCESSING. Skipping that wait
//! returns before remote state is consistent and breaks the split
//! workflow's pruning step.

use std::path::Path;

use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use apricot_core::types::media_name;
use apricot_core::{Gid, ResourceKind};

use super::types::{MediaNode, MediaStatus, Nodes, StagedUploadTarget, VariantNode};
use super::{AdminClient, AdminError, check_user_errors, queries};

/// MIME type excluded from byte uploads; Photoshop sources ride along
/// in operator folders but are never served.
const SKIPPED_MIME: &str = "image/psd";

/// A (filename, MIME type) pair for `stagedUploadsCreate`.
#[derive(Debug, Clone)]
pub struct StagedUploadRequest {
    pub filename: String,
    pub mime_type: String,
}

/// A staged `resourceUrl` plus alt text, ready to attach as product
/// media.
#[derive(Debug, Clone)]
pub struct MediaSource {
    pub original_source: String,
    pub alt: String,
}

/// What one poll of a product's media set decided.
#[derive(Debug, PartialEq)]
enum PollOutcome {
    /// Nothing left in PROCESSING and nothing FAILED.
    Completed,
    /// At least one media still PROCESSING.
    Pending,
    /// At least one media FAILED; carries the per-node error payloads.
    Failed(Vec<Value>),
}

fn poll_outcome(nodes: &[MediaNode]) -> PollOutcome {
    let failed: Vec<Value> = nodes
        .iter()
        .filter(|n| n.status == MediaStatus::Failed)
        .map(|n| json!({ "id": n.id, "errors": n.media_errors }))
        .collect();
    if !failed.is_empty() {
        return PollOutcome::Failed(failed);
    }
    if nodes.iter().any(|n| n.status == MediaStatus::Processing) {
        return PollOutcome::Pending;
    }
    PollOutcome::Completed
}

/// The slice of product media belonging to one variant.
///
/// Product media arrive in position order and each variant's media
/// connection starts at its first image, so a variant owns the range
/// from its first media's position up to the next variant's starting
/// position (or the end of the set).
fn variant_media_slice<'a>(
    all_media: &'a [MediaNode],
    variants: &[VariantNode],
    first_media_id: &str,
) -> Result<&'a [MediaNode], AdminError> {
    let position = |media_id: &str| all_media.iter().position(|m| m.id == media_id);

    let start = position(first_media_id).ok_or_else(|| {
        AdminError::Assertion(format!("media {first_media_id} is not on its product"))
    })?;

    let mut starts: Vec<usize> = variants
        .iter()
        .filter_map(|v| v.media.nodes.first())
        .filter_map(|m| position(&m.id))
        .collect();
    starts.push(all_media.len());
    starts.sort_unstable();
    starts.dedup();

    let end = starts
        .iter()
        .copied()
        .find(|&s| s > start)
        .unwrap_or(all_media.len());
    Ok(&all_media[start..end])
}

impl AdminClient {
    /// All media on a product, in position order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn medias_by_product_id(
        &self,
        product_id: &str,
    ) -> Result<Vec<MediaNode>, AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(queries::PRODUCT_MEDIA, json!({ "productId": gid.to_string() }))
            .await?;
        let media: Nodes<MediaNode> = serde_json::from_value(data["product"]["media"].clone())?;
        Ok(media.nodes)
    }

    /// The media slice belonging to one variant.
    ///
    /// Falls back to a SKU-substring match on the media URLs when the
    /// variant carries no media references of its own.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup fails or the variant is unknown.
    #[instrument(skip(self))]
    pub async fn medias_by_variant_id(
        &self,
        variant_id: &str,
    ) -> Result<Vec<MediaNode>, AdminError> {
        let gid = Gid::parse(variant_id, ResourceKind::ProductVariant)?;
        let product_id = self.product_id_by_variant_id(variant_id).await?;
        let all_media = self.medias_by_product_id(&product_id).await?;
        let variants = self.product_variants_by_product_id(&product_id).await?;

        let target = variants
            .iter()
            .find(|v| v.id == gid.to_string())
            .ok_or_else(|| AdminError::NotFound(format!("No variants found for {gid}")))?;

        let Some(first_media) = target.media.nodes.first() else {
            // No explicit mapping; match the SKU against the media URLs.
            let detail = self.variant_by_id(variant_id).await?;
            let sku = detail.sku.unwrap_or_default();
            return Ok(all_media
                .into_iter()
                .filter(|m| m.image.as_ref().is_some_and(|i| i.url.contains(&sku)))
                .collect());
        };

        let slice = variant_media_slice(&all_media, &variants, &first_media.id)?;
        Ok(slice.to_vec())
    }

    /// The media slice belonging to a SKU's variant.
    ///
    /// # Errors
    ///
    /// See [`Self::medias_by_variant_id`].
    pub async fn medias_by_sku(&self, sku: &str) -> Result<Vec<MediaNode>, AdminError> {
        let variant_id = self.variant_id_by_sku(sku).await?;
        self.medias_by_variant_id(&variant_id).await
    }

    /// The product media whose URL contains the given filename's stem.
    ///
    /// # Errors
    ///
    /// Returns an error if the media query fails.
    pub async fn product_media_by_file_name(
        &self,
        product_id: &str,
        name: &str,
    ) -> Result<Option<MediaNode>, AdminError> {
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        let media = self.medias_by_product_id(product_id).await?;
        Ok(media
            .into_iter()
            .find(|m| m.image.as_ref().is_some_and(|i| i.url.contains(stem))))
    }

    /// Request one staged upload target per (filename, MIME) pair, with
    /// `resource: IMAGE` and `httpMethod: POST`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, the mutation reports
    /// user errors, or the platform returns a different number of
    /// targets than requested.
    #[instrument(skip_all, fields(count = requests.len()))]
    pub async fn staged_upload_targets(
        &self,
        requests: &[StagedUploadRequest],
    ) -> Result<Vec<StagedUploadTarget>, AdminError> {
        let input: Vec<Value> = requests
            .iter()
            .map(|r| {
                json!({
                    "resource": "IMAGE",
                    "filename": r.filename,
                    "mimeType": r.mime_type,
                    "httpMethod": "POST",
                })
            })
            .collect();
        let data = self
            .run_query(queries::STAGED_UPLOADS_CREATE, json!({ "input": input }))
            .await?;
        check_user_errors(&data, "stagedUploadsCreate", "userErrors")?;
        let targets: Vec<StagedUploadTarget> =
            serde_json::from_value(data["stagedUploadsCreate"]["stagedTargets"].clone())?;
        if targets.len() != requests.len() {
            return Err(AdminError::Assertion(format!(
                "requested {} staged targets, received {}",
                requests.len(),
                targets.len()
            )));
        }
        info!(count = targets.len(), "generated staged upload targets");
        Ok(targets)
    }

    /// POST one file's bytes to its staged target as multipart form
    /// data; the platform answers 201 on success.
    ///
    /// # Errors
    ///
    /// [`AdminError::UploadFailed`] on any non-201 response.
    #[instrument(skip(self, target), fields(path = %local_path.display()))]
    pub async fn upload_to_staged_target(
        &self,
        target: &StagedUploadTarget,
        local_path: &Path,
        mime_type: &str,
    ) -> Result<(), AdminError> {
        let file_name = basename(local_path);
        let bytes = tokio::fs::read(local_path).await.map_err(|source| AdminError::Io {
            path: local_path.display().to_string(),
            source,
        })?;

        let mut form = reqwest::multipart::Form::new();
        for (name, value) in upload_form_fields(target, mime_type) {
            form = form.text(name, value);
        }
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_type)?;
        form = form.part("file", part);

        debug!(file = %file_name, "starting upload");
        let response = self.http().post(&target.url).multipart(form).send().await?;
        let status = response.status();
        if status.as_u16() != 201 {
            let body = response.text().await.unwrap_or_default();
            return Err(AdminError::UploadFailed {
                path: local_path.display().to_string(),
                target_url: target.url.clone(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    /// Upload each file to its target, skipping `image/psd` entries.
    ///
    /// # Errors
    ///
    /// See [`Self::upload_to_staged_target`].
    pub async fn upload_images_to_targets(
        &self,
        targets: &[StagedUploadTarget],
        local_paths: &[&Path],
        mime_types: &[String],
    ) -> Result<(), AdminError> {
        for ((target, path), mime_type) in targets.iter().zip(local_paths).zip(mime_types) {
            if mime_type == SKIPPED_MIME {
                continue;
            }
            self.upload_to_staged_target(target, path, mime_type).await?;
        }
        Ok(())
    }

    /// Attach staged uploads as product media, then wait for processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails, reports user errors, or
    /// processing fails or times out.
    #[instrument(skip(self, media), fields(product_id = %product_id, count = media.len()))]
    pub async fn create_product_media(
        &self,
        product_id: &str,
        media: &[MediaSource],
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let input: Vec<Value> = media
            .iter()
            .map(|m| {
                json!({
                    "originalSource": m.original_source,
                    "alt": m.alt,
                    "mediaContentType": "IMAGE",
                })
            })
            .collect();
        let data = self
            .run_query(
                queries::PRODUCT_CREATE_MEDIA,
                json!({ "media": input, "productId": gid.to_string() }),
            )
            .await?;
        check_user_errors(&data, "productCreateMedia", "userErrors")?;
        self.wait_for_media_processing(product_id).await
    }

    /// Delete media from a product (all of it when `media_ids` is
    /// `None`), then wait for processing.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails, reports user errors, or
    /// processing fails or times out.
    #[instrument(skip(self, media_ids), fields(product_id = %product_id))]
    pub async fn delete_product_media(
        &self,
        product_id: &str,
        media_ids: Option<Vec<String>>,
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let media_ids = match media_ids {
            Some(ids) => ids,
            None => self
                .medias_by_product_id(product_id)
                .await?
                .into_iter()
                .map(|m| m.id)
                .collect(),
        };
        if media_ids.is_empty() {
            debug!(product_id = %gid, "nothing to delete");
            return Ok(());
        }
        info!(product_id = %gid, ?media_ids, "deleting product media");
        let data = self
            .run_query(
                queries::PRODUCT_DELETE_MEDIA,
                json!({ "productId": gid.to_string(), "mediaIds": media_ids }),
            )
            .await?;
        check_user_errors(&data, "productDeleteMedia", "mediaUserErrors")?;
        self.wait_for_media_processing(product_id).await
    }

    /// Poll the product's media until nothing is PROCESSING.
    ///
    /// Polls every `poll_interval` up to `poll_timeout` (defaults 5 s /
    /// 10 min). A FAILED media aborts immediately.
    ///
    /// # Errors
    ///
    /// - [`AdminError::MediaProcessingFailed`] with the per-node error
    ///   payloads when any media fails
    /// - [`AdminError::MediaProcessingTimeout`] when the budget runs out
    #[instrument(skip(self))]
    pub async fn wait_for_media_processing(&self, product_id: &str) -> Result<(), AdminError> {
        let interval = self.poll_interval();
        let timeout = self.poll_timeout();
        let max_attempts = timeout
            .as_millis()
            .div_ceil(interval.as_millis().max(1))
            .max(1);

        for _ in 0..max_attempts {
            let nodes = self.medias_by_product_id(product_id).await?;
            match poll_outcome(&nodes) {
                PollOutcome::Completed => {
                    info!("all media have completed processing");
                    return Ok(());
                }
                PollOutcome::Failed(errors) => {
                    return Err(AdminError::MediaProcessingFailed(Value::Array(errors)));
                }
                PollOutcome::Pending => {
                    debug!("media still processing, waiting");
                    tokio::time::sleep(interval).await;
                }
            }
        }
        Err(AdminError::MediaProcessingTimeout(timeout))
    }

    /// Detach one media from a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation
    /// reports user errors.
    #[instrument(skip(self))]
    pub async fn detach_variant_media(
        &self,
        product_id: &str,
        variant_id: &str,
        media_id: &str,
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        let data = self
            .run_query(
                queries::PRODUCT_VARIANT_DETACH_MEDIA,
                json!({
                    "productId": gid.to_string(),
                    "variantMedia": [{ "variantId": variant_id, "mediaIds": [media_id] }],
                }),
            )
            .await?;
        check_user_errors(&data, "productVariantDetachMedia", "userErrors")
    }

    /// Point a set of variants at one product media, detaching whatever
    /// each variant currently shows first.
    ///
    /// # Errors
    ///
    /// Returns an error if any detach or the append mutation fails.
    #[instrument(skip(self, variant_ids), fields(product_id = %product_id, media_id = %media_id))]
    pub async fn assign_media_to_variants(
        &self,
        product_id: &str,
        media_id: &str,
        variant_ids: &[String],
    ) -> Result<(), AdminError> {
        let gid = Gid::parse(product_id, ResourceKind::Product)?;
        for variant_id in variant_ids {
            let variant = self.variant_by_id(variant_id).await?;
            if let Some(current) = variant.media.nodes.first() {
                self.detach_variant_media(product_id, &variant.id, &current.id)
                    .await?;
            }
        }
        let variant_media: Vec<Value> = variant_ids
            .iter()
            .map(|vid| json!({ "variantId": vid, "mediaIds": [media_id] }))
            .collect();
        let data = self
            .run_query(
                queries::PRODUCT_VARIANT_APPEND_MEDIA,
                json!({ "productId": gid.to_string(), "variantMedia": variant_media }),
            )
            .await?;
        check_user_errors(&data, "productVariantAppendMedia", "userErrors")
    }

    /// Point the product media matching a filename at the variants of
    /// the given SKUs.
    ///
    /// # Errors
    ///
    /// Returns an error if no media matches the filename, a SKU does
    /// not resolve uniquely, or the reassignment fails.
    #[instrument(skip(self, skus), fields(product_id = %product_id, file_name = %file_name))]
    pub async fn assign_image_to_skus(
        &self,
        product_id: &str,
        file_name: &str,
        skus: &[String],
    ) -> Result<(), AdminError> {
        let media = self
            .product_media_by_file_name(product_id, file_name)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("No media found for {file_name}")))?;
        let mut variant_ids = Vec::with_capacity(skus.len());
        for sku in skus {
            variant_ids.push(self.variant_id_by_sku(sku).await?);
        }
        self.assign_media_to_variants(product_id, &media.id, &variant_ids)
            .await
    }

    /// Replace existing file-library images with new bytes, filename by
    /// filename, through `fileUpdate`.
    ///
    /// # Errors
    ///
    /// Returns an error if staging, upload, lookup, or the mutation
    /// fails.
    #[instrument(skip(self, local_paths), fields(count = local_paths.len()))]
    pub async fn replace_image_files(&self, local_paths: &[&Path]) -> Result<(), AdminError> {
        // Library replacement never involves PSD sources.
        let local_paths: Vec<&Path> = local_paths
            .iter()
            .copied()
            .filter(|p| media_name::image_mime_type(&basename(p)) != SKIPPED_MIME)
            .collect();
        let file_names: Vec<String> = local_paths
            .iter()
            .map(|p| media_name::sanitize(&basename(p)))
            .collect();
        let mime_types: Vec<String> = file_names
            .iter()
            .map(|n| media_name::image_mime_type(n))
            .collect();

        let requests: Vec<StagedUploadRequest> = file_names
            .iter()
            .zip(&mime_types)
            .map(|(filename, mime_type)| StagedUploadRequest {
                filename: filename.clone(),
                mime_type: mime_type.clone(),
            })
            .collect();
        let targets = self.staged_upload_targets(&requests).await?;
        self.upload_images_to_targets(&targets, &local_paths, &mime_types)
            .await?;

        let mut input = Vec::with_capacity(file_names.len());
        for (file_name, target) in file_names.iter().zip(&targets) {
            let file_id = self.file_id_by_file_name(file_name).await?;
            input.push(json!({
                "id": file_id,
                "originalSource": target.resource_url,
                "alt": file_name,
            }));
        }
        let data = self
            .run_query(queries::FILE_UPDATE, json!({ "input": input }))
            .await?;
        check_user_errors(&data, "fileUpdate", "userErrors")
    }

    /// Upload description images and point a product's description at
    /// them.
    ///
    /// The images are attached to a sidecar product (so the CDN serves
    /// them) and the real product's `descriptionHtml` becomes one
    /// animated `<p><img></p>` fragment per image.
    ///
    /// # Errors
    ///
    /// Returns an error if any staging, upload, attach, wait, or write
    /// step fails.
    #[instrument(skip(self, local_paths), fields(product_id = %product_id, count = local_paths.len()))]
    pub async fn replace_description_images(
        &self,
        product_id: &str,
        local_paths: &[&Path],
        dummy_product_id: &str,
        url_prefix: &str,
    ) -> Result<(), AdminError> {
        let file_names: Vec<String> = local_paths
            .iter()
            .map(|p| media_name::sanitize(&basename(p)))
            .collect();
        let mime_types: Vec<String> = file_names
            .iter()
            .map(|n| media_name::image_mime_type(n))
            .collect();

        let requests: Vec<StagedUploadRequest> = file_names
            .iter()
            .zip(&mime_types)
            .map(|(filename, mime_type)| StagedUploadRequest {
                filename: filename.clone(),
                mime_type: mime_type.clone(),
            })
            .collect();
        let targets = self.staged_upload_targets(&requests).await?;
        self.upload_images_to_targets(&targets, local_paths, &mime_types)
            .await?;

        let uploaded: Vec<(&String, &StagedUploadTarget)> = file_names
            .iter()
            .zip(&targets)
            .zip(&mime_types)
            .filter(|(_, mime_type)| *mime_type != SKIPPED_MIME)
            .map(|(pair, _)| pair)
            .collect();

        let description = media_name::description_html(
            uploaded.iter().map(|(name, _)| name.as_str()),
            url_prefix,
        );
        let sources: Vec<MediaSource> = uploaded
            .iter()
            .map(|(name, target)| MediaSource {
                original_source: target.resource_url.clone(),
                alt: (*name).clone(),
            })
            .collect();
        self.create_product_media(dummy_product_id, &sources).await?;
        self.update_product_description(product_id, &description).await
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// The form fields of one staged upload POST: the target's parameter
/// bag plus the fixed `Content-Type` / `success_action_status` / `acl`
/// triple, with the target's values winning on collision.
fn upload_form_fields(target: &StagedUploadTarget, mime_type: &str) -> Vec<(String, String)> {
    let mut fields: Vec<(String, String)> = vec![
        ("Content-Type".to_string(), mime_type.to_string()),
        ("success_action_status".to_string(), "201".to_string()),
        ("acl".to_string(), "private".to_string()),
    ];
    for param in &target.parameters {
        if let Some(existing) = fields.iter_mut().find(|(name, _)| *name == param.name) {
            existing.1 = param.value.clone();
        } else {
            fields.push((param.name.clone(), param.value.clone()));
        }
    }
    fields
}
