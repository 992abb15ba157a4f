//! Admin API GraphQL client.
//!
//! One send-and-decode primitive ([`AdminClient::run_query`]) carries
//! every query and mutation in [`queries`]; the operation modules group
//! the client's methods by concern:
//!
//! - [`lookup`] - natural-key resolvers
//! - [`products`] - product mutations (duplicate, attributes, variants)
//! - [`media`] - staged uploads, attach/detach, processing wait
//! - [`metafields`] - typed custom-field writers
//! - [`split`] - the split-by-color workflow
//! - [`inventory`] - absolute stock writer

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::config::Config;

pub mod inventory;
pub mod lookup;
pub mod media;
pub mod metafields;
pub mod products;
pub mod queries;
pub mod split;
pub mod types;

/// Errors that can occur when interacting with the Admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    /// HTTP request failed at the network level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("transport error: {status} from {url}")]
    Transport { url: String, status: u16 },

    /// The response body carried a top-level `errors` array.
    #[error("GraphQL errors: {errors}\nquery: {query}\nvariables: {variables}")]
    Query {
        errors: Value,
        query: String,
        variables: Value,
    },

    /// JSON (de)serialization failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A mutation reported `userErrors`.
    #[error("{mutation} returned user errors: {errors}")]
    UserError { mutation: &'static str, errors: Value },

    /// A natural-key lookup matched nothing.
    #[error("{0}")]
    NotFound(String),

    /// A natural-key lookup matched more than one entity.
    #[error("{0}")]
    Ambiguous(String),

    /// Media transitioned to FAILED while waiting for processing.
    #[error("media processing failed: {0}")]
    MediaProcessingFailed(Value),

    /// The media processing wait exhausted its budget.
    #[error("timed out after {0:?} waiting for media processing")]
    MediaProcessingTimeout(Duration),

    /// A staged byte upload returned something other than 201.
    #[error("upload of {path} to {target_url} failed with status {status}: {body}")]
    UploadFailed {
        path: String,
        target_url: String,
        status: u16,
        body: String,
    },

    /// An invariant the platform is expected to uphold was violated;
    /// indicates schema drift and halts the workflow.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// Identifier normalization failed.
    #[error(transparent)]
    Id(#[from] apricot_core::IdError),

    /// Local file access failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Admin API GraphQL client.
///
/// Cheap to clone; all state lives behind an `Arc`. Calls are issued
/// strictly sequentially - the orchestration workflows depend on
/// program order (duplicate before prune, create before wait).
///
/// # Security
///
/// Carries the HIGH PRIVILEGE Admin API token.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: secrecy::SecretString,
    poll_interval: Duration,
    poll_timeout: Duration,
    url_prefix: Option<String>,
    dummy_product_id: Option<String>,
}

impl AdminClient {
    /// Create a new Admin API client.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let base = config
            .api_base
            .clone()
            .unwrap_or_else(|| format!("https://{}.myshopify.com", config.shop));
        let endpoint = format!("{base}/admin/api/{}/graphql.json", config.api_version);

        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                endpoint,
                access_token: config.access_token.clone(),
                poll_interval: config.poll_interval,
                poll_timeout: config.poll_timeout,
                url_prefix: config.url_prefix.clone(),
                dummy_product_id: config.dummy_product_id.clone(),
            }),
        }
    }

    /// The GraphQL endpoint this client posts to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    pub(crate) fn poll_timeout(&self) -> Duration {
        self.inner.poll_timeout
    }

    /// The configured CDN prefix for description-image URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Assertion`] when unset.
    pub fn url_prefix(&self) -> Result<&str, AdminError> {
        self.inner.url_prefix.as_deref().ok_or_else(|| {
            AdminError::Assertion("SHOPIFY_URL_PREFIX is not configured".to_string())
        })
    }

    /// The configured sidecar product for description images.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Assertion`] when unset.
    pub fn dummy_product_id(&self) -> Result<&str, AdminError> {
        self.inner.dummy_product_id.as_deref().ok_or_else(|| {
            AdminError::Assertion("DUMMY_PRODUCT_ID is not configured".to_string())
        })
    }

    /// Execute one GraphQL request and return the `data` object.
    ///
    /// Mutation-local `userErrors` are the caller's responsibility;
    /// see [`check_user_errors`].
    ///
    /// # Errors
    ///
    /// - [`AdminError::Transport`] on a non-2xx response
    /// - [`AdminError::Query`] when the body carries top-level `errors`
    #[instrument(skip_all, fields(endpoint = %self.inner.endpoint))]
    pub async fn run_query(&self, query: &str, variables: Value) -> Result<Value, AdminError> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("X-Shopify-Access-Token", self.inner.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdminError::Transport {
                url: self.inner.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let mut payload: Value = response.json().await?;
        if let Some(errors) = payload.get("errors").filter(|e| !is_empty_array(e)) {
            return Err(AdminError::Query {
                errors: errors.clone(),
                query: query.to_string(),
                variables: body["variables"].clone(),
            });
        }

        Ok(payload["data"].take())
    }

    /// `run_query` followed by typed extraction of one field of `data`.
    pub(crate) async fn query_field<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
        field: &str,
    ) -> Result<T, AdminError> {
        let mut data = self.run_query(query, variables).await?;
        Ok(serde_json::from_value(data[field].take())?)
    }
}

fn is_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty) || value.is_null()
}

/// Fail on populated `userErrors` (or `mediaUserErrors`) in a mutation
/// payload.
pub(crate) fn check_user_errors(
    payload: &Value,
    mutation: &'static str,
    field: &str,
) -> Result<(), AdminError> {
    let errors = &payload[mutation][field];
    if errors.as_array().is_some_and(|e| !e.is_empty()) {
        return Err(AdminError::UserError {
            mutation,
            errors: errors.clone(),
        });
    }
    Ok(())
}
