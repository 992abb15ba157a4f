//! Shared scaffolding for the integration tests.
//!
//! Every test runs the real [`AdminClient`] against a local
//! [`wiremock::MockServer`] standing in for the Admin GraphQL endpoint;
//! no test touches a live shop. The poll clock is shrunk so media-wait
//! tests finish in milliseconds.

use std::time::Duration;

use apricot_admin::{AdminClient, Config};
use serde_json::{Value, json};
use wiremock::MockServer;

/// The GraphQL path the client derives from the default API version.
pub const GRAPHQL_PATH: &str = "/admin/api/2024-07/graphql.json";

pub struct TestContext {
    pub server: MockServer,
    pub client: AdminClient,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let mut config = Config::new("apricot-test", "shpat_test_token");
        config.api_base = Some(server.uri());
        config.poll_interval = Duration::from_millis(10);
        config.poll_timeout = Duration::from_millis(300);
        let client = AdminClient::new(&config);
        Self { server, client }
    }
}

/// Wrap a payload the way the endpoint does: `{ "data": ... }`.
#[must_use]
pub fn graphql_data(value: Value) -> Value {
    json!({ "data": value })
}
