//! Transport-level and GraphQL-level error surfacing.

use apricot_admin::AdminError;
use apricot_integration_tests::{GRAPHQL_PATH, TestContext, graphql_data};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn non_2xx_response_is_a_transport_error() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&ctx.server)
        .await;

    let err = ctx.client.run_query("{ shop { name } }", json!(null)).await.unwrap_err();
    match err {
        AdminError::Transport { status, url } => {
            assert_eq!(status, 502);
            assert!(url.ends_with(GRAPHQL_PATH));
        }
        other => panic!("expected Transport, got {other}"),
    }
}

#[tokio::test]
async fn top_level_errors_fail_with_query_and_variables() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "Field 'prodcts' doesn't exist" }]
        })))
        .mount(&ctx.server)
        .await;

    let err = ctx.client.run_query("{ prodcts }", json!({ "a": 1 })).await.unwrap_err();
    match err {
        AdminError::Query { errors, query, variables } => {
            assert!(errors.to_string().contains("doesn't exist"));
            assert_eq!(query, "{ prodcts }");
            assert_eq!(variables, json!({ "a": 1 }));
        }
        other => panic!("expected Query, got {other}"),
    }
}

#[tokio::test]
async fn access_token_travels_in_the_header() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(header("X-Shopify-Access-Token", "shpat_test_token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(graphql_data(json!({ "shop": null }))),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.client
        .run_query("{ shop { name } }", json!(null))
        .await
        .expect("query should succeed");
}

#[tokio::test]
async fn mutation_user_errors_become_errors() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_string_contains("productDuplicate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productDuplicate": {
                "newProduct": null,
                "userErrors": [{ "field": "productId", "message": "Product not found" }]
            }
        }))))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .client
        .duplicate_product("8051948863715", "Coat", true, "DRAFT")
        .await
        .unwrap_err();
    match err {
        AdminError::UserError { mutation, errors } => {
            assert_eq!(mutation, "productDuplicate");
            assert!(errors.to_string().contains("Product not found"));
        }
        other => panic!("expected UserError, got {other}"),
    }
}
