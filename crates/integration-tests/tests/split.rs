//! End-to-end split-by-color workflow against a mocked Admin endpoint.
//!
//! A two-color, two-size product ("Wool Coat" in Ivory and Dark Navy)
//! is split into two single-color products. The mocks verify the whole
//! choreography per color: duplicate, prune the other color's media,
//! prune the other color's variants, drop the color option, rewrite
//! the handle, write the color metafield, and finally cross-link the
//! family.

use apricot_core::{Gid, ResourceKind};
use apricot_integration_tests::{GRAPHQL_PATH, TestContext, graphql_data};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gql(token: &str) -> wiremock::matchers::BodyContainsMatcher {
    body_string_contains(token)
}

/// Variant and media IDs inside one duplicate. Variants 1-2 are Ivory
/// S/M, variants 3-4 are Dark Navy S/M; media arrive in position order
/// with the Ivory variants starting at media 1 and the Dark Navy
/// variants at media 3.
fn variant_id(product: u32, n: u32) -> String {
    format!("gid://shopify/ProductVariant/{product}{n}")
}

fn media_id(product: u32, n: u32) -> String {
    format!("gid://shopify/MediaImage/{product}{n}")
}

fn duplicate_response(product: u32) -> serde_json::Value {
    let variant = |n: u32, color: &str, size: &str| {
        json!({
            "id": variant_id(product, n),
            "title": format!("{color} / {size}"),
            "selectedOptions": [
                { "name": "カラー", "value": color },
                { "name": "サイズ", "value": size }
            ]
        })
    };
    graphql_data(json!({
        "productDuplicate": {
            "newProduct": {
                "id": format!("gid://shopify/Product/{product}"),
                "handle": format!("wool-coat-{product}"),
                "title": "Wool Coat",
                "variants": { "nodes": [
                    variant(1, "Ivory", "S"),
                    variant(2, "Ivory", "M"),
                    variant(3, "Dark Navy", "S"),
                    variant(4, "Dark Navy", "M")
                ]},
                "options": [
                    { "id": format!("gid://shopify/ProductOption/{product}1"),
                      "name": "カラー", "values": ["Ivory", "Dark Navy"] },
                    { "id": format!("gid://shopify/ProductOption/{product}2"),
                      "name": "サイズ", "values": ["S", "M"] }
                ]
            },
            "imageJob": { "id": "gid://shopify/Job/1", "done": false },
            "userErrors": []
        }
    }))
}

/// Read-side state of one duplicate: its media set, its variants with
/// their first-media references, and the variant-to-product resolver
/// for the first kept variant (`keep_first` is 1 for Ivory, 3 for Dark
/// Navy).
async fn mount_duplicate_state(server: &MockServer, product: u32, keep_first: u32) {
    let media_node = |n: u32| {
        json!({
            "id": media_id(product, n),
            "alt": null,
            "image": { "url": format!("https://cdn/files/coat_{n}.jpg") },
            "mediaContentType": "IMAGE",
            "status": "READY",
            "mediaErrors": [],
            "mediaWarnings": []
        })
    };
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productMediaStatus"))
        .and(gql(&format!("gid://shopify/Product/{product}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "product": { "media": { "nodes": [
                media_node(1), media_node(2), media_node(3), media_node(4)
            ]}}
        }))))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productOfVariant"))
        .and(gql(&variant_id(product, keep_first)))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productVariant": {
                "displayName": "Wool Coat",
                "product": { "id": format!("gid://shopify/Product/{product}"), "title": "Wool Coat" }
            }
        }))))
        .mount(server)
        .await;

    let variant = |n: u32, color: &str, size: &str, first_media: u32| {
        json!({
            "id": variant_id(product, n),
            "title": format!("{color} / {size}"),
            "sku": format!("COAT-{n}"),
            "media": { "nodes": [{ "id": media_id(product, first_media) }] },
            "selectedOptions": [
                { "name": "カラー", "value": color },
                { "name": "サイズ", "value": size }
            ]
        })
    };
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql(&format!("product_id:{product}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productVariants": { "nodes": [
                variant(1, "Ivory", "S", 1),
                variant(2, "Ivory", "M", 1),
                variant(3, "Dark Navy", "S", 3),
                variant(4, "Dark Navy", "M", 3)
            ]}
        }))))
        .mount(server)
        .await;
}

/// Mutation expectations for one duplicate being trimmed to one color.
/// `removed` names the two variant (and media) indices of the other
/// color.
async fn mount_trim_mutations(
    server: &MockServer,
    product: u32,
    removed: [u32; 2],
    handle: &str,
    color: &str,
) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productDeleteMedia"))
        .and(gql(&format!("gid://shopify/Product/{product}")))
        .and(gql(&media_id(product, removed[0])))
        .and(gql(&media_id(product, removed[1])))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productDeleteMedia": {
                "deletedMediaIds": [media_id(product, removed[0]), media_id(product, removed[1])],
                "product": { "id": format!("gid://shopify/Product/{product}") },
                "mediaUserErrors": []
            }
        }))))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productVariantsBulkDelete"))
        .and(gql(&variant_id(product, removed[0])))
        .and(gql(&variant_id(product, removed[1])))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productVariantsBulkDelete": {
                "product": { "id": format!("gid://shopify/Product/{product}"), "title": "Wool Coat" },
                "userErrors": []
            }
        }))))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("deleteOptions"))
        .and(gql(&format!("ProductOption/{product}1")))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productOptionsDelete": {
                "deletedOptionsIds": [format!("gid://shopify/ProductOption/{product}1")],
                "product": { "id": format!("gid://shopify/Product/{product}"), "options": [] },
                "userErrors": []
            }
        }))))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productSet"))
        .and(gql(handle))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productSet": {
                "product": { "id": format!("gid://shopify/Product/{product}"), "handle": handle },
                "userErrors": []
            }
        }))))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("variation_value"))
        .and(gql(&format!("gid://shopify/Product/{product}")))
        .and(gql(color))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productUpdate": {
                "product": { "id": format!("gid://shopify/Product/{product}"),
                             "metafields": { "nodes": [] } },
                "userErrors": []
            }
        }))))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn splits_a_two_color_product_into_two_drafts() {
    let ctx = TestContext::new().await;

    // Source product resolution by title, then its variants.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productsByQuery"))
        .and(gql("title:'Wool Coat'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "products": { "nodes": [{
                "id": "gid://shopify/Product/100",
                "title": "Wool Coat",
                "handle": "wool-coat"
            }]}
        }))))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("product_id:100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productVariants": { "nodes": [
                { "id": "gid://shopify/ProductVariant/11", "title": "Ivory / S",
                  "selectedOptions": [{ "name": "カラー", "value": "Ivory" },
                                      { "name": "サイズ", "value": "S" }] },
                { "id": "gid://shopify/ProductVariant/12", "title": "Ivory / M",
                  "selectedOptions": [{ "name": "カラー", "value": "Ivory" },
                                      { "name": "サイズ", "value": "M" }] },
                { "id": "gid://shopify/ProductVariant/13", "title": "Dark Navy / S",
                  "selectedOptions": [{ "name": "カラー", "value": "Dark Navy" },
                                      { "name": "サイズ", "value": "S" }] },
                { "id": "gid://shopify/ProductVariant/14", "title": "Dark Navy / M",
                  "selectedOptions": [{ "name": "カラー", "value": "Dark Navy" },
                                      { "name": "サイズ", "value": "M" }] }
            ]}
        }))))
        .expect(1)
        .mount(&ctx.server)
        .await;

    // Color order is first-seen: Ivory becomes product 200, Dark Navy
    // becomes product 300. The first duplicate mock expires after one
    // call so the second call falls through to the next.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productDuplicate"))
        .and(gql("DRAFT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duplicate_response(200)))
        .up_to_n_times(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("productDuplicate"))
        .and(gql("DRAFT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(duplicate_response(300)))
        .expect(1)
        .mount(&ctx.server)
        .await;

    // The Ivory duplicate keeps variants 1-2 and loses 3-4; the Dark
    // Navy duplicate keeps 3-4 and loses 1-2 (and the matching media).
    mount_duplicate_state(&ctx.server, 200, 1).await;
    mount_duplicate_state(&ctx.server, 300, 3).await;
    mount_trim_mutations(&ctx.server, 200, [3, 4], "wool-coat-ivory", "Ivory").await;
    mount_trim_mutations(&ctx.server, 300, [1, 2], "wool-coat-dark-navy", "Dark Navy").await;

    // Second pass: every family member lists the complete family.
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(gql("variation_products"))
        .and(gql("gid://shopify/Product/200"))
        .and(gql("gid://shopify/Product/300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graphql_data(json!({
            "productUpdate": {
                "product": { "id": "gid://shopify/Product/200",
                             "metafields": { "nodes": [] } },
                "userErrors": []
            }
        }))))
        .expect(2)
        .mount(&ctx.server)
        .await;

    let new_ids = ctx
        .client
        .split_product_by_color("Wool Coat", "DRAFT")
        .await
        .expect("split should succeed");
    let expected: Vec<String> = ["200", "300"]
        .iter()
        .map(|n| {
            Gid::parse(n, ResourceKind::Product)
                .expect("numeric product id")
                .to_string()
        })
        .collect();
    assert_eq!(new_ids, expected);
}
