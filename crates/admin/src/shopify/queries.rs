//! Declarative GraphQL query and mutation catalog.
//!
//! Every request the client issues is defined here. Values travel
//! server-side through the `variables` object; client-side templating
//! is limited to tokens the query grammar itself demands (the legacy
//! `product_id:<n>` search literal and the `productSet` attribute
//! name), never operator data.

/// `products(first:10, query:$query_string, sortKey:TITLE)`.
///
/// Variables: `query_string: String!`
pub const PRODUCTS_BY_QUERY: &str = r"
query productsByQuery($query_string: String!) {
    products(first: 10, query: $query_string, sortKey: TITLE) {
        nodes {
            id
            title
            handle
            tags
            metafields(first: 10) {
                nodes {
                    id
                    namespace
                    key
                    value
                }
            }
        }
    }
}
";

/// Variants of one product via the legacy `product_id:` search grammar,
/// which takes the bare numeric ID inside the query text.
#[must_use]
pub fn product_variants_by_product(product_id: u64) -> String {
    format!(
        r#"
{{
    productVariants(first: 10, query: "product_id:{product_id}") {{
        nodes {{
            id
            title
            displayName
            sku
            media(first: 50) {{
                nodes {{
                    id
                    ... on MediaImage {{
                        image {{
                            url
                        }}
                    }}
                }}
            }}
            selectedOptions {{
                name
                value
            }}
        }}
    }}
}}
"#
    )
}

/// Variables: `query_string: String!`
pub const PRODUCT_VARIANTS_BY_QUERY: &str = r"
query variantsByQuery($query_string: String!) {
    productVariants(first: 10, query: $query_string) {
        nodes {
            id
            title
            sku
            product {
                id
            }
        }
    }
}
";

/// Variables: `id: ID!`
pub const PRODUCT_VARIANT_BY_ID: &str = r"
query variantById($id: ID!) {
    productVariant(id: $id) {
        id
        title
        sku
        media(first: 5) {
            nodes {
                id
            }
        }
    }
}
";

/// Variables: `id: ID!`
pub const PRODUCT_OF_VARIANT: &str = r"
query productOfVariant($id: ID!) {
    productVariant(id: $id) {
        displayName
        product {
            id
            title
        }
    }
}
";

/// Variables: `productId: ID!`
pub const PRODUCT_DESCRIPTION_HTML: &str = r"
query productDescription($productId: ID!) {
    product(id: $productId) {
        id
        descriptionHtml
    }
}
";

/// Variables: `productId: ID!`
pub const PRODUCT_MEDIA: &str = r"
query productMediaStatus($productId: ID!) {
    product(id: $productId) {
        media(first: 100) {
            nodes {
                id
                alt
                ... on MediaImage {
                    image {
                        url
                    }
                }
                mediaContentType
                status
                mediaErrors {
                    code
                    details
                    message
                }
                mediaWarnings {
                    code
                    message
                }
            }
        }
    }
}
";

/// Variables: `query_string: String!`
pub const FILES_BY_QUERY: &str = r"
query filesByQuery($query_string: String!) {
    files(first: 10, query: $query_string) {
        nodes {
            id
            ... on MediaImage {
                image {
                    url
                }
            }
        }
    }
}
";

/// Variables: `ownerType: MetafieldOwnerType!`, `namespace: String!`,
/// `key: String!`
pub const METAFIELD_DEFINITIONS: &str = r"
query metafieldDefinitions($ownerType: MetafieldOwnerType!, $namespace: String!, $key: String!) {
    metafieldDefinitions(first: 10, ownerType: $ownerType, namespace: $namespace, key: $key) {
        nodes {
            id
        }
    }
}
";

/// Variables: `query_string: String!`
pub const LOCATIONS_BY_QUERY: &str = r"
query locationsByQuery($query_string: String!) {
    locations(first: 10, query: $query_string) {
        nodes {
            id
            name
        }
    }
}
";

/// Variables: `query_string: String!`
pub const INVENTORY_ITEMS_BY_QUERY: &str = r"
query inventoryItemsByQuery($query_string: String!) {
    inventoryItems(first: 5, query: $query_string) {
        nodes {
            id
        }
    }
}
";

/// Variables: `productId: ID!`, `newTitle: String!`,
/// `includeImages: Boolean`, `newStatus: ProductStatus`
pub const PRODUCT_DUPLICATE: &str = r"
mutation duplicateProduct($productId: ID!, $newTitle: String!, $includeImages: Boolean, $newStatus: ProductStatus) {
    productDuplicate(productId: $productId, newTitle: $newTitle, includeImages: $includeImages, newStatus: $newStatus) {
        newProduct {
            id
            handle
            title
            variants(first: 10) {
                nodes {
                    id
                    title
                    selectedOptions {
                        name
                        value
                    }
                }
            }
            options {
                id
                name
                values
            }
        }
        imageJob {
            id
            done
        }
        userErrors {
            field
            message
        }
    }
}
";

/// `productSet` writing a single product attribute. The attribute name
/// must appear in the selection set, so it is templated into the query
/// text; it is always a compile-time identifier, never operator data.
#[must_use]
pub fn product_set_attribute(attribute: &str) -> String {
    format!(
        r"
mutation productSetAttribute($productSet: ProductSetInput!) {{
    productSet(synchronous: true, input: $productSet) {{
        product {{
            id
            {attribute}
        }}
        userErrors {{
            field
            code
            message
        }}
    }}
}}
"
    )
}

/// Variables: `productSet: ProductSetInput!`
pub const PRODUCT_SET_METAFIELDS: &str = r"
mutation productSetMetafields($productSet: ProductSetInput!) {
    productSet(synchronous: true, input: $productSet) {
        product {
            id
            metafields(first: 10) {
                nodes {
                    id
                    namespace
                    key
                    value
                }
            }
        }
        userErrors {
            field
            code
            message
        }
    }
}
";

/// Variables: `input: ProductInput!`
pub const PRODUCT_UPDATE_METAFIELD: &str = r"
mutation updateProductMetafield($input: ProductInput!) {
    productUpdate(input: $input) {
        product {
            id
            metafields(first: 10) {
                nodes {
                    id
                    namespace
                    key
                    value
                }
            }
        }
        userErrors {
            field
            message
        }
    }
}
";

/// Variables: `productId: ID!`, `variantsIds: [ID!]!`
pub const PRODUCT_VARIANTS_BULK_DELETE: &str = r"
mutation bulkDeleteProductVariants($productId: ID!, $variantsIds: [ID!]!) {
    productVariantsBulkDelete(productId: $productId, variantsIds: $variantsIds) {
        product {
            id
            title
        }
        userErrors {
            field
            message
        }
    }
}
";

/// Variables: `productId: ID!`, `options: [ID!]!`
pub const PRODUCT_OPTIONS_DELETE: &str = r"
mutation deleteOptions($productId: ID!, $options: [ID!]!) {
    productOptionsDelete(productId: $productId, options: $options, strategy: DEFAULT) {
        deletedOptionsIds
        product {
            id
            options {
                id
                name
                values
            }
        }
        userErrors {
            field
            message
            code
        }
    }
}
";

/// Variables: `media: [CreateMediaInput!]!`, `productId: ID!`
pub const PRODUCT_CREATE_MEDIA: &str = r"
mutation productCreateMedia($media: [CreateMediaInput!]!, $productId: ID!) {
    productCreateMedia(media: $media, productId: $productId) {
        media {
            alt
            mediaContentType
            status
        }
        product {
            id
            title
        }
        userErrors {
            field
            message
        }
    }
}
";

/// Variables: `productId: ID!`, `mediaIds: [ID!]!`
pub const PRODUCT_DELETE_MEDIA: &str = r"
mutation deleteProductMedia($productId: ID!, $mediaIds: [ID!]!) {
    productDeleteMedia(productId: $productId, mediaIds: $mediaIds) {
        deletedMediaIds
        product {
            id
        }
        mediaUserErrors {
            code
            field
            message
        }
    }
}
";

/// Variables: `productId: ID!`,
/// `variantMedia: [ProductVariantAppendMediaInput!]!`
pub const PRODUCT_VARIANT_APPEND_MEDIA: &str = r"
mutation productVariantAppendMedia($productId: ID!, $variantMedia: [ProductVariantAppendMediaInput!]!) {
    productVariantAppendMedia(productId: $productId, variantMedia: $variantMedia) {
        product {
            id
        }
        productVariants {
            id
        }
        userErrors {
            field
            message
        }
    }
}
";

/// Variables: `productId: ID!`,
/// `variantMedia: [ProductVariantDetachMediaInput!]!`
pub const PRODUCT_VARIANT_DETACH_MEDIA: &str = r"
mutation productVariantDetachMedia($productId: ID!, $variantMedia: [ProductVariantDetachMediaInput!]!) {
    productVariantDetachMedia(productId: $productId, variantMedia: $variantMedia) {
        product {
            id
        }
        productVariants {
            id
            media(first: 5) {
                nodes {
                    id
                }
            }
        }
        userErrors {
            field
            message
        }
    }
}
";

/// Variables: `input: [FileUpdateInput!]!`
pub const FILE_UPDATE: &str = r"
mutation fileUpdate($input: [FileUpdateInput!]!) {
    fileUpdate(files: $input) {
        files {
            alt
        }
        userErrors {
            code
            field
            message
        }
    }
}
";

/// Variables: `input: [StagedUploadInput!]!`
pub const STAGED_UPLOADS_CREATE: &str = r"
mutation stagedUploadsCreate($input: [StagedUploadInput!]!) {
    stagedUploadsCreate(input: $input) {
        stagedTargets {
            url
            resourceUrl
            parameters {
                name
                value
            }
        }
        userErrors {
            field
            message
        }
    }
}
";

/// Variables: `metafields: [MetafieldsSetInput!]!`
pub const METAFIELDS_SET: &str = r"
mutation metafieldsSet($metafields: [MetafieldsSetInput!]!) {
    metafieldsSet(metafields: $metafields) {
        metafields {
            key
            namespace
            value
        }
        userErrors {
            field
            message
            code
        }
    }
}
";

/// Variables: `inventoryItemId: ID!`, `locationId: ID!`, `quantity: Int!`
pub const INVENTORY_SET_QUANTITIES: &str = r#"
mutation inventorySetQuantities($inventoryItemId: ID!, $locationId: ID!, $quantity: Int!) {
    inventorySetQuantities(
        input: {name: "available", ignoreCompareQuantity: true, reason: "correction",
                quantities: [{inventoryItemId: $inventoryItemId,
                              locationId: $locationId,
                              quantity: $quantity}]}
    ) {
        inventoryAdjustmentGroup {
            id
            reason
            changes {
                name
                delta
                quantityAfterChange
            }
        }
        userErrors {
            message
            code
            field
        }
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_query_embeds_numeric_product_id() {
        let query = product_variants_by_product(8051);
        assert!(query.contains(r#"query: "product_id:8051""#));
    }

    #[test]
    fn attribute_mutation_selects_the_attribute() {
        let query = product_set_attribute("handle");
        assert!(query.contains("productSet(synchronous: true"));
        assert!(query.contains("handle"));
    }
}
