//! Rich-text metafield documents.
//!
//! The `custom.product_description` metafield stores Shopify's
//! rich-text JSON AST (`root` / `heading` / `paragraph` / `text`),
//! JSON-stringified exactly once at write time.

use serde_json::{Value, json};

/// The operator-curated description fields for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDescription {
    /// 商品説明
    pub description: String,
    /// 使用上の注意
    pub care: String,
    /// サイズ
    pub size: String,
    /// 素材
    pub material: String,
    /// 原産国
    pub origin: String,
}

impl ProductDescription {
    /// Section headings paired with their body text, in display order.
    fn sections(&self) -> [(&'static str, &str); 5] {
        [
            ("商品説明", &self.description),
            ("使用上の注意", &self.care),
            ("サイズ", &self.size),
            ("素材", &self.material),
            ("原産国", &self.origin),
        ]
    }

    /// Build the rich-text document: five heading(level 3) + paragraph
    /// pairs under a single root.
    #[must_use]
    pub fn to_document(&self) -> Value {
        let children: Vec<Value> = self
            .sections()
            .iter()
            .flat_map(|(heading, body)| {
                [
                    json!({
                        "type": "heading",
                        "level": 3,
                        "children": [{ "type": "text", "value": heading }],
                    }),
                    json!({
                        "type": "paragraph",
                        "children": [{ "type": "text", "value": body }],
                    }),
                ]
            })
            .collect();
        json!({ "type": "root", "children": children })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProductDescription {
        ProductDescription {
            description: "やわらかいコットン素材のTシャツ".to_string(),
            care: "洗濯機可".to_string(),
            size: "S/M/L".to_string(),
            material: "綿100%".to_string(),
            origin: "日本".to_string(),
        }
    }

    #[test]
    fn document_has_five_heading_paragraph_pairs() {
        let doc = sample().to_document();
        assert_eq!(doc["type"], "root");
        let children = doc["children"].as_array().unwrap();
        assert_eq!(children.len(), 10);
        for pair in children.chunks(2) {
            assert_eq!(pair[0]["type"], "heading");
            assert_eq!(pair[0]["level"], 3);
            assert_eq!(pair[1]["type"], "paragraph");
        }
        assert_eq!(children[0]["children"][0]["value"], "商品説明");
        assert_eq!(children[8]["children"][0]["value"], "原産国");
    }

    #[test]
    fn serialized_document_round_trips() {
        let doc = sample().to_document();
        let s = serde_json::to_string(&doc).unwrap();
        let back: Value = serde_json::from_str(&s).unwrap();
        assert_eq!(back, doc);
        assert_eq!(serde_json::to_string(&back).unwrap(), s);
    }
}
