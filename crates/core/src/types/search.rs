//! Builders for the Admin API search-query grammar.
//!
//! Operator-supplied values that flow into a search query are wrapped in
//! single quotes with embedded quotes backslash-escaped. Handles and
//! tags never contain quotes by construction, so their terms pass the
//! raw value through; `product_id` uses the legacy unquoted numeric
//! form.

/// Wrap a value in single quotes, escaping embedded single quotes.
#[must_use]
pub fn quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "\\'"))
}

/// `title:'<escaped>'`
#[must_use]
pub fn title(value: &str) -> String {
    format!("title:{}", quoted(value))
}

/// `handle:'<raw>'` - handles are URL slugs and cannot contain quotes.
#[must_use]
pub fn handle(value: &str) -> String {
    format!("handle:'{value}'")
}

/// `tag:'<raw>'` - the tag grammar forbids quotes.
#[must_use]
pub fn tag(value: &str) -> String {
    format!("tag:'{value}'")
}

/// `id:'<numeric>'`
#[must_use]
pub fn id(numeric: u64) -> String {
    format!("id:'{numeric}'")
}

/// `sku:'<escaped>'`
#[must_use]
pub fn sku(value: &str) -> String {
    format!("sku:{}", quoted(value))
}

/// `product_id:<numeric>` - the legacy grammar takes no quotes here.
#[must_use]
pub fn product_id(numeric: u64) -> String {
    format!("product_id:{numeric}")
}

/// `filename:'<basename-without-extension>'`
#[must_use]
pub fn filename(name: &str) -> String {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    format!("filename:{}", quoted(stem))
}

/// `name:<raw>` - location names are matched unquoted.
#[must_use]
pub fn location_name(value: &str) -> String {
    format!("name:{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_escapes_single_quotes() {
        assert_eq!(title("Kid's Tee"), r"title:'Kid\'s Tee'");
    }

    #[test]
    fn plain_title_is_quoted() {
        assert_eq!(title("Spring Coat"), "title:'Spring Coat'");
    }

    #[test]
    fn handle_and_tag_pass_through() {
        assert_eq!(handle("spring-coat-red"), "handle:'spring-coat-red'");
        assert_eq!(tag("new-arrival"), "tag:'new-arrival'");
    }

    #[test]
    fn product_id_is_unquoted() {
        assert_eq!(product_id(42), "product_id:42");
    }

    #[test]
    fn filename_drops_extension() {
        assert_eq!(filename("hero_01.jpg"), "filename:'hero_01'");
        assert_eq!(filename("no-extension"), "filename:'no-extension'");
    }

    #[test]
    fn sku_is_quoted() {
        assert_eq!(sku("ABC-1"), "sku:'ABC-1'");
    }
}
