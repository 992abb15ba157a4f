//! Image filename handling and description-HTML fragments.
//!
//! Uploaded filenames must match what the CDN will serve, so the same
//! sanitization runs before upload and before any filename-based
//! lookup.

/// Animation classes cycled across description images, by index mod 4.
pub const ANIMATION_CLASSES: [&str; 4] = [
    "reveal_tran_bt",
    "reveal_tran_rl",
    "reveal_tran_lr",
    "reveal_tran_tb",
];

/// Sanitize an image filename for upload and CDN lookup.
///
/// Spaces become underscores, `[` and `)` are stripped, `]` and `(`
/// become underscores.
#[must_use]
pub fn sanitize(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            ' ' | ']' | '(' => Some('_'),
            '[' | ')' => None,
            other => Some(other),
        })
        .collect()
}

/// MIME type derived from an image filename's extension.
#[must_use]
pub fn image_mime_type(name: &str) -> String {
    let ext = name.rsplit_once('.').map_or("", |(_, ext)| ext);
    format!("image/{}", ext.to_lowercase())
}

/// One `<p><img></p>` fragment of a product description.
#[must_use]
pub fn description_fragment(name: &str, sequence: usize, url_prefix: &str) -> String {
    let class = ANIMATION_CLASSES[sequence % ANIMATION_CLASSES.len()];
    format!(
        r#"<p class="{class}"><img src="{url_prefix}/files/{}" alt=""></p>"#,
        sanitize(name)
    )
}

/// The full description HTML for an ordered image set.
#[must_use]
pub fn description_html<'a, I>(names: I, url_prefix: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(i, name)| description_fragment(name, i, url_prefix))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_and_strips() {
        assert_eq!(sanitize("look book 01.jpg"), "look_book_01.jpg");
        assert_eq!(sanitize("a[b]c(d)e.png"), "ab_c_de.png");
    }

    #[test]
    fn mime_type_lowercases_extension() {
        assert_eq!(image_mime_type("photo.JPG"), "image/jpg");
        assert_eq!(image_mime_type("layers.psd"), "image/psd");
    }

    #[test]
    fn fragment_uses_cycled_class() {
        let html = description_fragment("x.png", 4, "https://cdn.example.com");
        assert_eq!(
            html,
            r#"<p class="reveal_tran_bt"><img src="https://cdn.example.com/files/x.png" alt=""></p>"#
        );
    }

    #[test]
    fn five_images_cycle_back_to_first_class() {
        let names = ["x.png", "y.png", "z.png", "w.png", "v.png"];
        let html = description_html(names, "https://cdn.example.com");
        let classes: Vec<&str> = html
            .lines()
            .map(|l| l.split('"').nth(1).unwrap())
            .collect();
        assert_eq!(
            classes,
            vec![
                "reveal_tran_bt",
                "reveal_tran_rl",
                "reveal_tran_lr",
                "reveal_tran_tb",
                "reveal_tran_bt",
            ]
        );
    }
}
