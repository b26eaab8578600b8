//! Text Extractor: turns a job posting's HTML into one plain-text description.

use scraper::{Html, Selector};

/// Collects the text of every `<p>` element in document order, joined by a
/// single space and trimmed. Nested markup is stripped. A page without
/// paragraphs yields an empty string.
pub fn extract_description(html: &str) -> String {
    let document = Html::parse_document(html);
    let Ok(paragraph) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&paragraph)
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_joined_in_order() {
        let html = "<html><body><p>A</p><div>skip</div><p>B</p></body></html>";
        assert_eq!(extract_description(html), "A B");
    }

    #[test]
    fn test_no_paragraphs_yields_empty_string() {
        let html = "<html><body><h1>Title</h1><div>Body</div></body></html>";
        assert_eq!(extract_description(html), "");
    }

    #[test]
    fn test_nested_markup_is_stripped() {
        let html = "<p>We need <b>Python</b> and <a href='#'>Docker</a> experience</p>";
        assert_eq!(
            extract_description(html),
            "We need Python and Docker experience"
        );
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let html = "<p>  leading</p><p>trailing  </p>";
        assert_eq!(extract_description(html), "leading trailing");
    }

    #[test]
    fn test_duplicate_paragraphs_are_kept() {
        let html = "<p>Rust</p><p>Rust</p>";
        assert_eq!(extract_description(html), "Rust Rust");
    }

    #[test]
    fn test_empty_paragraphs_still_contribute_separator() {
        let html = "<p>A</p><p></p><p>B</p>";
        assert_eq!(extract_description(html), "A  B");
    }

    #[test]
    fn test_entities_are_decoded() {
        let html = "<p>C&#43;&#43; &amp; Go</p>";
        assert_eq!(extract_description(html), "C++ & Go");
    }
}
