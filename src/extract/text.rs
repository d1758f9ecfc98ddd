// src/extract/text.rs
// Text helpers shared by the extractors.

use scraper::{ElementRef, Selector};

/// First non-blank text node that is a direct child of `element`, trimmed.
///
/// Nested elements are ignored: for `<div>Author<span>x</span></div>` this
/// yields "Author".
pub(crate) fn own_text(element: ElementRef<'_>) -> Option<String> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// All descendant text of `element`, trimmed
pub(crate) fn full_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Tries each query in turn under `scope` and returns the own text of the
/// first matching element that has any. `None` when every query comes up empty.
pub(crate) fn first_own_text(scope: ElementRef<'_>, queries: &[&Selector]) -> Option<String> {
    queries
        .iter()
        .find_map(|query| scope.select(query).find_map(own_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn root(html: &str) -> Html {
        Html::parse_fragment(html)
    }

    #[test]
    fn test_own_text_skips_nested_elements() {
        let doc = root("<div id='x'>  Author <span>nested</span></div>");
        let sel = Selector::parse("#x").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(own_text(el).as_deref(), Some("Author"));
        assert_eq!(full_text(el), "Author nested");
    }

    #[test]
    fn test_first_own_text_falls_back() {
        let doc = root("<section><p class='b'>second</p></section>");
        let section = Selector::parse("section").unwrap();
        let a = Selector::parse("p.a").unwrap();
        let b = Selector::parse("p.b").unwrap();
        let scope = doc.select(&section).next().unwrap();
        assert_eq!(first_own_text(scope, &[&a, &b]).as_deref(), Some("second"));
        assert_eq!(first_own_text(scope, &[&a]), None);
    }
}
