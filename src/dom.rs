//! Small uniform vocabulary for walking a parsed document, shared by the
//! structured-data extractors and every site scraper.
//!
//! All helpers degrade gracefully: a missing attribute or an empty subtree
//! produces an empty string, `None` or an empty list, never an error.

use scraper::{ElementRef, Html};
use url::Url;

/// Value of the `name` attribute on `el`, or the empty string when absent.
///
/// An attribute whose value is the empty string reads the same as a missing
/// one; callers that need the distinction check `el.value().attr` directly.
pub fn attr(el: ElementRef<'_>, name: &str) -> String {
    el.value().attr(name).unwrap_or_default().to_string()
}

/// First element in depth-first pre-order (root included) whose `name`
/// attribute equals `value` exactly.
pub fn find_first_by_attr<'a>(
    root: ElementRef<'a>,
    name: &str,
    value: &str,
) -> Option<ElementRef<'a>> {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().attr(name) == Some(value))
}

/// Every element in depth-first pre-order (root included) satisfying `pred`.
pub fn find_all<'a, P>(root: ElementRef<'a>, pred: P) -> Vec<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| pred(el))
        .collect()
}

/// Concatenated text content of `el` and its descendants, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Root element of a parsed page, for the helpers that walk subtrees.
pub fn root(document: &Html) -> ElementRef<'_> {
    document.root_element()
}

/// Resolve `href` against `base`, for sites that publish relative image
/// paths. Falls back to `href` unchanged when either side does not parse.
pub fn absolute_url(base: &str, href: &str) -> String {
    match Url::parse(base).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_attr_missing_is_empty() {
        let document = parse(r#"<div id="card" class="recipe"></div>"#);
        let div = find_first_by_attr(root(&document), "id", "card").unwrap();
        assert_eq!(attr(div, "class"), "recipe");
        assert_eq!(attr(div, "data-servings"), "");
    }

    #[test]
    fn test_find_first_by_attr_is_exact_and_preorder() {
        let document = parse(
            r#"<div>
                <span itemprop="names">not me</span>
                <p itemprop="name">first</p>
                <p itemprop="name">second</p>
            </div>"#,
        );
        let el = find_first_by_attr(root(&document), "itemprop", "name").unwrap();
        assert_eq!(text_of(el), "first");
        assert!(find_first_by_attr(root(&document), "itemprop", "absent").is_none());
    }

    #[test]
    fn test_find_all_collects_in_document_order() {
        let document = parse(
            r#"<ul>
                <li class="ingredient">flour</li>
                <li class="note">skip</li>
                <li class="ingredient">sugar</li>
            </ul>"#,
        );
        let items = find_all(root(&document), |el| {
            el.value().attr("class") == Some("ingredient")
        });
        let texts: Vec<String> = items.iter().map(|el| text_of(*el)).collect();
        assert_eq!(texts, vec!["flour", "sugar"]);
    }

    #[test]
    fn test_text_of_concatenates_descendants() {
        let document = parse(r#"<p id="t">  Mix <b>well</b> </p>"#);
        let p = find_first_by_attr(root(&document), "id", "t").unwrap();
        assert_eq!(text_of(p), "Mix  well");
    }

    #[test]
    fn test_absolute_url_resolves_relative_paths() {
        assert_eq!(
            absolute_url("https://example.com/recipes/soup", "/img/soup.jpg"),
            "https://example.com/img/soup.jpg"
        );
        assert_eq!(
            absolute_url("not a url", "https://example.com/a.jpg"),
            "https://example.com/a.jpg"
        );
    }
}
