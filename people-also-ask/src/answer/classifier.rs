//! Locates the answer container of a results page and assigns its shape.
//!
//! The search is a fixed priority over a handful of structural markers:
//!
//! 1. a simple answer box (`div.xpdopen`), sub-classified by its content;
//! 2. a whole-page tab container (`#wp-tabs-container`), even when it
//!    appears after other candidates;
//! 3. a multi-card section or a single card, unless the "Web results"
//!    heading comes first, which proves there is no featured answer.

use tracing::debug;

use super::models::Shape;
use crate::config::ExtractionConfig;
use crate::dom::{Document, Node};

const SIMPLE_ANSWER_CLASS: &str = "xpdopen";
const RELATED_QUESTIONS_HEADING: &str = "People also ask";
const CARD_SECTION_CLASS: &str = "card-section";
const TIP_PREFIX: &str = "Tip:";
const MULTI_CARD_TAG: &str = "g-section-with-header";
const WHOLE_PAGE_TABS_ID: &str = "wp-tabs-container";
const WEB_RESULTS_HEADING: &str = "Web results";

/// A simple answer box that is not the "People also ask" box.
#[must_use]
pub fn is_simple_answer(node: &Node<'_>) -> bool {
    if !node.is("div") || node.classes() != [SIMPLE_ANSWER_CLASS] {
        return false;
    }
    node.find_tag("h2")
        .map_or(true, |h2| h2.text() != RELATED_QUESTIONS_HEADING)
}

/// A card section that is not a "Tip:" card.
#[must_use]
pub fn is_single_card(node: &Node<'_>) -> bool {
    node.is("div") && node.has_class(CARD_SECTION_CLASS) && !node.text().starts_with(TIP_PREFIX)
}

/// A section of cards with a header.
#[must_use]
pub fn is_multi_card(node: &Node<'_>) -> bool {
    node.is(MULTI_CARD_TAG)
}

/// The whole-page tab container.
#[must_use]
pub fn is_whole_page_tabs(node: &Node<'_>) -> bool {
    node.attr("id") == Some(WHOLE_PAGE_TABS_ID)
}

/// The heading that opens the ordinary results.
#[must_use]
pub fn is_web_results(node: &Node<'_>) -> bool {
    node.is("h2") && node.text() == WEB_RESULTS_HEADING
}

/// An ordered list that is not a navigation menu.
#[must_use]
pub fn is_ordered_list(node: &Node<'_>) -> bool {
    node.is("ol") && node.attr("role") != Some("menu")
}

/// The heading of an answer, preferring level-3 headings.
#[must_use]
pub fn resolve_heading<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    let is_heading = |n: &Node<'_>| n.is("div") && n.attr("role") == Some("heading");
    node.find(|n| is_heading(n) && n.attr("aria-level") == Some("3"))
        .or_else(|| node.find(is_heading))
}

/// First link below `node` pointing to a video host.
#[must_use]
pub fn find_video_link<'a>(node: &Node<'a>, config: &ExtractionConfig) -> Option<Node<'a>> {
    node.find(|n| {
        n.is("a")
            && n.attr("href")
                .and_then(link_host)
                .is_some_and(|host| config.is_video_host(&host))
    })
}

/// Host of an href, looking through search redirect links (`/url?q=...`).
fn link_host(href: &str) -> Option<String> {
    let base = url::Url::parse("https://www.google.com/").ok()?;
    let parsed = base.join(href).ok()?;
    if parsed.path() == "/url" {
        if let Some((_, target)) = parsed
            .query_pairs()
            .find(|(key, _)| key == "q" || key == "url")
        {
            return url::Url::parse(&target)
                .ok()
                .and_then(|u| u.host_str().map(str::to_string));
        }
    }
    parsed.host_str().map(str::to_string)
}

/// Assigns the finer shape of a simple answer box.
///
/// Returns [`Shape::None`] when no known content is present.
#[must_use]
pub fn classify_simple(node: &Node<'_>, config: &ExtractionConfig) -> Shape {
    if node.find_tag("table").is_some() {
        Shape::Table
    } else if node.find(is_ordered_list).is_some() {
        Shape::Ordered
    } else if node.find_tag("ul").is_some() {
        Shape::Unordered
    } else if resolve_heading(node).is_some() {
        Shape::Definition
    } else if find_video_link(node, config).is_some() {
        Shape::Youtube
    } else {
        Shape::None
    }
}

/// Finds the answer container and its shape.
///
/// `None` means the page has no featured answer. A simple answer box with
/// unrecognised content is returned with [`Shape::None`].
#[must_use]
pub fn locate<'a>(document: &'a Document, config: &ExtractionConfig) -> Option<(Node<'a>, Shape)> {
    let candidate = document.find(|n| {
        is_simple_answer(n) || is_single_card(n) || is_multi_card(n) || is_web_results(n)
    });

    if let Some(node) = candidate.filter(is_simple_answer) {
        let shape = classify_simple(&node, config);
        if shape == Shape::None {
            debug!("simple answer box has no recognised content");
        }
        return Some((node, shape));
    }

    if let Some(node) = document.find(is_whole_page_tabs) {
        return Some((node, Shape::WholePageTabs));
    }

    let node = candidate.filter(|n| !is_web_results(n))?;
    let shape = if is_multi_card(&node) {
        Shape::MultiCard
    } else {
        Shape::SingleCard
    };
    Some((node, shape))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locate_shape(html: &str) -> Option<Shape> {
        let document = Document::parse(html);
        locate(&document, &ExtractionConfig::default()).map(|(_, shape)| shape)
    }

    #[test]
    fn test_empty_page_has_no_answer() {
        assert_eq!(locate_shape("<html><body><p>nothing here</p></body></html>"), None);
        assert_eq!(locate_shape(""), None);
    }

    #[test]
    fn test_web_results_sentinel_stops_search() {
        let html = r#"<body>
            <h2>Web results</h2>
            <div class="card-section"><span>too late</span></div>
        </body>"#;
        assert_eq!(locate_shape(html), None);
    }

    #[test]
    fn test_simple_answer_requires_exact_class() {
        let html = r#"<body><div class="xpdopen extra"><table><tr><td>1</td></tr></table></div></body>"#;
        assert_eq!(locate_shape(html), None);

        let html = r#"<body><div class="xpdopen xpdopen"><table><tr><td>1</td></tr></table></div></body>"#;
        assert_eq!(locate_shape(html), None);

        let html = r#"<body><div class="xpdopen"><table><tr><td>1</td></tr></table></div></body>"#;
        assert_eq!(locate_shape(html), Some(Shape::Table));
    }

    #[test]
    fn test_people_also_ask_box_is_not_an_answer() {
        let html = r#"<body>
            <div class="xpdopen"><h2>People also ask</h2><ul><li>q</li></ul></div>
        </body>"#;
        assert_eq!(locate_shape(html), None);
    }

    #[test]
    fn test_tip_card_is_skipped() {
        let html = r#"<body>
            <div class="card-section">Tip: search in English</div>
            <div class="card-section"><span>10:42 PM</span></div>
        </body>"#;
        let document = Document::parse(html);
        let (node, shape) = locate(&document, &ExtractionConfig::default()).unwrap();
        assert_eq!(shape, Shape::SingleCard);
        assert_eq!(node.text(), "10:42 PM");
    }

    #[test]
    fn test_simple_answer_beats_whole_page_tabs() {
        let html = r#"<body>
            <div id="wp-tabs-container"><span>tabs</span></div>
            <div class="xpdopen"><ul><li>a</li></ul></div>
        </body>"#;
        assert_eq!(locate_shape(html), Some(Shape::Unordered));
    }

    #[test]
    fn test_whole_page_tabs_beats_earlier_cards() {
        let html = r#"<body>
            <g-section-with-header><g-inner-card>x</g-inner-card></g-section-with-header>
            <div id="wp-tabs-container"><span>tabs</span></div>
        </body>"#;
        assert_eq!(locate_shape(html), Some(Shape::WholePageTabs));
    }

    #[test]
    fn test_whole_page_tabs_beats_sentinel() {
        let html = r#"<body>
            <h2>Web results</h2>
            <div id="wp-tabs-container"><span>tabs</span></div>
        </body>"#;
        assert_eq!(locate_shape(html), Some(Shape::WholePageTabs));
    }

    #[test]
    fn test_multi_card() {
        let html = r#"<body><g-section-with-header><g-inner-card>x</g-inner-card></g-section-with-header></body>"#;
        assert_eq!(locate_shape(html), Some(Shape::MultiCard));
    }

    #[test]
    fn test_simple_sub_classification_priority() {
        let with = |inner: &str| locate_shape(&format!(r#"<body><div class="xpdopen">{inner}</div></body>"#));

        assert_eq!(
            with("<ol><li>a</li></ol><table><tr><td>1</td></tr></table>"),
            Some(Shape::Table)
        );
        assert_eq!(with("<ul><li>a</li></ul><ol><li>b</li></ol>"), Some(Shape::Ordered));
        assert_eq!(
            with(r#"<ol role="menu"><li>nav</li></ol><ul><li>b</li></ul>"#),
            Some(Shape::Unordered)
        );
        assert_eq!(
            with(r#"<div role="heading">Because.</div><a href="https://youtube.com/watch?v=1">v</a>"#),
            Some(Shape::Definition)
        );
        assert_eq!(
            with(r#"<a href="https://www.youtube.com/watch?v=1">v</a>"#),
            Some(Shape::Youtube)
        );
        assert_eq!(with("<p>just text</p>"), Some(Shape::None));
    }

    #[test]
    fn test_resolve_heading_prefers_level_three() {
        let document = Document::parse(
            r#"<div id="c"><div role="heading">plain</div><div role="heading" aria-level="3">level 3</div></div>"#,
        );
        let container = document.find(|n| n.attr("id") == Some("c")).unwrap();
        assert_eq!(resolve_heading(&container).unwrap().text(), "level 3");
    }

    #[test]
    fn test_video_link_through_redirect() {
        let document = Document::parse(
            r#"<div id="c"><a href="/url?q=https://www.youtube.com/watch%3Fv%3D1&sa=U">v</a></div>"#,
        );
        let container = document.find(|n| n.attr("id") == Some("c")).unwrap();
        assert!(find_video_link(&container, &ExtractionConfig::default()).is_some());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let html = r#"<body><div class="xpdopen"><ol><li>a</li></ol></div></body>"#;
        assert_eq!(locate_shape(html), locate_shape(html));
    }
}
