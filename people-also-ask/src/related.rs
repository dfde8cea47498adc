//! Extraction of "People also ask" follow-up questions.

use crate::dom::Document;

const RELATED_QUESTION_CLASS: &str = "related-question-pair";
const SEARCH_FOR_MARKER: &str = "Search for:";

/// Follow-up questions of a results page, in document order.
///
/// Each entry is the text of a related-question pair cut at the first
/// literal `Search for:`. Duplicates are kept; an empty result is valid.
#[must_use]
pub fn extract_related_questions(document: &Document) -> Vec<String> {
    document
        .find_all(|n| n.is("div") && n.has_class(RELATED_QUESTION_CLASS))
        .iter()
        .map(|pair| truncate_question(&pair.text()).to_string())
        .collect()
}

/// Cuts `text` at the first `Search for:`.
#[must_use]
pub fn truncate_question(text: &str) -> &str {
    text.split_once(SEARCH_FOR_MARKER).map_or(text, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_truncate_at_first_marker() {
        assert_eq!(
            truncate_question("Where is France?Search for: Where is France? Search for: again"),
            "Where is France?"
        );
        assert_eq!(truncate_question("no marker"), "no marker");
        assert_eq!(truncate_question("Search for: x"), "");
        assert_eq!(truncate_question("search for: lower case"), "search for: lower case");
    }

    #[test]
    fn test_extract_in_document_order_without_dedup() {
        let document = Document::parse(
            r#"<body>
            <div class="related-question-pair"><span>Is Paris in France?</span><div>Search for: Is Paris in France?</div></div>
            <div class="x related-question-pair">What is the capital?</div>
            <div class="related-question-pair">Is Paris in France?</div>
            <span class="related-question-pair">not a div</span>
            </body>"#,
        );
        assert_eq!(
            extract_related_questions(&document),
            vec![
                "Is Paris in France?".to_string(),
                "What is the capital?".to_string(),
                "Is Paris in France?".to_string(),
            ]
        );
    }

    #[test]
    fn test_no_related_questions() {
        let document = Document::parse("<body><p>nothing</p></body>");
        assert!(extract_related_questions(&document).is_empty());
    }
}
