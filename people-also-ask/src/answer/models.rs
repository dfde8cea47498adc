//! Data models for extracted answers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Structural category of an answer box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A table, e.g. "world university rankings 2019".
    Table,
    /// A numbered list.
    Ordered,
    /// A bulleted list.
    Unordered,
    /// A single highlighted sentence.
    Definition,
    /// A link to a video.
    Youtube,
    /// A carousel of cards.
    MultiCard,
    /// A single card, e.g. "what time is it".
    SingleCard,
    /// A whole-page tab container, e.g. "gangnam style".
    WholePageTabs,
    /// No recognisable answer.
    None,
}

impl Shape {
    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Table => "Table Featured Snippet",
            Self::Ordered => "Ordered Featured Snippet",
            Self::Unordered => "Unordered Featured Snippet",
            Self::Definition => "Definition Featured Snippet",
            Self::Youtube => "Youtube Featured Snippet",
            Self::MultiCard => "Multiple Cards Featured Snippet",
            Self::SingleCard => "Single Card Featured Snippet",
            Self::WholePageTabs => "Whole Page Tab Container",
            Self::None => "No Featured Snippet",
        }
    }


    fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Ordered => "ordered",
            Self::Unordered => "unordered",
            Self::Definition => "definition",
            Self::Youtube => "youtube",
            Self::MultiCard => "multi_card",
            Self::SingleCard => "single_card",
            Self::WholePageTabs => "whole_page_tabs",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One card of a multi-card answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    /// Card heading.
    pub heading: String,
    /// Citation text.
    pub title: String,
    /// Target URL.
    pub link: String,
    /// Deduplicated text of the card.
    pub raw_text: String,
}

impl Card {
    /// Renders the card as plain text.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}\nLink: {}", self.raw_text, self.link)
    }
}

/// Shape-specific structured data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnippetData {
    /// A rectangular grid with named columns.
    Table {
        /// Column names (synthesised as `0..n` when the table has no header).
        columns: Vec<String>,
        /// Data rows, each exactly `columns.len()` wide.
        rows: Vec<Vec<String>>,
    },
    /// List items in document order.
    List {
        /// Item texts.
        items: Vec<String>,
    },
    /// Cards in document order.
    Cards {
        /// The cards.
        cards: Vec<Card>,
    },
}

/// The answer extracted for one question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerRecord {
    /// The question that was searched.
    pub question: String,
    /// Whether the page carried a featured answer.
    pub has_answer: bool,
    /// Shape of the answer.
    pub shape: Shape,
    /// Answer heading.
    pub heading: Option<String>,
    /// Title of the linked source.
    pub title: Option<String>,
    /// URL of the linked source.
    pub link: Option<String>,
    /// Displayed (cited) form of the source URL.
    pub displayed_link: Option<String>,
    /// Plain-text answer.
    pub response: String,
    /// Deduplicated text of the answer container.
    pub raw_text: Option<String>,
    /// Shape-specific structured data.
    pub snippet: Option<SnippetData>,
    /// Follow-up questions found on the page.
    #[serde(default)]
    pub related_questions: Vec<String>,
}

impl AnswerRecord {
    /// Creates the record for a page without an answer.
    #[must_use]
    pub fn no_answer(question: impl Into<String>, related_questions: Vec<String>) -> Self {
        Self {
            question: question.into(),
            has_answer: false,
            shape: Shape::None,
            heading: None,
            title: None,
            link: None,
            displayed_link: None,
            response: String::new(),
            raw_text: None,
            snippet: None,
            related_questions,
        }
    }

    /// Creates an answered record; optional fields start empty.
    #[must_use]
    pub fn answered(
        question: impl Into<String>,
        shape: Shape,
        response: impl Into<String>,
        related_questions: Vec<String>,
    ) -> Self {
        Self {
            has_answer: true,
            shape,
            response: response.into(),
            ..Self::no_answer(question, related_questions)
        }
    }

    /// Sets the heading.
    #[must_use]
    pub fn with_heading(mut self, heading: Option<String>) -> Self {
        self.heading = heading;
        self
    }

    /// Sets the source link fields.
    #[must_use]
    pub fn with_source(
        mut self,
        link: Option<String>,
        title: Option<String>,
        displayed_link: Option<String>,
    ) -> Self {
        self.link = link;
        self.title = title;
        self.displayed_link = displayed_link;
        self
    }

    /// Sets the raw text.
    #[must_use]
    pub fn with_raw_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = Some(raw_text.into());
        self
    }

    /// Sets the structured data.
    #[must_use]
    pub fn with_snippet(mut self, snippet: SnippetData) -> Self {
        self.snippet = Some(snippet);
        self
    }

    /// Converts to dictionary.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut dict = HashMap::new();
        dict.insert("question".to_string(), serde_json::json!(self.question));
        dict.insert("has_answer".to_string(), serde_json::json!(self.has_answer));
        dict.insert("shape".to_string(), serde_json::json!(self.shape));
        dict.insert("snippet_type".to_string(), serde_json::json!(self.shape.label()));
        dict.insert("heading".to_string(), serde_json::json!(self.heading));
        dict.insert("title".to_string(), serde_json::json!(self.title));
        dict.insert("link".to_string(), serde_json::json!(self.link));
        dict.insert("displayed_link".to_string(), serde_json::json!(self.displayed_link));
        dict.insert("response".to_string(), serde_json::json!(self.response));
        dict.insert("raw_text".to_string(), serde_json::json!(self.raw_text));
        dict.insert("snippet_data".to_string(), serde_json::json!(self.snippet));
        dict.insert(
            "related_questions".to_string(),
            serde_json::json!(self.related_questions),
        );
        dict
    }
}
