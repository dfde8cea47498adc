//! Read-only document tree used by the classifier and extractors.
//!
//! A thin layer over `scraper` that exposes the handful of queries the
//! answer heuristics need: predicate search in document order, tag and
//! attribute access, and text accessors.

use scraper::{ElementRef, Html};

/// A parsed search-results page.
///
/// `scraper::Html` is not `Send`, so a `Document` is built, inspected and
/// dropped between two awaits; it is never cached.
#[derive(Debug, Clone)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses an HTML page.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node(self.html.root_element())
    }

    /// First element in document order matching `predicate`, root included.
    pub fn find<'a, F>(&'a self, mut predicate: F) -> Option<Node<'a>>
    where
        F: FnMut(&Node<'a>) -> bool,
    {
        self.root().descendants_inclusive().find(|node| predicate(node))
    }

    /// All elements in document order matching `predicate`, root included.
    pub fn find_all<'a, F>(&'a self, mut predicate: F) -> Vec<Node<'a>>
    where
        F: FnMut(&Node<'a>) -> bool,
    {
        self.root()
            .descendants_inclusive()
            .filter(|node| predicate(node))
            .collect()
    }
}

/// An element of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    /// Lowercase tag name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    /// Whether the tag name equals `name`.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name() == name
    }

    /// Attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    /// Whether the attribute is present at all.
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Classes in attribute order, duplicates kept.
    #[must_use]
    pub fn classes(&self) -> Vec<&'a str> {
        self.attr("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.0.value().classes().any(|c| c == class)
    }

    /// Concatenation of every descendant text node.
    #[must_use]
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Descendant text nodes in document order.
    pub fn strings(&self) -> impl Iterator<Item = &'a str> {
        self.0.text()
    }

    /// Direct child elements.
    pub fn children(&self) -> impl Iterator<Item = Node<'a>> {
        self.0.children().filter_map(ElementRef::wrap).map(Node)
    }

    /// Descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> impl Iterator<Item = Node<'a>> {
        self.descendants_inclusive().skip(1)
    }

    /// `self` followed by its descendant elements in document order.
    pub fn descendants_inclusive(&self) -> impl Iterator<Item = Node<'a>> {
        self.0.descendants().filter_map(ElementRef::wrap).map(Node)
    }

    /// First descendant matching `predicate`.
    pub fn find<F>(&self, mut predicate: F) -> Option<Node<'a>>
    where
        F: FnMut(&Node<'a>) -> bool,
    {
        self.descendants().find(|node| predicate(node))
    }

    /// All descendants matching `predicate`.
    pub fn find_all<F>(&self, mut predicate: F) -> Vec<Node<'a>>
    where
        F: FnMut(&Node<'a>) -> bool,
    {
        self.descendants().filter(|node| predicate(node)).collect()
    }

    /// First descendant with the given tag name.
    #[must_use]
    pub fn find_tag(&self, name: &str) -> Option<Node<'a>> {
        self.find(|node| node.is(name))
    }

    /// All descendants with the given tag name.
    #[must_use]
    pub fn find_all_tags(&self, name: &str) -> Vec<Node<'a>> {
        self.find_all(|node| node.is(name))
    }
}
