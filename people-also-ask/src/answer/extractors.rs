//! One extraction routine per [`Shape`].
//!
//! Every structural expectation that fails inside a recognised shape is
//! reported as [`PaaError::Extraction`]; extractors never panic on odd markup.

use tracing::debug;

use super::classifier::{find_video_link, is_ordered_list, locate, resolve_heading};
use super::models::{AnswerRecord, Card, Shape, SnippetData};
use super::text::{itemize, raw_text, span_text, tabulate};
use crate::config::ExtractionConfig;
use crate::dom::{Document, Node};
use crate::errors::{PaaError, Result};
use crate::related::extract_related_questions;

const CARD_SEPARATOR: &str = "\n-------------\n";

/// Classifies `document` and extracts the answer for `question`.
///
/// A page without a featured answer yields a record with `has_answer == false`.
pub fn extract_answer(
    question: &str,
    document: &Document,
    config: &ExtractionConfig,
) -> Result<AnswerRecord> {
    let related = extract_related_questions(document);
    match locate(document, config) {
        Some((node, shape)) => {
            debug!(question, %shape, "answer container located");
            extract(question, &node, shape, related, config)
        }
        None => {
            debug!(question, "no answer container");
            Ok(AnswerRecord::no_answer(question, related))
        }
    }
}

/// Extracts a record from a located container.
pub fn extract(
    question: &str,
    node: &Node<'_>,
    shape: Shape,
    related: Vec<String>,
    config: &ExtractionConfig,
) -> Result<AnswerRecord> {
    let ctx = Ctx { question, shape };
    match shape {
        Shape::Table => extract_table(&ctx, node, related),
        Shape::Ordered | Shape::Unordered => extract_list(&ctx, node, related),
        Shape::Definition => extract_definition(&ctx, node, related),
        Shape::Youtube => extract_youtube(&ctx, node, related, config),
        Shape::MultiCard => extract_multi_card(&ctx, node, related),
        Shape::SingleCard => Ok(extract_single_card(question, node, related)),
        Shape::WholePageTabs => Ok(extract_whole_page_tabs(question, node, related)),
        Shape::None => Ok(AnswerRecord::no_answer(question, related)),
    }
}

struct Ctx<'q> {
    question: &'q str,
    shape: Shape,
}

impl Ctx<'_> {
    fn fail(&self, reason: &str) -> PaaError {
        PaaError::extraction(self.question, self.shape, reason)
    }
}

fn trimmed_text(node: &Node<'_>) -> String {
    node.text().trim().to_string()
}

fn title_of<'a>(anchor: &Node<'a>) -> Option<Node<'a>> {
    anchor.find_tag("h3").or_else(|| anchor.find_tag("h2"))
}

/// First external link wrapping a title heading, with the cited URL.
fn source(node: &Node<'_>) -> (Option<String>, Option<String>, Option<String>) {
    let anchor = node.find(|n| {
        n.is("a")
            && n.attr("href").is_some_and(|href| href.starts_with("http"))
            && title_of(n).is_some()
    });

    let link = anchor.and_then(|a| a.attr("href")).map(str::to_string);
    let title = anchor.as_ref().and_then(title_of).map(|h| trimmed_text(&h));
    let displayed_link = node.find_tag("cite").map(|cite| trimmed_text(&cite));
    (link, title, displayed_link)
}

/// Record for the simple answer box shapes.
fn simple_record(
    ctx: &Ctx<'_>,
    node: &Node<'_>,
    response: String,
    related: Vec<String>,
) -> AnswerRecord {
    let heading = if ctx.shape == Shape::Youtube {
        None
    } else {
        resolve_heading(node).map(|h| trimmed_text(&h))
    };
    let (link, title, displayed_link) = source(node);
    AnswerRecord::answered(ctx.question, ctx.shape, response, related)
        .with_heading(heading)
        .with_source(link, title, displayed_link)
        .with_raw_text(raw_text(node))
}

fn extract_table(ctx: &Ctx<'_>, node: &Node<'_>, related: Vec<String>) -> Result<AnswerRecord> {
    let table = node.find_tag("table").ok_or_else(|| ctx.fail("no table element"))?;
    let rows = table.find_all_tags("tr");
    let first = rows.first().ok_or_else(|| ctx.fail("table has no rows"))?;

    let cells = |tr: &Node<'_>, tag: &str| -> Vec<String> {
        tr.find_all_tags(tag).iter().map(trimmed_text).collect()
    };

    let (header, body) = if first.find_tag("th").is_some() {
        (Some(cells(first, "th")), &rows[1..])
    } else {
        (None, &rows[..])
    };

    let mut grid: Vec<Vec<String>> = body
        .iter()
        .map(|tr| cells(tr, "td"))
        .filter(|row| !row.is_empty())
        .collect();
    if grid.is_empty() {
        return Err(ctx.fail("table has no data rows"));
    }

    let width = grid
        .iter()
        .map(Vec::len)
        .chain(header.as_ref().map(Vec::len))
        .max()
        .unwrap_or(0);
    if width == 0 {
        return Err(ctx.fail("table has no cells"));
    }

    let mut columns = header.unwrap_or_else(|| (0..width).map(|i| i.to_string()).collect());
    columns.resize(width, String::new());
    for row in &mut grid {
        row.resize(width, String::new());
    }

    let response = tabulate(&columns, &grid);
    Ok(simple_record(ctx, node, response, related)
        .with_snippet(SnippetData::Table { columns, rows: grid }))
}

fn extract_list(ctx: &Ctx<'_>, node: &Node<'_>, related: Vec<String>) -> Result<AnswerRecord> {
    let list = if ctx.shape == Shape::Ordered {
        node.find(is_ordered_list)
    } else {
        node.find_tag("ul")
    };
    let list = list.ok_or_else(|| ctx.fail("no list element"))?;

    let items: Vec<String> = list.find_all_tags("li").iter().map(trimmed_text).collect();
    if items.is_empty() {
        return Err(ctx.fail("list has no items"));
    }

    let response = itemize(&items);
    Ok(simple_record(ctx, node, response, related).with_snippet(SnippetData::List { items }))
}

fn extract_definition(
    ctx: &Ctx<'_>,
    node: &Node<'_>,
    related: Vec<String>,
) -> Result<AnswerRecord> {
    let heading = resolve_heading(node).ok_or_else(|| ctx.fail("no heading element"))?;
    let response = trimmed_text(&heading);
    Ok(simple_record(ctx, node, response, related))
}

fn extract_youtube(
    ctx: &Ctx<'_>,
    node: &Node<'_>,
    related: Vec<String>,
    config: &ExtractionConfig,
) -> Result<AnswerRecord> {
    let href = find_video_link(node, config)
        .and_then(|a| a.attr("href"))
        .ok_or_else(|| ctx.fail("no video link"))?;
    Ok(simple_record(ctx, node, href.to_string(), related))
}

fn extract_multi_card(
    ctx: &Ctx<'_>,
    node: &Node<'_>,
    related: Vec<String>,
) -> Result<AnswerRecord> {
    let card_nodes = node.find_all_tags("g-inner-card");
    if card_nodes.is_empty() {
        return Err(ctx.fail("no inner cards"));
    }

    let cards = card_nodes
        .iter()
        .map(|card| parse_card(ctx, card))
        .collect::<Result<Vec<_>>>()?;

    let response = cards.iter().map(Card::render).collect::<Vec<_>>().join(CARD_SEPARATOR);
    let heading = node
        .find(|n| n.is("h3") && n.attr("role") == Some("heading"))
        .or_else(|| node.find(|n| n.is("h2") && n.attr("role") == Some("heading")))
        .map(|h| trimmed_text(&h));

    Ok(AnswerRecord::answered(ctx.question, ctx.shape, response, related)
        .with_heading(heading)
        .with_raw_text(raw_text(node))
        .with_snippet(SnippetData::Cards { cards }))
}

fn parse_card(ctx: &Ctx<'_>, card: &Node<'_>) -> Result<Card> {
    let heading = card
        .find(|n| n.is("div") && n.attr("role") == Some("heading"))
        .ok_or_else(|| ctx.fail("card has no heading"))?;
    let cite = card.find_tag("cite").ok_or_else(|| ctx.fail("card has no citation"))?;
    let link = card
        .find(|n| n.is("a") && n.has_attr("data-jsarwt"))
        .and_then(|a| a.attr("href"))
        .ok_or_else(|| ctx.fail("card has no link"))?;

    Ok(Card {
        heading: trimmed_text(&heading),
        title: trimmed_text(&cite),
        link: link.to_string(),
        raw_text: raw_text(card),
    })
}

fn extract_single_card(question: &str, node: &Node<'_>, related: Vec<String>) -> AnswerRecord {
    let heading = resolve_heading(node)
        .map(|h| raw_text(&h))
        .filter(|text| !text.is_empty());
    let spans = span_text(node);
    let response = heading.clone().unwrap_or_else(|| spans.clone());

    AnswerRecord::answered(question, Shape::SingleCard, response, related)
        .with_heading(heading)
        .with_raw_text(spans)
}

fn extract_whole_page_tabs(question: &str, node: &Node<'_>, related: Vec<String>) -> AnswerRecord {
    let spans = span_text(node);
    let (link, title, displayed_link) = source(node);

    AnswerRecord::answered(question, Shape::WholePageTabs, spans.clone(), related)
        .with_source(link, title, displayed_link)
        .with_raw_text(spans)
}
