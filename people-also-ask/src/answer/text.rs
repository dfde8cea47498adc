//! Text rendering helpers shared by the extractors.

use std::collections::HashSet;

use crate::dom::Node;

/// Joins strings in first-seen order, dropping blanks and repeats.
pub fn dedup_lines<'s, I>(strings: I) -> String
where
    I: IntoIterator<Item = &'s str>,
{
    let mut seen = HashSet::new();
    strings
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty() && seen.insert(*s))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deduplicated text leaves of `node`.
#[must_use]
pub fn raw_text(node: &Node<'_>) -> String {
    dedup_lines(node.strings())
}

/// Deduplicated texts of every `span` below `node`.
#[must_use]
pub fn span_text(node: &Node<'_>) -> String {
    let texts: Vec<String> = node.find_all_tags("span").iter().map(Node::text).collect();
    dedup_lines(texts.iter().map(String::as_str))
}

/// Prefixes each line with a list marker.
#[must_use]
pub fn itemize(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("\t- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders a grid as right-justified, tab separated columns.
///
/// A rule line of dashes goes beneath the header. Rows shorter than the
/// header are rendered with empty cells.
#[must_use]
pub fn tabulate(header: &[String], rows: &[Vec<String>]) -> String {
    let width = |s: &str| s.chars().count();
    let mut widths: Vec<usize> = header.iter().map(|h| width(h.as_str())).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(width(cell.as_str()));
            }
        }
    }

    let render_row = |cells: &[String]| {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!("{cell:>w$}")
            })
            .collect::<Vec<_>>()
            .join("\t")
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render_row(header));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("\t"),
    );
    lines.extend(rows.iter().map(|row| render_row(row.as_slice())));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use pretty_assertions::assert_eq;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_dedup_lines_keeps_first_occurrence() {
        let joined = dedup_lines(["b", "a", " b ", "", "  ", "c", "a"]);
        assert_eq!(joined, "b\na\nc");
    }

    #[test]
    fn test_itemize() {
        assert_eq!(itemize(&strings(&["one", "two"])), "\t- one\n\t- two");
        assert_eq!(itemize(&[]), "");
    }

    #[test]
    fn test_tabulate_right_justifies() {
        let header = strings(&["Rank", "School"]);
        let rows = vec![strings(&["1", "MIT"]), strings(&["2", "Stanford"])];

        let expected = "Rank\t  School\n----\t--------\n   1\t     MIT\n   2\tStanford";
        assert_eq!(tabulate(&header, &rows), expected);
    }

    #[test]
    fn test_tabulate_pads_short_rows() {
        let header = strings(&["0", "1"]);
        let rows = vec![strings(&["abc"])];
        assert_eq!(tabulate(&header, &rows), "  0\t1\n---\t-\nabc\t ");
    }

    #[test]
    fn test_span_text_dedups_nested_spans() {
        let document = Document::parse(
            "<div id=c><span>10:42 <span>PM</span></span><span>PM</span><span> </span></div>",
        );
        let container = document.find(|n| n.attr("id") == Some("c")).unwrap();
        assert_eq!(span_text(&container), "10:42 PM\nPM");
        assert_eq!(raw_text(&container), "10:42\nPM");
    }
}
