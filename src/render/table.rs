//! Pipe table recognition and HTML rendering.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::inline::format_inline;

static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("valid separator regex"));

/// Column justification, from separator colon placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Value for the HTML `align` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }

    /// Alignment for one separator cell, or `None` if the cell is not
    /// made of dashes with optional edge colons.
    fn from_separator_cell(cell: &str) -> Option<Self> {
        if !SEPARATOR_CELL.is_match(cell) {
            return None;
        }
        let alignment = match (cell.starts_with(':'), cell.ends_with(':')) {
            (true, true) => Self::Center,
            (_, true) => Self::Right,
            _ => Self::Left,
        };
        Some(alignment)
    }
}

/// A recognized table block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBlock {
    pub headers: Vec<String>,
    /// One entry per header cell
    pub alignments: Vec<Alignment>,
    /// Rows may be shorter or longer than the header
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Try to read a table from `lines`, starting at the first line.
    ///
    /// Returns the table and the number of lines it spans.
    pub fn parse(lines: &[&str]) -> Option<(Self, usize)> {
        let [header_line, separator_line, rest @ ..] = lines else {
            return None;
        };
        if !is_pipe_row(header_line) || !is_pipe_row(separator_line) {
            return None;
        }

        let headers = split_cells(header_line);
        if headers.iter().all(String::is_empty) {
            return None;
        }

        let separators = split_cells(separator_line);
        if separators.is_empty() {
            return None;
        }
        let separator_alignments = separators
            .iter()
            .map(|cell| Alignment::from_separator_cell(cell))
            .collect::<Option<Vec<_>>>()?;
        let alignments = (0..headers.len())
            .map(|i| separator_alignments.get(i).copied().unwrap_or_default())
            .collect();

        let rows: Vec<Vec<String>> = rest
            .iter()
            .take_while(|line| is_pipe_row(line))
            .map(|line| split_cells(line))
            .collect();
        let consumed = 2 + rows.len();

        Some((
            Self {
                headers,
                alignments,
                rows,
            },
            consumed,
        ))
    }

    /// Alignment for column `index`; columns past the header are left aligned.
    pub fn alignment(&self, index: usize) -> Alignment {
        self.alignments.get(index).copied().unwrap_or_default()
    }

    /// Render as a single-line HTML fragment with inline-formatted cells.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<table><thead><tr>");
        for (i, cell) in self.headers.iter().enumerate() {
            push_cell(&mut out, "th", self.alignment(i), cell);
        }
        out.push_str("</tr></thead><tbody>");
        for row in &self.rows {
            out.push_str("<tr>");
            for (i, cell) in row.iter().enumerate() {
                push_cell(&mut out, "td", self.alignment(i), cell);
            }
            out.push_str("</tr>");
        }
        out.push_str("</tbody></table>");
        out
    }
}

fn push_cell(out: &mut String, tag: &str, alignment: Alignment, text: &str) {
    let _ = write!(
        out,
        r#"<{tag} align="{}">{}</{tag}>"#,
        alignment.as_str(),
        format_inline(text)
    );
}

/// A line that can belong to a table: starts with a pipe.
fn is_pipe_row(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Split a table line on `|`, dropping the empty cells produced by edge pipes.
fn split_cells(line: &str) -> Vec<String> {
    let mut cells: Vec<&str> = line.trim().split('|').collect();
    if cells.first().is_some_and(|c| c.trim().is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.trim().is_empty()) {
        cells.pop();
    }
    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

/// Replace every table block in `lines` with its HTML fragment.
///
/// Non-table lines are passed through untouched and in order.
pub fn extract_tables<'a>(lines: &[&'a str]) -> Vec<Line<'a>> {
    let mut out = Vec::with_capacity(lines.len());
    let mut i = 0;
    while i < lines.len() {
        if let Some((table, consumed)) = TableBlock::parse(&lines[i..]) {
            tracing::trace!(
                columns = table.headers.len(),
                rows = table.rows.len(),
                "table recognized at line {i}"
            );
            out.push(Line::Html(table.to_html()));
            i += consumed;
        } else {
            out.push(Line::Text(lines[i]));
            i += 1;
        }
    }
    out
}

/// A line after table extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Source text still to be block/inline formatted
    Text(&'a str),
    /// Finished HTML that later stages must not touch
    Html(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_cells_drops_edge_pipes() {
        assert_eq!(split_cells("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_cells("|a|b"), vec!["a", "b"]);
        assert_eq!(split_cells("| a | | c |"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_alignment_from_separator_cell() {
        assert_eq!(Alignment::from_separator_cell("---"), Some(Alignment::Left));
        assert_eq!(Alignment::from_separator_cell(":---"), Some(Alignment::Left));
        assert_eq!(Alignment::from_separator_cell(":---:"), Some(Alignment::Center));
        assert_eq!(Alignment::from_separator_cell("---:"), Some(Alignment::Right));
        assert_eq!(Alignment::from_separator_cell("-x-"), None);
        assert_eq!(Alignment::from_separator_cell("::"), None);
        assert_eq!(Alignment::from_separator_cell(""), None);
    }

    #[test]
    fn test_parse_table_with_alignments() {
        let lines = ["| Name | Qty | Price |", "| :--- | :---: | ---: |", "| a | 1 | 2 |"];
        let (table, consumed) = TableBlock::parse(&lines).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(table.headers, vec!["Name", "Qty", "Price"]);
        assert_eq!(
            table.alignments,
            vec![Alignment::Left, Alignment::Center, Alignment::Right]
        );
        assert_eq!(table.rows, vec![vec!["a", "1", "2"]]);
    }

    #[test]
    fn test_alignment_list_follows_header_length() {
        let lines = ["| a | b | c |", "| ---: |"];
        let (table, _) = TableBlock::parse(&lines).unwrap();
        assert_eq!(
            table.alignments,
            vec![Alignment::Right, Alignment::Left, Alignment::Left]
        );
    }

    #[test]
    fn test_invalid_separator_disqualifies_table() {
        assert!(TableBlock::parse(&["| a | b |", "| -- | xx |"]).is_none());
        assert!(TableBlock::parse(&["| a | b |", "| a | b |"]).is_none());
        assert!(TableBlock::parse(&["| a | b |", "||"]).is_none());
    }

    #[test]
    fn test_empty_header_disqualifies_table() {
        assert!(TableBlock::parse(&["| |", "| --- |"]).is_none());
    }

    #[test]
    fn test_header_without_separator_is_not_a_table() {
        assert!(TableBlock::parse(&["| a | b |"]).is_none());
        assert!(TableBlock::parse(&["| a | b |", "text"]).is_none());
    }

    #[test]
    fn test_ragged_rows_render_every_cell() {
        let lines = ["| a | b |", "|---|---|", "| 1 |", "| 1 | 2 | 3 |"];
        let (table, consumed) = TableBlock::parse(&lines).unwrap();
        assert_eq!(consumed, 4);
        assert_eq!(
            table.to_html(),
            concat!(
                r#"<table><thead><tr><th align="left">a</th><th align="left">b</th></tr></thead>"#,
                r#"<tbody><tr><td align="left">1</td></tr>"#,
                r#"<tr><td align="left">1</td><td align="left">2</td><td align="left">3</td></tr>"#,
                "</tbody></table>"
            )
        );
    }

    #[test]
    fn test_cells_are_inline_formatted() {
        let lines = ["| **Key** | Value |", "|---|---:|", "| `x` | [d](u) |"];
        let (table, _) = TableBlock::parse(&lines).unwrap();
        let html = table.to_html();
        assert!(html.contains(r#"<th align="left"><strong>Key</strong></th>"#));
        assert!(html.contains(r#"<td align="left"><code>x</code></td>"#));
        assert!(html.contains(r#"<td align="right"><a href="u" target="_blank">d</a></td>"#));
    }

    #[test]
    fn test_table_without_rows_has_empty_body() {
        let (table, _) = TableBlock::parse(&["| h |", "| - |"]).unwrap();
        assert_eq!(
            table.to_html(),
            r#"<table><thead><tr><th align="left">h</th></tr></thead><tbody></tbody></table>"#
        );
    }

    #[test]
    fn test_extract_tables_keeps_surrounding_lines() {
        let lines = ["Intro", "| a |", "| - |", "| 1 |", "Outro"];
        let out = extract_tables(&lines);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], Line::Text("Intro"));
        assert!(matches!(&out[1], Line::Html(html) if html.starts_with("<table>")));
        assert_eq!(out[2], Line::Text("Outro"));
    }

    #[test]
    fn test_extract_tables_finds_consecutive_tables() {
        let lines = ["| a |", "| - |", "", "| b |", "| - |"];
        let out = extract_tables(&lines);
        let tables = out.iter().filter(|l| matches!(l, Line::Html(_))).count();
        assert_eq!(tables, 2);
    }
}
