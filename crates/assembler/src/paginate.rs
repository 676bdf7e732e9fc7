//! Line layout onto fixed-size pages.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::layout::LayoutMetrics;

/// One page of laid-out text lines, top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<String>,
}

/// A titled document split into pages.
///
/// The title is drawn on the first page only and takes
/// [`LayoutMetrics::title_lines`] of its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total text lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// All lines in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(|p| p.lines.iter().map(String::as_str))
    }
}

/// Soft-wrap `line` at word boundaries so no piece exceeds `columns` chars.
///
/// Words longer than `columns` are split mid-word. A line that already fits is
/// returned untouched, including its indentation.
pub fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > columns {
            if current_len > 0 {
                pieces.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(columns);
            pieces.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > columns {
            pieces.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        pieces.push(current);
    }
    if pieces.is_empty() {
        pieces.push(String::new());
    }
    pieces
}

/// Lay `body` out on pages under a `title`.
///
/// Body lines are taken in order and soft-wrapped at
/// [`LayoutMetrics::wrap_columns`]. A new page starts when the next line would
/// run past the bottom margin. The wrapped pieces of one line stay on the same
/// page unless the line is taller than a whole page. The result always has at
/// least one page so the title has somewhere to go.
pub fn paginate(title: &str, body: &str, metrics: &LayoutMetrics) -> PaginatedDocument {
    let capacity = metrics.lines_per_page();
    let mut remaining = capacity.saturating_sub(metrics.title_lines()).max(1);
    let mut pages = Vec::new();
    let mut page = Page::default();

    for line in body.lines() {
        let pieces = wrap_line(line, metrics.wrap_columns);

        if pieces.len() > remaining && pieces.len() <= capacity && !page.lines.is_empty() {
            pages.push(std::mem::take(&mut page));
            remaining = capacity;
        }

        for piece in pieces {
            if remaining == 0 {
                pages.push(std::mem::take(&mut page));
                remaining = capacity;
            }
            page.lines.push(piece);
            remaining -= 1;
        }
    }
    pages.push(page);

    let document = PaginatedDocument {
        title: title.to_string(),
        pages,
    };
    debug!(
        "Paginated {} lines onto {} page(s)",
        document.line_count(),
        document.page_count()
    );
    document
}

/// Document body: the answer, optionally preceded by the source text.
pub fn compose_body(answer: &str, source_text: Option<&str>) -> String {
    match source_text.map(str::trim).filter(|s| !s.is_empty()) {
        Some(source) => format!("Original text:\n{}\n\nAnswer:\n{}", source, answer),
        None => answer.to_string(),
    }
}
