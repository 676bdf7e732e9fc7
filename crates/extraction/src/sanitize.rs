//! Text normalization for extracted content.

/// Collapse a page's text runs into a single line, joined by single spaces.
pub fn normalize_page_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clean OCR output while keeping its line structure.
///
/// Strips control characters other than newline and tab, trims trailing
/// whitespace on every line and collapses runs of blank lines to one.
pub fn normalize_ocr_text(raw: &str) -> String {
    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(unified.len());
    let mut blank_run = 0usize;

    for line in unified.lines() {
        let line: String = line
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .collect();
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }

    out.trim().to_string()
}
