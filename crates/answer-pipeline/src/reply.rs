//! Fixed reply texts and solved-document naming.

/// Sent when a mention carries neither text nor a file.
pub const PROMPT_FOR_INPUT: &str = "Please ask a question or attach a file.";

/// Caption attached to a solved document.
pub const DOCUMENT_CAPTION: &str = "Here is the solved worksheet:";

/// File name for the solved document: `solution_<name>.pdf` or `solution.pdf`.
pub fn document_filename(display_name: Option<&str>) -> String {
    let stem = display_name
        .map(sanitize_file_name)
        .filter(|name| !name.is_empty());

    match stem {
        Some(name) if name.to_ascii_lowercase().ends_with(".pdf") => format!("solution_{}", name),
        Some(name) => format!("solution_{}.pdf", name),
        None => "solution.pdf".to_string(),
    }
}

/// Title for the solved document: `Solved <name>` or `Solution`.
pub fn document_title(display_name: Option<&str>) -> String {
    match display_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => format!("Solved {}", name),
        None => "Solution".to_string(),
    }
}

/// Keep only the final path component and drop characters that upset file
/// systems.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.trim()
        .chars()
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
