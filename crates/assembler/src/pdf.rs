//! PDF rendering with printpdf's built-in Helvetica.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Mm, PdfDocument};
use tracing::debug;

use crate::error::AssemblyError;
use crate::layout::LayoutMetrics;
use crate::paginate::PaginatedDocument;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

fn mm(points: f32) -> Mm {
    Mm(points / POINTS_PER_MM)
}

/// The built-in fonts only cover Latin-1; anything else prints as `?`.
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_control() => '?',
            c if (c as u32) <= 0xFF => c,
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            _ => '?',
        })
        .collect()
}

/// Render a paginated document to PDF bytes.
pub fn render_pdf(
    document: &PaginatedDocument,
    metrics: &LayoutMetrics,
) -> Result<Vec<u8>, AssemblyError> {
    metrics.validate()?;

    let width = mm(metrics.page_width);
    let height = mm(metrics.page_height);
    let (doc, first_page, first_layer) = PdfDocument::new(&document.title, width, height, "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AssemblyError::Render(format!("font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AssemblyError::Render(format!("font error: {e}")))?;

    let left = mm(metrics.margin);
    let top_baseline = metrics.page_height - metrics.margin - metrics.font_size;

    for (index, page) in document.pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, "Layer 1");
            doc.get_page(page_index).get_layer(layer_index)
        };

        let mut slot = 0usize;
        if index == 0 {
            layer.use_text(
                printable(&document.title),
                metrics.font_size + 2.0,
                left,
                mm(top_baseline),
                &bold,
            );
            slot = metrics.title_lines();
        }

        for line in &page.lines {
            let y = top_baseline - slot as f32 * metrics.line_height;
            if !line.is_empty() {
                layer.use_text(printable(line), metrics.font_size, left, mm(y), &font);
            }
            slot += 1;
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| AssemblyError::Render(format!("save error: {e}")))?;
    let bytes = buf
        .into_inner()
        .map_err(|e| AssemblyError::Render(format!("buffer error: {e}")))?;

    debug!(
        "Rendered {} page(s) into {} bytes",
        document.page_count(),
        bytes.len()
    );
    Ok(bytes)
}
