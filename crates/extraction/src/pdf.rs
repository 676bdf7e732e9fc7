//! Structural PDF text reading.

use tracing::debug;

use crate::error::ExtractionError;

/// Reads the embedded text layer of a PDF, one string per page.
///
/// Implementations are synchronous; the extractor runs them on the blocking
/// pool.
pub trait PageTextReader: Send + Sync {
    /// Return the raw text of each page in page order.
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;
}

/// [`PageTextReader`] backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractReader;

/// How far into the buffer the `%PDF-` header may appear.
const HEADER_SEARCH_WINDOW: usize = 1024;

impl PageTextReader for PdfExtractReader {
    fn read_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        if !has_pdf_header(bytes) {
            return Err(ExtractionError::Malformed("missing %PDF header".to_string()));
        }

        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| ExtractionError::Malformed(e.to_string()))?;
        debug!("pdf-extract read {} pages", pages.len());
        Ok(pages)
    }
}

fn has_pdf_header(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    window.windows(5).any(|w| w == b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::text_pdf;

    #[test]
    fn test_reads_each_page() {
        let pdf = text_pdf(&["What is 2 + 2?", "Name the capital of France."]);
        let pages = PdfExtractReader.read_pages(&pdf).unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains("2 + 2") || pages[0].contains("What"), "{:?}", pages);
        assert!(pages[1].contains("France"), "{:?}", pages);
    }

    #[test]
    fn test_not_a_pdf_is_malformed() {
        let err = PdfExtractReader.read_pages(b"PK\x03\x04 zip bytes").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn test_truncated_pdf_is_malformed() {
        let err = PdfExtractReader.read_pages(b"%PDF-1.4\n1 0 obj\n<<").unwrap_err();
        assert!(matches!(err, ExtractionError::Malformed(_)));
    }

    #[test]
    fn test_header_search() {
        assert!(has_pdf_header(b"%PDF-1.7 ..."));
        assert!(has_pdf_header(b"\xef\xbb\xbf%PDF-1.4"));
        assert!(!has_pdf_header(b"%PD"));
        assert!(!has_pdf_header(b""));
    }
}
