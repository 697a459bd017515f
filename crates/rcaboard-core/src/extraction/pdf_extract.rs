use crate::error::ReportError;
use crate::extraction::{split_form_feeds, PageContent, PdfExtractor};
use tracing::debug;

/// Pure-Rust extraction backend built on the `pdf-extract` crate.
///
/// Needs no external tools, but column spacing is looser than pdftotext's
/// `-layout` output.
#[derive(Debug, Default)]
pub struct PdfExtractExtractor;

impl PdfExtractExtractor {
    pub fn new() -> Self {
        PdfExtractExtractor
    }
}

impl PdfExtractor for PdfExtractExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ReportError> {
        let text = pdf_extract::extract_text_from_mem(pdf_bytes)
            .map_err(|e| ReportError::Extraction(e.to_string()))?;

        let pages = split_form_feeds(&text);
        debug!(pages = pages.len(), chars = text.len(), "pdf-extract extracted");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdf-extract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_extraction_error() {
        let err = PdfExtractExtractor::new()
            .extract_pages(b"not a pdf at all")
            .unwrap_err();
        assert!(matches!(err, ReportError::Extraction(_)));
    }
}
