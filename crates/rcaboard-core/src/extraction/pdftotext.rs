use crate::error::ReportError;
use crate::extraction::{split_form_feeds, PageContent, PdfExtractor};
use std::io::Write;
use std::process::{Command, Output};
use tracing::debug;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` so each table row stays on one line.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn run(&self, pdf_path: &std::path::Path) -> Result<Output, ReportError> {
        Command::new("pdftotext")
            .arg("-layout")
            .arg("-enc")
            .arg("UTF-8")
            .arg(pdf_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ReportError::PdftotextNotFound
                } else {
                    ReportError::Extraction(format!("pdftotext failed: {}", e))
                }
            })
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, ReportError> {
        // pdftotext reads from a file, not stdin
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| ReportError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| ReportError::Extraction(e.to_string()))?;

        let output = self.run(tmpfile.path())?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(ReportError::PdftotextFailed { code, stderr });
        }

        let text = String::from_utf8_lossy(&output.stdout);

        // pdftotext uses form feed \x0c as page separator
        let pages = split_form_feeds(&text);
        debug!(pages = pages.len(), "pdftotext extracted");
        Ok(pages)
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}
