pub mod error;
pub mod extraction;
pub mod model;
pub mod parsing;
pub mod snapshot;

use error::ReportError;
use extraction::PdfExtractor;
use model::Record;
use snapshot::Snapshot;
use std::path::Path;
use tracing::{debug, info};

/// Parse already-extracted report text into deduplicated rows.
///
/// Returns [`ReportError::NoRecords`] when no line matched a known layout.
pub fn parse_text(text: &str) -> Result<Vec<Record>, ReportError> {
    let rows = parsing::parse_report(text);
    if rows.is_empty() {
        return Err(ReportError::NoRecords);
    }
    Ok(rows)
}

/// Main API entry point: extract text from a PDF and parse it.
pub fn parse_pdf(pdf_bytes: &[u8], extractor: &dyn PdfExtractor) -> Result<Vec<Record>, ReportError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    debug!(
        backend = extractor.backend_name(),
        pages = pages.len(),
        "extracted PDF text"
    );

    let text = extraction::join_pages(&pages);
    parse_text(&text)
}

/// Parse a PDF and wrap the rows in a timestamped, fingerprinted snapshot.
pub fn build_snapshot(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<Snapshot, ReportError> {
    let rows = parse_pdf(pdf_bytes, extractor)?;
    let snapshot = Snapshot::new(rows, pdf_bytes);
    info!(
        rows = snapshot.rows.len(),
        pdf_hash = %snapshot.pdf_hash,
        "snapshot built"
    );
    Ok(snapshot)
}

/// Read an input file from disk, mapping a missing file to [`ReportError::InputNotFound`].
pub fn read_input(path: &Path) -> Result<Vec<u8>, ReportError> {
    std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReportError::InputNotFound(path.to_path_buf())
        } else {
            ReportError::Io(e)
        }
    })
}
