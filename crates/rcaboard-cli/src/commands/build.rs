use rcaboard_core::error::ReportError;
use rcaboard_core::extraction::PdfExtractor;
use tracing::info;

use crate::config::Settings;

pub fn run(settings: &Settings) -> Result<(), ReportError> {
    let extractor = settings.backend.extractor();
    run_with(settings, extractor.as_ref())
}

/// Build and write the snapshot using `extractor`. Nothing is written unless
/// the whole run succeeds.
pub fn run_with(settings: &Settings, extractor: &dyn PdfExtractor) -> Result<(), ReportError> {
    info!(
        input = %settings.input.display(),
        backend = extractor.backend_name(),
        "building snapshot"
    );

    let pdf_bytes = rcaboard_core::read_input(&settings.input)?;
    let snapshot = rcaboard_core::build_snapshot(&pdf_bytes, extractor)?;

    snapshot.write_to(&settings.output)?;
    eprintln!("JSON written to {}", settings.output.display());
    eprintln!("  RCAs extracted: {}", snapshot.rows.len());

    Ok(())
}
