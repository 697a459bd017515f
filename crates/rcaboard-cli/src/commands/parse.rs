use rcaboard_core::error::ReportError;
use std::path::PathBuf;

use crate::config::Backend;
use crate::output;

pub fn run(input_file: PathBuf, output_format: &str, backend: Backend) -> Result<(), ReportError> {
    let bytes = rcaboard_core::read_input(&input_file)?;

    // Determine input type by extension
    let is_text = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    let rows = if is_text {
        // Text already extracted, e.g. with `pdftotext -layout`
        rcaboard_core::parse_text(&String::from_utf8_lossy(&bytes))?
    } else {
        let extractor = backend.extractor();
        rcaboard_core::parse_pdf(&bytes, extractor.as_ref())?
    };

    match output_format {
        "json" => output::json::print(&rows)?,
        _ => output::table::print(&rows),
    }

    Ok(())
}
