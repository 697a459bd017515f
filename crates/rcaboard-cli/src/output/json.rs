use rcaboard_core::error::ReportError;
use rcaboard_core::model::Record;

pub fn print(rows: &[Record]) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(rows)?;
    println!("{json}");
    Ok(())
}
