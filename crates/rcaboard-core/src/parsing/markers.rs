/// Role of a report line before any field extraction is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Report-code, period, column-header or page-footer line. Skipped.
    Header,
    /// Supervisor total or statistics section. The table ends here.
    EndOfTable,
    /// Anything else. May or may not be a data row.
    Candidate,
}

/// Lines starting with one of these are repeated on every page.
const HEADER_MARKERS: &[&str] = &[
    "315",
    "período",
    "periodo",
    "código rca",
    "codigo rca",
    "página",
    "pagina",
];

/// Lines starting with one of these close the salesperson table.
const END_MARKERS: &[&str] = &["total do supervisor", "estatística", "estatistica"];

/// Classify a whitespace-collapsed report line.
pub fn classify_line(line: &str) -> LineKind {
    if END_MARKERS.iter().any(|m| starts_with_marker(line, m)) {
        LineKind::EndOfTable
    } else if HEADER_MARKERS.iter().any(|m| starts_with_marker(line, m)) {
        LineKind::Header
    } else {
        LineKind::Candidate
    }
}

/// Case-insensitive prefix match that must end on a word boundary, so
/// "315" matches "315 - Vendas" but not "3150 ACME".
fn starts_with_marker(line: &str, marker: &str) -> bool {
    let mut rest = line.chars();
    for expected in marker.chars() {
        match rest.next() {
            Some(c) if c.to_lowercase().eq(expected.to_lowercase()) => {}
            _ => return false,
        }
    }
    !matches!(rest.next(), Some(c) if c.is_ascii_alphanumeric() || c == '_')
}
