pub mod dedup;
pub mod layout;
pub mod markers;
pub mod values;

use crate::model::Record;
use markers::LineKind;
use tracing::{debug, trace};

/// Parse full report text into deduplicated records.
///
/// Pure and deterministic: the same text always yields the same rows in the
/// same order. An empty result means nothing was recognized; callers decide
/// whether that is an error.
pub fn parse_report(text: &str) -> Vec<Record> {
    let records = extract_records(text);
    let extracted = records.len();
    let rows = dedup::dedupe(records);
    debug!(extracted, unique = rows.len(), "parsed 315 report");
    rows
}

/// Extract one record per recognized data line, in encounter order.
///
/// Header lines are skipped; a supervisor total or statistics line ends the
/// table and nothing after it is considered.
pub fn extract_records(text: &str) -> Vec<Record> {
    let mut records = Vec::new();

    for line in report_lines(text) {
        match markers::classify_line(&line) {
            LineKind::Header => {
                trace!(%line, "skipping header line");
                continue;
            }
            LineKind::EndOfTable => {
                debug!(%line, "end of table");
                break;
            }
            LineKind::Candidate => {}
        }

        match layout::extract(&line) {
            Some((layout, record)) => {
                trace!(%layout, rca = %record.rca, "row");
                records.push(record);
            }
            None => trace!(%line, "no layout matched"),
        }
    }

    records
}

/// Split text into trimmed, whitespace-collapsed, non-empty lines.
/// A leading byte-order mark is dropped.
fn report_lines(text: &str) -> impl Iterator<Item = String> + '_ {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines().map(collapse_ws).filter(|l| !l.is_empty())
}

fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const REPORT: &str = "\n\
315 - VENDAS POR RCA\r\n\
Período: 01/09/2026 a 30/09/2026\n\
Código Rca   Nome   Cli.Posit   Mix   Venda\n\
\n\
   10   ANA   SOUZA   5 12 3 1.000,00 8 40 500,00 12.345,67\n\
Página 1 de 2\n\
\n\
315 - VENDAS POR RCA\n\
20 BRUNO LIMA 1 2 3 10,50 4 5 100,00 200,50\n\
CARLOS REIS 7 8 9 10 30 3.210,00\n\
10 ANA SOUZA 5 13 3 1.000,00 8 41 500,00 13.000,00\n\
Total do Supervisor 99 99 99 99.999,99\n\
40 DIANA COSTA 1 2 3 10,50 4 5 100,00 200,50\n";

    #[test]
    fn test_collapse_ws() {
        assert_eq!(collapse_ws("  a \t b   c "), "a b c");
    }

    #[test]
    fn test_extract_records_in_encounter_order() {
        let records = extract_records(REPORT);
        let keys: Vec<&str> = records.iter().map(|r| r.rca.as_str()).collect();
        assert_eq!(keys, vec!["10", "20", "30", "10"]);
        assert_eq!(records[0].name, "ANA SOUZA");
        assert_eq!(records[0].sales, dec!(12345.67));
        assert_eq!(records[2].name, "CARLOS REIS");
        assert_eq!(records[2].cli_posit, 8);
        assert_eq!(records[2].mix, 9);
        assert_eq!(records[2].sales, dec!(3210));
    }

    #[test]
    fn test_parse_report_dedupes_last_wins() {
        let rows = parse_report(REPORT);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rca, "10");
        assert_eq!(rows[0].cli_posit, 13);
        assert_eq!(rows[0].mix, 41);
        assert_eq!(rows[0].sales, dec!(13000));
    }

    #[test]
    fn test_nothing_after_end_of_table() {
        let rows = parse_report(REPORT);
        assert!(rows.iter().all(|r| r.rca != "40"));

        let rows = parse_report("Estatística\n40 DIANA COSTA 1 2 3 10,50 4 5 100,00 200,50\n");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_header_lines_do_not_stop_parsing() {
        let text = "Página 1\n20 BRUNO LIMA 1 2 3 10,50 4 5 100,00 200,50\nPágina 2\n\
                    21 BIA LIMA 1 2 3 10,50 4 5 100,00 1,00\n";
        let rows = parse_report(text);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_only_markers_yields_nothing() {
        let text = "315 VENDAS\nPeríodo 09/2026\nCódigo Rca Nome\nPágina 1\nTotal do Supervisor 1 2\n";
        assert!(parse_report(text).is_empty());
    }

    #[test]
    fn test_leading_bom_is_ignored() {
        let records = extract_records("\u{feff}123 ACME CORP 1 2 3 10,50 4 5 100,00 200,50\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rca, "123");
        assert_eq!(records[0].name, "ACME CORP");
        assert_eq!(records[0].sales, dec!(200.50));
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(parse_report(REPORT), parse_report(REPORT));
    }
}
