use rcaboard_core::model::Record;
use rust_decimal::Decimal;

pub fn print(rows: &[Record]) {
    print!("{}", format_rows(rows));
}

/// Render rows as an aligned text table with a sales total.
pub fn format_rows(rows: &[Record]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Name".len());

    let mut out = String::new();
    out.push_str(&format!(
        "  {:>6}  {:<width$}  {:>9}  {:>5}  {:>14}\n",
        "RCA",
        "Name",
        "Cli.Posit",
        "Mix",
        "Sales",
        width = name_width
    ));

    for r in rows {
        out.push_str(&format!(
            "  {:>6}  {:<width$}  {:>9}  {:>5}  {:>14}\n",
            r.rca,
            r.name,
            r.cli_posit,
            r.mix,
            format!("{:.2}", r.sales),
            width = name_width
        ));
    }

    let total = rows
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(r.sales));
    let total = match total {
        Some(total) => format!("{:.2}", total),
        None => "overflow".to_string(),
    };
    out.push_str(&format!(
        "\n  {} RCA(s), total sales {}\n",
        rows.len(),
        total
    ));
    out
}
