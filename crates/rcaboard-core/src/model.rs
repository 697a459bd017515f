use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One salesperson row from the 315 report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Salesperson/route code. Dedup key.
    pub rca: String,
    pub name: String,
    /// Number of positive clients.
    pub cli_posit: u64,
    pub mix: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub sales: Decimal,
}

/// Which column order a data line was recognized in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Code first: `RCA NAME ...counts and amounts... SALES`.
    CodeFirst,
    /// Name first: `NAME c1 c2 c3 c4 RCA SALES`.
    NameFirst,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::CodeFirst => write!(f, "code-first"),
            Layout::NameFirst => write!(f, "name-first"),
        }
    }
}
