use crate::error::ReportError;
use crate::model::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Hex characters of the SHA-256 digest kept as the PDF fingerprint.
pub const PDF_HASH_LEN: usize = 16;

/// The JSON artifact consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(with = "iso_millis")]
    pub generated_at: DateTime<Utc>,
    pub pdf_hash: String,
    pub rows: Vec<Record>,
}

impl Snapshot {
    /// Stamp `rows` with the current time and the fingerprint of `pdf_bytes`.
    pub fn new(rows: Vec<Record>, pdf_bytes: &[u8]) -> Self {
        Snapshot {
            generated_at: Utc::now(),
            pdf_hash: pdf_hash(pdf_bytes),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the snapshot as pretty JSON, replacing any previous file.
    ///
    /// Missing parent directories are created. The JSON goes to a temp file
    /// in the target directory first and is renamed into place, so a failed
    /// write never leaves a truncated artifact behind.
    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        let json = self.to_json()?;
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(path).map_err(|e| ReportError::Io(e.error))?;

        debug!(path = %path.display(), rows = self.rows.len(), "snapshot written");
        Ok(())
    }
}

/// First [`PDF_HASH_LEN`] hex characters of the SHA-256 of the raw PDF bytes.
pub fn pdf_hash(pdf_bytes: &[u8]) -> String {
    Sha256::digest(pdf_bytes)
        .iter()
        .take(PDF_HASH_LEN / 2)
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// RFC 3339 in UTC with millisecond precision, e.g. `2026-10-19T08:30:00.000Z`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
