use clap::ValueEnum;
use rcaboard_core::error::ReportError;
use rcaboard_core::extraction::pdf_extract::PdfExtractExtractor;
use rcaboard_core::extraction::pdftotext::PdftotextExtractor;
use rcaboard_core::extraction::PdfExtractor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT: &str = "data/latest.pdf";
pub const DEFAULT_OUTPUT: &str = "public/data/latest.json";

/// Picked up from the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "rcaboard.toml";

/// PDF text extraction backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    /// poppler's pdftotext in -layout mode
    #[default]
    Pdftotext,
    /// pure-Rust pdf-extract crate
    PdfExtract,
}

impl Backend {
    pub fn extractor(self) -> Box<dyn PdfExtractor> {
        match self {
            Backend::Pdftotext => Box::new(PdftotextExtractor::new()),
            Backend::PdfExtract => Box::new(PdfExtractExtractor::new()),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Pdftotext => write!(f, "pdftotext"),
            Backend::PdfExtract => write!(f, "pdf-extract"),
        }
    }
}

/// Where to read the report from and where to write the snapshot.
///
/// Relative paths resolve against the working directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub backend: Backend,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            backend: Backend::default(),
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from [`CONFIG_FILE`] if it exists,
    /// or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ReportError> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_from(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load settings from a TOML file. Missing keys keep their defaults.
    pub fn load_from(path: &Path) -> Result<Self, ReportError> {
        let config_err = |reason: String| ReportError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
        toml::from_str(&contents).map_err(|e| config_err(e.to_string()))
    }

    /// Apply command-line overrides on top of file/default values.
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        backend: Option<Backend>,
    ) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(output) = output {
            self.output = output;
        }
        if let Some(backend) = backend {
            self.backend = backend;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.input, PathBuf::from("data/latest.pdf"));
        assert_eq!(s.output, PathBuf::from("public/data/latest.json"));
        assert_eq!(s.backend, Backend::Pdftotext);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rcaboard.toml");
        std::fs::write(&path, "input = \"reports/setembro.pdf\"\nbackend = \"pdf-extract\"\n").unwrap();

        let s = Settings::load_from(&path).unwrap();
        assert_eq!(s.input, PathBuf::from("reports/setembro.pdf"));
        assert_eq!(s.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(s.backend, Backend::PdfExtract);
    }

    #[test]
    fn test_bad_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rcaboard.toml");
        std::fs::write(&path, "backend = \"ocr\"\n").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, ReportError::Config { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ReportError::Config { .. }));
    }

    #[test]
    fn test_overrides() {
        let s = Settings::default().with_overrides(
            Some(PathBuf::from("in.pdf")),
            None,
            Some(Backend::PdfExtract),
        );
        assert_eq!(s.input, PathBuf::from("in.pdf"));
        assert_eq!(s.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(s.backend, Backend::PdfExtract);
    }
}
