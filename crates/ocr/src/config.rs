use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Words that mark a fragment as receipt boilerplate rather than an item.
pub const DEFAULT_BOILERPLATE_KEYWORDS: &[&str] = &[
    "receipt", "invoice", "bill", "total", "subtotal", "tax", "gst", "vat",
    "date", "time", "store", "shop", "address", "phone", "thank", "visit",
    "cashier", "cash", "card", "payment", "change", "refund",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Tunable constants of the heuristic receipt parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Fragments shorter than this (in characters) are never items.
    pub min_text_len: usize,
    /// Lower-case keywords; a fragment containing any of them is dropped.
    pub boilerplate_keywords: Vec<String>,
    /// Two fragments share a printed line when their tops differ by less than
    /// this fraction of the taller height.
    pub same_line_ratio: f64,
    /// Horizontal distance (px) under which fragments are grouped regardless
    /// of vertical offset.
    pub proximity_px: f64,
    /// A trailing bare number at or below this is read as a quantity, above
    /// it as a price.
    pub qty_price_threshold: Decimal,
    /// Attach bare-number fragments to the item line they sit beside.
    pub attach_figures: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_text_len: 3,
            boilerplate_keywords: DEFAULT_BOILERPLATE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            same_line_ratio: 0.5,
            proximity_px: 200.0,
            qty_price_threshold: Decimal::TEN,
            attach_figures: true,
        }
    }
}

impl ParserConfig {
    /// Parse a config from TOML. Keys that are absent keep their defaults.
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let mut config: ParserConfig = toml::from_str(toml_content)?;
        config.normalize_keywords();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Lower-case and trim keywords, dropping empty ones.
    pub fn normalize_keywords(&mut self) {
        for keyword in &mut self.boilerplate_keywords {
            *keyword = keyword.trim().to_lowercase();
        }
        self.boilerplate_keywords.retain(|k| !k.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_documented_thresholds() {
        let c = ParserConfig::default();
        assert_eq!(c.min_text_len, 3);
        assert_eq!(c.proximity_px, 200.0);
        assert_eq!(c.same_line_ratio, 0.5);
        assert_eq!(c.qty_price_threshold, Decimal::from(10));
        assert_eq!(c.boilerplate_keywords.len(), 22);
        assert!(c.attach_figures);
    }

    #[test]
    fn from_toml_overrides_only_given_keys() {
        let c = ParserConfig::from_toml("proximity_px = 120.0\nattach_figures = false\n").unwrap();
        assert_eq!(c.proximity_px, 120.0);
        assert!(!c.attach_figures);
        assert_eq!(c.min_text_len, 3);
        assert!(c.boilerplate_keywords.iter().any(|k| k == "subtotal"));
    }

    #[test]
    fn from_toml_lowercases_keywords() {
        let c = ParserConfig::from_toml(r#"boilerplate_keywords = ["Member ", "", "POINTS"]"#)
            .unwrap();
        assert_eq!(c.boilerplate_keywords, vec!["member", "points"]);
    }

    #[test]
    fn from_toml_rejects_bad_types() {
        assert!(matches!(
            ParserConfig::from_toml("proximity_px = \"wide\""),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_text_len = 4").unwrap();
        let c = ParserConfig::from_file(file.path()).unwrap();
        assert_eq!(c.min_text_len, 4);
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(ParserConfig::from_file(&missing), Err(ConfigError::Io(_))));
    }
}
