use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use billsplit_core::{share_summary, ItemId, ParsedItem, Selection};
use billsplit_llm::{HttpTransport, RemoteConfig, RemoteOutcome, RemoteParser};
use billsplit_ocr::{joined_text, OcrFragment, ParserConfig, ReceiptParser};
use serde::{Deserialize, Serialize};

pub const ENV_CONFIG: &str = "BILLSPLIT_CONFIG";

/// Contents of `config.toml`: a `[parser]` and a `[remote]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub parser: ParserConfig,
    pub remote: RemoteConfig,
}

impl AppConfig {
    /// Load from `BILLSPLIT_CONFIG`, else the platform config dir, else defaults.
    /// Remote credentials from the environment win over the file.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(ENV_CONFIG).map(PathBuf::from).or_else(|| {
            directories::ProjectDirs::from("com", "billsplit", "Billsplit")
                .map(|dirs| dirs.config_dir().join("config.toml"))
        });

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.remote = config.remote.overridden_by(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        let mut config: AppConfig = toml::from_str(raw)?;
        config.parser.normalize_keywords();
        Ok(config)
    }
}

#[derive(Debug, Serialize)]
pub struct ItemsReport {
    pub items: Vec<ParsedItem>,
    pub selected_total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_message: Option<String>,
}

pub fn read_fragments(path: &Path) -> Result<Vec<OcrFragment>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fragments {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid fragment JSON in {}", path.display()))
}

/// Run the heuristic parser and total the selected items (all when `select` is `None`).
pub fn parse_items(
    fragments: &[OcrFragment],
    config: &ParserConfig,
    select: Option<&[u32]>,
) -> ItemsReport {
    let items = ReceiptParser::new(config.clone()).parse(fragments);

    let selection: Selection = match select {
        Some(ids) => ids.iter().copied().map(ItemId).collect(),
        None => {
            let mut all = Selection::new();
            all.select_all(&items);
            all
        }
    };

    let selected_total = selection.total(&items).to_string();
    let share_message = match share_summary(&items, &selection) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::info!("No share message: {e}");
            None
        }
    };

    ItemsReport { items, selected_total, share_message }
}

/// Send the fragment text to the configured chat model.
pub async fn parse_remote(fragments: &[OcrFragment], config: &RemoteConfig) -> Result<RemoteOutcome> {
    if !config.is_configured() {
        bail!(
            "Remote parsing needs {} and {}",
            billsplit_llm::config::ENV_API_KEY,
            billsplit_llm::config::ENV_MODEL
        );
    }
    let transport = HttpTransport::new(config.clone())?;
    Ok(RemoteParser::new(transport).parse(&joined_text(fragments)).await)
}
