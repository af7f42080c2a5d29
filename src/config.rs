use crate::data::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub watchlist: Vec<String>,
    pub selected: Vec<bool>,
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let watchlist = default_watchlist();
        Self {
            selected: vec![true; watchlist.len()],
            watchlist,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn sanitized(mut self) -> Self {
        // Symbols without a flag start selected; extra flags are dropped.
        let mut flags = std::mem::take(&mut self.selected).into_iter();
        let (watchlist, selected): (Vec<String>, Vec<bool>) = std::mem::take(&mut self.watchlist)
            .into_iter()
            .map(|symbol| (symbol, flags.next().unwrap_or(true)))
            .filter(|(symbol, _)| !symbol.trim().is_empty())
            .unzip();

        if watchlist.is_empty() {
            self.watchlist = default_watchlist();
            self.selected = vec![true; self.watchlist.len()];
        } else {
            self.watchlist = watchlist;
            self.selected = selected;
        }

        if self.base_url.trim().is_empty() {
            self.base_url = DEFAULT_BASE_URL.to_string();
        }

        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
        self
    }
}

pub fn default_watchlist() -> Vec<String> {
    vec![
        "BTCUSDT".to_string(),
        "ETHUSDT".to_string(),
        "SOLUSDT".to_string(),
        "BNBUSDT".to_string(),
        "XRPUSDT".to_string(),
        "DOGEUSDT".to_string(),
    ]
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".perfboard.json")
}

pub fn load_config(path: &Path) -> AppConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => return AppConfig::default(),
    };

    serde_json::from_str::<AppConfig>(&contents)
        .map(|cfg| cfg.sanitized())
        .unwrap_or_default()
}

pub fn save_config(path: &Path, config: &AppConfig) -> std::io::Result<()> {
    let payload = serde_json::to_string_pretty(config)?;
    std::fs::write(path, payload)
}
