//! Endpoint and polling configuration, read from a RON file.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use scraper_engine::{ClientSettings, PollSettings, DEFAULT_BASE_URL};
use scraper_logging::scraper_info;
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "image-scraper.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub poll_interval_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval_ms: 1000,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ScraperConfig {
    /// Loads `path`. A missing file yields defaults unless the path was given
    /// explicitly; a malformed file is always an error.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()));
            }
        };

        let config: Self = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        scraper_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn with_overrides(mut self, base_url: Option<String>, poll_interval_ms: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if let Some(interval) = poll_interval_ms {
            self.poll_interval_ms = interval;
        }
        self
    }

    pub fn client_settings(&self) -> Result<ClientSettings> {
        let base_url = Url::parse(&self.base_url)
            .with_context(|| format!("invalid base url {:?}", self.base_url))?;
        Ok(ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::new(base_url)
        })
    }

    pub fn poll_settings(&self) -> Result<PollSettings> {
        if self.poll_interval_ms == 0 {
            bail!("poll interval must be at least 1ms");
        }
        Ok(PollSettings {
            interval: Duration::from_millis(self.poll_interval_ms),
        })
    }
}
