use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::catalog::scout::DEFAULT_SCOUT_DELAY;

/// Backend used when nothing else is configured (local development server).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
/// Encyclopedia page size.
pub const DEFAULT_PAGE_SIZE: usize = 25;
/// Environment override for the backend base URL.
pub const BASE_URL_ENV: &str = "SCOUTDEX_BASE_URL";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend root, e.g. "https://scout.example.org"
    pub base_url: Option<String>,
    /// Records per encyclopedia page
    pub page_size: Option<usize>,
    /// Read characters from this CSV file instead of the backend
    pub csv_path: Option<PathBuf>,
    /// Minimum time a scout stays pending, in milliseconds
    pub scout_delay_ms: Option<u64>,
}

/// Keys accepted by `scoutdex set` / `scoutdex unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
    PageSize,
    CsvPath,
    ScoutDelay,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::BaseUrl,
        ConfigKey::PageSize,
        ConfigKey::CsvPath,
        ConfigKey::ScoutDelay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::PageSize => "page-size",
            ConfigKey::CsvPath => "csv-path",
            ConfigKey::ScoutDelay => "scout-delay-ms",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = ConfigKey::ALL.iter().map(|key| key.name()).collect();
                format!("Unknown config key: {s} (expected one of {})", known.join(", "))
            })
    }
}

impl Config {
    pub fn page_size(&self) -> usize {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn scout_delay(&self) -> Duration {
        self.scout_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SCOUT_DELAY)
    }

    /// Flag beats environment beats config file beats the development default.
    pub fn resolve_base_url(&self, flag: Option<&str>, env: Option<&str>) -> String {
        [flag, env, self.base_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {}", key.name()));
        }

        match key {
            ConfigKey::BaseUrl => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    return Err(format!("base-url must start with http:// or https://: {value}"));
                }
                self.base_url = Some(value.trim_end_matches('/').to_string());
            }
            ConfigKey::PageSize => {
                let size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| format!("page-size must be a positive number: {value}"))?;
                self.page_size = Some(size);
            }
            ConfigKey::CsvPath => self.csv_path = Some(PathBuf::from(value)),
            ConfigKey::ScoutDelay => {
                let millis = value
                    .parse::<u64>()
                    .map_err(|_| format!("scout-delay-ms must be a number of milliseconds: {value}"))?;
                self.scout_delay_ms = Some(millis);
            }
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::PageSize => self.page_size = None,
            ConfigKey::CsvPath => self.csv_path = None,
            ConfigKey::ScoutDelay => self.scout_delay_ms = None,
        }
    }
}

/// Get a user-friendly display string for a path, using `~` for the home
/// directory on Unix-like systems.
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            if let Ok(relative) = path.strip_prefix(PathBuf::from(home)) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
