//! Persisted configuration: a single YAML document keyed by section/name,
//! matching spec.md §6 ("a single YAML/INI-like tree keyed by section/name").

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// `Audio.*` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Slash-separated codec id list, most preferred first.
    pub active_codecs: String,
    pub ring_buffer_capacity: usize,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            active_codecs: "PCMU/PCMA".to_string(),
            ring_buffer_capacity: 8000,
        }
    }
}

impl AudioConfig {
    /// Parses `active_codecs` into an ordered codec-name list.
    pub fn codec_list(&self) -> Vec<String> {
        self.active_codecs
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `VoIPLink.*` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoipLinkConfig {
    pub symmetric: bool,
    pub sip_port: u16,
}

impl Default for VoipLinkConfig {
    fn default() -> Self {
        Self {
            symmetric: true,
            sip_port: 5060,
        }
    }
}

/// `DTMF.*` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DtmfConfig {
    pub play_dtmf: bool,
    pub tone_duration_ms: u32,
}

impl Default for DtmfConfig {
    fn default() -> Self {
        Self {
            play_dtmf: true,
            tone_duration_ms: 120,
        }
    }
}

/// `Hooks.*` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    pub url_sip_field: String,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            url_sip_field: "X-sflphone-url".to_string(),
        }
    }
}

/// One entry under `accounts.list`, matching `Account` in `rvoip-dialog-core`
/// minus its runtime registration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub id: String,
    pub hostname: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub expiry_secs: Option<u64>,
    #[serde(default)]
    pub codec_preferences: Vec<String>,
    /// DNS SRV resolution policy: resolve once at startup rather than on
    /// every registration retry (`original_source/sflphone-common/src/
    /// sipaccount.h`'s `resolve_once` flag).
    #[serde(default)]
    pub resolve_once: bool,
    /// Overrides the Contact header URI when set (same source).
    #[serde(default)]
    pub contact: Option<String>,
}

/// `Accounts.*` section: an explicit load order plus the account list.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountsConfig {
    #[serde(default)]
    pub order: Vec<String>,
    #[serde(default)]
    pub list: Vec<AccountConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub voip_link: VoipLinkConfig,
    pub dtmf: DtmfConfig,
    pub accounts: AccountsConfig,
    pub hooks: HooksConfig,
}

impl Config {
    /// Loads and parses the YAML document at `path`. Missing optional keys
    /// fall back to their section defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Loads `path` if it exists, otherwise returns defaults — first-run
    /// behavior the original daemon's `initConfigFile` provides by writing
    /// a fresh file; we just skip the write until `save` is called.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_yaml::to_string(self).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Accounts in `accounts.order`, falling back to list order for any
    /// account id the order omits.
    pub fn ordered_accounts(&self) -> Vec<&AccountConfig> {
        let mut by_id: HashMap<&str, &AccountConfig> =
            self.accounts.list.iter().map(|a| (a.id.as_str(), a)).collect();

        let mut ordered = Vec::with_capacity(self.accounts.list.len());
        for id in &self.accounts.order {
            if let Some(account) = by_id.remove(id.as_str()) {
                ordered.push(account);
            }
        }
        let mut rest: Vec<&AccountConfig> = by_id.into_values().collect();
        rest.sort_by(|a, b| a.id.cmp(&b.id));
        ordered.extend(rest);
        ordered
    }
}
