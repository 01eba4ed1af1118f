use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

/// Settings for a weight log.
///
/// Most settings shape the requests sent to the trend advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// What kind of animal is being weighed, as it should read in the advisor
    /// prompt. For example, 'cat' or 'senior dog'.
    pub pet: String,

    /// The language the advisor should reply in.
    pub language: String,

    /// The generative model the advisor asks.
    pub model: String,

    /// Base URL of the generative language API.
    pub endpoint: String,

    /// How long to wait for the advisor before giving up, in seconds.
    timeout_secs: u64,

    /// How many of the most recent records are sent to the advisor.
    sample_size: usize,

    /// Whether `summary` requests an assessment by itself when there is none
    /// yet.
    pub auto_analyze: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pet: default_pet(),
            language: default_language(),
            model: default_model(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            sample_size: default_sample_size(),
            auto_analyze: true,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration if the file exists, or returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, String> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The advisor request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The advisor request timeout, in whole seconds.
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Sets the advisor timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `secs` is zero.
    pub fn set_timeout_secs(&mut self, secs: u64) -> Result<(), String> {
        if secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }
        self.timeout_secs = secs;
        Ok(())
    }

    /// How many recent records the advisor sees.
    #[must_use]
    pub const fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Sets how many recent records the advisor sees.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is below two, since a trend needs at least
    /// two points.
    pub fn set_sample_size(&mut self, size: usize) -> Result<(), String> {
        if size < 2 {
            return Err("sample_size must be at least 2".to_string());
        }
        self.sample_size = size;
        Ok(())
    }
}

fn default_pet() -> String {
    "cat".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_sample_size() -> usize {
    15
}

const fn default_true() -> bool {
    true
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_pet")]
        pet: String,

        #[serde(default = "default_language")]
        language: String,

        #[serde(default = "default_model")]
        model: String,

        #[serde(default = "default_endpoint")]
        endpoint: String,

        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,

        #[serde(default = "default_sample_size")]
        sample_size: usize,

        #[serde(default = "default_true")]
        auto_analyze: bool,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                pet,
                language,
                model,
                endpoint,
                timeout_secs,
                sample_size,
                auto_analyze,
            } => Self {
                pet,
                language,
                model,
                endpoint,
                // hand-edited files may hold values the setters would refuse
                timeout_secs: timeout_secs.max(1),
                sample_size: sample_size.max(2),
                auto_analyze,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            pet: config.pet,
            language: config.language,
            model: config.model,
            endpoint: config.endpoint,
            timeout_secs: config.timeout_secs,
            sample_size: config.sample_size,
            auto_analyze: config.auto_analyze,
        }
    }
}
