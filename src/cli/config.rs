use gatofit::{Config, DataDir};
use tracing::instrument;

use crate::cli::terminal::Colorize;

const KEYS: &str = "pet, language, model, endpoint, timeout_secs, sample_size, auto_analyze";

#[derive(Debug, clap::Parser)]
/// Show or modify configuration settings
///
/// Configuration is stored in .gatofit/config.toml.
///
/// Available configuration keys:
///   pet            The animal being weighed, as named to the advisor (default: cat)
///   language       The language the advisor answers in (default: English)
///   model          The generative model to ask (default: gemini-2.5-flash)
///   endpoint       Base URL of the generative language API
///   `timeout_secs`   Seconds to wait for the advisor (default: 30)
///   `sample_size`    How many recent records the advisor sees (default: 15)
///   `auto_analyze`   Request an assessment from `summary` when there is none
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   gatofit config set pet dog
    ///   gatofit config set `sample_size` 20
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => {
                Self::show_config(&load(data)?);
                Ok(())
            }
            ConfigCommand::Get { key } => {
                println!("{}", get(&load(data)?, &key)?);
                Ok(())
            }
            ConfigCommand::Set { key, value } => Self::set_config(data, &key, &value),
        }
    }

    fn show_config(config: &Config) {
        println!("Configuration:");
        println!("  pet: {}", config.pet);
        println!("  language: {}", config.language);
        println!("  model: {}", config.model);
        println!("  endpoint: {}", config.endpoint.dim());
        println!("  timeout_secs: {}", config.timeout_secs());
        println!("  sample_size: {}", config.sample_size());
        println!(
            "  auto_analyze: {} ({})",
            config.auto_analyze,
            if config.auto_analyze {
                "summary asks for an assessment when there is none".dim()
            } else {
                "only 'gatofit analyze' asks".dim()
            }
        );
    }

    fn set_config(data: &DataDir, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = load(data)?;
        set(&mut config, key, value)?;

        std::fs::create_dir_all(data.dir())?;
        config
            .save(&data.config_path())
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        println!("{}", format!("✅ Set {key} = {value}").success());
        Ok(())
    }
}

fn load(data: &DataDir) -> anyhow::Result<Config> {
    Config::load_or_default(&data.config_path()).map_err(|e| anyhow::anyhow!("{e}"))
}

fn get(config: &Config, key: &str) -> anyhow::Result<String> {
    let value = match key {
        "pet" => config.pet.clone(),
        "language" => config.language.clone(),
        "model" => config.model.clone(),
        "endpoint" => config.endpoint.clone(),
        "timeout_secs" => config.timeout_secs().to_string(),
        "sample_size" => config.sample_size().to_string(),
        "auto_analyze" => config.auto_analyze.to_string(),
        _ => anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys: {KEYS}"),
    };
    Ok(value)
}

fn set(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    let text = || -> anyhow::Result<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            anyhow::bail!("{key} cannot be empty");
        }
        Ok(trimmed.to_string())
    };
    let number = || -> anyhow::Result<u64> {
        value
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("Value must be a whole number"))
    };

    match key {
        "pet" => config.pet = text()?,
        "language" => config.language = text()?,
        "model" => config.model = text()?,
        "endpoint" => config.endpoint = text()?.trim_end_matches('/').to_string(),
        "timeout_secs" => config
            .set_timeout_secs(number()?)
            .map_err(|e| anyhow::anyhow!("{e}"))?,
        "sample_size" => config
            .set_sample_size(usize::try_from(number()?)?)
            .map_err(|e| anyhow::anyhow!("{e}"))?,
        "auto_analyze" => {
            config.auto_analyze = value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;
        }
        _ => anyhow::bail!("Unknown configuration key: '{key}'\n\nAvailable keys: {KEYS}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("pet", "dog")]
    #[test_case("language", "Español")]
    #[test_case("sample_size", "20")]
    #[test_case("timeout_secs", "5")]
    #[test_case("auto_analyze", "false")]
    fn set_then_get(key: &str, value: &str) {
        let mut config = Config::default();
        set(&mut config, key, value).unwrap();
        assert_eq!(get(&config, key).unwrap(), value);
    }

    #[test_case("sample_size", "1"; "sample too small")]
    #[test_case("timeout_secs", "0"; "zero timeout")]
    #[test_case("timeout_secs", "soon"; "not a number")]
    #[test_case("auto_analyze", "maybe"; "not a bool")]
    #[test_case("pet", "   "; "blank text")]
    #[test_case("colour", "red"; "unknown key")]
    fn rejected_values_leave_config_unchanged(key: &str, value: &str) {
        let mut config = Config::default();
        assert!(set(&mut config, key, value).is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn endpoint_trailing_slash_is_dropped() {
        let mut config = Config::default();
        set(&mut config, "endpoint", "http://localhost:8080/v1/").unwrap();
        assert_eq!(config.endpoint, "http://localhost:8080/v1");
    }

    #[test]
    fn set_persists_to_the_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let data = DataDir::new(tmp.path().to_path_buf());

        Command::set_config(&data, "pet", "rabbit").unwrap();

        assert_eq!(data.config().pet, "rabbit");
    }
}
