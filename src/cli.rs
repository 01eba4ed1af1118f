use std::path::PathBuf;

mod add;
mod analyze;
mod chart;
mod config;
mod delete;
mod list;
mod summary;
mod terminal;

use add::Add;
use analyze::Analyze;
use chart::Chart;
use chrono::NaiveDate;
use clap::ArgAction;
use delete::Delete;
use gatofit::DataDir;
use list::List;
use summary::Summary;
use tracing::instrument;

/// The current local calendar day.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global=true)]
    verbose: u8,

    /// The directory holding the weight log
    #[arg(short, long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Summary(Summary::default()))
            .run(DataDir::new(self.root))
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .with_writer(std::io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Show current weight, total change and the latest assessment (default)
    Summary(Summary),

    /// Start a new weight log
    Init,

    /// Record a weight measurement
    Add(Add),

    /// Delete a weight record
    Delete(Delete),

    /// Show the history, newest first, with the change from each previous
    /// record
    List(List),

    /// Plot the weight over a time window
    Chart(Chart),

    /// Ask the advisor for a fresh assessment of the trend
    ///
    /// The most recent records are sent to a generative text model. The key is
    /// read from the GEMINI_API_KEY environment variable.
    Analyze(Analyze),

    /// Show or modify configuration settings
    Config(config::Command),
}

impl Command {
    fn run(self, data: DataDir) -> anyhow::Result<()> {
        match self {
            Self::Summary(command) => command.run(&data)?,
            Self::Init => Init::run(&data)?,
            Self::Add(command) => command.run(&data)?,
            Self::Delete(command) => command.run(&data)?,
            Self::List(command) => command.run(&data)?,
            Self::Chart(command) => command.run(&data)?,
            Self::Analyze(command) => command.run(&data)?,
            Self::Config(command) => command.run(&data)?,
        }
        Ok(())
    }
}

#[derive(Debug, clap::Parser)]
pub struct Init {}

impl Init {
    #[instrument]
    fn run(data: &DataDir) -> anyhow::Result<()> {
        let dir = data.dir();
        if dir.exists() {
            anyhow::bail!(
                "Weight log already initialized (found existing {} directory)",
                gatofit::storage::data_dir::DATA_DIR_NAME
            );
        }

        std::fs::create_dir_all(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to create {}: {e}", dir.display()))?;

        gatofit::Config::default()
            .save(&data.config_path())
            .map_err(|e| anyhow::anyhow!("Failed to create config.toml: {e}"))?;

        println!("Initialized weight log in {}", data.root().display());
        println!("  Created: {}", data.config_path().display());
        println!();
        println!("Next steps:");
        println!("  gatofit add 4.2 --note \"first weigh-in\"");

        Ok(())
    }
}
