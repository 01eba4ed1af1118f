use clap::Parser;
use gatofit::{
    advisor::MIN_RECORDS, compute_metrics, domain::LatestAssessment, normalize,
    storage::load_latest, Config, DataDir,
};
use tracing::instrument;

use super::{
    analyze,
    terminal::{signed_change, Colorize},
};

#[derive(Debug, Parser, Default)]
#[command(about = "Show current weight, total change and the latest assessment")]
pub struct Summary {
    /// Do not contact the advisor, even if there is no assessment yet
    #[arg(long)]
    offline: bool,
}

impl Summary {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        if !data.is_initialized() {
            println!("No weight log here yet. Start one with 'gatofit init'.");
            return Ok(());
        }

        let config = data.config();
        let entries = data.entries();
        let ordered = normalize(entries.all());
        let metrics = compute_metrics(&ordered);

        println!("{}", format!("Weight log for your {}", config.pet).info());
        println!("  Records:     {}", entries.len());
        match metrics.current {
            Some(current) => {
                println!("  Current:     {current:.2} kg");
                println!("  Net change:  {}", signed_change(metrics.net_change));
            }
            None => {
                println!("  Current:     {}", "no data".dim());
                println!();
                println!("Add the first weight with 'gatofit add <KG>'.");
                return Ok(());
            }
        }
        println!();

        let mut latest = load_latest(&data.slots());
        if self.should_auto_analyze(&config, latest.as_ref(), entries.len()) {
            latest = Some(analyze::request(data, &config, &entries));
        }

        match latest {
            Some(latest) => analyze::print_assessment(&latest, entries.len()),
            None if entries.len() < MIN_RECORDS => {
                println!(
                    "{}",
                    "Add at least two records to receive an assessment.".dim()
                );
            }
            None => println!("{}", "No assessment yet. Run 'gatofit analyze'.".dim()),
        }

        Ok(())
    }

    /// Whether the advisor should be asked without an explicit `analyze`.
    ///
    /// That happens once there is enough data and nothing useful has been
    /// stored yet. An assessment made from fewer than two records does not
    /// count.
    fn should_auto_analyze(
        &self,
        config: &Config,
        latest: Option<&LatestAssessment>,
        record_count: usize,
    ) -> bool {
        !self.offline
            && config.auto_analyze
            && record_count >= MIN_RECORDS
            && latest.is_none_or(|latest| latest.record_count < MIN_RECORDS)
    }
}
