use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use gatofit::{
    advisor::{assess_with_gemini, MIN_RECORDS},
    domain::LatestAssessment,
    storage::{save_latest, FileSlots, KeyValueStore},
    Assessment, Config, DataDir, EntryStore, WeightRecord,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::instrument;

use super::terminal::{status_label, Colorize};

#[derive(Debug, Parser)]
#[command(about = "Ask the advisor for a fresh assessment of the trend")]
pub struct Analyze {}

impl Analyze {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        let config = data.config();
        let entries = data.entries();

        let latest = request(data, &config, &entries);
        print_assessment(&latest, entries.len());

        Ok(())
    }
}

/// Asks the advisor about the records in `entries` and stores the reply as
/// the latest assessment.
pub fn request(
    data: &DataDir,
    config: &Config,
    entries: &EntryStore<FileSlots>,
) -> LatestAssessment {
    request_with(&mut data.slots(), entries.all(), |records| {
        let spinner = spinner(&format!("Analysing {} records…", records.len()));
        let assessment = assess_with_gemini(config, records);
        spinner.finish_and_clear();
        assessment
    })
}

/// Runs `assess` over `records` and stores the result in `slots`.
///
/// With too few records the insufficient-data reply is returned without
/// asking or storing anything, so the next record can still trigger a real
/// assessment. A failed write is logged; the assessment is returned either
/// way.
fn request_with(
    slots: &mut impl KeyValueStore,
    records: &[WeightRecord],
    assess: impl FnOnce(&[WeightRecord]) -> Assessment,
) -> LatestAssessment {
    let latest = |assessment| LatestAssessment {
        assessment,
        analyzed_at: Utc::now(),
        record_count: records.len(),
    };

    if records.len() < MIN_RECORDS {
        tracing::debug!("Only {} records, nothing to analyse", records.len());
        return latest(Assessment::insufficient_data());
    }

    let latest = latest(assess(records));
    match save_latest(slots, &latest) {
        Ok(()) => tracing::debug!("Stored assessment: {}", latest.assessment.status),
        Err(e) => tracing::warn!("Failed to store the assessment: {e}"),
    }
    latest
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Prints an assessment, noting when records changed since it was made.
pub fn print_assessment(latest: &LatestAssessment, record_count: usize) {
    let assessment = &latest.assessment;
    println!("{}", status_label(assessment.status));
    println!("  {}", assessment.message);
    println!("  {} {}", "Recommendation:".info(), assessment.recommendation);
    println!("  {}", footer(latest, record_count).dim());
}

fn footer(latest: &LatestAssessment, record_count: usize) -> String {
    let when = latest.analyzed_at.with_timezone(&chrono::Local);
    let mut footer = format!("Analysed {}", when.format("%Y-%m-%d %H:%M"));
    if latest.is_stale(record_count) {
        footer.push_str(" · records have changed since, run 'gatofit analyze' to refresh");
    }
    footer
}
