use chrono::NaiveDate;
use clap::Parser;
use gatofit::{DataDir, NewRecord, Weight};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Record a weight measurement")]
pub struct Add {
    /// The weight in kilograms, e.g. 4.35
    #[arg(allow_negative_numbers = true)]
    weight: Weight,

    /// The day the pet was weighed (YYYY-MM-DD, defaults to today)
    #[arg(long, short)]
    date: Option<NaiveDate>,

    /// A free-text note, e.g. "after the vet visit"
    #[arg(long, short)]
    note: Option<String>,
}

impl Add {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        let date = self.date.unwrap_or_else(super::today);
        let mut entries = data.entries();

        let id = entries.add(NewRecord::new(date, self.weight, self.note))?;
        tracing::info!("Added record {id}");

        println!(
            "{} {} on {date} {}",
            "Recorded".success(),
            self.weight,
            format!("({id})").dim()
        );

        Ok(())
    }
}
