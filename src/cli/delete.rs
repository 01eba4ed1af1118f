use clap::Parser;
use dialoguer::Confirm;
use gatofit::{DataDir, RecordId};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Delete a weight record")]
pub struct Delete {
    /// The id of the record, as shown by `gatofit list`
    id: String,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    yes: bool,
}

impl Delete {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        let id = RecordId::from(self.id);
        let mut entries = data.entries();

        let Some(record) = entries.get(&id) else {
            println!("{}", format!("No record with id {id}; nothing to delete").info());
            return Ok(());
        };

        if !self.yes {
            let prompt = format!("Delete {} on {}?", record.weight, record.date);
            let confirmed = Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()?;
            if !confirmed {
                println!("Cancelled");
                return Ok(());
            }
        }

        if entries.remove(&id)? {
            tracing::info!("Removed record {id}");
            println!("{}", format!("Deleted record {id}").success());
        }

        Ok(())
    }
}
