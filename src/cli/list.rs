use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use gatofit::{
    compute_metrics,
    domain::Direction,
    normalize, project, DataDir, TimeWindow, WeightRecord,
};
use serde::Serialize;
use tracing::instrument;

use super::terminal::{is_narrow, trend_marker, Colorize};

/// Command arguments for `gatofit list`.
#[derive(Debug, Parser)]
#[command(about = "Show the weight history, newest first")]
pub struct List {
    /// Only show records inside this window (1M, 3M, 6M, 1Y, ALL)
    #[arg(long, short, default_value_t)]
    window: TimeWindow,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// One line of the listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Row<'a> {
    id: &'a str,
    date: NaiveDate,
    weight_kg: f64,
    delta_kg: Option<f64>,
    direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a str>,
}

impl List {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        let entries = data.entries();
        let rows = rows(entries.all(), self.window, super::today());

        match self.output {
            OutputFormat::Table => {
                if rows.is_empty() {
                    if entries.is_empty() {
                        println!("No weight records yet. Add one with 'gatofit add'.");
                    } else {
                        println!("No weight records in the last {}.", self.window);
                    }
                    return Ok(());
                }
                render_table(&rows);
            }
            OutputFormat::Json => render_json(&rows)?,
            OutputFormat::Csv => render_csv(&rows),
        }
        Ok(())
    }
}

/// Builds the listing for `window`, newest first.
///
/// Deltas are taken against each record's predecessor in the whole history,
/// so the oldest record in a window still shows how it compares to the one
/// before it.
fn rows(records: &[WeightRecord], window: TimeWindow, today: NaiveDate) -> Vec<Row<'_>> {
    let ordered = normalize(records);
    let metrics = compute_metrics(&ordered);

    project(&ordered, window, today)
        .into_iter()
        .rev()
        .map(|record| {
            let trend = metrics.trend_for(&record.id);
            Row {
                id: record.id.as_str(),
                date: record.date,
                weight_kg: record.kg(),
                delta_kg: trend.map(|t| t.delta),
                direction: trend.map(|t| t.direction),
                note: record.note.as_deref(),
            }
        })
        .collect()
}

fn render_table(rows: &[Row<'_>]) {
    let narrow = is_narrow();
    let headers: &[&str] = if narrow {
        &["Date", "Weight", "Change"]
    } else {
        &["Date", "Weight", "Change", "Note", "Id"]
    };

    let data = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.date.to_string(),
                format!("{:.2} kg", row.weight_kg),
                row.delta_kg.map(trend_marker).unwrap_or_default(),
            ];
            if !narrow {
                cells.push(row.note.unwrap_or_default().to_string());
                cells.push(row.id.dim());
            }
            cells
        })
        .collect::<Vec<_>>();

    // Colour codes take no room on screen, so the widths are measured on the
    // plain text.
    let plain_widths = rows
        .iter()
        .map(|row| {
            let mut widths = vec![
                row.date.to_string().chars().count(),
                format!("{:.2} kg", row.weight_kg).chars().count(),
                row.delta_kg
                    .map_or(0, |d| format!("▲ {:.2}", d.abs()).chars().count()),
            ];
            if !narrow {
                widths.push(row.note.unwrap_or_default().chars().count());
                widths.push(row.id.chars().count());
            }
            widths
        })
        .collect::<Vec<_>>();

    let widths = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            plain_widths
                .iter()
                .map(|row| row[idx])
                .max()
                .unwrap_or(0)
                .max(header.len())
        })
        .collect::<Vec<_>>();

    for (header, width) in headers.iter().zip(&widths) {
        print!("{header:<width$}  ");
    }
    println!();

    for width in &widths {
        print!("{:-<width$}  ", "");
    }
    println!();

    for (row, plain) in data.iter().zip(&plain_widths) {
        for (idx, value) in row.iter().enumerate() {
            let padding = widths[idx] - plain[idx];
            print!("{value}{:padding$}  ", "");
        }
        println!();
    }
}

fn render_json(rows: &[Row<'_>]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), rows)
        .context("failed to render json output")?;
    println!();
    Ok(())
}

fn render_csv(rows: &[Row<'_>]) {
    println!("id,date,weight_kg,delta_kg,direction,note");
    for row in rows {
        let direction = match row.direction {
            Some(Direction::Increase) => "increase",
            Some(Direction::Decrease) => "decrease",
            Some(Direction::Unchanged) => "unchanged",
            None => "",
        };
        let values = [
            csv_escape(row.id),
            row.date.to_string(),
            format!("{:.2}", row.weight_kg),
            row.delta_kg.map(|d| format!("{d:.2}")).unwrap_or_default(),
            direction.to_string(),
            csv_escape(row.note.unwrap_or_default()),
        ];
        println!("{}", values.join(","));
    }
}

fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}
