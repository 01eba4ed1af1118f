use clap::Parser;
use gatofit::{compute_metrics, domain::WeightRange, normalize, project, DataDir, TimeWindow};
use tracing::instrument;

use super::terminal::{signed_change, terminal_width, Colorize};

/// Width of the `YYYY-MM-DD  12.34 kg  ` label in front of each bar.
const LABEL_WIDTH: usize = 22;
const MIN_BAR_WIDTH: usize = 10;
const DEFAULT_BAR_WIDTH: usize = 50;

#[derive(Debug, Parser)]
#[command(about = "Plot the weight over a time window")]
pub struct Chart {
    /// The window to plot (1M, 3M, 6M, 1Y, ALL)
    #[arg(long, short, default_value_t)]
    window: TimeWindow,
}

impl Chart {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self, data: &DataDir) -> anyhow::Result<()> {
        let entries = data.entries();
        let ordered = normalize(entries.all());
        let visible = project(&ordered, self.window, super::today());

        let metrics = compute_metrics(&visible);
        let Some(range) = metrics.range else {
            if entries.is_empty() {
                println!("No weight records yet. Add one with 'gatofit add'.");
            } else {
                println!("No weight records in the last {}.", self.window);
            }
            return Ok(());
        };

        let domain = range.display_domain();
        let width = bar_width(terminal_width());

        println!(
            "{}",
            format!(
                "Weight, {} ({:.1} to {:.1} kg)",
                window_title(self.window),
                domain.0,
                domain.1
            )
            .info()
        );
        for record in &visible {
            let bar = "█".repeat(bar_length(record.kg(), domain, width));
            println!("{}  {:>8}  {bar}", record.date, format!("{:.2} kg", record.kg()));
        }
        println!();
        println!("Change over the window: {}", signed_change(metrics.net_change));
        print_range(range);

        Ok(())
    }
}

const fn window_title(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::OneMonth => "last month",
        TimeWindow::ThreeMonths => "last 3 months",
        TimeWindow::SixMonths => "last 6 months",
        TimeWindow::OneYear => "last year",
        TimeWindow::All => "all time",
    }
}

fn print_range(range: WeightRange) {
    println!(
        "{}",
        format!("Lowest {:.2} kg, highest {:.2} kg", range.min, range.max).dim()
    );
}

/// How many columns the longest bar may take.
fn bar_width(terminal: Option<u16>) -> usize {
    terminal.map_or(DEFAULT_BAR_WIDTH, |columns| {
        usize::from(columns)
            .saturating_sub(LABEL_WIDTH)
            .max(MIN_BAR_WIDTH)
    })
}

/// The length of the bar for `kg` on an axis spanning `domain`.
///
/// Every bar is at least one cell long so that the lowest record stays
/// visible.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn bar_length(kg: f64, (low, high): (f64, f64), width: usize) -> usize {
    let span = high - low;
    if span <= 0.0 {
        return width;
    }
    let fraction = ((kg - low) / span).clamp(0.0, 1.0);
    ((fraction * width as f64).round() as usize).max(1)
}
