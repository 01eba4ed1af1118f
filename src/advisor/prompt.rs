//! The instruction sent to the text model.

use crate::domain::WeightRecord;

/// Renders one line per record: date, weight and, if present, the note.
#[must_use]
pub fn data_lines(recent: &[&WeightRecord]) -> String {
    recent
        .iter()
        .map(|record| {
            let line = format!("Date: {}, Weight: {}kg", record.date, record.kg());
            match &record.note {
                Some(note) => format!("{line} (Note: {note})"),
                None => line,
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full prompt for the most recent records of a pet.
#[must_use]
pub fn render(recent: &[&WeightRecord], pet: &str, language: &str) -> String {
    let data = data_lines(recent);
    format!(
        "Analyse the weight history of this {pet}.
Sudden weight changes can be dangerous. A stable weight is good; rapid loss or gain is a warning sign.

Data:
{data}

Reply in JSON with the following fields:
- status: 'healthy' (stable, good), 'warning' (needs attention) or 'unknown'.
- message: a brief observation about the trend (for example \"The weight has been stable over the last few months\").
- recommendation: a short recommendation (for example \"Keep monitoring\" or \"See a vet if the loss continues\").

Write the message and recommendation in {language}."
    )
}
