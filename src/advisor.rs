//! Natural-language trend assessment.
//!
//! The [`Advisor`] turns the most recent records into a prompt, hands it to a
//! [`TextGenerator`] and reads back an [`Assessment`]. It never fails: with
//! too little data it answers without asking the model, and any problem on the
//! way to or from the model turns into the neutral
//! [`Assessment::unavailable`] reply.

pub mod gemini;
pub mod prompt;

pub use gemini::GeminiClient;

use crate::domain::{normalize, Assessment, Config, WeightRecord};

/// Why an assessment could not be obtained from the model.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// No API key is configured.
    #[error("no API key set (export {})", gemini::API_KEY_VAR)]
    MissingApiKey,

    /// The request failed or was answered with an error status.
    #[error("request failed")]
    Http(#[from] reqwest::Error),

    /// The model answered without any text.
    #[error("the model returned no text")]
    EmptyReply,

    /// The text was not a valid assessment.
    #[error("malformed assessment")]
    Malformed(#[from] serde_json::Error),
}

/// Something that can answer a prompt with text.
pub trait TextGenerator {
    /// Sends `prompt` and returns the reply text.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable reply was received.
    fn generate(&self, prompt: &str) -> Result<String, AdvisorError>;
}

/// Minimum number of records needed to talk about a trend.
pub const MIN_RECORDS: usize = 2;

/// Produces assessments of a weight history.
#[derive(Debug, Clone)]
pub struct Advisor<G> {
    generator: G,
    pet: String,
    language: String,
    sample_size: usize,
}

impl<G: TextGenerator> Advisor<G> {
    /// Creates an advisor using the prompt settings in `config`.
    #[must_use]
    pub fn new(generator: G, config: &Config) -> Self {
        Self {
            generator,
            pet: config.pet.clone(),
            language: config.language.clone(),
            sample_size: config.sample_size(),
        }
    }

    /// Assesses the trend in `records`, which may be in any order.
    ///
    /// Only the most recent records, up to the configured sample size, are
    /// sent to the model.
    pub fn assess(&self, records: &[WeightRecord]) -> Assessment {
        if records.len() < MIN_RECORDS {
            tracing::debug!("Only {} records, not asking the model", records.len());
            return Assessment::insufficient_data();
        }

        let ordered = normalize(records);
        let recent = &ordered[ordered.len().saturating_sub(self.sample_size)..];
        let prompt = prompt::render(recent, &self.pet, &self.language);

        self.request(&prompt).unwrap_or_else(|e| {
            tracing::warn!("Assessment unavailable: {e}");
            Assessment::unavailable()
        })
    }

    fn request(&self, prompt: &str) -> Result<Assessment, AdvisorError> {
        let reply = self.generator.generate(prompt)?;
        let json = strip_code_fence(&reply);
        if json.is_empty() {
            return Err(AdvisorError::EmptyReply);
        }
        Ok(serde_json::from_str(json)?)
    }
}

/// Assesses `records` with the Gemini model named in `config`, taking the API
/// key from the environment.
pub fn assess_with_gemini(config: &Config, records: &[WeightRecord]) -> Assessment {
    if records.len() < MIN_RECORDS {
        return Assessment::insufficient_data();
    }

    match GeminiClient::from_env(config) {
        Ok(client) => Advisor::new(client, config).assess(records),
        Err(e) => {
            tracing::warn!("Assessment unavailable: {e}");
            Assessment::unavailable()
        }
    }
}

/// Removes a surrounding markdown code fence, which some models add even when
/// asked for bare JSON.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map_or(trimmed, str::trim)
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::{Status, Weight};

    /// Replies with a fixed text and remembers what it was asked.
    struct Scripted {
        reply: Option<String>,
        calls: Cell<usize>,
        last_prompt: RefCell<String>,
    }

    impl Scripted {
        fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: None,
                calls: Cell::new(0),
                last_prompt: RefCell::new(String::new()),
            }
        }
    }

    impl TextGenerator for &Scripted {
        fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
            self.calls.set(self.calls.get() + 1);
            *self.last_prompt.borrow_mut() = prompt.to_string();
            self.reply.clone().ok_or(AdvisorError::EmptyReply)
        }
    }

    fn record(id: &str, date: &str, kg: f64) -> WeightRecord {
        WeightRecord {
            id: id.into(),
            date: date.parse::<NaiveDate>().unwrap(),
            weight: Weight::new(kg).unwrap(),
            note: None,
        }
    }

    fn two_records() -> Vec<WeightRecord> {
        vec![
            record("a", "2024-01-01", 5.0),
            record("b", "2024-03-01", 4.5),
        ]
    }

    const HEALTHY: &str =
        r#"{"status":"healthy","message":"Stable weight.","recommendation":"Keep monitoring."}"#;

    #[test]
    fn single_record_does_not_call_the_model() {
        let generator = Scripted::replying(HEALTHY);
        let advisor = Advisor::new(&generator, &Config::default());

        let assessment = advisor.assess(&[record("only", "2024-06-01", 4.0)]);

        assert_eq!(assessment, Assessment::insufficient_data());
        assert_eq!(generator.calls.get(), 0);
    }

    #[test]
    fn no_records_does_not_call_the_model() {
        let generator = Scripted::replying(HEALTHY);
        let advisor = Advisor::new(&generator, &Config::default());

        assert_eq!(advisor.assess(&[]), Assessment::insufficient_data());
        assert_eq!(generator.calls.get(), 0);
    }

    #[test]
    fn parses_model_reply() {
        let generator = Scripted::replying(HEALTHY);
        let advisor = Advisor::new(&generator, &Config::default());

        let assessment = advisor.assess(&two_records());

        assert_eq!(assessment.status, Status::Healthy);
        assert_eq!(assessment.message, "Stable weight.");
        assert_eq!(generator.calls.get(), 1);
    }

    #[test]
    fn fenced_reply_is_accepted() {
        let generator = Scripted::replying(&format!("```json\n{HEALTHY}\n```"));
        let advisor = Advisor::new(&generator, &Config::default());

        assert_eq!(advisor.assess(&two_records()).status, Status::Healthy);
    }

    #[test]
    fn failures_become_the_unavailable_reply() {
        for generator in [
            Scripted::failing(),
            Scripted::replying(""),
            Scripted::replying("the cat looks fine"),
            Scripted::replying(r#"{"status":"healthy"}"#),
            Scripted::replying(r#"{"status":"great","message":"m","recommendation":"r"}"#),
        ] {
            let advisor = Advisor::new(&generator, &Config::default());
            assert_eq!(advisor.assess(&two_records()), Assessment::unavailable());
        }
    }

    #[test]
    fn prompt_holds_only_the_most_recent_sample_in_date_order() {
        let generator = Scripted::replying(HEALTHY);
        let mut config = Config::default();
        config.set_sample_size(3).unwrap();
        let advisor = Advisor::new(&generator, &config);

        let records = vec![
            record("d", "2024-04-01", 4.3),
            record("a", "2024-01-01", 4.0),
            record("c", "2024-03-01", 4.2),
            record("b", "2024-02-01", 4.1),
        ];
        advisor.assess(&records);

        let prompt = generator.last_prompt.borrow();
        assert!(!prompt.contains("2024-01-01"));
        let feb = prompt.find("Date: 2024-02-01, Weight: 4.1kg").unwrap();
        let mar = prompt.find("Date: 2024-03-01, Weight: 4.2kg").unwrap();
        let apr = prompt.find("Date: 2024-04-01, Weight: 4.3kg").unwrap();
        assert!(feb < mar && mar < apr);
    }

    #[test]
    fn code_fence_variants() {
        assert_eq!(strip_code_fence("  {}  "), "{}");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json {}"), "```json {}");
    }

    #[test]
    fn gemini_with_one_record_is_insufficient() {
        let assessment = assess_with_gemini(&Config::default(), &[record("x", "2024-01-01", 4.0)]);
        assert_eq!(assessment, Assessment::insufficient_data());
    }
}
