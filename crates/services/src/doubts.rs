//! Doubt assistant: ask a question, read past answers.

use std::sync::Arc;

use tracing::{info, warn};

use learnify_core::model::{Doubt, MIN_QUESTION_CHARS};

use crate::api::DoubtApi;
use crate::error::{DoubtError, PayloadError};
use crate::payload::AskDoubtPayload;

#[derive(Clone)]
pub struct DoubtService {
    api: Arc<dyn DoubtApi>,
}

impl DoubtService {
    #[must_use]
    pub fn new(api: Arc<dyn DoubtApi>) -> Self {
        Self { api }
    }

    /// Ask the assistant a question.
    ///
    /// # Errors
    ///
    /// Returns `DoubtError::QuestionTooShort` without sending anything if the
    /// trimmed question is too short, `DoubtError::Api` on request failures
    /// and `DoubtError::Payload` if the reply carries no answer.
    pub async fn ask(&self, question: &str) -> Result<Doubt, DoubtError> {
        let question = question.trim();
        if question.chars().count() < MIN_QUESTION_CHARS {
            return Err(DoubtError::QuestionTooShort {
                min: MIN_QUESTION_CHARS,
            });
        }

        let payload = AskDoubtPayload {
            question: question.to_owned(),
        };
        let reply = self
            .api
            .ask_doubt(&payload)
            .await?
            .ok_or(PayloadError::MissingAnswer)?;
        let mut doubt = Doubt::try_from(reply)?;
        if doubt.question.is_empty() {
            doubt.question = payload.question;
        }
        info!("doubt answered");
        Ok(doubt)
    }

    /// Every answered doubt, in the order the backend sends them.
    ///
    /// Entries still waiting for an answer are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DoubtError::Api` on request failures.
    pub async fn history(&self) -> Result<Vec<Doubt>, DoubtError> {
        let doubts = self
            .api
            .fetch_doubts()
            .await?
            .into_iter()
            .filter_map(|raw| match Doubt::try_from(raw) {
                Ok(doubt) => Some(doubt),
                Err(err) => {
                    warn!(error = %err, "skipping unanswered doubt");
                    None
                }
            })
            .collect();
        Ok(doubts)
    }
}
