use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shortest question the doubt assistant accepts, in characters.
pub const MIN_QUESTION_CHARS: usize = 3;

/// A question the learner asked and the answer it got.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Doubt {
    pub question: String,
    pub answer: String,
    pub asked_at: Option<DateTime<Utc>>,
}
