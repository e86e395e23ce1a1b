//! Score aggregation for the progress dashboard.
//!
//! Every function here is pure: it reads a snapshot and returns numbers or
//! labels, nothing else. Game percentages are averaged without weighting at
//! both levels, so a three-question quiz counts as much as a twenty-card
//! flashcard duel, and a module with one game counts as much as one with five.

use serde::Serialize;

use crate::model::{CompletedModule, CourseProgress, ModuleId};

/// Modules scoring below this are recommended for review.
pub const DEFAULT_REVIEW_THRESHOLD: u32 = 75;

//
// ─── AGGREGATION ───────────────────────────────────────────────────────────────
//

/// Percentage of correct answers for one game, unrounded.
///
/// A game with no scorable items scores `0`.
#[must_use]
pub fn game_score(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(score) / f64::from(total)) * 100.0
}

/// Rounded mean of the module's game percentages, `0` if nothing was played.
#[must_use]
pub fn module_score(module: &CompletedModule) -> u32 {
    round_mean(
        module
            .game_results
            .iter()
            .map(|result| game_score(result.score, result.total)),
    )
}

/// Rounded mean of the course's module scores, `0` if no module is done.
#[must_use]
pub fn course_score(course: &CourseProgress) -> u32 {
    round_mean(
        course
            .completed_modules()
            .iter()
            .map(|module| f64::from(module_score(module))),
    )
}

/// Half-up rounding of an arithmetic mean; empty input is `0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_mean(values: impl Iterator<Item = f64>) -> u32 {
    let (sum, count) = values.fold((0.0_f64, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0;
    }
    let mean = sum / f64::from(count);
    (mean + 0.5).floor().max(0.0) as u32
}

//
// ─── REVIEW LIST ───────────────────────────────────────────────────────────────
//

/// A module together with its rounded score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleScore {
    pub module_id: ModuleId,
    pub title: String,
    pub score: u32,
}

/// Modules scoring strictly below `threshold`, in course order.
#[must_use]
pub fn low_scoring_modules(course: &CourseProgress, threshold: u32) -> Vec<ModuleScore> {
    course
        .completed_modules()
        .iter()
        .map(|module| ModuleScore {
            module_id: module.module_id.clone(),
            title: module.title.clone(),
            score: module_score(module),
        })
        .filter(|scored| scored.score < threshold)
        .collect()
}

//
// ─── LABELS ────────────────────────────────────────────────────────────────────
//

/// Three-band colour category for a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    /// 80 and above.
    Good,
    /// 60 up to 79.
    Warning,
    /// Below 60.
    Poor,
}

impl ScoreColor {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            80.. => Self::Good,
            60..=79 => Self::Warning,
            _ => Self::Poor,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Poor => "poor",
        }
    }
}

/// Five-band emoji badge for a percentage.
///
/// Bands do not line up with [`ScoreColor`]; the two are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreEmoji {
    Medal,
    Party,
    ThumbsUp,
    Thinking,
    Tired,
}

impl ScoreEmoji {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Medal,
            80..=89 => Self::Party,
            60..=79 => Self::ThumbsUp,
            40..=59 => Self::Thinking,
            _ => Self::Tired,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medal => "🏅",
            Self::Party => "🥳",
            Self::ThumbsUp => "👍",
            Self::Thinking => "🧐",
            Self::Tired => "😓",
        }
    }
}

/// Motivational line shown under a finished course's final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedbackMessage {
    Outstanding,
    WellDone,
    KeepImproving,
    Review,
}

impl FeedbackMessage {
    #[must_use]
    pub fn from_score(score: u32) -> Self {
        match score {
            90.. => Self::Outstanding,
            75..=89 => Self::WellDone,
            60..=74 => Self::KeepImproving,
            _ => Self::Review,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding performance!",
            Self::WellDone => "Well done!",
            Self::KeepImproving => "Good job, keep improving!",
            Self::Review => "Review the material again for better results.",
        }
    }
}

//
// ─── COURSE REPORT ─────────────────────────────────────────────────────────────
//

/// Final-score block for a course: score, its labels and what to revisit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseReport {
    pub score: u32,
    pub color: ScoreColor,
    pub emoji: ScoreEmoji,
    pub feedback: FeedbackMessage,
    pub review: Vec<ModuleScore>,
}

impl CourseReport {
    #[must_use]
    pub fn from_course(course: &CourseProgress, threshold: u32) -> Self {
        let score = course_score(course);
        Self {
            score,
            color: ScoreColor::from_score(score),
            emoji: ScoreEmoji::from_score(score),
            feedback: FeedbackMessage::from_score(score),
            review: low_scoring_modules(course, threshold),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
