use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::game::GameResult;
use crate::model::ids::{CourseId, ModuleId};

/// Number of modules every generated course is split into.
pub const MODULES_PER_COURSE: usize = 5;

/// Title shown when a course carries neither a title nor a course name.
pub const UNTITLED_COURSE: &str = "Untitled";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("module {module_id} appears more than once in course {course_id}")]
    DuplicateModule {
        course_id: CourseId,
        module_id: ModuleId,
    },
}

//
// ─── COMPLETED MODULE ──────────────────────────────────────────────────────────
//

/// A learning unit the learner has finished, with every game played in it.
///
/// `game_results` keeps attempt order and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedModule {
    pub module_id: ModuleId,
    pub title: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub game_results: Vec<GameResult>,
}

impl CompletedModule {
    #[must_use]
    pub fn new(module_id: ModuleId, title: impl Into<String>) -> Self {
        Self {
            module_id,
            title: title.into(),
            completed_at: None,
            game_results: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_results(mut self, results: Vec<GameResult>) -> Self {
        self.game_results = results;
        self
    }
}

//
// ─── COURSE PROGRESS ───────────────────────────────────────────────────────────
//

/// A learner's completion state for one course.
///
/// Module ids are unique within a course; insertion order is preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseProgress {
    id: CourseId,
    title: Option<String>,
    course: Option<String>,
    completed_modules: Vec<CompletedModule>,
}

impl CourseProgress {
    /// Creates a course progress record.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::DuplicateModule` if two modules share an id.
    pub fn new(
        id: CourseId,
        title: Option<String>,
        course: Option<String>,
        completed_modules: Vec<CompletedModule>,
    ) -> Result<Self, CourseError> {
        let mut seen = HashSet::with_capacity(completed_modules.len());
        for module in &completed_modules {
            if !seen.insert(&module.module_id) {
                return Err(CourseError::DuplicateModule {
                    course_id: id,
                    module_id: module.module_id.clone(),
                });
            }
        }

        Ok(Self {
            id,
            title,
            course,
            completed_modules,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CourseId {
        &self.id
    }

    #[must_use]
    pub fn completed_modules(&self) -> &[CompletedModule] {
        &self.completed_modules
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&CompletedModule> {
        self.completed_modules.iter().find(|m| &m.module_id == id)
    }

    /// Title to show: `title`, then `course`, then [`UNTITLED_COURSE`].
    ///
    /// Empty strings count as absent; whitespace is shown as is.
    #[must_use]
    pub fn display_title(&self) -> &str {
        [self.title.as_deref(), self.course.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .unwrap_or(UNTITLED_COURSE)
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.completed_modules.len()
    }

    /// Share of the course's modules that are done, rounded, capped at 100.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn completion_percent(&self) -> u32 {
        let completed = self.completed_count().min(MODULES_PER_COURSE);
        ((completed as f64 / MODULES_PER_COURSE as f64) * 100.0).round() as u32
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_count() >= MODULES_PER_COURSE
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
