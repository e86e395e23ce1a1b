//! Wire shapes of the dashboard API and their conversion into domain records.
//!
//! Backend JSON is validated here once; everything past this module works on
//! `learnify_core` types only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use learnify_core::model::{
    CatalogueCourse, CompletedModule, CourseId, CourseProgress, Dashboard, Doubt, GameId,
    GameResult, LearnerProfile, ModuleId, ParseIdError,
};

use crate::error::PayloadError;

fn parse_id<T>(
    raw: String,
    field: &'static str,
    parse: impl FnOnce(String) -> Result<T, ParseIdError>,
) -> Result<T, PayloadError> {
    parse(raw).map_err(|source| PayloadError::InvalidId { field, source })
}

//
// ─── INBOUND ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResultPayload {
    pub game_id: String,
    #[serde(default)]
    pub game_title: String,
    pub score: u32,
    pub total: u32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedModulePayload {
    pub module_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub game_results: Vec<GameResultPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgressPayload {
    pub course_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub course_title: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub completed_modules: Vec<CompletedModulePayload>,
}

/// Body of `GET /dashboard`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub board: String,
    #[serde(default)]
    pub course_modules: Vec<CourseProgressPayload>,
}

/// Body of `GET /dashboard/module/{id}/results`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResultsPayload {
    #[serde(default)]
    pub game_results: Vec<GameResultPayload>,
}

/// One course of `GET /courses`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoursePayload {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub subject: String,
}

/// Body of `GET /courses`: a bare list, or the list wrapped in `data`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CourseListPayload {
    Bare(Vec<CoursePayload>),
    Wrapped { data: Vec<CoursePayload> },
}

impl CourseListPayload {
    #[must_use]
    pub fn into_courses(self) -> Vec<CoursePayload> {
        match self {
            Self::Bare(courses) | Self::Wrapped { data: courses } => courses,
        }
    }
}

/// A stored doubt as the backend returns it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoubtPayload {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of `POST /doubt`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskDoubtResponsePayload {
    #[serde(default)]
    pub doubt: Option<DoubtPayload>,
}

/// Body of `GET /doubts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DoubtHistoryPayload {
    #[serde(default)]
    pub doubts: Vec<DoubtPayload>,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
}

impl TryFrom<GameResultPayload> for GameResult {
    type Error = PayloadError;

    fn try_from(payload: GameResultPayload) -> Result<Self, Self::Error> {
        Ok(GameResult::new(
            parse_id(payload.game_id, "gameId", GameId::new)?,
            payload.game_title,
            payload.score,
            payload.total,
            payload.timestamp,
        ))
    }
}

impl TryFrom<CompletedModulePayload> for CompletedModule {
    type Error = PayloadError;

    fn try_from(payload: CompletedModulePayload) -> Result<Self, Self::Error> {
        let module_id = parse_id(payload.module_id, "moduleId", ModuleId::new)?;
        let results = payload
            .game_results
            .into_iter()
            .map(GameResult::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut module = CompletedModule::new(module_id, payload.title).with_results(results);
        module.completed_at = payload.completed_at;
        Ok(module)
    }
}

impl TryFrom<CourseProgressPayload> for CourseProgress {
    type Error = PayloadError;

    fn try_from(payload: CourseProgressPayload) -> Result<Self, Self::Error> {
        let course_id = parse_id(payload.course_id, "courseId", CourseId::new)?;
        let title = [payload.title, payload.course_title]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty());
        let modules = payload
            .completed_modules
            .into_iter()
            .map(CompletedModule::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CourseProgress::new(course_id, title, payload.course, modules)?)
    }
}

impl TryFrom<CoursePayload> for CatalogueCourse {
    type Error = PayloadError;

    fn try_from(payload: CoursePayload) -> Result<Self, Self::Error> {
        Ok(CatalogueCourse {
            id: parse_id(payload.id, "id", CourseId::new)?,
            title: payload.title,
            description: payload.description,
            grade: payload.grade,
            subject: payload.subject,
        })
    }
}

impl TryFrom<DoubtPayload> for Doubt {
    type Error = PayloadError;

    fn try_from(payload: DoubtPayload) -> Result<Self, Self::Error> {
        let answer = payload
            .answer
            .filter(|a| !a.trim().is_empty())
            .ok_or(PayloadError::MissingAnswer)?;
        Ok(Doubt {
            question: payload.question,
            answer,
            asked_at: payload.created_at,
        })
    }
}

impl TryFrom<DashboardPayload> for Dashboard {
    type Error = PayloadError;

    fn try_from(payload: DashboardPayload) -> Result<Self, Self::Error> {
        let courses = payload
            .course_modules
            .into_iter()
            .map(CourseProgress::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Dashboard::new(
            LearnerProfile {
                name: payload.name,
                grade: payload.grade,
                board: payload.board,
            },
            courses,
        ))
    }
}

//
// ─── OUTBOUND ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRefPayload {
    pub module_id: String,
    pub title: String,
}

/// Body of `POST /dashboard/save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProgressPayload {
    pub course_id: String,
    pub completed_module: ModuleRefPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_result: Option<GameResultPayload>,
}

impl SaveProgressPayload {
    #[must_use]
    pub fn module_completed(course_id: &CourseId, module_id: &ModuleId, title: &str) -> Self {
        Self {
            course_id: course_id.to_string(),
            completed_module: ModuleRefPayload {
                module_id: module_id.to_string(),
                title: title.to_owned(),
            },
            game_result: None,
        }
    }

    #[must_use]
    pub fn with_game_result(mut self, result: &GameResult) -> Self {
        self.game_result = Some(GameResultPayload::from(result));
        self
    }
}

/// One answered item of a game, as the games report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerLogEntry {
    pub question: String,
    pub selected: String,
    pub correct: String,
    pub is_correct: bool,
}

/// Body of `POST /module/{moduleId}/game/{gameId}/submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSubmissionPayload {
    pub score: u32,
    pub total: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub log: Vec<AnswerLogEntry>,
}

impl GameSubmissionPayload {
    #[must_use]
    pub fn new(score: u32, total: u32) -> Self {
        Self {
            score,
            total,
            log: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_log(mut self, log: Vec<AnswerLogEntry>) -> Self {
        self.log = log;
        self
    }
}

/// Body of `PUT /courses/{id}/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkCourseCompletePayload {
    pub course_id: String,
    pub marked_at: DateTime<Utc>,
}

/// Body of `POST /doubt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskDoubtPayload {
    pub question: String,
}

impl From<&GameResult> for GameResultPayload {
    fn from(result: &GameResult) -> Self {
        Self {
            game_id: result.game_id.to_string(),
            game_title: result.game_title.clone(),
            score: result.score,
            total: result.total,
            timestamp: result.timestamp,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
