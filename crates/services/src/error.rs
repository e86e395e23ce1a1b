//! Shared error types for the services crate.

use thiserror::Error;

use learnify_core::model::{ClientSettingsError, CourseError, CourseId, ModuleId, ParseIdError};

/// Errors raised while turning wire payloads into domain records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PayloadError {
    #[error("invalid {field}: {source}")]
    InvalidId {
        field: &'static str,
        #[source]
        source: ParseIdError,
    },
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error("no answer received")]
    MissingAnswer,
}

/// Errors emitted by `AuthSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AuthError {
    #[error("auth token cannot be empty")]
    EmptyToken,
}

/// Errors emitted by dashboard API clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("missing auth token")]
    MissingToken,
    #[error("{message} (status {status})")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error("course {0} is not on the dashboard")]
    UnknownCourse(CourseId),
    #[error("course {0} is not finished yet")]
    CourseNotComplete(CourseId),
    #[error("no course on the dashboard has completed module {0}")]
    UnknownModule(ModuleId),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Errors emitted by `CatalogueService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogueError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Errors emitted by `DoubtService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DoubtError {
    #[error("question must be at least {min} characters")]
    QuestionTooShort { min: usize },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

/// Errors emitted while reading client configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{var} must be a whole number, got {raw:?}")]
    NotANumber { var: &'static str, raw: String },
    #[error(transparent)]
    Settings(#[from] ClientSettingsError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
