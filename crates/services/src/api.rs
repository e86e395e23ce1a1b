use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};

use learnify_core::model::{ClientSettings, CourseId, GameId, ModuleId};

use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::payload::{
    AskDoubtPayload, AskDoubtResponsePayload, CourseListPayload, CoursePayload, DashboardPayload,
    DoubtHistoryPayload, DoubtPayload, ErrorPayload, GameResultPayload, GameSubmissionPayload,
    MarkCourseCompletePayload, ModuleResultsPayload, SaveProgressPayload,
};

/// Remote dashboard and game endpoints.
///
/// Implementations return wire payloads; validation happens in the caller.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Fetch the full dashboard for the logged-in learner.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn fetch_dashboard(&self) -> Result<DashboardPayload, ApiError>;

    /// Record a finished module, optionally with the game result that finished it.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn save_progress(&self, payload: &SaveProgressPayload) -> Result<(), ApiError>;

    /// Hand a finished play-through to the game backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn submit_game(
        &self,
        module_id: &ModuleId,
        game_id: &GameId,
        submission: &GameSubmissionPayload,
    ) -> Result<(), ApiError>;

    /// Fetch every game result recorded for a module of a course.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn fetch_module_results(
        &self,
        module_id: &ModuleId,
        course_id: &CourseId,
    ) -> Result<Vec<GameResultPayload>, ApiError>;

    /// Delete a course and its progress.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn delete_course(&self, course_id: &CourseId) -> Result<(), ApiError>;
}

/// Course catalogue endpoints.
#[async_trait]
pub trait CourseApi: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn list_courses(&self) -> Result<Vec<CoursePayload>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn mark_course_complete(
        &self,
        course_id: &CourseId,
        payload: &MarkCourseCompletePayload,
    ) -> Result<(), ApiError>;
}

/// Doubt assistant endpoints.
#[async_trait]
pub trait DoubtApi: Send + Sync {
    /// Ask a question; the backend answers it and stores the pair.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn ask_doubt(&self, payload: &AskDoubtPayload) -> Result<Option<DoubtPayload>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on missing auth, transport, or server failures.
    async fn fetch_doubts(&self) -> Result<Vec<DoubtPayload>, ApiError>;
}

/// `reqwest`-backed client for the Learnify REST API.
#[derive(Clone, Debug)]
pub struct HttpLearnifyApi {
    client: Client,
    settings: ClientSettings,
    session: AuthSession,
}

impl HttpLearnifyApi {
    #[must_use]
    pub fn new(settings: ClientSettings, session: AuthSession) -> Self {
        Self {
            client: Client::new(),
            settings,
            session,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let token = self.session.token().ok_or(ApiError::MissingToken)?;
        Ok(request.bearer_auth(token))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        fallback: &'static str,
    ) -> Result<Response, ApiError> {
        let response = self.authorized(request)?.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "learnify api response");
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(raw) => server_message(status, &raw),
            Err(err) => {
                warn!(%status, error = %err, "unreadable error body from learnify api");
                None
            }
        };

        Err(ApiError::Server {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| fallback.to_owned()),
        })
    }
}

/// The `message` of an error body, if it has a non-blank one.
fn server_message(status: StatusCode, raw: &str) -> Option<String> {
    match serde_json::from_str::<ErrorPayload>(raw) {
        Ok(body) => body.message.filter(|m| !m.trim().is_empty()),
        Err(_) => {
            warn!(%status, body = %raw, "non-JSON error body from learnify api");
            None
        }
    }
}

#[async_trait]
impl DashboardApi for HttpLearnifyApi {
    async fn fetch_dashboard(&self) -> Result<DashboardPayload, ApiError> {
        let request = self.client.get(self.settings.endpoint("dashboard"));
        let response = self.send(request, "Failed to fetch dashboard").await?;
        Ok(response.json().await?)
    }

    async fn save_progress(&self, payload: &SaveProgressPayload) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.settings.endpoint("dashboard/save"))
            .json(payload);
        self.send(request, "Failed to save dashboard progress")
            .await?;
        Ok(())
    }

    async fn submit_game(
        &self,
        module_id: &ModuleId,
        game_id: &GameId,
        submission: &GameSubmissionPayload,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .post(
                self.settings
                    .endpoint(&format!("module/{module_id}/game/{game_id}/submit")),
            )
            .json(submission);
        self.send(request, "Failed to submit game result").await?;
        Ok(())
    }

    async fn fetch_module_results(
        &self,
        module_id: &ModuleId,
        course_id: &CourseId,
    ) -> Result<Vec<GameResultPayload>, ApiError> {
        let request = self
            .client
            .get(
                self.settings
                    .endpoint(&format!("dashboard/module/{module_id}/results")),
            )
            .query(&[("courseId", course_id.as_str())]);
        let response = self
            .send(request, "Failed to fetch module game results")
            .await?;
        let body: ModuleResultsPayload = response.json().await?;
        Ok(body.game_results)
    }

    async fn delete_course(&self, course_id: &CourseId) -> Result<(), ApiError> {
        let request = self
            .client
            .delete(self.settings.endpoint(&format!("courses/{course_id}")));
        self.send(request, "Failed to delete course").await?;
        Ok(())
    }
}

#[async_trait]
impl CourseApi for HttpLearnifyApi {
    async fn list_courses(&self) -> Result<Vec<CoursePayload>, ApiError> {
        let request = self.client.get(self.settings.endpoint("courses"));
        let response = self.send(request, "Failed to fetch courses").await?;
        let body: CourseListPayload = response.json().await?;
        Ok(body.into_courses())
    }

    async fn mark_course_complete(
        &self,
        course_id: &CourseId,
        payload: &MarkCourseCompletePayload,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(
                self.settings
                    .endpoint(&format!("courses/{course_id}/complete")),
            )
            .json(payload);
        self.send(request, "Failed to mark course complete").await?;
        Ok(())
    }
}

#[async_trait]
impl DoubtApi for HttpLearnifyApi {
    async fn ask_doubt(&self, payload: &AskDoubtPayload) -> Result<Option<DoubtPayload>, ApiError> {
        let request = self
            .client
            .post(self.settings.endpoint("doubt"))
            .json(payload);
        let response = self.send(request, "Failed to get answer").await?;
        let body: AskDoubtResponsePayload = response.json().await?;
        Ok(body.doubt)
    }

    async fn fetch_doubts(&self) -> Result<Vec<DoubtPayload>, ApiError> {
        let request = self.client.get(self.settings.endpoint("doubts"));
        let response = self.send(request, "Failed to load doubts").await?;
        let body: DoubtHistoryPayload = response.json().await?;
        Ok(body.doubts)
    }
}
