use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, warn};

use learnify_core::model::{
    ClientSettings, CourseId, CourseProgress, Dashboard, GameId, GameResult, ModuleId,
};

use super::greeting::{pick_greeting, pick_heading};
use super::overview::DashboardOverview;
use crate::Clock;
use crate::api::DashboardApi;
use crate::error::{DashboardError, PayloadError};
use crate::payload::{GameSubmissionPayload, SaveProgressPayload};

/// Dashboard facade: fetches progress, validates it and hands back overviews.
///
/// This service owns:
/// - the time source (`Clock`) used to stamp new game results
/// - the review threshold
/// - API access
///
/// It does **not** own presentation.
#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn DashboardApi>,
    clock: Clock,
    review_threshold: u32,
}

impl DashboardService {
    #[must_use]
    pub fn new(api: Arc<dyn DashboardApi>, clock: Clock, review_threshold: u32) -> Self {
        Self {
            api,
            clock,
            review_threshold,
        }
    }

    #[must_use]
    pub fn from_settings(
        api: Arc<dyn DashboardApi>,
        clock: Clock,
        settings: &ClientSettings,
    ) -> Self {
        Self::new(api, clock, settings.review_threshold())
    }

    #[must_use]
    pub fn review_threshold(&self) -> u32 {
        self.review_threshold
    }

    /// Fetch and validate the learner's dashboard.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` on request failures and
    /// `DashboardError::Payload` if the response is malformed.
    pub async fn load_dashboard(&self) -> Result<Dashboard, DashboardError> {
        let payload = self.api.fetch_dashboard().await?;
        let dashboard = Dashboard::try_from(payload).map_err(|err| {
            warn!(error = %err, "rejected dashboard payload");
            err
        })?;
        debug!(courses = dashboard.courses.len(), "dashboard loaded");
        Ok(dashboard)
    }

    /// Fetch the dashboard and aggregate it into an overview.
    ///
    /// # Errors
    ///
    /// Same as [`DashboardService::load_dashboard`].
    pub async fn load_overview<R: Rng + Send + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<DashboardOverview, DashboardError> {
        let dashboard = self.load_dashboard().await?;
        Ok(self.overview(&dashboard, rng))
    }

    /// Aggregate an already loaded dashboard.
    #[must_use]
    pub fn overview<R: Rng + ?Sized>(
        &self,
        dashboard: &Dashboard,
        rng: &mut R,
    ) -> DashboardOverview {
        let greeting = pick_greeting(&dashboard.learner.name, rng);
        let heading = pick_heading(rng);
        DashboardOverview::build(dashboard, self.review_threshold, greeting, heading)
    }

    /// Mark a module as finished without a game result.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` if the save fails.
    pub async fn mark_module_completed(
        &self,
        course_id: &CourseId,
        module_id: &ModuleId,
        title: &str,
    ) -> Result<(), DashboardError> {
        let payload = SaveProgressPayload::module_completed(course_id, module_id, title);
        self.api.save_progress(&payload).await?;
        info!(%course_id, %module_id, "module marked completed");
        Ok(())
    }

    /// Submit a finished game and record it on the dashboard.
    ///
    /// The game backend gets the submission first. The owning course and the
    /// module title are then looked up on a fresh dashboard, so the module must
    /// already be marked completed. The saved result is stamped with the
    /// service clock.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::UnknownModule` if no course has completed the
    /// module, `DashboardError::Api` on request failures and
    /// `DashboardError::Payload` if the dashboard is malformed.
    pub async fn submit_game(
        &self,
        module_id: &ModuleId,
        game_id: GameId,
        game_title: &str,
        submission: &GameSubmissionPayload,
    ) -> Result<GameResult, DashboardError> {
        self.api.submit_game(module_id, &game_id, submission).await?;
        debug!(%module_id, %game_id, "game submitted");

        let dashboard = self.load_dashboard().await?;
        let Some((course_id, module_title)) =
            dashboard.course_for_module(module_id).and_then(|course| {
                course
                    .module(module_id)
                    .map(|module| (course.id().clone(), module.title.clone()))
            })
        else {
            warn!(%module_id, "submitted game for a module no course has completed");
            return Err(DashboardError::UnknownModule(module_id.clone()));
        };

        let result = GameResult::new(
            game_id,
            game_title,
            submission.score,
            submission.total,
            self.clock.now(),
        );
        let payload = SaveProgressPayload::module_completed(&course_id, module_id, &module_title)
            .with_game_result(&result);
        self.api.save_progress(&payload).await?;
        info!(
            %course_id,
            %module_id,
            game_id = %result.game_id,
            score = result.score,
            total = result.total,
            "game result recorded"
        );
        Ok(result)
    }

    /// Fetch and validate every game result of a module.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::Api` on request failures and
    /// `DashboardError::Payload` if any result is malformed.
    pub async fn module_results(
        &self,
        module_id: &ModuleId,
        course_id: &CourseId,
    ) -> Result<Vec<GameResult>, DashboardError> {
        let raw = self.api.fetch_module_results(module_id, course_id).await?;
        let results = raw
            .into_iter()
            .map(GameResult::try_from)
            .collect::<Result<Vec<_>, PayloadError>>()?;
        Ok(results)
    }

    /// Delete a finished course and drop it from the local snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::UnknownCourse` if the snapshot has no such
    /// course and `DashboardError::CourseNotComplete` for unfinished courses;
    /// no request is made in either case. Returns `DashboardError::Api` if the
    /// delete fails, leaving the snapshot untouched.
    pub async fn delete_course(
        &self,
        dashboard: &mut Dashboard,
        course_id: &CourseId,
    ) -> Result<CourseProgress, DashboardError> {
        let course = dashboard
            .course(course_id)
            .ok_or_else(|| DashboardError::UnknownCourse(course_id.clone()))?;
        if !course.is_complete() {
            return Err(DashboardError::CourseNotComplete(course_id.clone()));
        }

        self.api.delete_course(course_id).await?;
        info!(%course_id, "course deleted");
        dashboard
            .remove_course(course_id)
            .ok_or_else(|| DashboardError::UnknownCourse(course_id.clone()))
    }
}
