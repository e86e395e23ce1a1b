//! Course catalogue: every generated course, with completion taken from the
//! dashboard.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use learnify_core::model::{CatalogueCourse, CourseId, Dashboard};

use crate::Clock;
use crate::api::CourseApi;
use crate::error::{CatalogueError, PayloadError};
use crate::payload::MarkCourseCompletePayload;

/// A catalogue course and whether the learner has finished it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueEntry {
    pub course: CatalogueCourse,
    pub completed: bool,
}

impl CatalogueEntry {
    /// Pair every course with its dashboard progress.
    ///
    /// Courses missing from the dashboard count as not completed.
    #[must_use]
    pub fn with_progress(courses: Vec<CatalogueCourse>, dashboard: &Dashboard) -> Vec<Self> {
        courses
            .into_iter()
            .map(|course| {
                let completed = dashboard
                    .course(&course.id)
                    .is_some_and(|progress| progress.is_complete());
                Self { course, completed }
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct CatalogueService {
    api: Arc<dyn CourseApi>,
    clock: Clock,
}

impl CatalogueService {
    #[must_use]
    pub fn new(api: Arc<dyn CourseApi>, clock: Clock) -> Self {
        Self { api, clock }
    }

    /// Fetch and validate the course catalogue.
    ///
    /// # Errors
    ///
    /// Returns `CatalogueError::Api` on request failures and
    /// `CatalogueError::Payload` if a course has no id.
    pub async fn list_courses(&self) -> Result<Vec<CatalogueCourse>, CatalogueError> {
        let courses = self
            .api
            .list_courses()
            .await?
            .into_iter()
            .map(CatalogueCourse::try_from)
            .collect::<Result<Vec<_>, PayloadError>>()?;
        debug!(courses = courses.len(), "catalogue loaded");
        Ok(courses)
    }

    /// Tell the backend the learner finished a course, stamped with the clock.
    ///
    /// # Errors
    ///
    /// Returns `CatalogueError::Api` if the request fails.
    pub async fn mark_complete(&self, course_id: &CourseId) -> Result<(), CatalogueError> {
        let payload = MarkCourseCompletePayload {
            course_id: course_id.to_string(),
            marked_at: self.clock.now(),
        };
        self.api.mark_course_complete(course_id, &payload).await?;
        info!(%course_id, "course marked complete");
        Ok(())
    }
}
