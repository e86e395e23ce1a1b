use serde::Serialize;

use learnify_core::model::{
    CompletedModule, CourseId, CourseProgress, Dashboard, GameResult, LearnerProfile, ModuleId,
    MODULES_PER_COURSE,
};
use learnify_core::scoring::{CourseReport, module_score};

/// Presentation-agnostic dashboard.
///
/// No markup and no localisation; a front end decides how to draw the
/// progress bar or format timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub learner: LearnerProfile,
    pub greeting: String,
    pub heading: String,
    pub total_courses: usize,
    pub courses: Vec<CourseOverview>,
}

/// One course card.
///
/// `report` is only filled once every module is done; before that the card
/// lists the modules and their games instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseOverview {
    pub course_id: CourseId,
    pub title: String,
    pub completed_modules: usize,
    pub expected_modules: usize,
    pub completion_percent: u32,
    pub is_complete: bool,
    pub report: Option<CourseReport>,
    pub modules: Vec<ModuleOverview>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleOverview {
    pub module_id: ModuleId,
    pub title: String,
    pub score: u32,
    pub games: Vec<GameResult>,
}

impl ModuleOverview {
    #[must_use]
    pub fn from_module(module: &CompletedModule) -> Self {
        Self {
            module_id: module.module_id.clone(),
            title: module.title.clone(),
            score: module_score(module),
            games: module.game_results.clone(),
        }
    }
}

impl CourseOverview {
    #[must_use]
    pub fn from_course(course: &CourseProgress, review_threshold: u32) -> Self {
        let is_complete = course.is_complete();
        Self {
            course_id: course.id().clone(),
            title: course.display_title().to_owned(),
            completed_modules: course.completed_count(),
            expected_modules: MODULES_PER_COURSE,
            completion_percent: course.completion_percent(),
            is_complete,
            report: is_complete.then(|| CourseReport::from_course(course, review_threshold)),
            modules: course
                .completed_modules()
                .iter()
                .map(ModuleOverview::from_module)
                .collect(),
        }
    }
}

impl DashboardOverview {
    #[must_use]
    pub fn build(
        dashboard: &Dashboard,
        review_threshold: u32,
        greeting: String,
        heading: &str,
    ) -> Self {
        Self {
            learner: dashboard.learner.clone(),
            greeting,
            heading: heading.to_owned(),
            total_courses: dashboard.courses.len(),
            courses: dashboard
                .courses
                .iter()
                .map(|course| CourseOverview::from_course(course, review_threshold))
                .collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
