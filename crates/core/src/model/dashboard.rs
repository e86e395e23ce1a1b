use serde::Serialize;

use crate::model::course::CourseProgress;
use crate::model::ids::{CourseId, ModuleId};

/// Profile fields shown at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LearnerProfile {
    pub name: String,
    pub grade: String,
    pub board: String,
}

/// Everything the backend knows about a learner's progress.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Dashboard {
    pub learner: LearnerProfile,
    pub courses: Vec<CourseProgress>,
}

impl Dashboard {
    #[must_use]
    pub fn new(learner: LearnerProfile, courses: Vec<CourseProgress>) -> Self {
        Self { learner, courses }
    }

    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<&CourseProgress> {
        self.courses.iter().find(|c| c.id() == id)
    }

    /// First course that has already completed `module_id`.
    #[must_use]
    pub fn course_for_module(&self, module_id: &ModuleId) -> Option<&CourseProgress> {
        self.courses
            .iter()
            .find(|c| c.module(module_id).is_some())
    }

    /// Drops a course from the snapshot, returning it if present.
    pub fn remove_course(&mut self, id: &CourseId) -> Option<CourseProgress> {
        let index = self.courses.iter().position(|c| c.id() == id)?;
        Some(self.courses.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompletedModule;

    fn course(id: &str) -> CourseProgress {
        CourseProgress::new(CourseId::new(id).unwrap(), None, None, Vec::new()).unwrap()
    }

    fn course_with(id: &str, modules: &[&str]) -> CourseProgress {
        let modules = modules
            .iter()
            .map(|m| CompletedModule::new(ModuleId::new(*m).unwrap(), format!("Module {m}")))
            .collect();
        CourseProgress::new(CourseId::new(id).unwrap(), None, None, modules).unwrap()
    }

    #[test]
    fn course_for_module_finds_the_owning_course() {
        let dashboard = Dashboard::new(
            LearnerProfile::default(),
            vec![course_with("a", &["m1"]), course_with("b", &["m2", "m3"])],
        );
        let owner = dashboard.course_for_module(&ModuleId::new("m3").unwrap());
        assert_eq!(owner.map(|c| c.id().as_str()), Some("b"));
        assert!(dashboard.course_for_module(&ModuleId::new("m9").unwrap()).is_none());
    }

    #[test]
    fn remove_course_keeps_order_of_the_rest() {
        let mut dashboard = Dashboard::new(
            LearnerProfile::default(),
            vec![course("a"), course("b"), course("c")],
        );
        let removed = dashboard.remove_course(&CourseId::new("b").unwrap());
        assert_eq!(removed.map(|c| c.id().to_string()), Some("b".into()));
        let ids: Vec<_> = dashboard.courses.iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert!(dashboard.remove_course(&CourseId::new("zz").unwrap()).is_none());
    }
}
