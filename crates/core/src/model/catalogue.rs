use serde::Serialize;

use crate::model::ids::CourseId;

/// A generated course as listed in the course catalogue.
///
/// Progress lives on the dashboard; this is only the course's description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueCourse {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub grade: String,
    pub subject: String,
}
