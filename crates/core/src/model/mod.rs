mod catalogue;
mod client_settings;
mod course;
mod dashboard;
mod doubt;
mod game;
mod ids;

pub use ids::{CourseId, GameId, ModuleId, ParseIdError};

pub use catalogue::CatalogueCourse;
pub use client_settings::{
    ClientSettings, ClientSettingsDraft, ClientSettingsError, DEFAULT_API_BASE_URL,
};
pub use course::{CompletedModule, CourseError, CourseProgress, MODULES_PER_COURSE, UNTITLED_COURSE};
pub use dashboard::{Dashboard, LearnerProfile};
pub use doubt::{Doubt, MIN_QUESTION_CHARS};
pub use game::GameResult;
