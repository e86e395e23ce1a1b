mod greeting;
mod overview;
mod service;

// Public API of the dashboard subsystem.
pub use crate::error::DashboardError;
pub use greeting::{COURSE_HEADINGS, GREETINGS, pick_greeting, pick_heading};
pub use overview::{CourseOverview, DashboardOverview, ModuleOverview};
pub use service::DashboardService;
