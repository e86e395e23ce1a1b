#![forbid(unsafe_code)]

pub mod api;
pub mod auth;
pub mod catalogue;
pub mod config;
pub mod dashboard;
pub mod doubts;
pub mod error;
pub mod payload;

pub use learnify_core::Clock;

pub use api::{CourseApi, DashboardApi, DoubtApi, HttpLearnifyApi};
pub use auth::AuthSession;
pub use catalogue::{CatalogueEntry, CatalogueService};
pub use config::ClientConfig;
pub use doubts::DoubtService;
pub use error::{
    ApiError, AuthError, CatalogueError, ConfigError, DashboardError, DoubtError, PayloadError,
};

pub use dashboard::{CourseOverview, DashboardOverview, DashboardService, ModuleOverview};
