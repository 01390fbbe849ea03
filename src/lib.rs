//! Submissions API: validated form submissions stored in PostgreSQL, served over two JSON endpoints.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, ValidationError};
pub use model::{Gender, NewSubmission, Submission};
pub use routes::{app, status_routes, submission_routes};
pub use service::SubmissionService;
pub use state::AppState;
pub use store::{ensure_database_exists, SchemaState, SubmissionStore};
