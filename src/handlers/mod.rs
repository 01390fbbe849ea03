//! HTTP handlers for the submission endpoints.

pub mod submission;
pub use submission::*;
