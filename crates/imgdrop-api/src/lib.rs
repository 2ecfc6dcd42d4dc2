//! imgdrop API Library
//!
//! This crate provides the HTTP handlers, middleware, and application setup.

mod handlers;
mod middleware;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod response;
pub mod services;
pub mod setup;
pub mod state;

pub use error::HttpAppError;
pub use response::ApiResponse;
pub use services::cleanup::CleanupTasks;
pub use state::AppState;
