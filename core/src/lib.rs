//! Core library for Taskify
//!
//! This crate contains the reactive task store and everything the
//! presentation layer talks to:
//! - Task model, queries and live subscriptions
//! - File-backed and in-memory stores
//! - The task service and the presentation state controller
//! - List reconciliation for incremental rendering

pub mod controller;
pub mod diff;
pub mod error;
pub mod service;
pub mod task;

pub use controller::{ControllerConfig, OperationOutcome, SearchResults, TaskController};
pub use error::Error;
pub use service::TaskService;
pub type Result<T> = std::result::Result<T, Error>;
