//! Task module
//!
//! This module contains the task model, its queries and the stores that
//! keep tasks and push live query results.

mod file_store;
mod live;
mod memory_store;
mod model;
mod query;
mod repository;
mod table;

pub use file_store::FileTaskStore;
pub use live::LiveQuery;
pub use memory_store::InMemoryTaskStore;
pub use model::*;
pub use query::TaskQuery;
pub use repository::TaskRepository;
