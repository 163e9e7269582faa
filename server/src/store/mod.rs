//! Storage capability behind the HTTP handlers.
//!
//! # Design
//! Handlers talk to a `dyn TodoStore` and never know which backend they run
//! against. Each implementation owns its own concurrency safety: the memory
//! store guards its sequence with an async `RwLock`, the MongoDB store relies
//! on single-document atomicity and the driver's connection pool.
//!
//! "Not found" is not an error at this layer: `update` returns `None` and
//! `delete` returns `false`, and the HTTP layer decides the status code.

mod memory;
mod mongo;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{NewTodo, Todo, TodoId, TodoPatch};

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("mongodb: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("operation timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Short backend label used in logs.
    fn kind(&self) -> &'static str;

    /// Every todo, in the backend's natural order.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Insert a new todo under a freshly allocated id.
    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// Apply `patch` and return the stored result, or `None` when no todo
    /// has this id. An empty patch returns the current record unchanged.
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Option<Todo>, StoreError>;

    /// Remove the todo; `false` when no todo has this id.
    async fn delete(&self, id: TodoId) -> Result<bool, StoreError>;
}
