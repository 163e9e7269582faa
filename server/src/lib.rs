//! HTTP resource service for todo items.
//!
//! # Overview
//! An Axum router exposing list / create / patch / delete under `/api/todos`
//! on top of a pluggable `TodoStore` (in-memory or MongoDB).
//!
//! # Design
//! - Handlers perform exactly one store call each, bounded by the per-request
//!   timeout held in `AppState`. A timeout is reported like any other storage
//!   failure; nothing is retried.
//! - Every failure leaves the handler as an `ApiError` and is rendered as a
//!   JSON `{"error": ...}` body.
//! - Ids are allocated by the store, never read from a payload.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::{get, patch};
use axum::Router;
use tokio::net::TcpListener;

pub use config::{Config, StoreKind};
pub use error::ApiError;
pub use model::{CreateTodo, NewTodo, Todo, TodoId, TodoPatch, UpdateTodo};
pub use store::{MemoryStore, MongoStore, StoreError, TodoStore};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared router state: the store and the per-request timeout.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TodoStore>,
    timeout: Duration,
}

impl AppState {
    pub fn new(store: Arc<dyn TodoStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Fresh in-memory store with the default timeout.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), DEFAULT_TIMEOUT)
    }

    pub fn store(&self) -> &dyn TodoStore {
        self.store.as_ref()
    }

    /// Run one store operation under the per-request timeout.
    pub async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| StoreError::Timeout(self.timeout))?
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route(
            "/api/todos",
            get(routes::list_todos).post(routes::create_todo),
        )
        .route(
            "/api/todos/{id}",
            patch(routes::update_todo).delete(routes::delete_todo),
        )
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::method_not_allowed)
        .with_state(state)
}

/// Serve `app` until `shutdown` resolves; in-flight requests are drained.
pub async fn run(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
