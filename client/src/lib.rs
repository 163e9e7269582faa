//! Synchronous client core for the todo service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The caller executes the
//! actual HTTP round trip, which keeps this crate deterministic and testable.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`.
//! - Each API operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `fetch` applies the same split to a single remote todo document, decoded
//!   with unknown fields rejected.

pub mod client;
pub mod error;
pub mod fetch;
pub mod http;
pub mod types;

pub use client::TodoClient;
pub use error::ApiError;
pub use fetch::{build_fetch, parse_fetch, FetchError, RemoteTodo};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{CreateTodo, ServiceInfo, Todo, UpdateTodo};
