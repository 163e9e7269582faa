//! Fetch a single todo document from a remote endpoint and decode it
//! strictly: unknown or missing fields are errors, not silently dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub const DEFAULT_URL: &str = "https://jsonplaceholder.typicode.com/todos/1/";

/// The remote document shape, e.g.
/// `{"userId":1,"id":1,"title":"...","completed":false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteTodo {
    #[serde(rename = "userId")]
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    #[error("decoder error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub fn build_fetch(url: &str) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        path: url.to_string(),
        headers: vec![("accept".to_string(), "application/json".to_string())],
        body: None,
    }
}

/// Decode the body of a 200 response; any other status is an error.
pub fn parse_fetch(response: HttpResponse) -> Result<RemoteTodo, FetchError> {
    if response.status != 200 {
        return Err(FetchError::Status {
            status: response.status,
            body: response.body,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}
