//! Wire types of the todo API.
//!
//! # Design
//! These mirror the server's JSON but are defined independently, with the id
//! kept as an opaque string. Integration tests catch schema drift between the
//! two crates.

use serde::{Deserialize, Serialize};

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: String,
    pub completed: bool,
    pub body: String,
}

/// Request payload for creating a todo. `completed` is left to the server's
/// default when `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Request payload for patching a todo. Only the fields present in the JSON
/// are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// `GET /` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListEnvelope {
    pub success: bool,
    pub data: Vec<Todo>,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TodoEnvelope {
    pub success: bool,
    pub data: Todo,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MessageEnvelope {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
