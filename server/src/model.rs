//! Todo domain types and the validation rules shared by every store.
//!
//! # Design
//! Request payloads (`CreateTodo`, `UpdateTodo`) are deserialized as-is and
//! then converted with `TryFrom` into their validated counterparts
//! (`NewTodo`, `TodoPatch`). Stores only ever see validated values, so the
//! "body must not be empty" rule lives in exactly one place for create and
//! update alike.
//!
//! Identifiers are document-store object ids. They are allocated by the
//! server (never taken from a payload) and travel over JSON as 24-character
//! hex strings.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Server-assigned identifier of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Allocate a fresh id. Allocation goes through the object-id generator's
    /// process-wide atomic counter, so concurrent callers never collide.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for TodoId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// The path segment was not a valid todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid todo ID")]
pub struct InvalidTodoId;

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|_| InvalidTodoId)
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// A single todo item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub completed: bool,
    pub body: String,
}

/// Create payload exactly as received. A missing `body` deserializes to the
/// empty string so it is reported by validation rather than by the parser.
/// Unknown keys, `id` included, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTodo {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub completed: bool,
}

/// Patch payload exactly as received. Only the keys present are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTodo {
    pub body: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Todo body is required")]
    EmptyBody,
    #[error("Todo body cannot be empty")]
    EmptyPatchBody,
}

/// A create payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    body: String,
    completed: bool,
}

impl NewTodo {
    pub fn new(body: impl Into<String>) -> Result<Self, ValidationError> {
        Self::try_from(CreateTodo {
            body: body.into(),
            completed: false,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Attach the identifier allocated by a store.
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            completed: self.completed,
            body: self.body,
        }
    }
}

impl TryFrom<CreateTodo> for NewTodo {
    type Error = ValidationError;

    fn try_from(input: CreateTodo) -> Result<Self, Self::Error> {
        if input.body.is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        Ok(Self {
            body: input.body,
            completed: input.completed,
        })
    }
}

/// A sparse set of field assignments that passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    body: Option<String>,
    completed: Option<bool>,
}

impl TodoPatch {
    pub fn set_completed(completed: bool) -> Self {
        Self {
            body: None,
            completed: Some(completed),
        }
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn completed(&self) -> Option<bool> {
        self.completed
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_none() && self.completed.is_none()
    }

    pub fn apply(&self, todo: &mut Todo) {
        if let Some(body) = &self.body {
            todo.body.clone_from(body);
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

impl TryFrom<UpdateTodo> for TodoPatch {
    type Error = ValidationError;

    fn try_from(input: UpdateTodo) -> Result<Self, Self::Error> {
        if input.body.as_deref() == Some("") {
            return Err(ValidationError::EmptyPatchBody);
        }
        Ok(Self {
            body: input.body,
            completed: input.completed,
        })
    }
}
