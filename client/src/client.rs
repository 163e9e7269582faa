//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`, unwrapping the server's `{success, data}`
//! envelope. The caller executes the round trip in between.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    CreateTodo, ErrorBody, ListEnvelope, MessageEnvelope, ServiceInfo, Todo, TodoEnvelope,
    UpdateTodo,
};

/// Characters that cannot appear raw inside one path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn todo_path(id: &str) -> String {
    format!("/api/todos/{}", utf8_percent_encode(id, PATH_SEGMENT))
}

/// Synchronous, stateless client for the todo API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_service_info(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, "/")
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.bodyless(HttpMethod::Get, "/api/todos")
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, "/api/todos".to_string(), input)
    }

    pub fn build_update_todo(&self, id: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Patch, todo_path(id), input)
    }

    pub fn build_delete_todo(&self, id: &str) -> HttpRequest {
        self.bodyless(HttpMethod::Delete, &todo_path(id))
    }

    pub fn parse_service_info(&self, response: HttpResponse) -> Result<ServiceInfo, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        let envelope: ListEnvelope = decode(&response.body)?;
        ensure_success(envelope.success)?;
        if envelope.count != envelope.data.len() {
            return Err(ApiError::DeserializationError(format!(
                "count {} does not match {} todos",
                envelope.count,
                envelope.data.len()
            )));
        }
        Ok(envelope.data)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        parse_todo(&response.body)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        parse_todo(&response.body)
    }

    /// Returns the server's confirmation message.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<String, ApiError> {
        check_status(&response, 200)?;
        let envelope: MessageEnvelope = decode(&response.body)?;
        ensure_success(envelope.success)?;
        Ok(envelope.message)
    }

    fn bodyless(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: serde::Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

fn parse_todo(body: &str) -> Result<Todo, ApiError> {
    let envelope: TodoEnvelope = decode(body)?;
    ensure_success(envelope.success)?;
    Ok(envelope.data)
}

fn ensure_success(success: bool) -> Result<(), ApiError> {
    if success {
        Ok(())
    } else {
        Err(ApiError::DeserializationError(
            "envelope reports success=false".to_string(),
        ))
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest(message))
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
