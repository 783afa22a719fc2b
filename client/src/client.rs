//! Stateless HTTP request builder and response parser for the to-do API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Todo, TodoPayload};

const TODOS_PATH: &str = "/api/todos";

/// Synchronous, stateless client for the to-do API.
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

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{TODOS_PATH}/list"))
    }

    pub fn build_list_todos_by_priority(&self, priority: i32) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{TODOS_PATH}/list/{priority}"))
    }

    pub fn build_get_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{TODOS_PATH}/{id}"))
    }

    pub fn build_add_todo(&self, input: &TodoPayload) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, TODOS_PATH.to_string(), input)
    }

    pub fn build_update_todo(&self, id: i64, input: &TodoPayload) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Patch, format!("{TODOS_PATH}/{id}"), input)
    }

    pub fn build_replace_todo(&self, id: i64, input: &TodoPayload) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, format!("{TODOS_PATH}/{id}"), input)
    }

    pub fn build_remove_todo(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, format!("{TODOS_PATH}/{id}"))
    }

    /// Parses both the full list and the priority-filtered list.
    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    /// Returns the id assigned to the new to-do.
    pub fn parse_add_todo(&self, response: HttpResponse) -> Result<i64, ApiError> {
        check_status(&response, 201)?;
        location_id(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    /// Returns the id of the replacement. It differs from the id the
    /// request was sent to.
    pub fn parse_replace_todo(&self, response: HttpResponse) -> Result<i64, ApiError> {
        check_status(&response, 204)?;
        location_id(&response)
    }

    pub fn parse_remove_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request(
        &self,
        method: HttpMethod,
        path: String,
        input: &TodoPayload,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut request = self.request(method, path);
        request.headers.push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::BadRequest(response.body.clone())),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

/// Id from the last path segment of the `Location` header.
fn location_id(response: &HttpResponse) -> Result<i64, ApiError> {
    response
        .header("location")
        .and_then(|location| location.trim_end_matches('/').rsplit('/').next())
        .and_then(|segment| segment.parse().ok())
        .ok_or(ApiError::MissingLocation)
}
