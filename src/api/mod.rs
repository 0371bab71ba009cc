//! api - Framework-agnostic request handling for the guestbook routes.
//!
//! [`Api`] turns an [`ApiRequest`] (method, optional `:id`, optional JSON
//! body) into an [`ApiResponse`] (status code plus JSON envelope) by calling
//! into the [`SignatureStore`]. The axum transport in [`http`] is a thin
//! wrapper that builds requests from the wire and writes responses back.
//!
//! ## Routes
//!
//! - `GET /signatures` — every signature
//! - `GET /signatures/:id` — one signature, 404 when missing
//! - `POST /signatures` — insert, 400 unless `name` is a string
//! - `PUT /signatures/:id` — merge the body over a signature, 404 when missing
//! - `DELETE /signatures/:id` — remove, 404 when missing
//!
//! Responses use the envelope `{ "status": "success" | "fail" | "error", "data": {...} }`.

mod error;
#[cfg(feature = "http")]
pub mod http;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::warn;

use crate::signature::{NewSignature, SignatureId, SignaturePatch, SignatureStore};

pub use error::ApiError;

/// Envelope status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Fail,
    Error,
}

/// The JSON body of every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn success(data: Option<Value>) -> Self {
        Self {
            status: Status::Success,
            data,
        }
    }
}

impl From<&ApiError> for Envelope {
    fn from(err: &ApiError) -> Self {
        Self {
            status: err.status(),
            data: Some(err.data()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// An inbound request against `/signatures` or `/signatures/:id`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// The raw `:id` path segment, if the path has one.
    pub id: Option<String>,
    /// Parsed JSON body, if one was sent.
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            id: None,
            body: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn path(&self) -> String {
        match &self.id {
            Some(id) => format!("/signatures/{}", id),
            None => "/signatures".to_string(),
        }
    }
}

/// Parse a raw request body. An empty (or all-whitespace) body is no body.
pub fn parse_body(bytes: &[u8]) -> Result<Option<Value>, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
        .map(Some)
        .map_err(|e| ApiError::MalformedBody(e.to_string()))
}

/// The response returned after handling a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// JSON envelope.
    pub body: Value,
}

impl ApiResponse {
    fn success(status: u16, data: Option<Value>) -> Self {
        Self {
            status,
            body: json!(Envelope::success(data)),
        }
    }

    /// Build a fail/error response from an `ApiError`.
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: json!(Envelope::from(err)),
        }
    }

    /// Decode the body back into an envelope.
    pub fn envelope(&self) -> Option<Envelope> {
        serde_json::from_value(self.body.clone()).ok()
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        Self::from_error(&err)
    }
}

impl From<Result<ApiResponse, ApiError>> for ApiResponse {
    fn from(result: Result<ApiResponse, ApiError>) -> Self {
        result.unwrap_or_else(|err| {
            warn!(error = %err, "request rejected");
            err.into()
        })
    }
}

/// Route handlers over a shared signature store.
#[derive(Clone, Default)]
pub struct Api {
    store: SignatureStore,
}

impl Api {
    pub fn new(store: SignatureStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SignatureStore {
        &self.store
    }

    /// Dispatch a request to its route.
    pub fn handle(&self, request: ApiRequest) -> ApiResponse {
        let body = request.body.as_ref();
        match (request.method, request.id.as_deref()) {
            (Method::Get, None) => self.list(),
            (Method::Get, Some(id)) => self.get(id),
            (Method::Post, None) => self.create(body),
            (Method::Put, Some(id)) => self.update(id, body),
            (Method::Delete, Some(id)) => self.delete(id),
            (method, _) => ApiError::UnknownRoute {
                method: method.to_string(),
                path: request.path(),
            }
            .into(),
        }
    }

    /// `GET /signatures`
    pub fn list(&self) -> ApiResponse {
        let signatures = self.store.get_all();
        ApiResponse::success(200, Some(json!({ "signatures": signatures })))
    }

    /// `GET /signatures/:id`
    pub fn get(&self, raw_id: &str) -> ApiResponse {
        let result = parse_id(raw_id)
            .and_then(|id| self.store.find_by_id(id))
            .map(|signature| ApiResponse::success(200, Some(json!({ "signature": signature }))))
            .ok_or_else(|| ApiError::NotFound(raw_id.to_string()));
        result.into()
    }

    /// `POST /signatures`
    pub fn create(&self, body: Option<&Value>) -> ApiResponse {
        let result = new_signature(body).map(|payload| {
            let signature = self.store.insert(&payload);
            ApiResponse::success(201, Some(json!({ "signature": signature })))
        });
        result.into()
    }

    /// `PUT /signatures/:id`
    pub fn update(&self, raw_id: &str, body: Option<&Value>) -> ApiResponse {
        let result = signature_patch(body).and_then(|patch| {
            parse_id(raw_id)
                .and_then(|id| self.store.update_by_id(id, &patch))
                .map(|signature| {
                    ApiResponse::success(200, Some(json!({ "signature": signature })))
                })
                .ok_or_else(|| ApiError::NotFound(raw_id.to_string()))
        });
        result.into()
    }

    /// `DELETE /signatures/:id`
    pub fn delete(&self, raw_id: &str) -> ApiResponse {
        let removed = parse_id(raw_id).is_some_and(|id| self.store.remove_by_id(id));
        let result = if removed {
            Ok(ApiResponse::success(200, None))
        } else {
            Err(ApiError::NotFound(raw_id.to_string()))
        };
        result.into()
    }
}

/// Non-numeric ids can never match a signature.
fn parse_id(raw: &str) -> Option<SignatureId> {
    raw.trim().parse().ok()
}

fn string_field(body: Option<&Value>, field: &str) -> Option<String> {
    body.and_then(|b| b.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// A present, non-null field that is not a string.
fn mistyped_field(body: Option<&Value>, field: &'static str) -> Option<ApiError> {
    match body.and_then(|b| b.get(field)) {
        None | Some(Value::Null) | Some(Value::String(_)) => None,
        Some(_) => Some(ApiError::Validation {
            field,
            message: format!("A string value for {} is required", field),
        }),
    }
}

fn new_signature(body: Option<&Value>) -> Result<NewSignature, ApiError> {
    let name = string_field(body, "name").ok_or_else(ApiError::name_required)?;
    Ok(NewSignature {
        name,
        message: string_field(body, "message"),
    })
}

fn signature_patch(body: Option<&Value>) -> Result<SignaturePatch, ApiError> {
    for field in ["name", "message"] {
        if let Some(err) = mistyped_field(body, field) {
            return Err(err);
        }
    }
    Ok(SignaturePatch {
        name: string_field(body, "name"),
        message: string_field(body, "message"),
    })
}
