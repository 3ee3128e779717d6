use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-call request configuration. Every field is optional.
///
/// `headers: None` means "not specified": the helper injects a JSON
/// content-type header. `Some(map)` is sent exactly as given, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOptions {
    pub method: Option<String>,
    pub body: Option<String>,
    pub headers: Option<HashMap<String, String>>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the request body.
    pub fn json_body<T: Serialize + ?Sized>(mut self, value: &T) -> serde_json::Result<Self> {
        self.body = Some(serde_json::to_string(value)?);
        Ok(self)
    }

    /// Adds one header, switching `headers` from "not specified" to specified.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = Some(headers);
        self
    }
}

/// A request as plain data, handed to the fetch port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// A fully-read response as plain data, returned by the fetch port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// The decoded body of a response: parsed JSON or raw text, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiValue {
    Json(serde_json::Value),
    Text(String),
}

impl ApiValue {
    pub fn is_json(&self) -> bool {
        matches!(self, ApiValue::Json(_))
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            ApiValue::Json(value) => Some(value),
            ApiValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ApiValue::Text(text) => Some(text),
            ApiValue::Json(_) => None,
        }
    }

    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            ApiValue::Json(value) => Some(value),
            ApiValue::Text(_) => None,
        }
    }
}

impl fmt::Display for ApiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiValue::Json(value) => write!(f, "{}", value),
            ApiValue::Text(text) => f.write_str(text),
        }
    }
}
