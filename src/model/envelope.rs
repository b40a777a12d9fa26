use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title of the single error returned for unauthenticated requests.
pub static FORBIDDEN_TITLE: &str = "Доступ запрещен";

/// One entry of the envelope `errors` array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Numeric error code, mirrors the HTTP status
    pub code: i64,
    /// Human readable summary
    pub title: String,
    /// Longer explanation, usually empty
    #[serde(default)]
    pub detail: String,
    /// Field name to message map for validation errors, empty object otherwise
    #[serde(default)]
    pub data: Value,
}

impl ApiError {
    /// The error returned when a request carries no valid authentication.
    pub fn forbidden() -> Self {
        Self {
            code: 403,
            title: FORBIDDEN_TITLE.to_string(),
            detail: String::new(),
            data: Value::Object(Default::default()),
        }
    }

    /// Message attached to `field` in this error's `data`, if any.
    pub fn field_message(&self, field: &str) -> Option<&Value> {
        self.data.as_object().and_then(|data| data.get(field))
    }
}

/// The uniform response wrapper used by every endpoint.
///
/// Success: `{errors: [], notices: [], data: <payload>}`.
/// Failure: `{errors: [{code, title, detail, data}], notices: [], data: []}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Envelope<T = Value> {
    pub errors: Vec<ApiError>,
    pub notices: Vec<Value>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// First error carrying a message for `field`.
    pub fn field_error(&self, field: &str) -> Option<&ApiError> {
        self.errors
            .iter()
            .find(|error| error.field_message(field).is_some())
    }
}
