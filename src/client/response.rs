use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    client::matcher,
    error::{assertion::AssertionError, Error},
    model::{
        envelope::{ApiError, Envelope},
        shape::JsonShape,
    },
};

/// Longest response body rendered into an assertion failure.
const MAX_BODY_CHARS: usize = 2_000;

/// One response of the system under test with the call that produced it.
///
/// Every `expect_*` method returns `&Self` on success so assertions chain with `?`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// Logical call, e.g. `CREATE /v1/tag`
    pub call: String,
    pub status: u16,
    /// Decoded JSON body, or the raw text as a JSON string when the body is not JSON
    pub body: Value,
}

impl ApiResponse {
    pub fn new(call: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            call: call.into(),
            status,
            body,
        }
    }

    /// Body rendered for failure messages, shortened when very long.
    pub fn body_text(&self) -> String {
        let text = match &self.body {
            Value::String(raw) => raw.clone(),
            body => body.to_string(),
        };
        if text.chars().count() <= MAX_BODY_CHARS {
            return text;
        }

        let mut short: String = text.chars().take(MAX_BODY_CHARS).collect();
        short.push_str("...");
        short
    }

    /// Decode the body as a response envelope.
    pub fn envelope(&self) -> Result<Envelope, Error> {
        serde_json::from_value(self.body.clone()).map_err(|e| self.envelope_error(e.to_string()))
    }

    /// Decode the envelope `data` as `T`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let envelope = self.envelope()?;
        serde_json::from_value(envelope.data).map_err(|e| {
            self.envelope_error(format!(
                "`data` does not decode as {}: {}",
                std::any::type_name::<T>(),
                e
            ))
        })
    }

    pub fn expect_status(&self, expected: u16) -> Result<&Self, Error> {
        if self.status == expected {
            return Ok(self);
        }

        Err(AssertionError::Status {
            call: self.call.clone(),
            expected,
            actual: self.status,
            body: self.body_text(),
        }
        .into())
    }

    pub fn expect_json_shape(&self, shape: &JsonShape) -> Result<&Self, Error> {
        match shape.check(&self.body) {
            Ok(()) => Ok(self),
            Err(mismatch) => Err(AssertionError::Shape {
                call: self.call.clone(),
                path: mismatch.path,
                expected: mismatch.expected,
                actual: mismatch.actual,
                body: self.body_text(),
            }
            .into()),
        }
    }

    /// Require the body to contain `partial`, see [`matcher::find_mismatch`].
    pub fn expect_json_contains(&self, partial: &Value) -> Result<&Self, Error> {
        match matcher::find_mismatch(partial, &self.body) {
            None => Ok(self),
            Some(mismatch) => Err(self.content_error(mismatch.path, mismatch.expected, mismatch.actual)),
        }
    }

    /// Require a well-formed envelope without errors.
    pub fn expect_success(&self) -> Result<&Self, Error> {
        let envelope = self.envelope()?;
        if envelope.is_success() {
            return Ok(self);
        }

        Err(self.envelope_error(format!(
            "expected no errors, got {}",
            json!(envelope.errors)
        )))
    }

    /// Require an error whose `data` names `field`, returning that error.
    pub fn expect_field_error(&self, field: &str) -> Result<ApiError, Error> {
        let envelope = self.envelope()?;
        match envelope.field_error(field) {
            Some(error) => Ok(error.clone()),
            None => Err(self.content_error(
                "$.errors[*].data".to_string(),
                format!("a message for `{}`", field),
                json!(envelope.errors).to_string(),
            )),
        }
    }

    /// Require the message attached to `field` to be exactly `message`.
    pub fn expect_field_error_message(&self, field: &str, message: &str) -> Result<&Self, Error> {
        let error = self.expect_field_error(field)?;
        let actual = error.field_message(field).cloned().unwrap_or(Value::Null);
        if actual.as_str() == Some(message) {
            return Ok(self);
        }

        Err(self.content_error(
            format!("$.errors[*].data.{}", field),
            json!(message).to_string(),
            actual.to_string(),
        ))
    }

    /// Require the 403 forbidden envelope, exactly.
    pub fn expect_forbidden(&self) -> Result<&Self, Error> {
        self.expect_status(403)?;

        let expected = Envelope {
            errors: vec![ApiError::forbidden()],
            notices: Vec::new(),
            data: json!([]),
        };
        let envelope = self.envelope()?;
        if envelope == expected {
            return Ok(self);
        }

        Err(self.content_error(
            "$".to_string(),
            json!(expected).to_string(),
            self.body_text(),
        ))
    }

    fn envelope_error(&self, reason: String) -> Error {
        AssertionError::Envelope {
            call: self.call.clone(),
            reason,
            body: self.body_text(),
        }
        .into()
    }

    fn content_error(&self, path: String, expected: String, actual: String) -> Error {
        AssertionError::Content {
            call: self.call.clone(),
            path,
            expected,
            actual,
            body: self.body_text(),
        }
        .into()
    }
}
