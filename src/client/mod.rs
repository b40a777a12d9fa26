//! HTTP test client for the system under test.
//!
//! Every call is sent as `POST <base>/v1/<path>` with the logical verb in the
//! [`METHOD_OVERRIDE_HEADER`] header and a JSON body. The last response is kept so
//! assertions can be made against it after the call.

pub mod matcher;
pub mod response;

#[cfg(test)]
mod tests;

use std::fmt;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::debug;

use crate::{
    client::response::ApiResponse,
    error::{assertion::AssertionError, Error},
    model::{api::ListFilter, entity::EntityKind, shape::JsonShape},
};

/// Header carrying the logical verb of a request.
pub static METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Logical verbs understood by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Create,
    Get,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct HttpTestClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: String,
    authenticated: bool,
    last: Option<ApiResponse>,
}

impl HttpTestClient {
    /// Create an unauthenticated client for the API rooted at `base_url`.
    ///
    /// # Arguments
    /// - `http` - Shared reqwest client
    /// - `base_url` - Base URL of the system under test, without the `/v1` segment
    /// - `auth_token` - Bearer token attached to requests after [`login`](Self::login)
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
            authenticated: false,
            last: None,
        }
    }

    pub fn login(&mut self) {
        self.authenticated = true;
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Send one request and keep its response as the last response.
    ///
    /// # Arguments
    /// - `method` - Logical verb placed in the override header
    /// - `path` - Path below `/v1/`, e.g. `tag` or `tag/5`
    /// - `body` - JSON request body
    ///
    /// # Returns
    /// - `Ok(ApiResponse)` - Any HTTP status, non-JSON bodies are kept as text
    /// - `Err(Error::TransportError)` - The request could not be sent or the body not read
    pub async fn request(
        &mut self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<ApiResponse, Error> {
        let path = path.trim_start_matches('/');
        let call = format!("{} /v1/{}", method, path);
        let url = format!("{}/v1/{}", self.base_url, path);

        let mut request = self
            .http
            .post(&url)
            .header(METHOD_OVERRIDE_HEADER, method.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(body)?);
        if self.authenticated {
            request = request.bearer_auth(&self.auth_token);
        }

        debug!(
            "{} (authenticated: {}) body: {}",
            call, self.authenticated, body
        );

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        debug!("{} -> {}", call, status);

        let response = ApiResponse::new(call, status, body);
        self.last = Some(response.clone());

        Ok(response)
    }

    /// Send one request without the bearer token, keeping the login state.
    pub async fn request_without_auth(
        &mut self,
        method: Method,
        path: &str,
        body: &Value,
    ) -> Result<ApiResponse, Error> {
        let authenticated = self.authenticated;
        self.authenticated = false;
        let response = self.request(method, path, body).await;
        self.authenticated = authenticated;
        response
    }

    pub fn last_response(&self) -> Result<&ApiResponse, Error> {
        self.last
            .as_ref()
            .ok_or_else(|| AssertionError::NoResponse.into())
    }

    pub fn expect_status(&self, code: u16) -> Result<&ApiResponse, Error> {
        self.last_response()?.expect_status(code)
    }

    pub fn expect_json_shape(&self, shape: &JsonShape) -> Result<&ApiResponse, Error> {
        self.last_response()?.expect_json_shape(shape)
    }

    pub fn expect_json_contains(&self, partial: &Value) -> Result<&ApiResponse, Error> {
        self.last_response()?.expect_json_contains(partial)
    }

    pub async fn create(&mut self, kind: EntityKind, body: &Value) -> Result<ApiResponse, Error> {
        let resource = resource_of(kind)?;
        self.request(Method::Create, resource, body).await
    }

    pub async fn get(&mut self, kind: EntityKind, id: i64) -> Result<ApiResponse, Error> {
        let path = format!("{}/{}", resource_of(kind)?, id);
        self.request(Method::Get, &path, &Value::Object(Default::default()))
            .await
    }

    pub async fn list(&mut self, kind: EntityKind, filter: &ListFilter) -> Result<ApiResponse, Error> {
        let resource = resource_of(kind)?;
        self.request(Method::Get, resource, &filter.to_body()).await
    }

    pub async fn update(
        &mut self,
        kind: EntityKind,
        id: i64,
        body: &Value,
    ) -> Result<ApiResponse, Error> {
        let path = format!("{}/{}", resource_of(kind)?, id);
        self.request(Method::Put, &path, body).await
    }

    pub async fn delete(&mut self, kind: EntityKind, id: i64) -> Result<ApiResponse, Error> {
        let path = format!("{}/{}", resource_of(kind)?, id);
        self.request(Method::Delete, &path, &Value::Object(Default::default()))
            .await
    }
}

fn resource_of(kind: EntityKind) -> Result<&'static str, Error> {
    kind.resource()
        .ok_or_else(|| Error::InternalError(format!("{} has no REST resource", kind)))
}
