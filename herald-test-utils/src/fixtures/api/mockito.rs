//! Mock endpoints of the news API.
//!
//! Every endpoint is `POST /v1/<path>` distinguished by the method override header, the
//! same way the real API routes requests.

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::{
    constant::{METHOD_OVERRIDE_HEADER, TEST_AUTH_TOKEN},
    fixtures::api::{factory, ApiFixtures},
};

impl<'a> ApiFixtures<'a> {
    /// Create a mock endpoint for `method` on `/v1/{path}`.
    ///
    /// Requests are matched regardless of authentication.
    ///
    /// # Arguments
    /// - `method` - Logical verb expected in the method override header
    /// - `path` - Path below `/v1/`
    /// - `status` - HTTP status to respond with
    /// - `body` - JSON body to respond with
    /// - `expected_requests` - Number of times this endpoint should be called
    pub fn create_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/v1/{}", path);

        self.setup
            .server
            .mock("POST", url.as_str())
            .match_header(METHOD_OVERRIDE_HEADER, method)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that only answers requests carrying the test bearer token.
    pub fn create_authenticated_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/v1/{}", path);

        self.setup
            .server
            .mock("POST", url.as_str())
            .match_header(METHOD_OVERRIDE_HEADER, method)
            .match_header("authorization", format!("Bearer {}", TEST_AUTH_TOKEN).as_str())
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint answering unauthenticated requests with the 403 envelope.
    pub fn create_forbidden_endpoint(
        &mut self,
        method: &str,
        path: &str,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/v1/{}", path);

        self.setup
            .server
            .mock("POST", url.as_str())
            .match_header(METHOD_OVERRIDE_HEADER, method)
            .match_header("authorization", Matcher::Missing)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(factory::forbidden_envelope().to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock answering every unauthenticated request on `resource`, with or without
    /// a trailing id, with the 403 envelope.
    pub fn create_forbidden_resource(&mut self, resource: &str, expected_requests: usize) -> Mock {
        let path = Matcher::Regex(format!(r"^/v1/{}(/\d+)?$", resource));

        self.setup
            .server
            .mock("POST", path)
            .match_header("authorization", Matcher::Missing)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(factory::forbidden_envelope().to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock endpoint that only answers requests whose JSON body matches `body`.
    ///
    /// Mocks are tried in creation order, so create the most specific matcher first when
    /// several could match the same request.
    pub fn create_matching_endpoint(
        &mut self,
        method: &str,
        path: &str,
        body: Matcher,
        status: usize,
        response: Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/v1/{}", path);

        self.setup
            .server
            .mock("POST", url.as_str())
            .match_header(METHOD_OVERRIDE_HEADER, method)
            .match_body(body)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(response.to_string())
            .expect(expected_requests)
            .create()
    }
}
