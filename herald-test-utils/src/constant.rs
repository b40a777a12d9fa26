//! Constant values shared by tests.
//!
//! None of these are real credentials.

/// Bearer token the mock API accepts.
pub static TEST_AUTH_TOKEN: &str = "herald-test-token";

/// Header the API reads the logical verb from.
pub static METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// Title of the error returned for unauthenticated requests.
pub static FORBIDDEN_TITLE: &str = "Доступ запрещен";

/// Timestamp used by seeded rows and mock payloads, in the API's format.
pub static TEST_TIMESTAMP: &str = "2025-01-01 10:00:00";
