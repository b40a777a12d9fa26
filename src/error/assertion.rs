use thiserror::Error;

/// A scenario expectation that the system under test did not meet.
///
/// Messages name the HTTP call that was made and render expected and actual values side
/// by side. Database assertions include a snapshot of the table at failure time.
#[derive(Error, Debug)]
pub enum AssertionError {
    #[error("{call}: expected status {expected}, got {actual}\nresponse body: {body}")]
    Status {
        call: String,
        expected: u16,
        actual: u16,
        body: String,
    },
    #[error("{call}: JSON shape mismatch at `{path}`: expected {expected}, got {actual}\nresponse body: {body}")]
    Shape {
        call: String,
        path: String,
        expected: String,
        actual: String,
        body: String,
    },
    #[error("{call}: JSON content mismatch at `{path}`: expected {expected}, got {actual}\nresponse body: {body}")]
    Content {
        call: String,
        path: String,
        expected: String,
        actual: String,
        body: String,
    },
    #[error("{call}: malformed response envelope: {reason}\nresponse body: {body}")]
    Envelope {
        call: String,
        reason: String,
        body: String,
    },
    #[error("No request has been sent yet, there is no response to assert on")]
    NoResponse,
    #[error("Expected {expectation} rows in `{table}` matching {criteria}, found {found}\ntable snapshot: {snapshot}")]
    RowPresence {
        table: String,
        criteria: String,
        expectation: &'static str,
        found: u64,
        snapshot: String,
    },
    #[error("Row {id} of `{table}` field `{field}`: expected {expected}, got {actual}")]
    RowContent {
        table: String,
        id: i64,
        field: String,
        expected: String,
        actual: String,
    },
    #[error("{context}: expected {expected}, got {actual}")]
    Mismatch {
        context: String,
        expected: String,
        actual: String,
    },
}
