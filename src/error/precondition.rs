use thiserror::Error;

/// Failure to establish the state a scenario requires.
///
/// Kept apart from [`AssertionError`](crate::error::assertion::AssertionError) so that a
/// report distinguishes "the system under test rejected valid setup" from "the scenario's
/// own expectation was wrong".
#[derive(Error, Debug)]
pub enum PreconditionError {
    #[error("Failed to create `{role}` precondition: {source}")]
    Setup {
        role: &'static str,
        #[source]
        source: Box<crate::error::Error>,
    },
    #[error("System under test rejected `{role}` precondition with status {status}: {body}")]
    Rejected {
        role: &'static str,
        status: u16,
        body: String,
    },
}
