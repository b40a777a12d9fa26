//! Test support for Herald.
//!
//! Tests are written in two phases. Phase 1 declares the environment with
//! [`TestBuilder`]: tables of the reference schema, seeded rows and mock endpoints of the
//! system under test. Phase 2 runs against the resulting [`TestContext`], which owns an
//! in-memory SQLite database and a mockito server standing in for the news API.

pub mod builder;
pub mod constant;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod model;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{
        constant::{TEST_AUTH_TOKEN, TEST_TIMESTAMP},
        fixtures::api::factory,
        TestBuilder, TestContext, TestError,
    };
}
