//! SeaORM entities for the reference schema of the news API.
//!
//! Herald never owns the schema of the system under test. These entities describe the
//! reference layout only, so the test utilities can create an equivalent in-memory SQLite
//! schema and seed typed rows.

pub mod prelude;

pub mod comment;
pub mod news;
pub mod news_tag_param;
pub mod news_type;
pub mod tag;
