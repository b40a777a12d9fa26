//! Data model shared by every harness component.
//!
//! - `entity` - entity kinds of the news domain and the untyped Entity Record
//! - `envelope` - the uniform `{errors, notices, data}` response wrapper
//! - `api` - typed request/response payloads per endpoint
//! - `shape` - declarative JSON shapes used by shape assertions

pub mod api;
pub mod entity;
pub mod envelope;
pub mod shape;
