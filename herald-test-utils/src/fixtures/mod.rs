//! Fixtures for seeding rows and creating mock API endpoints during Phase 2.
//!
//! - `news` - rows of the reference schema (news types, news, tags, comments, news-tag links)
//! - `api` - envelope payloads and mock endpoints of the news API

pub mod api;
pub mod news;
