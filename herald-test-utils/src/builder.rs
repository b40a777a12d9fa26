//! Declarative test builder for Phase 1 setup.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! The builder pattern allows chaining multiple configuration methods together, with all operations
//! queued and executed during the final `build()` call.

use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables,
/// seeded rows, and mock API endpoints. Methods can be chained together and finalized
/// with `build()` to create a complete test setup.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_news_tables: bool,

    // Database fixtures to insert
    news_types: Vec<i32>,
    news: Vec<(i32, i32)>,                     // (news_id, news_type_id)
    tags: Vec<i32>,
    comments: Vec<(i32, i32)>,                 // (comment_id, news_id)
    news_tag_params: Vec<(i32, i32, i32)>,     // (param_id, news_id, tag_id)

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    // Pre-configured endpoint shortcuts
    endpoints: Vec<(String, String, usize, Value, usize)>, // (method, path, status, body, expected_requests)
    forbidden_endpoints: Vec<(String, String, usize)>,     // (method, path, expected_requests)
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables, fixtures, or mock endpoints configured.
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_news_tables: false,
            news_types: Vec::new(),
            news: Vec::new(),
            tags: Vec::new(),
            comments: Vec::new(),
            news_tag_params: Vec::new(),
            mock_builders: Vec::new(),
            endpoints: Vec::new(),
            forbidden_endpoints: Vec::new(),
        }
    }

    /// Add every table of the reference schema to the test database.
    ///
    /// Creates NewsType, News, Tag, Comment and NewsTagParam in dependency order.
    pub fn with_news_tables(mut self) -> Self {
        self.include_news_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use herald_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), herald_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(NewsType)
    ///     .with_table(News)
    ///     .with_table(Comment)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a mock news type into the database.
    pub fn with_mock_news_type(mut self, id: i32) -> Self {
        self.news_types.push(id);
        self
    }

    /// Insert a mock news item into the database, creating its news type if needed.
    pub fn with_mock_news(mut self, id: i32, news_type_id: i32) -> Self {
        self.news.push((id, news_type_id));
        self
    }

    /// Insert a mock tag into the database.
    pub fn with_mock_tag(mut self, id: i32) -> Self {
        self.tags.push(id);
        self
    }

    /// Insert a mock comment into the database.
    ///
    /// The news item it belongs to is created automatically if it doesn't already exist.
    pub fn with_mock_comment(mut self, id: i32, news_id: i32) -> Self {
        self.comments.push((id, news_id));
        self
    }

    /// Insert a mock news-tag association into the database.
    ///
    /// The news item and tag are created automatically if they don't already exist.
    pub fn with_mock_news_tag_param(mut self, id: i32, news_id: i32, tag_id: i32) -> Self {
        self.news_tag_params.push((id, news_id, tag_id));
        self
    }

    /// Add a mock API endpoint to the test server.
    ///
    /// Creates `POST /v1/{path}` matching the method override header `method` that
    /// responds with `status` and `body`. The mock will verify it was called exactly
    /// `expected_requests` times.
    pub fn with_endpoint(
        mut self,
        method: &str,
        path: &str,
        status: usize,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.endpoints.push((
            method.to_string(),
            path.to_string(),
            status,
            body,
            expected_requests,
        ));
        self
    }

    /// Add a mock endpoint rejecting unauthenticated requests with the forbidden envelope.
    pub fn with_forbidden_endpoint(
        mut self,
        method: &str,
        path: &str,
        expected_requests: usize,
    ) -> Self {
        self.forbidden_endpoints
            .push((method.to_string(), path.to_string(), expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control.
    ///
    /// Allows complete customization of mock endpoint behavior by providing direct access
    /// to the mockito ServerGuard. Use this for endpoints not covered by helper methods.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Build the test setup by creating all configured tables, fixtures, and mock endpoints.
    ///
    /// Executes all queued operations in the following order:
    /// 1. Creates database tables (news tables if specified, then custom tables)
    /// 2. Inserts database fixtures (news types, news, tags, comments, news-tag links)
    /// 3. Creates mock HTTP endpoints (custom endpoints first, then shortcuts)
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database table creation or fixture insertion failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_news_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::NewsType),
                schema.create_table_from_entity(entity::prelude::News),
                schema.create_table_from_entity(entity::prelude::Tag),
                schema.create_table_from_entity(entity::prelude::Comment),
                schema.create_table_from_entity(entity::prelude::NewsTagParam),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert database fixtures
        for id in self.news_types {
            setup.news().insert_mock_news_type(id).await?;
        }

        for (id, news_type_id) in self.news {
            setup.news().insert_mock_news(id, news_type_id).await?;
        }

        for id in self.tags {
            setup.news().insert_mock_tag(id).await?;
        }

        for (id, news_id) in self.comments {
            setup.news().insert_mock_comment(id, news_id).await?;
        }

        for (id, news_id, tag_id) in self.news_tag_params {
            setup
                .news()
                .insert_mock_news_tag_param(id, news_id, tag_id)
                .await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints are created first so mockito matches them before the shortcuts
        // when both cover the same path.
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (method, path, status, body, expected) in self.endpoints {
            mocks.push(
                setup
                    .api()
                    .create_endpoint(&method, &path, status, body, expected),
            );
        }

        for (method, path, expected) in self.forbidden_endpoints {
            mocks.push(
                setup
                    .api()
                    .create_forbidden_endpoint(&method, &path, expected),
            );
        }

        // Store mocks in setup so they live as long as the test
        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
