//! Per-run harness state.

use sea_orm::DatabaseConnection;

use crate::{
    client::HttpTestClient,
    config::Config,
    data::DatabaseVerifier,
    error::Error,
    fixture::FixtureStore,
    precondition::{PreconditionBuilder, SetupChannel},
    startup,
};

/// Everything one worker needs to execute scenarios.
///
/// Passed explicitly to every scenario; parallel execution would use one context per
/// worker, each with its own database isolation.
pub struct HarnessContext {
    pub client: HttpTestClient,
    pub verifier: DatabaseVerifier,
    pub fixtures: FixtureStore,
}

impl HarnessContext {
    pub fn new(client: HttpTestClient, verifier: DatabaseVerifier) -> Self {
        Self {
            client,
            verifier,
            fixtures: FixtureStore::new(),
        }
    }

    /// Build a context around an existing database connection.
    pub fn connect(db: DatabaseConnection, config: &Config) -> Result<Self, Error> {
        let client = HttpTestClient::new(
            startup::build_http_client()?,
            config.base_url.clone(),
            config.auth_token.clone(),
        );
        let verifier =
            DatabaseVerifier::new(db, config.tables.clone(), config.missing_id_strategy);

        Ok(Self::new(client, verifier))
    }

    /// Connect to the database named by the configuration and build a context.
    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        let db = startup::connect_to_database(config).await?;
        Self::connect(db, config)
    }

    /// Precondition builder creating entities through the database.
    pub fn preconditions(&mut self) -> PreconditionBuilder<'_> {
        PreconditionBuilder::new(self)
    }

    /// Precondition builder creating leaves through `channel`.
    pub fn preconditions_via(&mut self, channel: SetupChannel) -> PreconditionBuilder<'_> {
        PreconditionBuilder::new(self).via(channel)
    }

    /// Clear fixtures and log out, as at the start of a run.
    pub fn reset(&mut self) {
        self.fixtures.reset();
        self.client.logout();
    }
}
