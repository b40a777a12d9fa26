use crate::{
    data::schema::TableMap,
    error::config::ConfigError,
    generator::MissingIdStrategy,
    model::entity::EntityKind,
};

/// Runtime configuration read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the system under test, without the `/v1` segment
    pub base_url: String,
    pub database_url: String,
    /// Bearer token attached to requests after login
    pub auth_token: String,
    pub tables: TableMap,
    pub missing_id_strategy: MissingIdStrategy,
    /// Run only scenarios of this kind
    pub only: Option<EntityKind>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let required =
            |var: &str| optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()));

        let mut tables = TableMap::new(optional("HERALD_TABLE_PREFIX").unwrap_or_default());
        for kind in EntityKind::ALL {
            let var = format!("HERALD_TABLE_{}", kind.table().to_ascii_uppercase());
            if let Some(table) = optional(&var) {
                tables = tables.with_override(kind, table);
            }
        }

        let missing_id_strategy = match optional("HERALD_MISSING_ID_STRATEGY") {
            Some(strategy) => strategy.parse()?,
            None => MissingIdStrategy::default(),
        };

        let only = match optional("HERALD_ONLY") {
            Some(kind) => Some(kind.parse().map_err(|reason| ConfigError::InvalidEnvValue {
                var: "HERALD_ONLY".to_string(),
                reason,
            })?),
            None => None,
        };

        Ok(Self {
            base_url: required("HERALD_BASE_URL")?,
            database_url: required("DATABASE_URL")?,
            auth_token: required("HERALD_AUTH_TOKEN")?,
            tables,
            missing_id_strategy,
            only,
        })
    }

    /// Configuration for self-tests against a mock API and an in-memory database.
    pub fn for_testing(base_url: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            database_url: "sqlite::memory:".to_string(),
            auth_token: auth_token.into(),
            tables: TableMap::default(),
            missing_id_strategy: MissingIdStrategy::Sequential,
            only: None,
        }
    }
}
