//! Establishes the entities a scenario needs before its request is sent.
//!
//! The dependency graph is fixed: NewsType → News → {Tag, Comment, NewsTagParam}, with
//! NewsTagParam also depending on Tag. Dependencies are always created before dependents
//! and every created entity is registered in the fixture store.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::{
    context::HarnessContext,
    data::schema,
    error::{precondition::PreconditionError, Error},
    model::entity::{EntityKind, EntityRecord},
};

/// How leaf entities are created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetupChannel {
    /// Direct insert into the database
    #[default]
    Database,
    /// `CREATE` through the API; kinds without a resource fall back to the database
    Api,
}

/// Entities created for one scenario, keyed by role (`newsData`, `tagData`, ...).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Preconditions {
    records: BTreeMap<&'static str, EntityRecord>,
    leaves: Vec<EntityRecord>,
}

impl Preconditions {
    pub fn get(&self, role: &str) -> Option<&EntityRecord> {
        self.records.get(role)
    }

    /// Id of the record created for `kind`.
    pub fn id_of(&self, kind: EntityKind) -> Option<i64> {
        self.get(kind.role()).and_then(EntityRecord::id)
    }

    /// Every leaf in creation order; more than one only for [`PreconditionBuilder::build_many`].
    pub fn leaves(&self) -> &[EntityRecord] {
        &self.leaves
    }

    pub fn roles(&self) -> impl Iterator<Item = &&'static str> {
        self.records.keys()
    }
}

pub struct PreconditionBuilder<'a> {
    ctx: &'a mut HarnessContext,
    channel: SetupChannel,
}

impl<'a> PreconditionBuilder<'a> {
    pub fn new(ctx: &'a mut HarnessContext) -> Self {
        Self {
            ctx,
            channel: SetupChannel::default(),
        }
    }

    pub fn via(mut self, channel: SetupChannel) -> Self {
        self.channel = channel;
        self
    }

    /// Create `kind` and its dependency graph, applying `overrides` to `kind` itself.
    ///
    /// # Returns
    /// - `Ok(Preconditions)` - Every created record keyed by role
    /// - `Err(Error::PreconditionError)` - Creation of a role failed, wrapping the cause
    pub async fn build_for(
        &mut self,
        kind: EntityKind,
        overrides: &EntityRecord,
    ) -> Result<Preconditions, Error> {
        self.build_many(kind, 1, overrides).await
    }

    /// Create only the dependencies of `kind`, never `kind` itself.
    pub async fn build_dependencies(&mut self, kind: EntityKind) -> Result<Preconditions, Error> {
        let mut preconditions = Preconditions::default();
        for dependency in kind.dependency_closure() {
            let record = self
                .create(dependency, &preconditions, &EntityRecord::new(), SetupChannel::Database)
                .await?;
            preconditions.records.insert(dependency.role(), record);
        }
        Ok(preconditions)
    }

    /// Create `count` records of `kind` sharing one dependency graph.
    ///
    /// Leaves are created one after another, so creation order is id order. The role of
    /// `kind` holds the last one.
    pub async fn build_many(
        &mut self,
        kind: EntityKind,
        count: usize,
        overrides: &EntityRecord,
    ) -> Result<Preconditions, Error> {
        let channel = self.channel;
        let mut preconditions = self.build_dependencies(kind).await?;

        for _ in 0..count {
            let record = self
                .create(kind, &preconditions, overrides, channel)
                .await?;
            preconditions.leaves.push(record.clone());
            preconditions.records.insert(kind.role(), record);
        }

        Ok(preconditions)
    }

    async fn create(
        &mut self,
        kind: EntityKind,
        preconditions: &Preconditions,
        overrides: &EntityRecord,
        channel: SetupChannel,
    ) -> Result<EntityRecord, Error> {
        let mut fields = EntityRecord::new();
        for (field, target) in schema::foreign_keys(kind) {
            if let Some(id) = preconditions.id_of(target) {
                fields.insert(field, Value::from(id));
            }
        }
        fields.merge(overrides);

        let result = match (channel, kind.resource()) {
            (SetupChannel::Api, Some(_)) => self.create_via_api(kind, &fields).await,
            _ => self.create_via_database(kind, fields).await,
        };

        let record = result.map_err(|e| match e {
            Error::PreconditionError(_) => e,
            e => PreconditionError::Setup {
                role: kind.role(),
                source: Box::new(e),
            }
            .into(),
        })?;

        if let Some(id) = record.id() {
            self.ctx.fixtures.record(kind, id, record.clone());
        }
        debug!("Created {} precondition {}", kind.role(), record);

        Ok(record)
    }

    async fn create_via_database(
        &mut self,
        kind: EntityKind,
        fields: EntityRecord,
    ) -> Result<EntityRecord, Error> {
        let id = self.ctx.verifier.insert_row(kind, &fields).await?;
        let criteria = EntityRecord::from([("id", Value::from(id))]);

        // Re-read so defaulted columns are part of the snapshot.
        let row = self
            .ctx
            .verifier
            .select_rows(kind, &criteria)
            .await?
            .into_iter()
            .next();

        Ok(row.unwrap_or_else(|| fields.with("id", Value::from(id))))
    }

    async fn create_via_api(
        &mut self,
        kind: EntityKind,
        fields: &EntityRecord,
    ) -> Result<EntityRecord, Error> {
        let client = &mut self.ctx.client;
        let authenticated = client.is_authenticated();
        client.login();
        let response = client.create(kind, &fields.to_json()).await;
        if !authenticated {
            client.logout();
        }
        let response = response?;

        let envelope = response.envelope().ok();
        let created = envelope
            .filter(|envelope| response.status == 200 && envelope.is_success())
            .and_then(|envelope| EntityRecord::from_json(envelope.data))
            .filter(|record| record.id().is_some());

        created.ok_or_else(|| {
            PreconditionError::Rejected {
                role: kind.role(),
                status: response.status,
                body: response.body_text(),
            }
            .into()
        })
    }
}
