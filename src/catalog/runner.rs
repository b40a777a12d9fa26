//! Sequential scenario execution.
//!
//! Each scenario runs `Precondition → (optional) Authenticate → Send → Assert Response →
//! (optional) Assert Database`, fail-fast and without retries. A failed scenario is
//! recorded and the run continues; a fatal error (transport, database, configuration)
//! aborts the run.

#[cfg(test)]
mod tests;

use std::{collections::BTreeSet, fmt};

use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::{
    catalog::{Action, Input, Outcome, Scenario, Target},
    client::response::ApiResponse,
    context::HarnessContext,
    data::schema::{self, ColumnKind},
    error::{assertion::AssertionError, Error},
    generator::{random_string, Alphabet},
    model::{
        api::{
            ApiResource, CommentDto, DeleteResult, ListFilter, ListPage, NewsTagParamDto, TagDto,
        },
        entity::{EntityKind, EntityRecord},
        shape::JsonShape,
    },
    precondition::Preconditions,
};

/// Rows created for pagination scenarios.
const PAGINATION_ROWS: usize = 5;

/// Limit used by list requests that are not about pagination.
const LIST_LIMIT: i64 = 100;

/// Length of random values in otherwise valid request bodies.
const VALID_STRING_LENGTH: i64 = 32;

/// Result of one scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub kind: EntityKind,
    /// `None` when the scenario passed
    pub error: Option<Error>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct Report {
    pub scenarios: Vec<ScenarioReport>,
}

impl Report {
    pub fn passed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.scenarios.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in self.failures() {
            if let Some(error) = &failure.error {
                writeln!(f, "FAILED {}\n  {}", failure.name, error)?;
            }
        }
        write!(
            f,
            "{} scenarios: {} passed, {} failed",
            self.scenarios.len(),
            self.passed(),
            self.failed()
        )
    }
}

/// Process exit code of a run: `0` when every scenario passed, `1` when some failed, `2`
/// when a fatal error aborted it or kept it from starting.
pub fn exit_code(result: &Result<Report, Error>) -> i32 {
    match result {
        Ok(report) if report.is_success() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

/// Run `scenarios` one after another against `ctx`.
///
/// # Returns
/// - `Ok(Report)` - Every scenario ran, passed or failed
/// - `Err(Error)` - A fatal error aborted the run
pub async fn run(ctx: &mut HarnessContext, scenarios: &[Scenario]) -> Result<Report, Error> {
    ctx.reset();
    let mut report = Report::default();

    for scenario in scenarios {
        let result = run_scenario(ctx, scenario).await;
        ctx.client.logout();

        let error = match result {
            Ok(()) => {
                info!("PASS {}", scenario);
                None
            }
            Err(e) if e.is_fatal() => {
                error!("Aborting run, {} hit a fatal error: {}", scenario, e);
                return Err(e);
            }
            Err(e) => {
                warn!("FAIL {}: {}", scenario, e);
                Some(e)
            }
        };

        report.scenarios.push(ScenarioReport {
            name: scenario.name.clone(),
            kind: scenario.kind,
            error,
        });
    }

    info!(
        "Ran {} scenarios: {} passed, {} failed",
        report.scenarios.len(),
        report.passed(),
        report.failed()
    );

    Ok(report)
}

/// Run a single scenario.
pub async fn run_scenario(ctx: &mut HarnessContext, scenario: &Scenario) -> Result<(), Error> {
    debug!("Running {}", scenario);

    match scenario.outcome {
        Outcome::Page { offset, limit } => return paginate(ctx, scenario, offset, limit).await,
        Outcome::FilterComposition => return compose_filters(ctx, scenario).await,
        _ => {}
    }

    let kind = scenario.kind;
    let (preconditions, target) = establish(ctx, scenario).await?;
    let target_id = match &target {
        Some(TargetRow::Existing(record)) => record.id(),
        Some(TargetRow::Missing(id)) => Some(*id),
        None => None,
    };

    let value = resolve(ctx, &scenario.input, &preconditions).await?;
    let before = ctx.verifier.count_rows(kind, &EntityRecord::new()).await?;

    authenticate(ctx, scenario);

    let mut body = EntityRecord::new();
    let response = match scenario.action {
        Action::Create | Action::Update => {
            body = valid_body(kind, &preconditions)?;
            apply(&mut body, scenario.field, value);
            match (scenario.action, target_id) {
                (Action::Update, Some(id)) => ctx.client.update(kind, id, &body.to_json()).await?,
                _ => ctx.client.create(kind, &body.to_json()).await?,
            }
        }
        Action::Read => ctx.client.get(kind, require(target_id, scenario)?).await?,
        Action::Delete => ctx.client.delete(kind, require(target_id, scenario)?).await?,
        Action::List => {
            let mut filter = ListFilter::new().limit(LIST_LIMIT).offset(0);
            if let (Some(field), Some(value)) = (scenario.field, value) {
                filter.set(field, value);
            }
            ctx.client.list(kind, &filter).await?
        }
    };

    response.expect_status(scenario.expected_status)?;

    let existing = match &target {
        Some(TargetRow::Existing(record)) => Some(record),
        _ => None,
    };

    match &scenario.outcome {
        Outcome::Persisted => {
            let mut expected = body;
            if let Some(id) = target_id {
                expected.insert("id", Value::from(id));
            }
            let (id, record) = expect_record(&response, kind)?;
            response.expect_json_contains(&json!({ "data": expected.into_json() }))?;
            ctx.verifier.assert_record_persisted(kind, &record).await?;
            ctx.fixtures.record(kind, id, record);
        }
        Outcome::Read => {
            let Some(record) = existing else {
                return Err(missing_target(scenario));
            };
            expect_record(&response, kind)?;
            let expected = without_timestamps(kind, record);
            response.expect_json_contains(&json!({ "data": expected.into_json() }))?;
        }
        Outcome::FieldError { field, message } => {
            match message {
                Some(message) => {
                    response.expect_field_error_message(field, message)?;
                }
                None => {
                    response.expect_field_error(field)?;
                }
            }
            assert_unchanged(ctx, scenario, before, existing).await?;
        }
        Outcome::Rejected => {
            expect_error_envelope(&response)?;
            assert_unchanged(ctx, scenario, before, existing).await?;
        }
        Outcome::Forbidden => {
            response.expect_forbidden()?;
            assert_unchanged(ctx, scenario, before, existing).await?;
        }
        Outcome::Deleted => {
            expect_deleted(&response)?;
            let id = require(target_id, scenario)?;
            ctx.verifier
                .assert_absent(kind, &EntityRecord::from([("id", Value::from(id))]))
                .await?;
        }
        Outcome::DeletedIdempotent => {
            expect_deleted(&response)?;
            assert_unchanged(ctx, scenario, before, None).await?;
        }
        Outcome::NotFound => {}
        Outcome::Page { .. } | Outcome::FilterComposition => {}
    }

    Ok(())
}

/// Row a read, update or delete addresses.
enum TargetRow {
    Existing(EntityRecord),
    Missing(i64),
}

async fn establish(
    ctx: &mut HarnessContext,
    scenario: &Scenario,
) -> Result<(Preconditions, Option<TargetRow>), Error> {
    let kind = scenario.kind;

    match (scenario.action, scenario.target) {
        (Action::Read | Action::Update | Action::Delete, Target::Precondition) => {
            let preconditions = ctx.preconditions().build_for(kind, &scenario.seed).await?;
            let record = preconditions
                .get(kind.role())
                .cloned()
                .ok_or_else(|| missing_target(scenario))?;
            Ok((preconditions, Some(TargetRow::Existing(record))))
        }
        (_, Target::Missing) => {
            let preconditions = ctx.preconditions().build_dependencies(kind).await?;
            let id = ctx.verifier.first_missing_id(kind).await?;
            Ok((preconditions, Some(TargetRow::Missing(id))))
        }
        _ => {
            let preconditions = ctx.preconditions().build_dependencies(kind).await?;
            Ok((preconditions, None))
        }
    }
}

/// Turn a symbolic input into the JSON value to send, `None` to leave the field out.
async fn resolve(
    ctx: &mut HarnessContext,
    input: &Input,
    preconditions: &Preconditions,
) -> Result<Option<Value>, Error> {
    Ok(match input {
        Input::Literal(value) => Some(value.clone()),
        Input::RandomString { length, alphabet } => {
            Some(Value::String(random_string(*length, alphabet)?))
        }
        Input::MissingId(kind) => Some(Value::from(ctx.verifier.first_missing_id(*kind).await?)),
        Input::PreconditionId(kind) => {
            let id = preconditions.id_of(*kind).ok_or_else(|| {
                Error::InternalError(format!("no {} precondition to take an id from", kind))
            })?;
            Some(Value::from(id))
        }
        Input::Fresh(kind) => {
            let fresh = ctx
                .preconditions()
                .build_for(*kind, &EntityRecord::new())
                .await?;
            fresh.id_of(*kind).map(Value::from)
        }
        Input::Omitted => None,
    })
}

/// A request body the API accepts: foreign keys of the preconditions and random text.
fn valid_body(kind: EntityKind, preconditions: &Preconditions) -> Result<EntityRecord, Error> {
    let mut body = EntityRecord::new();

    for (field, target) in schema::foreign_keys(kind) {
        let id = preconditions.id_of(target).ok_or_else(|| {
            Error::InternalError(format!("no {} precondition for `{}`", target, field))
        })?;
        body.insert(field, Value::from(id));
    }

    for def in schema::columns(kind) {
        if matches!(def.kind, ColumnKind::Varchar(_) | ColumnKind::Text) {
            body.insert(
                def.field,
                Value::String(random_string(VALID_STRING_LENGTH, &Alphabet::Ascii)?),
            );
        }
    }

    Ok(body)
}

fn apply(body: &mut EntityRecord, field: Option<&'static str>, value: Option<Value>) {
    let Some(field) = field else {
        return;
    };
    match value {
        Some(value) => {
            body.insert(field, value);
        }
        None => {
            body.remove(field);
        }
    }
}

fn authenticate(ctx: &mut HarnessContext, scenario: &Scenario) {
    if scenario.authenticated {
        ctx.client.login();
    } else {
        ctx.client.logout();
    }
}

fn require(id: Option<i64>, scenario: &Scenario) -> Result<i64, Error> {
    id.ok_or_else(|| missing_target(scenario))
}

fn missing_target(scenario: &Scenario) -> Error {
    Error::InternalError(format!("{} has no target record", scenario))
}

/// Success envelope carrying one record of `kind`, decoded as the resource's typed payload
/// and as a record.
fn expect_record(response: &ApiResponse, kind: EntityKind) -> Result<(i64, EntityRecord), Error> {
    response
        .expect_success()?
        .expect_json_shape(&JsonShape::envelope(JsonShape::record(kind)))?;

    let id = match kind {
        EntityKind::Tag => decode::<TagDto>(response)?,
        EntityKind::Comment => decode::<CommentDto>(response)?,
        EntityKind::NewsTagParam => decode::<NewsTagParamDto>(response)?,
        kind => {
            return Err(Error::InternalError(format!(
                "{} has no REST resource to decode",
                kind
            )))
        }
    };

    Ok((id, response.data()?))
}

fn decode<T: ApiResource>(response: &ApiResponse) -> Result<i64, Error> {
    let id = response.data::<T>()?.id();
    debug!("Decoded {} {} from {}", T::KIND, id, response.call);
    Ok(id)
}

/// `{success: true}` decoded as [`DeleteResult`].
fn expect_deleted(response: &ApiResponse) -> Result<(), Error> {
    let result: DeleteResult = response.expect_success()?.data()?;
    if result.success {
        return Ok(());
    }

    Err(AssertionError::Content {
        call: response.call.clone(),
        path: "$.data.success".to_string(),
        expected: "true".to_string(),
        actual: "false".to_string(),
        body: response.body_text(),
    }
    .into())
}

fn expect_error_envelope(response: &ApiResponse) -> Result<(), Error> {
    let envelope = response.envelope()?;
    if envelope.is_success() {
        return Err(AssertionError::Envelope {
            call: response.call.clone(),
            reason: "expected at least one error".to_string(),
            body: response.body_text(),
        }
        .into());
    }
    Ok(())
}

/// The record without server-formatted timestamps.
fn without_timestamps(kind: EntityKind, record: &EntityRecord) -> EntityRecord {
    let mut record = record.clone();
    for def in schema::columns(kind) {
        if def.kind == ColumnKind::Timestamp {
            record.remove(def.field);
        }
    }
    record
}

/// Row count is `before` and the target row, if any, still holds its content.
async fn assert_unchanged(
    ctx: &HarnessContext,
    scenario: &Scenario,
    before: u64,
    existing: Option<&EntityRecord>,
) -> Result<(), Error> {
    let kind = scenario.kind;
    let after = ctx.verifier.count_rows(kind, &EntityRecord::new()).await?;
    if after != before {
        return Err(AssertionError::Mismatch {
            context: format!(
                "{}: row count of `{}`",
                scenario,
                ctx.verifier.tables().table_name(kind)
            ),
            expected: before.to_string(),
            actual: after.to_string(),
        }
        .into());
    }

    if let Some(record) = existing {
        ctx.verifier
            .assert_record_persisted(kind, &without_timestamps(kind, record))
            .await?;
    }

    Ok(())
}

/// Filter restricting a list to the rows hanging off one news item, when `kind` has one.
fn scope(kind: EntityKind, preconditions: &Preconditions) -> (ListFilter, EntityRecord) {
    let news_id = schema::foreign_keys(kind)
        .any(|(_, target)| target == EntityKind::News)
        .then(|| preconditions.id_of(EntityKind::News))
        .flatten();

    match news_id {
        Some(id) => (
            ListFilter::new().news_id(id),
            EntityRecord::from([("newsId", Value::from(id))]),
        ),
        None => (ListFilter::new(), EntityRecord::new()),
    }
}

/// Pagination law: the page holds positions `[offset, min(offset + limit, N))` of the
/// rows ordered by id, and `more` is true iff `offset + limit < N`.
async fn paginate(
    ctx: &mut HarnessContext,
    scenario: &Scenario,
    offset: i64,
    limit: i64,
) -> Result<(), Error> {
    let kind = scenario.kind;
    let preconditions = ctx
        .preconditions()
        .build_many(kind, PAGINATION_ROWS, &scenario.seed)
        .await?;
    let (filter, criteria) = scope(kind, &preconditions);

    authenticate(ctx, scenario);
    let response = ctx
        .client
        .list(kind, &filter.limit(limit).offset(offset))
        .await?;

    response
        .expect_status(scenario.expected_status)?
        .expect_success()?
        .expect_json_shape(&JsonShape::envelope(JsonShape::page(kind)))?;
    let page: ListPage<EntityRecord> = response.data()?;

    let rows = ctx.verifier.select_rows(kind, &criteria).await?;
    let total = rows.len() as i64;
    let start = offset.clamp(0, total) as usize;
    let end = offset.saturating_add(limit).clamp(start as i64, total) as usize;

    let expected: Vec<i64> = rows[start..end].iter().filter_map(EntityRecord::id).collect();
    let actual: Vec<i64> = page.list.iter().filter_map(EntityRecord::id).collect();
    if expected != actual {
        return Err(AssertionError::Content {
            call: response.call.clone(),
            path: "$.data.list[*].id".to_string(),
            expected: format!("{:?}", expected),
            actual: format!("{:?}", actual),
            body: response.body_text(),
        }
        .into());
    }

    let more = offset.saturating_add(limit) < total;
    response.expect_json_contains(&json!({ "data": { "more": more } }))?;

    Ok(())
}

/// Filter composition law for comments: filtering by `newsId` and `body` together returns
/// exactly the rows each filter returns alone.
async fn compose_filters(ctx: &mut HarnessContext, scenario: &Scenario) -> Result<(), Error> {
    let kind = scenario.kind;
    let token = random_string(12, &Alphabet::Ascii)?;
    let alpha = format!("{} alpha", token);
    let beta = format!("{} beta", token);

    let news_a = ctx
        .preconditions()
        .build_for(kind, &EntityRecord::from([("body", Value::from(alpha.as_str()))]))
        .await?;
    let news_a_id = news_a
        .id_of(EntityKind::News)
        .ok_or_else(|| missing_target(scenario))?;
    ctx.preconditions()
        .build_many(
            kind,
            1,
            &EntityRecord::from([
                ("newsId", Value::from(news_a_id)),
                ("body", Value::from(beta.as_str())),
            ]),
        )
        .await?;
    ctx.preconditions()
        .build_for(kind, &EntityRecord::from([("body", Value::from(alpha.as_str()))]))
        .await?;

    authenticate(ctx, scenario);
    let status = scenario.expected_status;
    let base = ListFilter::new().limit(LIST_LIMIT).offset(0);
    let both = list_ids(
        ctx,
        kind,
        status,
        base.clone().news_id(news_a_id).body(alpha.as_str()),
    )
    .await?;
    let by_news = list_ids(ctx, kind, status, base.clone().news_id(news_a_id)).await?;
    let by_body = list_ids(ctx, kind, status, base.body(alpha.as_str())).await?;

    let intersection: BTreeSet<i64> = by_news.intersection(&by_body).copied().collect();
    if both.is_empty() || both != intersection {
        return Err(AssertionError::Mismatch {
            context: format!("{}: ids listed with newsId and body filters", scenario),
            expected: format!("{:?} (non-empty intersection)", intersection),
            actual: format!("{:?}", both),
        }
        .into());
    }

    Ok(())
}

async fn list_ids(
    ctx: &mut HarnessContext,
    kind: EntityKind,
    status: u16,
    filter: ListFilter,
) -> Result<BTreeSet<i64>, Error> {
    let response = ctx.client.list(kind, &filter).await?;
    response
        .expect_status(status)?
        .expect_success()?
        .expect_json_shape(&JsonShape::envelope(JsonShape::page(kind)))?;
    let page: ListPage<EntityRecord> = response.data()?;
    Ok(page.list.iter().filter_map(EntityRecord::id).collect())
}

