//! Direct database access used to seed rows and corroborate API effects.
//!
//! The [`DatabaseVerifier`] never implements business logic. It issues plain
//! insert/update/select/delete statements against the tables resolved through a
//! [`TableMap`] and converts rows into [`EntityRecord`]s keyed by API field names.

pub mod schema;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use sea_orm::{
    sea_query::{Alias, Asterisk, Condition, Expr, ExprTrait, Order, Query},
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, FromQueryResult, QueryResult,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    data::schema::{ColumnDef, ColumnKind, TableMap},
    error::{assertion::AssertionError, persistence::PersistenceError, Error},
    generator::MissingIdStrategy,
    model::entity::{EntityKind, EntityRecord},
};

/// Id column of a `RETURNING` row, `bigint` or `integer`.
fn returned_id(row: &QueryResult) -> Result<i64, DbErr> {
    row.try_get::<i64>("", "id")
        .or_else(|_| row.try_get::<i32>("", "id").map(i64::from))
}

/// Longest table snapshot rendered into a row presence failure.
const MAX_SNAPSHOT_CHARS: usize = 4_000;

pub struct DatabaseVerifier {
    db: DatabaseConnection,
    tables: TableMap,
    missing_id: MissingIdStrategy,
}

impl DatabaseVerifier {
    pub fn new(db: DatabaseConnection, tables: TableMap, missing_id: MissingIdStrategy) -> Self {
        Self {
            db,
            tables,
            missing_id,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn tables(&self) -> &TableMap {
        &self.tables
    }

    /// Insert one row of `kind`, filling omitted optional columns with defaults.
    ///
    /// # Arguments
    /// - `kind` - Entity kind whose table receives the row
    /// - `fields` - Column values keyed by API field name
    ///
    /// # Returns
    /// - `Ok(i64)` - The id assigned to the new row
    /// - `Err(Error::PersistenceError)` - A required foreign key is missing or a field is unknown
    /// - `Err(Error::DbErr)` - The database rejected the insert
    pub async fn insert_row(&self, kind: EntityKind, fields: &EntityRecord) -> Result<i64, Error> {
        let table = self.tables.table_name(kind);
        self.check_fields(kind, &table, fields)?;

        let mut columns = Vec::new();
        let mut values = Vec::new();
        for def in schema::columns(kind) {
            let value = match fields.get(def.field) {
                Some(Value::Null) | None if matches!(def.kind, ColumnKind::ForeignKey(_)) => {
                    return Err(PersistenceError::MissingForeignKey {
                        table,
                        field: def.field,
                    }
                    .into());
                }
                Some(value) => Some(value.clone()),
                None => schema::default_value(&def.kind)?,
            };

            if let Some(value) = value {
                columns.push(Alias::new(def.column));
                values.push(schema::to_sql_value(&def.kind, &value));
            }
        }

        let mut insert = Query::insert();
        insert
            .into_table(Alias::new(table.as_str()))
            .columns(columns)
            .values(values.into_iter().map(Into::into))
            .map_err(|e| Error::InternalError(format!("invalid insert into `{}`: {}", table, e)))?;

        debug!("Inserting {} row into `{}`", kind, table);

        if let Some(id) = fields.id() {
            self.db.execute(&insert).await?;
            return Ok(id);
        }

        let id = match self.db.get_database_backend() {
            DbBackend::Postgres => {
                insert.returning_col(Alias::new("id"));
                let row = self
                    .db
                    .query_one(&insert)
                    .await?
                    .ok_or_else(|| PersistenceError::MissingInsertId(table.clone()))?;
                returned_id(&row)?
            }
            _ => self.db.execute(&insert).await?.last_insert_id() as i64,
        };

        if id < 1 {
            return Err(PersistenceError::MissingInsertId(table).into());
        }

        Ok(id)
    }

    /// Update every row of `kind` matching `criteria`; zero matches is not an error.
    ///
    /// Returns the number of affected rows.
    pub async fn update_row(
        &self,
        kind: EntityKind,
        fields: &EntityRecord,
        criteria: &EntityRecord,
    ) -> Result<u64, Error> {
        let table = self.tables.table_name(kind);
        self.check_fields(kind, &table, fields)?;

        let mut update = Query::update();
        update.table(Alias::new(table.as_str()));
        for (field, value) in fields.fields() {
            let def = self.column(kind, &table, field)?;
            update.value(Alias::new(def.column), schema::to_sql_value(&def.kind, value));
        }
        update.cond_where(self.condition(kind, &table, criteria)?);

        debug!("Updating `{}` rows matching {}", table, criteria);

        Ok(self.db.execute(&update).await?.rows_affected())
    }

    /// All rows of `kind` matching `criteria` ordered by id; empty criteria select the table.
    pub async fn select_rows(
        &self,
        kind: EntityKind,
        criteria: &EntityRecord,
    ) -> Result<Vec<EntityRecord>, Error> {
        let table = self.tables.table_name(kind);

        let mut select = Query::select();
        select
            .column(Asterisk)
            .from(Alias::new(table.as_str()))
            .cond_where(self.condition(kind, &table, criteria)?)
            .order_by(Alias::new("id"), Order::Asc);

        debug!("Selecting `{}` rows matching {}", table, criteria);

        let statement = self.db.get_database_backend().build(&select);
        let rows = Value::find_by_statement(statement).all(&self.db).await?;

        Ok(rows
            .into_iter()
            .map(|row| schema::record_from_row(kind, row))
            .collect())
    }

    pub async fn count_rows(&self, kind: EntityKind, criteria: &EntityRecord) -> Result<u64, Error> {
        let table = self.tables.table_name(kind);

        let mut select = Query::select();
        select
            .expr_as(Expr::cust("COUNT(*)"), Alias::new("total"))
            .from(Alias::new(table.as_str()))
            .cond_where(self.condition(kind, &table, criteria)?);

        let total = match self.db.query_one(&select).await? {
            Some(row) => row.try_get::<i64>("", "total")?,
            None => 0,
        };

        Ok(std::cmp::max(total, 0) as u64)
    }

    /// Require at least one row of `kind` matching `criteria`.
    pub async fn assert_present(&self, kind: EntityKind, criteria: &EntityRecord) -> Result<(), Error> {
        let found = self.count_rows(kind, criteria).await?;
        if found > 0 {
            return Ok(());
        }

        Err(self.presence_error(kind, criteria, "at least one", found).await?)
    }

    /// Require no row of `kind` matching `criteria`.
    pub async fn assert_absent(&self, kind: EntityKind, criteria: &EntityRecord) -> Result<(), Error> {
        let found = self.count_rows(kind, criteria).await?;
        if found == 0 {
            return Ok(());
        }

        Err(self.presence_error(kind, criteria, "no", found).await?)
    }

    /// Hard delete every row of `kind` matching `criteria`, returning the affected count.
    pub async fn delete_rows(&self, kind: EntityKind, criteria: &EntityRecord) -> Result<u64, Error> {
        let table = self.tables.table_name(kind);

        let mut delete = Query::delete();
        delete
            .from_table(Alias::new(table.as_str()))
            .cond_where(self.condition(kind, &table, criteria)?);

        debug!("Deleting `{}` rows matching {}", table, criteria);

        Ok(self.db.execute(&delete).await?.rows_affected())
    }

    /// An id no row of `kind` currently has, chosen by the configured strategy.
    pub async fn first_missing_id(&self, kind: EntityKind) -> Result<i64, Error> {
        let table = self.tables.table_name(kind);

        let mut select = Query::select();
        select.column(Alias::new("id")).from(Alias::new(table.as_str()));

        let statement = self.db.get_database_backend().build(&select);
        let existing: BTreeSet<i64> = Value::find_by_statement(statement)
            .all(&self.db)
            .await?
            .iter()
            .filter_map(|row| row.get("id").and_then(Value::as_i64))
            .collect();

        Ok(self.missing_id.pick(&existing)?)
    }

    /// Check that the row with the record's id holds every field of the record.
    ///
    /// Timestamps are formatted by the server and skipped, as are fields that have no
    /// column in the table.
    pub async fn assert_record_persisted(
        &self,
        kind: EntityKind,
        record: &EntityRecord,
    ) -> Result<(), Error> {
        let table = self.tables.table_name(kind);
        let Some(id) = record.id() else {
            return Err(AssertionError::Mismatch {
                context: format!("{} record returned by the API", kind),
                expected: "an integer `id`".to_string(),
                actual: record.to_string(),
            }
            .into());
        };

        let criteria = EntityRecord::from([("id", Value::from(id))]);
        let Some(row) = self.select_rows(kind, &criteria).await?.into_iter().next() else {
            return Err(self.presence_error(kind, &criteria, "exactly one", 0).await?);
        };

        for (field, expected) in record.fields() {
            let Some(def) = schema::column_for(kind, field) else {
                continue;
            };
            if def.kind == ColumnKind::Timestamp {
                continue;
            }

            let actual = row.get(field).unwrap_or(&Value::Null);
            if !schema::values_match(expected, actual) {
                return Err(AssertionError::RowContent {
                    table,
                    id,
                    field: field.clone(),
                    expected: abbreviate(&expected.to_string()),
                    actual: abbreviate(&actual.to_string()),
                }
                .into());
            }
        }

        Ok(())
    }

    fn check_fields(&self, kind: EntityKind, table: &str, fields: &EntityRecord) -> Result<(), Error> {
        for (field, _) in fields.fields() {
            self.column(kind, table, field)?;
        }
        Ok(())
    }

    fn column(&self, kind: EntityKind, table: &str, field: &str) -> Result<&'static ColumnDef, Error> {
        schema::column_for(kind, field).ok_or_else(|| {
            PersistenceError::UnknownField {
                table: table.to_string(),
                field: field.to_string(),
            }
            .into()
        })
    }

    fn condition(
        &self,
        kind: EntityKind,
        table: &str,
        criteria: &EntityRecord,
    ) -> Result<Condition, Error> {
        let mut condition = Condition::all();
        for (field, value) in criteria.fields() {
            let def = self.column(kind, table, field)?;
            let column = Expr::col(Alias::new(def.column));
            condition = condition.add(if value.is_null() {
                column.is_null()
            } else {
                column.eq(schema::to_sql_value(&def.kind, value))
            });
        }
        Ok(condition)
    }

    async fn presence_error(
        &self,
        kind: EntityKind,
        criteria: &EntityRecord,
        expectation: &'static str,
        found: u64,
    ) -> Result<Error, Error> {
        let rows = self.select_rows(kind, &EntityRecord::new()).await?;
        let snapshot: Vec<Value> = rows.into_iter().map(EntityRecord::into_json).collect();

        Ok(AssertionError::RowPresence {
            table: self.tables.table_name(kind),
            criteria: criteria.to_string(),
            expectation,
            found,
            snapshot: abbreviate(&Value::Array(snapshot).to_string()),
        }
        .into())
    }
}

/// Cut long renderings down so failures stay readable.
fn abbreviate(text: &str) -> String {
    if text.chars().count() <= MAX_SNAPSHOT_CHARS {
        return text.to_string();
    }

    let mut short: String = text.chars().take(MAX_SNAPSHOT_CHARS).collect();
    short.push_str("...");
    short
}
