//! Reference schema of the news domain and conversions between API fields and columns.
//!
//! API payloads use camelCase field names, database columns use snake_case. The
//! conversion happens only here, so every other component works with API field names.

use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use sea_orm::Value as SqlValue;
use serde_json::Value;

use crate::{
    error::generator::GeneratorError,
    generator::{random_string, Alphabet},
    model::entity::{EntityKind, EntityRecord},
};

/// Format of timestamps written by direct inserts.
pub static TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of random strings used to fill omitted text columns.
const DEFAULT_STRING_LENGTH: i64 = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Primary key assigned by the database
    Id,
    /// Required reference to another kind
    ForeignKey(EntityKind),
    Varchar(usize),
    Text,
    Boolean,
    Timestamp,
    /// Nullable `creator_id` / `updater_id`
    ActorId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    /// API field name
    pub field: &'static str,
    pub column: &'static str,
    pub kind: ColumnKind,
}

const fn col(field: &'static str, column: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef {
        field,
        column,
        kind,
    }
}

const ID: ColumnDef = col("id", "id", ColumnKind::Id);
const CREATE_DATE: ColumnDef = col("createDate", "create_date", ColumnKind::Timestamp);
const CREATOR_ID: ColumnDef = col("creatorId", "creator_id", ColumnKind::ActorId);
const UPDATE_DATE: ColumnDef = col("updateDate", "update_date", ColumnKind::Timestamp);
const UPDATER_ID: ColumnDef = col("updaterId", "updater_id", ColumnKind::ActorId);

static NEWS_TYPE_COLUMNS: [ColumnDef; 6] = [
    ID,
    col("name", "name", ColumnKind::Varchar(255)),
    CREATE_DATE,
    CREATOR_ID,
    UPDATE_DATE,
    UPDATER_ID,
];

static NEWS_COLUMNS: [ColumnDef; 9] = [
    ID,
    col(
        "newsTypeId",
        "news_type_id",
        ColumnKind::ForeignKey(EntityKind::NewsType),
    ),
    col("title", "title", ColumnKind::Varchar(255)),
    col("body", "body", ColumnKind::Text),
    col("isPublished", "is_published", ColumnKind::Boolean),
    CREATE_DATE,
    CREATOR_ID,
    UPDATE_DATE,
    UPDATER_ID,
];

static TAG_COLUMNS: [ColumnDef; 6] = [
    ID,
    col("name", "name", ColumnKind::Varchar(255)),
    CREATE_DATE,
    CREATOR_ID,
    UPDATE_DATE,
    UPDATER_ID,
];

static COMMENT_COLUMNS: [ColumnDef; 7] = [
    ID,
    col("newsId", "news_id", ColumnKind::ForeignKey(EntityKind::News)),
    col("body", "body", ColumnKind::Text),
    CREATE_DATE,
    CREATOR_ID,
    UPDATE_DATE,
    UPDATER_ID,
];

static NEWS_TAG_PARAM_COLUMNS: [ColumnDef; 7] = [
    ID,
    col("newsId", "news_id", ColumnKind::ForeignKey(EntityKind::News)),
    col("tagId", "tag_id", ColumnKind::ForeignKey(EntityKind::Tag)),
    CREATE_DATE,
    CREATOR_ID,
    UPDATE_DATE,
    UPDATER_ID,
];

/// Columns of `kind` in table order.
pub fn columns(kind: EntityKind) -> &'static [ColumnDef] {
    match kind {
        EntityKind::NewsType => &NEWS_TYPE_COLUMNS,
        EntityKind::News => &NEWS_COLUMNS,
        EntityKind::Tag => &TAG_COLUMNS,
        EntityKind::Comment => &COMMENT_COLUMNS,
        EntityKind::NewsTagParam => &NEWS_TAG_PARAM_COLUMNS,
    }
}

pub fn column_for(kind: EntityKind, field: &str) -> Option<&'static ColumnDef> {
    columns(kind).iter().find(|def| def.field == field)
}

/// API field name of a database column; unknown columns fall back to the camelCase form.
pub fn field_for_column(kind: EntityKind, column: &str) -> String {
    columns(kind)
        .iter()
        .find(|def| def.column == column)
        .map(|def| def.field.to_string())
        .unwrap_or_else(|| snake_to_camel(column))
}

/// Foreign key fields of `kind` with the kind they reference.
pub fn foreign_keys(kind: EntityKind) -> impl Iterator<Item = (&'static str, EntityKind)> {
    columns(kind).iter().filter_map(|def| match def.kind {
        ColumnKind::ForeignKey(target) => Some((def.field, target)),
        _ => None,
    })
}

pub fn camel_to_snake(field: &str) -> String {
    let mut column = String::with_capacity(field.len() + 4);
    for c in field.chars() {
        if c.is_ascii_uppercase() {
            column.push('_');
            column.push(c.to_ascii_lowercase());
        } else {
            column.push(c);
        }
    }
    column
}

pub fn snake_to_camel(column: &str) -> String {
    let mut field = String::with_capacity(column.len());
    let mut upper = false;
    for c in column.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            field.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            field.push(c);
        }
    }
    field
}

/// Value written for a column the caller omitted, `None` when the column must be left out.
///
/// Ids are assigned by the database and foreign keys have no default.
pub fn default_value(kind: &ColumnKind) -> Result<Option<Value>, GeneratorError> {
    Ok(match kind {
        ColumnKind::Id | ColumnKind::ForeignKey(_) => None,
        ColumnKind::Varchar(_) | ColumnKind::Text => Some(Value::String(random_string(
            DEFAULT_STRING_LENGTH,
            &Alphabet::Ascii,
        )?)),
        ColumnKind::Boolean => Some(Value::Bool(false)),
        ColumnKind::Timestamp => Some(Value::String(
            Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string(),
        )),
        ColumnKind::ActorId => Some(Value::Null),
    })
}

/// Convert a JSON value to the SQL value bound for a column of `kind`.
///
/// Values that do not fit the column type are bound as text so the database decides.
pub fn to_sql_value(kind: &ColumnKind, value: &Value) -> SqlValue {
    match (kind, value) {
        (ColumnKind::Id | ColumnKind::ForeignKey(_) | ColumnKind::ActorId, Value::Null) => {
            Option::<i64>::None.into()
        }
        (ColumnKind::Varchar(_) | ColumnKind::Text, Value::Null) => Option::<String>::None.into(),
        (ColumnKind::Boolean, Value::Bool(flag)) => (*flag).into(),
        (ColumnKind::Boolean, Value::Number(n)) if n.as_i64().is_some() => {
            (n.as_i64() != Some(0)).into()
        }
        (ColumnKind::Timestamp, Value::String(s)) => match parse_timestamp(s) {
            Some(timestamp) => timestamp.into(),
            None => s.clone().into(),
        },
        (_, Value::String(s)) => s.clone().into(),
        (_, Value::Bool(flag)) => (*flag).into(),
        (_, Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.into()
            } else if let Some(u) = n.as_u64() {
                u.into()
            } else {
                n.as_f64().unwrap_or_default().into()
            }
        }
        (_, Value::Null) => Option::<String>::None.into(),
        (_, other) => other.to_string().into(),
    }
}

/// Parse the timestamp formats used by the API and the supported databases.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.naive_utc())
        })
}

/// Normalize a value read from the database for comparison with API values.
pub fn normalize(kind: &ColumnKind, value: Value) -> Value {
    match (kind, value) {
        (ColumnKind::Boolean, Value::Number(n)) => Value::Bool(n.as_i64().unwrap_or(0) != 0),
        (ColumnKind::Boolean, Value::String(s)) => {
            Value::Bool(matches!(s.as_str(), "1" | "t" | "true"))
        }
        (_, value) => value,
    }
}

/// Convert a row fetched as a JSON object of columns into an [`EntityRecord`].
pub fn record_from_row(kind: EntityKind, row: Value) -> EntityRecord {
    let Value::Object(columns) = row else {
        return EntityRecord::new();
    };

    let mut record = EntityRecord::new();
    for (column, value) in columns {
        let field = field_for_column(kind, &column);
        let value = match column_for(kind, &field) {
            Some(def) => normalize(&def.kind, value),
            None => value,
        };
        record.insert(field, value);
    }
    record
}

/// JSON values equal for the purpose of comparing API and database content.
///
/// Numbers compare by value regardless of their integer or float representation.
pub fn values_match(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => match (a.as_i64(), b.as_i64()) {
            (Some(a), Some(b)) => a == b,
            _ => a.as_f64() == b.as_f64(),
        },
        (a, b) => a == b,
    }
}

/// Table names per kind: explicit overrides first, otherwise prefix + logical name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableMap {
    prefix: String,
    overrides: HashMap<EntityKind, String>,
}

impl TableMap {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn with_override(mut self, kind: EntityKind, table: impl Into<String>) -> Self {
        self.overrides.insert(kind, table.into());
        self
    }

    pub fn table_name(&self, kind: EntityKind) -> String {
        match self.overrides.get(&kind) {
            Some(table) => table.clone(),
            None => format!("{}{}", self.prefix, kind.table()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn converts_between_field_and_column_names() {
        assert_eq!(camel_to_snake("newsTypeId"), "news_type_id");
        assert_eq!(snake_to_camel("news_type_id"), "newsTypeId");
        assert_eq!(camel_to_snake("id"), "id");
    }

    #[test]
    fn every_column_is_the_snake_case_of_its_field() {
        for kind in EntityKind::ALL {
            for def in columns(kind) {
                assert_eq!(camel_to_snake(def.field), def.column);
            }
        }
    }

    #[test]
    fn lists_foreign_keys() {
        let keys: Vec<_> = foreign_keys(EntityKind::NewsTagParam).collect();
        assert_eq!(
            keys,
            vec![("newsId", EntityKind::News), ("tagId", EntityKind::Tag)]
        );
        assert_eq!(foreign_keys(EntityKind::Tag).count(), 0);
    }

    #[test]
    fn table_map_applies_prefix_and_overrides() {
        let tables = TableMap::new("app_").with_override(EntityKind::Tag, "labels");
        assert_eq!(tables.table_name(EntityKind::Comment), "app_comment");
        assert_eq!(tables.table_name(EntityKind::Tag), "labels");
    }

    #[test]
    fn normalizes_boolean_columns() {
        let row = json!({"id": 1, "news_type_id": 2, "is_published": 1, "creator_id": null});
        let record = record_from_row(EntityKind::News, row);

        assert_eq!(record.get("isPublished"), Some(&json!(true)));
        assert_eq!(record.get("newsTypeId"), Some(&json!(2)));
        assert_eq!(record.get("creatorId"), Some(&Value::Null));
    }

    #[test]
    fn defaults_fill_optional_columns_only() {
        assert_eq!(default_value(&ColumnKind::Id).unwrap(), None);
        assert_eq!(
            default_value(&ColumnKind::ForeignKey(EntityKind::News)).unwrap(),
            None
        );
        assert_eq!(
            default_value(&ColumnKind::Boolean).unwrap(),
            Some(json!(false))
        );
        assert_eq!(
            default_value(&ColumnKind::ActorId).unwrap(),
            Some(Value::Null)
        );

        let timestamp = default_value(&ColumnKind::Timestamp).unwrap().unwrap();
        assert!(parse_timestamp(timestamp.as_str().unwrap()).is_some());
    }

    #[test]
    fn numbers_match_across_representations() {
        assert!(values_match(&json!(3), &json!(3.0)));
        assert!(!values_match(&json!(3), &json!("3")));
        assert!(values_match(&json!("text"), &json!("text")));
    }
}
