use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Entity kinds of the news domain, listed in dependency order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    NewsType,
    News,
    Tag,
    Comment,
    NewsTagParam,
}

impl EntityKind {
    /// Every kind in topological order: dependencies always come before dependents.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::NewsType,
        EntityKind::News,
        EntityKind::Tag,
        EntityKind::Comment,
        EntityKind::NewsTagParam,
    ];

    /// Logical table name before any prefix or override is applied.
    pub fn table(&self) -> &'static str {
        match self {
            Self::NewsType => "news_type",
            Self::News => "news",
            Self::Tag => "tag",
            Self::Comment => "comment",
            Self::NewsTagParam => "news_tag_param",
        }
    }

    /// REST resource segment under `/v1/`, if the kind is exposed by the API.
    pub fn resource(&self) -> Option<&'static str> {
        match self {
            Self::NewsType | Self::News => None,
            Self::Tag => Some("tag"),
            Self::Comment => Some("comment"),
            Self::NewsTagParam => Some("news-tag-param"),
        }
    }

    /// Role under which a created record of this kind is returned by the precondition builder.
    pub fn role(&self) -> &'static str {
        match self {
            Self::NewsType => "newsTypeData",
            Self::News => "newsData",
            Self::Tag => "tagData",
            Self::Comment => "commentData",
            Self::NewsTagParam => "newsTagParamData",
        }
    }

    /// Kinds referenced by a required foreign key of this kind.
    pub fn dependencies(&self) -> &'static [EntityKind] {
        match self {
            Self::NewsType | Self::Tag => &[],
            Self::News => &[EntityKind::NewsType],
            Self::Comment => &[EntityKind::News],
            Self::NewsTagParam => &[EntityKind::News, EntityKind::Tag],
        }
    }

    /// Transitive dependencies of this kind in topological order, excluding the kind itself.
    pub fn dependency_closure(&self) -> Vec<EntityKind> {
        let mut needed = vec![*self];
        let mut closure = Vec::new();

        // ALL is topologically ordered, so walking it backwards sees dependents first.
        for kind in Self::ALL.iter().rev() {
            if needed.contains(kind) {
                needed.extend_from_slice(kind.dependencies());
                if kind != self {
                    closure.push(*kind);
                }
            }
        }

        closure.reverse();
        closure
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NewsType => "NewsType",
            Self::News => "News",
            Self::Tag => "Tag",
            Self::Comment => "Comment",
            Self::NewsTagParam => "NewsTagParam",
        };
        f.write_str(name)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    /// Accepts the display name, the table name or the resource segment, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.to_string().to_ascii_lowercase() == wanted
                    || kind.table() == wanted
                    || kind.resource() == Some(wanted.as_str())
            })
            .ok_or_else(|| format!("unknown entity kind `{}`", s))
    }
}

/// One row of a domain table keyed by API field name (`newsId`, `createDate`, ...).
///
/// Records coming from the database are converted to the same field names and value
/// types as API payloads so the two can be compared directly.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityRecord(Map<String, Value>);

impl EntityRecord {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a record from a JSON object, returns `None` for any other JSON value.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(field.into(), value)
    }

    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.insert(field, value);
        self
    }

    /// The system-assigned identifier, if the record has an integer `id`.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    /// Overwrite this record's fields with every field of `other`.
    pub fn merge(&mut self, other: &EntityRecord) {
        for (field, value) in other.fields() {
            self.0.insert(field.clone(), value.clone());
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

impl<K: Into<String>, const N: usize> From<[(K, Value); N]> for EntityRecord {
    fn from(pairs: [(K, Value); N]) -> Self {
        Self(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl From<Map<String, Value>> for EntityRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl fmt::Display for EntityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.0.clone()))
    }
}
