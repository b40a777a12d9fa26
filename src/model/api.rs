use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::model::entity::EntityKind;

/// A payload type returned by one REST resource.
pub trait ApiResource: DeserializeOwned {
    /// Entity kind the resource exposes.
    const KIND: EntityKind;

    fn id(&self) -> i64;
}

/// A tag as returned by `/v1/tag`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDto {
    pub id: i64,
    pub name: String,
    pub create_date: String,
    pub creator_id: Option<i64>,
    pub update_date: String,
    pub updater_id: Option<i64>,
}

impl ApiResource for TagDto {
    const KIND: EntityKind = EntityKind::Tag;

    fn id(&self) -> i64 {
        self.id
    }
}

/// A comment as returned by `/v1/comment`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    /// The news item the comment belongs to
    pub news_id: i64,
    pub body: String,
    pub create_date: String,
    pub creator_id: Option<i64>,
    pub update_date: String,
    pub updater_id: Option<i64>,
}

impl ApiResource for CommentDto {
    const KIND: EntityKind = EntityKind::Comment;

    fn id(&self) -> i64 {
        self.id
    }
}

/// A news-tag association as returned by `/v1/news-tag-param`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsTagParamDto {
    pub id: i64,
    pub news_id: i64,
    pub tag_id: i64,
    pub create_date: String,
    pub creator_id: Option<i64>,
    pub update_date: String,
    pub updater_id: Option<i64>,
}

impl ApiResource for NewsTagParamDto {
    const KIND: EntityKind = EntityKind::NewsTagParam;

    fn id(&self) -> i64 {
        self.id
    }
}

/// One page of a list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub list: Vec<T>,
    /// True iff rows exist beyond `offset + limit`
    pub more: bool,
}

/// Payload of a delete call, `{success: true}` even when the id never existed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: bool,
}

/// The `filter` object accepted by list endpoints.
///
/// Values are untyped JSON so scenarios can send out-of-range or wrongly typed filters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<Value>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn news_id(mut self, value: impl Into<Value>) -> Self {
        self.news_id = Some(value.into());
        self
    }

    pub fn tag_id(mut self, value: impl Into<Value>) -> Self {
        self.tag_id = Some(value.into());
        self
    }

    pub fn body(mut self, value: impl Into<Value>) -> Self {
        self.body = Some(value.into());
        self
    }

    pub fn name(mut self, value: impl Into<Value>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn limit(mut self, value: impl Into<Value>) -> Self {
        self.limit = Some(value.into());
        self
    }

    pub fn offset(mut self, value: impl Into<Value>) -> Self {
        self.offset = Some(value.into());
        self
    }

    /// Set a filter key by its API name, unknown keys are ignored.
    pub fn set(&mut self, key: &str, value: Value) {
        let slot = match key {
            "newsId" => &mut self.news_id,
            "tagId" => &mut self.tag_id,
            "body" => &mut self.body,
            "name" => &mut self.name,
            "limit" => &mut self.limit,
            "offset" => &mut self.offset,
            _ => return,
        };
        *slot = Some(value);
    }

    /// Request body for a list call: `{"filter": {...}}`, or `{}` without any filter key.
    pub fn to_body(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(Value::Object(filter)) if !filter.is_empty() => json!({ "filter": filter }),
            _ => Value::Object(Map::new()),
        }
    }
}
