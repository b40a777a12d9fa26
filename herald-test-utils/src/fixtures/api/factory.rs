//! Response envelope factories.
//!
//! Success responses are `{errors: [], notices: [], data: <payload>}`, failures carry a
//! single error and `data: []`.

use serde_json::{json, Value};

use crate::{
    constant::{FORBIDDEN_TITLE, TEST_TIMESTAMP},
    model::{CommentModel, NewsTagParamModel, TagModel},
};

pub fn success_envelope(data: Value) -> Value {
    json!({ "errors": [], "notices": [], "data": data })
}

pub fn error_envelope(code: i64, title: &str, data: Value) -> Value {
    json!({
        "errors": [{ "code": code, "title": title, "detail": "", "data": data }],
        "notices": [],
        "data": []
    })
}

/// The envelope returned for unauthenticated requests.
pub fn forbidden_envelope() -> Value {
    error_envelope(403, FORBIDDEN_TITLE, json!({}))
}

/// A 400 validation failure with `message` attached to `field`.
pub fn field_error_envelope(field: &str, message: &str) -> Value {
    error_envelope(400, "Ошибка валидации", json!({ field: message }))
}

pub fn not_found_envelope() -> Value {
    error_envelope(404, "Не найдено", json!({}))
}

pub fn delete_success() -> Value {
    success_envelope(json!({ "success": true }))
}

pub fn page(list: Vec<Value>, more: bool) -> Value {
    success_envelope(json!({ "list": list, "more": more }))
}

/// API representation of a tag row.
pub fn tag_json(tag: &TagModel) -> Value {
    json!({
        "id": tag.id,
        "name": tag.name,
        "createDate": TEST_TIMESTAMP,
        "creatorId": tag.creator_id,
        "updateDate": TEST_TIMESTAMP,
        "updaterId": tag.updater_id
    })
}

/// API representation of a comment row.
pub fn comment_json(comment: &CommentModel) -> Value {
    json!({
        "id": comment.id,
        "newsId": comment.news_id,
        "body": comment.body,
        "createDate": TEST_TIMESTAMP,
        "creatorId": comment.creator_id,
        "updateDate": TEST_TIMESTAMP,
        "updaterId": comment.updater_id
    })
}

/// API representation of a news-tag association row.
pub fn news_tag_param_json(param: &NewsTagParamModel) -> Value {
    json!({
        "id": param.id,
        "newsId": param.news_id,
        "tagId": param.tag_id,
        "createDate": TEST_TIMESTAMP,
        "creatorId": param.creator_id,
        "updateDate": TEST_TIMESTAMP,
        "updaterId": param.updater_id
    })
}
