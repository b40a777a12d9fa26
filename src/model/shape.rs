//! Declarative JSON shapes.
//!
//! A shape maps field paths to one of `integer`, `string`, `boolean`, `array`,
//! `integer|null` or `string|null`, nests through objects, and uses [`JsonShape::List`]
//! for collection payloads where every element must match the same shape.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde_json::Value;

use crate::model::entity::EntityKind;

#[derive(Clone, Debug, PartialEq)]
pub enum JsonShape {
    Integer,
    String,
    Boolean,
    Array,
    NullableInteger,
    NullableString,
    /// Object with the listed fields; extra fields in the actual value are allowed
    Object(BTreeMap<String, JsonShape>),
    /// Array whose every element matches the inner shape
    List(Box<JsonShape>),
}

/// First location where a JSON value differs from what was expected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

impl JsonShape {
    pub fn object<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, JsonShape)>,
        K: Into<String>,
    {
        Self::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn list(item: JsonShape) -> Self {
        Self::List(Box::new(item))
    }

    /// Shape of a success envelope carrying `data`.
    pub fn envelope(data: JsonShape) -> Self {
        Self::object([
            ("errors", JsonShape::Array),
            ("notices", JsonShape::Array),
            ("data", data),
        ])
    }

    /// Shape of one record of `kind` as returned by the API.
    pub fn record(kind: EntityKind) -> Self {
        let mut fields = vec![("id", JsonShape::Integer)];
        match kind {
            EntityKind::NewsType | EntityKind::Tag => fields.push(("name", JsonShape::String)),
            EntityKind::News => fields.extend([
                ("newsTypeId", JsonShape::Integer),
                ("title", JsonShape::String),
                ("body", JsonShape::String),
                ("isPublished", JsonShape::Boolean),
            ]),
            EntityKind::Comment => fields.extend([
                ("newsId", JsonShape::Integer),
                ("body", JsonShape::String),
            ]),
            EntityKind::NewsTagParam => fields.extend([
                ("newsId", JsonShape::Integer),
                ("tagId", JsonShape::Integer),
            ]),
        }
        fields.extend([
            ("createDate", JsonShape::String),
            ("creatorId", JsonShape::NullableInteger),
            ("updateDate", JsonShape::String),
            ("updaterId", JsonShape::NullableInteger),
        ]);
        Self::object(fields)
    }

    /// Shape of one page of a list endpoint of `kind`.
    pub fn page(kind: EntityKind) -> Self {
        Self::object([
            ("list", JsonShape::list(Self::record(kind))),
            ("more", JsonShape::Boolean),
        ])
    }

    /// Check `value` against this shape, reporting the first mismatch.
    pub fn check(&self, value: &Value) -> Result<(), Mismatch> {
        self.check_at(value, "$")
    }

    fn check_at(&self, value: &Value, path: &str) -> Result<(), Mismatch> {
        let matches = match self {
            Self::Integer => is_integer(value),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::NullableInteger => value.is_null() || is_integer(value),
            Self::NullableString => value.is_null() || value.is_string(),
            Self::Object(fields) => {
                let Some(object) = value.as_object() else {
                    return Err(self.mismatch(path, value));
                };
                for (field, shape) in fields {
                    let field_path = format!("{}.{}", path, field);
                    match object.get(field) {
                        Some(inner) => shape.check_at(inner, &field_path)?,
                        None => {
                            return Err(Mismatch {
                                path: field_path,
                                expected: shape.to_string(),
                                actual: "missing".to_string(),
                            })
                        }
                    }
                }
                true
            }
            Self::List(item) => {
                let Some(elements) = value.as_array() else {
                    return Err(self.mismatch(path, value));
                };
                for (index, element) in elements.iter().enumerate() {
                    item.check_at(element, &format!("{}[{}]", path, index))?;
                }
                true
            }
        };

        if matches {
            Ok(())
        } else {
            Err(self.mismatch(path, value))
        }
    }

    fn mismatch(&self, path: &str, value: &Value) -> Mismatch {
        Mismatch {
            path: path.to_string(),
            expected: self.to_string(),
            actual: json_type_name(value).to_string(),
        }
    }
}

impl fmt::Display for JsonShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("integer"),
            Self::String => f.write_str("string"),
            Self::Boolean => f.write_str("boolean"),
            Self::Array => f.write_str("array"),
            Self::NullableInteger => f.write_str("integer|null"),
            Self::NullableString => f.write_str("string|null"),
            Self::Object(_) => f.write_str("object"),
            Self::List(item) => write!(f, "list of {}", item),
        }
    }
}

impl FromStr for JsonShape {
    type Err = String;

    /// Parses the scalar shape names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "integer" => Ok(Self::Integer),
            "string" => Ok(Self::String),
            "boolean" => Ok(Self::Boolean),
            "array" => Ok(Self::Array),
            "integer|null" | "null|integer" => Ok(Self::NullableInteger),
            "string|null" | "null|string" => Ok(Self::NullableString),
            other => Err(format!("unknown JSON shape `{}`", other)),
        }
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

/// Name of the JSON type of `value`, with integers told apart from other numbers.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) if is_integer(value) => "integer",
        Value::Number(_) => "float",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
