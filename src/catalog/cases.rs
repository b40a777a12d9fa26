//! Case generators shared by the per-resource catalogs.

use serde_json::{json, Value};

use crate::{
    catalog::{Action, BoundaryClass, Input, Outcome, Scenario, Target},
    generator::{boundary, Alphabet},
    model::entity::{EntityKind, EntityRecord},
};

/// Validation message for a string longer than `max` characters.
///
/// Thousands are separated by a space: `65 535`.
pub fn max_length_message(label: &str, max: i64) -> String {
    let digits = max.to_string();
    let mut grouped = String::new();
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    format!("Значение «{}» должно содержать максимум {} символов.", label, grouped)
}

fn random(length: i64, alphabet: Alphabet) -> Input {
    Input::RandomString { length, alphabet }
}

/// Create scenarios for a string field limited to `max` characters.
///
/// `message` is the exact validation message for one-past-max, when it is known.
pub fn string_field(
    kind: EntityKind,
    field: &'static str,
    max: i64,
    message: Option<String>,
) -> Vec<Scenario> {
    let create = |class| Scenario::new(kind, Action::Create, class);
    let rejected = |class, input| {
        create(class)
            .field(field, input)
            .expect(400, Outcome::Rejected)
    };

    let mut scenarios = vec![
        create(BoundaryClass::MaxLength).field(field, random(max, Alphabet::Ascii)),
        create(BoundaryClass::OverMaxLength)
            .field(field, random(max + 1, Alphabet::Ascii))
            .expect(400, Outcome::FieldError { field, message }),
        rejected(BoundaryClass::Empty, Input::Literal(json!(""))),
        create(BoundaryClass::Cyrillic).field(field, random(max, Alphabet::Cyrillic)),
        create(BoundaryClass::Hieroglyph).field(field, random(max, Alphabet::Hieroglyph)),
        create(BoundaryClass::SpecialCharacters).field(field, random(32, Alphabet::Special)),
        create(BoundaryClass::SqlInjection)
            .field(field, Input::Literal(json!(boundary::SQL_INJECTION))),
    ];

    let confusions: [(&str, Value); 4] = [
        ("integer", json!(12345)),
        ("boolean", json!(true)),
        ("null", Value::Null),
        ("array", json!(["value"])),
    ];
    for (name, value) in confusions {
        scenarios.push(
            rejected(BoundaryClass::TypeConfusion, Input::Literal(value)).named(format!(
                "{} create {} type confusion {}",
                resource(kind),
                field,
                name
            )),
        );
    }

    scenarios
}

/// Create scenarios for a required foreign key referencing `target`.
pub fn foreign_key(kind: EntityKind, field: &'static str, target: EntityKind) -> Vec<Scenario> {
    let create = |class| Scenario::new(kind, Action::Create, class);
    let invalid = |class, name: &str, value: Value| {
        create(class)
            .field(field, Input::Literal(value))
            .expect(400, Outcome::Rejected)
            .named(format!("{} create {} {}", resource(kind), field, name))
    };

    let mut scenarios = vec![
        create(BoundaryClass::ExistingReference).field(field, Input::PreconditionId(target)),
        create(BoundaryClass::MissingReference)
            .field(field, Input::MissingId(target))
            .expect(400, Outcome::Rejected),
        invalid(BoundaryClass::NonPositive, "zero", json!(0)),
        invalid(BoundaryClass::NonPositive, "negative", json!(-1)),
    ];

    scenarios.extend(boundary::descriptors().into_iter().filter_map(|descriptor| {
        let (class, name) = match descriptor.name {
            "INT32_OVER_MAX" => (BoundaryClass::OverInt32, "over int32"),
            "INT64_OVER_MAX" => (BoundaryClass::OverInt64, "over int64"),
            "INT64_UNDER_MIN" => (BoundaryClass::UnderInt64, "under int64"),
            _ => return None,
        };
        Some(invalid(class, name, descriptor.value))
    }));

    scenarios.extend([
        invalid(BoundaryClass::TypeConfusion, "string", json!("abc")),
        invalid(BoundaryClass::TypeConfusion, "boolean", json!(true)),
        invalid(BoundaryClass::TypeConfusion, "null", Value::Null),
    ]);

    scenarios
}

/// Unauthenticated create, update, delete and list, all rejected with 403.
pub fn unauthenticated(kind: EntityKind) -> Vec<Scenario> {
    [Action::Create, Action::Update, Action::Delete, Action::List]
        .into_iter()
        .map(|action| {
            Scenario::new(kind, action, BoundaryClass::Unauthenticated)
                .anonymous()
                .expect(403, Outcome::Forbidden)
        })
        .collect()
}

/// Read, update and delete of existing and missing records.
///
/// `seed` is applied to the record read back; `update` is the field and value of the
/// valid update.
pub fn crud(kind: EntityKind, seed: EntityRecord, update: (&'static str, Input)) -> Vec<Scenario> {
    let (field, input) = update;

    vec![
        Scenario::new(kind, Action::Read, BoundaryClass::Valid)
            .seed(seed)
            .expect(200, Outcome::Read),
        Scenario::new(kind, Action::Read, BoundaryClass::MissingTarget)
            .target(Target::Missing)
            .expect(404, Outcome::NotFound),
        Scenario::new(kind, Action::Update, BoundaryClass::Valid)
            .field(field, input)
            .expect(200, Outcome::Persisted),
        Scenario::new(kind, Action::Delete, BoundaryClass::Valid).expect(200, Outcome::Deleted),
        Scenario::new(kind, Action::Delete, BoundaryClass::MissingTarget)
            .target(Target::Missing)
            .expect(200, Outcome::DeletedIdempotent),
    ]
}

/// Pagination over five rows plus rejected `limit`/`offset` values.
pub fn pagination(kind: EntityKind) -> Vec<Scenario> {
    let mut scenarios: Vec<Scenario> = [(0, 2), (2, 2), (4, 2), (5, 2), (0, 10)]
        .into_iter()
        .map(|(offset, limit)| {
            Scenario::new(kind, Action::List, BoundaryClass::Pagination)
                .expect(200, Outcome::Page { offset, limit })
                .named(format!(
                    "{} list offset {} limit {}",
                    resource(kind),
                    offset,
                    limit
                ))
        })
        .collect();

    let invalid: [(&'static str, &str, Value); 3] = [
        ("limit", "negative", json!(-1)),
        ("offset", "negative", json!(-1)),
        ("limit", "over int32", json!(boundary::INT32_OVER_MAX)),
    ];
    for (field, name, value) in invalid {
        scenarios.push(
            Scenario::new(kind, Action::List, BoundaryClass::Pagination)
                .field(field, Input::Literal(value))
                .expect(400, Outcome::Rejected)
                .named(format!("{} list {} {}", resource(kind), field, name)),
        );
    }

    scenarios
}

fn resource(kind: EntityKind) -> &'static str {
    kind.resource().unwrap_or_else(|| kind.table())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_a_space() {
        assert_eq!(
            max_length_message("Body", 65_535),
            "Значение «Body» должно содержать максимум 65 535 символов."
        );
        assert_eq!(
            max_length_message("Name", 255),
            "Значение «Name» должно содержать максимум 255 символов."
        );
    }

    #[test]
    fn over_max_uses_one_past_the_limit() {
        let scenario = string_field(EntityKind::Tag, "name", 255, None)
            .into_iter()
            .find(|s| s.class == BoundaryClass::OverMaxLength)
            .unwrap();
        assert_eq!(
            scenario.input,
            Input::RandomString {
                length: 256,
                alphabet: Alphabet::Ascii
            }
        );
    }

    #[test]
    fn foreign_key_over_int64_is_unsigned() {
        let scenario = foreign_key(EntityKind::Comment, "newsId", EntityKind::News)
            .into_iter()
            .find(|s| s.class == BoundaryClass::OverInt64)
            .unwrap();
        match scenario.input {
            Input::Literal(value) => assert!(value.is_u64() && !value.is_i64()),
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn foreign_key_out_of_range_values_come_from_descriptors() {
        let scenarios = foreign_key(EntityKind::Comment, "newsId", EntityKind::News);
        for (class, name) in [
            (BoundaryClass::OverInt32, "INT32_OVER_MAX"),
            (BoundaryClass::OverInt64, "INT64_OVER_MAX"),
            (BoundaryClass::UnderInt64, "INT64_UNDER_MIN"),
        ] {
            let expected = boundary::descriptors()
                .into_iter()
                .find(|d| d.name == name)
                .unwrap();
            let scenario = scenarios.iter().find(|s| s.class == class).unwrap();
            assert_eq!(scenario.input, Input::Literal(expected.value));
            assert_eq!(scenario.outcome, Outcome::Rejected);
        }
    }
}
