//! Scenarios for `/v1/tag`.

use serde_json::json;

use crate::{
    catalog::{cases, Input, Scenario},
    generator::{boundary::VARCHAR_MAX_LENGTH, Alphabet},
    model::entity::{EntityKind, EntityRecord},
};

pub fn scenarios() -> Vec<Scenario> {
    let kind = EntityKind::Tag;

    let mut scenarios = cases::string_field(kind, "name", VARCHAR_MAX_LENGTH, None);
    scenarios.extend(cases::unauthenticated(kind));
    scenarios.extend(cases::crud(
        kind,
        EntityRecord::from([("name", json!("Test"))]),
        (
            "name",
            Input::RandomString {
                length: 32,
                alphabet: Alphabet::Ascii,
            },
        ),
    ));
    scenarios.extend(cases::pagination(kind));
    scenarios
}
