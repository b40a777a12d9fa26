//! Scenarios for `/v1/comment`.

use crate::{
    catalog::{cases, Action, BoundaryClass, Input, Outcome, Scenario},
    generator::{boundary::TEXT_MAX_LENGTH, Alphabet},
    model::entity::{EntityKind, EntityRecord},
};

pub fn scenarios() -> Vec<Scenario> {
    let kind = EntityKind::Comment;

    let mut scenarios = cases::string_field(
        kind,
        "body",
        TEXT_MAX_LENGTH,
        Some(cases::max_length_message("Body", TEXT_MAX_LENGTH)),
    );
    scenarios.extend(cases::foreign_key(kind, "newsId", EntityKind::News));
    scenarios.extend(cases::unauthenticated(kind));
    scenarios.extend(cases::crud(
        kind,
        EntityRecord::new(),
        (
            "body",
            Input::RandomString {
                length: 64,
                alphabet: Alphabet::Cyrillic,
            },
        ),
    ));
    scenarios.extend(cases::pagination(kind));
    scenarios.push(
        Scenario::new(kind, Action::List, BoundaryClass::Filter)
            .expect(200, Outcome::FilterComposition)
            .named("comment list newsId and body filters compose"),
    );
    scenarios
}
