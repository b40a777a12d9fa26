//! Scenarios for `/v1/news-tag-param`.

use crate::{
    catalog::{cases, Input, Scenario},
    model::entity::{EntityKind, EntityRecord},
};

pub fn scenarios() -> Vec<Scenario> {
    let kind = EntityKind::NewsTagParam;

    let mut scenarios = cases::foreign_key(kind, "newsId", EntityKind::News);
    scenarios.extend(cases::foreign_key(kind, "tagId", EntityKind::Tag));
    scenarios.extend(cases::unauthenticated(kind));
    // Re-point the association at the tag created for it.
    scenarios.extend(cases::crud(
        kind,
        EntityRecord::new(),
        ("tagId", Input::Fresh(EntityKind::Tag)),
    ));
    scenarios.extend(cases::pagination(kind));
    scenarios
}
