use herald_test_utils::prelude::*;
use serde_json::{json, Value};

use crate::{
    data::{schema::TableMap, DatabaseVerifier},
    error::{assertion::AssertionError, persistence::PersistenceError, Error},
    generator::MissingIdStrategy,
    model::entity::{EntityKind, EntityRecord},
};

mod assert_present;
mod delete_rows;

fn verifier(test: &TestContext) -> DatabaseVerifier {
    DatabaseVerifier::new(
        test.db.clone(),
        TableMap::default(),
        MissingIdStrategy::Sequential,
    )
}
