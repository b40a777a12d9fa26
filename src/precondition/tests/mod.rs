use herald_test_utils::prelude::*;
use serde_json::json;

use crate::{
    error::{precondition::PreconditionError, Error},
    model::entity::{EntityKind, EntityRecord},
    precondition::SetupChannel,
    util::test::TestContextExt,
};

mod build_for;
