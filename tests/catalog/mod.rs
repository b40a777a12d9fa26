use herald::{
    catalog::{self, runner, Action, Outcome},
    model::entity::EntityKind,
};
use herald_test_utils::prelude::*;

use crate::TestContextExt;

mod unauthenticated;
