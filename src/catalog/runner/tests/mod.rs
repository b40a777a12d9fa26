use herald_test_utils::prelude::*;
use mockito::Matcher;
use serde_json::{json, Value};

use crate::{
    catalog::{
        runner::{exit_code, run, run_scenario, Report, ScenarioReport},
        Action, BoundaryClass, Input, Outcome, Scenario, Target,
    },
    config::Config,
    context::HarnessContext,
    error::{assertion::AssertionError, Error},
    model::entity::{EntityKind, EntityRecord},
    util::test::TestContextExt,
};

mod run_scenario;
