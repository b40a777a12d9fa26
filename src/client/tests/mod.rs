use herald_test_utils::prelude::*;
use mockito::Matcher;
use serde_json::json;

use crate::{
    client::Method,
    error::{assertion::AssertionError, Error},
    model::{
        api::{ListFilter, ListPage, TagDto},
        entity::EntityKind,
        shape::JsonShape,
    },
    util::test::TestContextExt,
};
