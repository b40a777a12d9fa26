//! Declarative test scenarios for every entity with a REST resource.
//!
//! A scenario states what to send and what to expect. Inputs that depend on run-time
//! state (random strings, missing ids, ids of preconditions) are symbolic and resolved by
//! the [`runner`] just before the request is sent.

mod cases;
pub mod comment;
pub mod news_tag_param;
pub mod runner;
pub mod tag;

use std::fmt;

use serde_json::Value;

use crate::{
    generator::Alphabet,
    model::entity::{EntityKind, EntityRecord},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::List => "list",
        };
        f.write_str(name)
    }
}

/// Equivalence class the input of a scenario belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryClass {
    Valid,
    MaxLength,
    OverMaxLength,
    Empty,
    Cyrillic,
    Hieroglyph,
    SpecialCharacters,
    SqlInjection,
    TypeConfusion,
    ExistingReference,
    MissingReference,
    NonPositive,
    OverInt32,
    OverInt64,
    UnderInt64,
    Unauthenticated,
    MissingTarget,
    Pagination,
    Filter,
}

impl fmt::Display for BoundaryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Valid => "valid",
            Self::MaxLength => "max length",
            Self::OverMaxLength => "over max length",
            Self::Empty => "empty",
            Self::Cyrillic => "cyrillic",
            Self::Hieroglyph => "hieroglyph",
            Self::SpecialCharacters => "special characters",
            Self::SqlInjection => "sql injection",
            Self::TypeConfusion => "type confusion",
            Self::ExistingReference => "existing reference",
            Self::MissingReference => "missing reference",
            Self::NonPositive => "non-positive",
            Self::OverInt32 => "over int32",
            Self::OverInt64 => "over int64",
            Self::UnderInt64 => "under int64",
            Self::Unauthenticated => "unauthenticated",
            Self::MissingTarget => "missing target",
            Self::Pagination => "pagination",
            Self::Filter => "filter",
        };
        f.write_str(name)
    }
}

/// Symbolic value of the field under test.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Literal(Value),
    RandomString { length: i64, alphabet: Alphabet },
    /// An id no row of the kind has
    MissingId(EntityKind),
    /// Id of the precondition created for the kind
    PreconditionId(EntityKind),
    /// Id of a record of the kind created just for this input
    Fresh(EntityKind),
    /// Leave the field out of the request body
    Omitted,
}

/// Which id a read, update or delete addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// No id, the request creates or lists
    New,
    /// The record created as precondition
    Precondition,
    /// An id no row has
    Missing,
}

/// What must hold after the request.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Success envelope with the record, matching what was sent and what is stored
    Persisted,
    /// Success envelope with the precondition record
    Read,
    /// Error envelope with a message for `field`, no mutation
    FieldError {
        field: &'static str,
        message: Option<String>,
    },
    /// Error envelope, no mutation
    Rejected,
    /// The exact forbidden envelope, no mutation
    Forbidden,
    /// `{success: true}` and the row is gone
    Deleted,
    /// `{success: true}` and the row count is unchanged
    DeletedIdempotent,
    NotFound,
    /// The page at `offset`/`limit` of rows ordered by id
    Page { offset: i64, limit: i64 },
    /// `newsId` + `body` filters return the intersection of each filter alone
    FilterComposition,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub kind: EntityKind,
    pub action: Action,
    pub field: Option<&'static str>,
    pub class: BoundaryClass,
    pub input: Input,
    pub target: Target,
    /// Fields applied to the precondition record of `kind`
    pub seed: EntityRecord,
    pub authenticated: bool,
    pub expected_status: u16,
    pub outcome: Outcome,
}

impl Scenario {
    pub fn new(kind: EntityKind, action: Action, class: BoundaryClass) -> Self {
        let target = match action {
            Action::Create | Action::List => Target::New,
            Action::Read | Action::Update | Action::Delete => Target::Precondition,
        };

        Self {
            name: String::new(),
            kind,
            action,
            field: None,
            class,
            input: Input::Omitted,
            target,
            seed: EntityRecord::new(),
            authenticated: true,
            expected_status: 200,
            outcome: Outcome::Persisted,
        }
    }

    pub fn field(mut self, field: &'static str, input: Input) -> Self {
        self.field = Some(field);
        self.input = input;
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn seed(mut self, seed: EntityRecord) -> Self {
        self.seed = seed;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn expect(mut self, status: u16, outcome: Outcome) -> Self {
        self.expected_status = status;
        self.outcome = outcome;
        self
    }

    /// Give the scenario a name; unnamed scenarios are named after their parts.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Resource segment of the kind, e.g. `news-tag-param`.
    pub fn resource(&self) -> &'static str {
        self.kind.resource().unwrap_or_else(|| self.kind.table())
    }

    fn finish(mut self) -> Self {
        if self.name.is_empty() {
            self.name = match self.field {
                Some(field) => format!(
                    "{} {} {} {}",
                    self.resource(),
                    self.action,
                    field,
                    self.class
                ),
                None => format!("{} {} {}", self.resource(), self.action, self.class),
            };
        }
        self
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Every scenario, grouped by kind in dependency order.
pub fn catalog() -> Vec<Scenario> {
    EntityKind::ALL.into_iter().flat_map(for_kind).collect()
}

/// Scenarios of one kind; empty for kinds without a REST resource.
pub fn for_kind(kind: EntityKind) -> Vec<Scenario> {
    let scenarios = match kind {
        EntityKind::Tag => tag::scenarios(),
        EntityKind::Comment => comment::scenarios(),
        EntityKind::NewsTagParam => news_tag_param::scenarios(),
        EntityKind::NewsType | EntityKind::News => Vec::new(),
    };
    scenarios.into_iter().map(Scenario::finish).collect()
}

/// The whole catalog, or only the scenarios of `only`.
pub fn selected(only: Option<EntityKind>) -> Vec<Scenario> {
    match only {
        Some(kind) => for_kind(kind),
        None => catalog(),
    }
}
