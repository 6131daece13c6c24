//! To-do item domain model.
//!
//! # Responsibility
//! - Define the stored item record and the draft shape used at creation.
//! - Define the tri-state due-date patch used by the update path.
//!
//! # Invariants
//! - `id` is assigned by the persistence layer and never reused.
//! - `owner` is set once at creation; no operation reassigns it.
//! - `is_complete` always carries a concrete boolean value.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a stored item.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ItemId = Uuid;

/// Opaque identity reference attached by the identity provider.
///
/// The core trusts this value as-is; resolving a request to an identity is
/// an edge concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Validation failure raised by persistence write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemValidationError {
    /// Item text must be non-empty at creation.
    EmptyText,
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "item text must not be empty"),
        }
    }
}

impl Error for ItemValidationError {}

/// Creation request for a new item.
///
/// The persistence layer assigns `id`, `created_at` and `updated_at`; a
/// draft only carries the caller-supplied fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    /// Identity of the caller who will own the stored item.
    pub owner: OwnerId,
    /// Free text describing the task.
    pub text: String,
    /// Unix epoch milliseconds. Absent when the item has no deadline.
    pub due_date: Option<i64>,
}

impl ItemDraft {
    /// Creates a draft with no due date.
    pub fn new(owner: OwnerId, text: impl Into<String>) -> Self {
        Self {
            owner,
            text: text.into(),
            due_date: None,
        }
    }

    /// Creates a draft carrying an optional due date.
    pub fn with_due_date(owner: OwnerId, text: impl Into<String>, due_date: Option<i64>) -> Self {
        Self {
            owner,
            text: text.into(),
            due_date,
        }
    }

    /// Checks creation-time constraints.
    ///
    /// Mirrors the store schema: `text` is required at creation. Update
    /// paths do not re-run this check, so empty overwrites stay legal.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if self.text.is_empty() {
            return Err(ItemValidationError::EmptyText);
        }
        Ok(())
    }
}

/// Stored to-do item as returned by every read path.
///
/// Serialized field names follow the external wire schema (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable id assigned at insertion.
    pub id: ItemId,
    /// Identity that created the item; sole intended authority over it.
    pub owner: OwnerId,
    pub text: String,
    pub is_complete: bool,
    /// Unix epoch milliseconds. `None` when no deadline is set.
    pub due_date: Option<i64>,
    /// Maintained by the persistence layer on insert.
    pub created_at: i64,
    /// Maintained by the persistence layer on every write.
    pub updated_at: i64,
}

impl Item {
    /// Returns whether this item is past due and still open.
    ///
    /// A due date in the past is legal; it merely surfaces as an urgency
    /// signal. Completed items are never overdue.
    pub fn is_overdue(&self, now_epoch_ms: i64) -> bool {
        match self.due_date {
            Some(due) => !self.is_complete && due < now_epoch_ms,
            None => false,
        }
    }
}

/// Tri-state due-date change carried by an update patch.
///
/// The store historically conflated "clear" with "absent"; this type keeps
/// the two intents distinct so callers can express either.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueDatePatch {
    /// Leave the stored due date unchanged.
    #[default]
    Keep,
    /// Overwrite the due date with the given epoch-ms instant.
    Set(i64),
    /// Remove the stored due date.
    Clear,
}

/// Field updates applied to a stored item.
///
/// `text` and `is_complete` are always applied verbatim, including empty
/// and false overwrites; the update payload always carries both fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPatch {
    pub text: String,
    pub is_complete: bool,
    pub due_date: DueDatePatch,
}

impl ItemPatch {
    /// Creates a patch that leaves the due date untouched.
    pub fn new(text: impl Into<String>, is_complete: bool) -> Self {
        Self {
            text: text.into(),
            is_complete,
            due_date: DueDatePatch::Keep,
        }
    }

    /// Sets the due-date change carried by this patch.
    pub fn due_date(mut self, due_date: DueDatePatch) -> Self {
        self.due_date = due_date;
        self
    }
}
