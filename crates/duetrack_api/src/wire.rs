//! Wire-format types for the request surface.
//!
//! # Responsibility
//! - Decode the JSON payloads clients submit, preserving the legacy
//!   field-update policy exactly.
//! - Build the `{ message, item }` response envelopes the surface returns.
//!
//! # Invariants
//! - Unknown payload fields are ignored (clients resend whole records).
//! - `text` and `isComplete` decode to concrete values even when absent,
//!   because the update payload is always applied verbatim.

use chrono::DateTime;
use duetrack_core::{DueDatePatch, Item};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_SERVER_ERROR: u16 = 500;

/// Raw due-date value as it appears in a request payload.
///
/// Clients submit either epoch milliseconds or an RFC 3339 string
/// (browser clients send `Date.toISOString()` output); `Null` and
/// `Missing` are kept distinct so the strict patch mode can tell "clear"
/// from "leave alone".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DueDateInput {
    Millis(i64),
    Text(String),
    /// Explicit JSON `null`.
    Null,
    /// Key absent from the payload; produced only through `Default`.
    #[serde(skip)]
    #[default]
    Missing,
}

/// Failure to interpret a supplied due-date value as an instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueDateParseError {
    pub value: String,
    pub detail: String,
}

impl Display for DueDateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid due date `{}`: {}", self.value, self.detail)
    }
}

impl Error for DueDateParseError {}

/// Governs how an update payload's due date is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PatchMode {
    /// The historical policy: the due date is applied only when the
    /// supplied value is truthy. An explicit `null` (or empty string, or
    /// `0`) meant to clear the field is silently ignored and the stored
    /// value is retained. Default.
    #[default]
    Legacy,
    /// Explicit `null` (or empty string) clears the stored due date; an
    /// absent key leaves it unchanged; `0` is a valid epoch instant.
    Strict,
}

impl DueDateInput {
    // Truthiness as clients expect it: null, absent, empty string and
    // numeric zero all count as "not supplied".
    fn is_truthy(&self) -> bool {
        match self {
            Self::Millis(ms) => *ms != 0,
            Self::Text(text) => !text.is_empty(),
            Self::Null | Self::Missing => false,
        }
    }

    fn parse_instant(&self) -> Result<i64, DueDateParseError> {
        match self {
            Self::Millis(ms) => Ok(*ms),
            Self::Text(text) => DateTime::parse_from_rfc3339(text)
                .map(|instant| instant.timestamp_millis())
                .map_err(|err| DueDateParseError {
                    value: text.clone(),
                    detail: err.to_string(),
                }),
            Self::Null | Self::Missing => Err(DueDateParseError {
                value: String::new(),
                detail: "no value supplied".to_string(),
            }),
        }
    }

    /// Creation semantics: falsy input is stored as absent, never as a
    /// sentinel date.
    pub fn resolve_for_create(&self) -> Result<Option<i64>, DueDateParseError> {
        if !self.is_truthy() {
            return Ok(None);
        }
        self.parse_instant().map(Some)
    }

    /// Update semantics under the given patch mode.
    pub fn resolve_for_update(&self, mode: PatchMode) -> Result<DueDatePatch, DueDateParseError> {
        match mode {
            PatchMode::Legacy => {
                if self.is_truthy() {
                    self.parse_instant().map(DueDatePatch::Set)
                } else {
                    Ok(DueDatePatch::Keep)
                }
            }
            PatchMode::Strict => match self {
                Self::Missing => Ok(DueDatePatch::Keep),
                Self::Null => Ok(DueDatePatch::Clear),
                Self::Text(text) if text.is_empty() => Ok(DueDatePatch::Clear),
                _ => self.parse_instant().map(DueDatePatch::Set),
            },
        }
    }
}

/// Creation payload: `{ text, dueDate? }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateItemRequest {
    pub text: String,
    pub due_date: DueDateInput,
}

/// Update payload: `{ text, isComplete, dueDate? }`.
///
/// `text` and `isComplete` default when absent and are applied verbatim,
/// including empty/false overwrites; clients always resend both fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateItemRequest {
    pub text: String,
    pub is_complete: bool,
    pub due_date: DueDateInput,
}

/// HTTP-shaped handler result: status code plus JSON body.
///
/// Hosts serialize the body and status verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    /// `{ message, item }` — `item` is serialized even when `None`, so an
    /// unknown-id update yields an explicit `"item": null`.
    pub fn item(status: u16, message: &str, item: Option<&Item>) -> Self {
        Self {
            status,
            body: json!({ "message": message, "item": item }),
        }
    }

    /// `{ message, items }`.
    pub fn items(status: u16, message: &str, items: &[Item]) -> Self {
        Self {
            status,
            body: json!({ "message": message, "items": items }),
        }
    }

    /// `{ message }` — used by the not-found delete path.
    pub fn message_only(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "message": message }),
        }
    }

    /// `{ message, error }` with a server-fault status.
    pub fn failure(message: &str, detail: &str) -> Self {
        Self {
            status: STATUS_SERVER_ERROR,
            body: json!({ "message": message, "error": detail }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DueDateInput, PatchMode, UpdateItemRequest};
    use duetrack_core::DueDatePatch;
    use serde_json::json;

    #[test]
    fn due_date_input_decodes_each_payload_shape() {
        let from = |value| serde_json::from_value::<DueDateInput>(value).unwrap();

        assert_eq!(from(json!(1_700_000_000_000_i64)), DueDateInput::Millis(1_700_000_000_000));
        assert_eq!(
            from(json!("2026-08-05T10:00:00Z")),
            DueDateInput::Text("2026-08-05T10:00:00Z".to_string())
        );
        assert_eq!(from(json!(null)), DueDateInput::Null);
    }

    #[test]
    fn missing_due_date_key_decodes_as_missing() {
        let request: UpdateItemRequest =
            serde_json::from_value(json!({ "text": "x", "isComplete": false })).unwrap();
        assert_eq!(request.due_date, DueDateInput::Missing);
    }

    #[test]
    fn legacy_mode_keeps_stored_value_for_falsy_input() {
        for input in [
            DueDateInput::Null,
            DueDateInput::Missing,
            DueDateInput::Text(String::new()),
            DueDateInput::Millis(0),
        ] {
            assert_eq!(
                input.resolve_for_update(PatchMode::Legacy).unwrap(),
                DueDatePatch::Keep
            );
        }
    }

    #[test]
    fn strict_mode_distinguishes_clear_from_keep() {
        assert_eq!(
            DueDateInput::Null.resolve_for_update(PatchMode::Strict).unwrap(),
            DueDatePatch::Clear
        );
        assert_eq!(
            DueDateInput::Text(String::new())
                .resolve_for_update(PatchMode::Strict)
                .unwrap(),
            DueDatePatch::Clear
        );
        assert_eq!(
            DueDateInput::Missing.resolve_for_update(PatchMode::Strict).unwrap(),
            DueDatePatch::Keep
        );
        assert_eq!(
            DueDateInput::Millis(0).resolve_for_update(PatchMode::Strict).unwrap(),
            DueDatePatch::Set(0)
        );
    }
}
