//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the item data-access contract consumed by the service layer.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Insert paths enforce `ItemDraft::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod item_repo;
