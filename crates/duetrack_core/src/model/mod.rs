//! Domain model for per-user to-do items.
//!
//! # Responsibility
//! - Define the canonical item record and its construction defaults.
//! - Define patch shapes used by the update path.
//!
//! # Invariants
//! - Every item is identified by a stable `ItemId`.
//! - Ownership is fixed at creation and never transferred.

pub mod item;
