//! Request-surface boundary for the item lifecycle service.
//!
//! # Responsibility
//! - Decode request payloads, including the legacy field-update policy.
//! - Map service results onto `{ message, item }` response envelopes with
//!   explicit HTTP status codes.
//!
//! # Invariants
//! - Handlers never panic; every outcome is an envelope.
//! - HTTP routing and identity resolution live outside this crate: hosts
//!   route requests, resolve the caller identity, and serialize the
//!   returned envelope verbatim.

pub mod config;
pub mod handlers;
pub mod wire;

pub use config::{AppConfig, BootstrapError};
pub use handlers::ItemHandlers;
pub use wire::{
    ApiResponse, CreateItemRequest, DueDateInput, PatchMode, UpdateItemRequest, STATUS_CREATED,
    STATUS_NOT_FOUND, STATUS_OK, STATUS_SERVER_ERROR,
};
