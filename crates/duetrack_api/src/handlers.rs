//! Request handlers for the item surface.
//!
//! # Responsibility
//! - Bridge decoded payloads to the core item service.
//! - Produce the envelope and status for every outcome, including storage
//!   failures.
//!
//! # Invariants
//! - Handlers never panic; failures become `{ message, error }` envelopes.
//! - The caller identity is trusted as already resolved by the host.
//! - Each handler performs a single service operation; no retries.

use crate::wire::{
    ApiResponse, CreateItemRequest, PatchMode, UpdateItemRequest, STATUS_CREATED,
    STATUS_NOT_FOUND, STATUS_OK,
};
use duetrack_core::{ItemId, ItemPatch, ItemRepository, ItemService, OwnerId, RepoError};
use log::error;
use uuid::Uuid;

/// Handler set over an injected service instance.
pub struct ItemHandlers<R: ItemRepository> {
    service: ItemService<R>,
    patch_mode: PatchMode,
}

impl<R: ItemRepository> ItemHandlers<R> {
    /// Creates handlers with the default (legacy) patch mode.
    pub fn new(service: ItemService<R>) -> Self {
        Self::with_patch_mode(service, PatchMode::default())
    }

    /// Creates handlers with an explicit patch mode.
    pub fn with_patch_mode(service: ItemService<R>, patch_mode: PatchMode) -> Self {
        Self {
            service,
            patch_mode,
        }
    }

    /// Adds an item for the caller. `201 { message, item }` on success.
    pub fn create_item(&self, caller: &OwnerId, request: &CreateItemRequest) -> ApiResponse {
        let due_date = match request.due_date.resolve_for_create() {
            Ok(due_date) => due_date,
            Err(err) => {
                error!("event=item_create module=api status=error error={err}");
                return ApiResponse::failure("Error in item creation", &err.to_string());
            }
        };

        match self
            .service
            .create_item(caller, request.text.as_str(), due_date)
        {
            Ok(item) => ApiResponse::item(STATUS_CREATED, "Item created successfully", Some(&item)),
            Err(err) => {
                error!("event=item_create module=api status=error error={err}");
                ApiResponse::failure("Error in item creation", &err.to_string())
            }
        }
    }

    /// Fetches the caller's items, due date ascending. `200 { message, items }`.
    pub fn fetch_items(&self, caller: &OwnerId) -> ApiResponse {
        match self.service.list_items(caller) {
            Ok(items) => ApiResponse::items(STATUS_OK, "Item list fetched successfully", &items),
            Err(err) => {
                error!("event=item_fetch module=api status=error error={err}");
                ApiResponse::failure("Error fetching item list", &err.to_string())
            }
        }
    }

    /// Patches fields on an item by id. `200 { message, item }`; the item is
    /// an explicit `null` when the id is unknown (the historical contract).
    pub fn update_item(
        &self,
        caller: &OwnerId,
        item_id: &str,
        request: &UpdateItemRequest,
    ) -> ApiResponse {
        let id = match parse_item_id(item_id) {
            Ok(id) => id,
            Err(detail) => {
                error!("event=item_update module=api status=error error={detail}");
                return ApiResponse::failure("Error updating item", &detail);
            }
        };

        let due_date = match request.due_date.resolve_for_update(self.patch_mode) {
            Ok(due_date) => due_date,
            Err(err) => {
                error!("event=item_update module=api status=error error={err}");
                return ApiResponse::failure("Error updating item", &err.to_string());
            }
        };

        let patch = ItemPatch::new(request.text.clone(), request.is_complete).due_date(due_date);
        match self.service.update_item(caller, id, &patch) {
            Ok(item) => ApiResponse::item(STATUS_OK, "Item updated successfully", item.as_ref()),
            // Raised only under the owner-checked policy.
            Err(RepoError::NotFound(_)) => {
                ApiResponse::message_only(STATUS_NOT_FOUND, "Item not found")
            }
            Err(err) => {
                error!("event=item_update module=api status=error error={err}");
                ApiResponse::failure("Error updating item", &err.to_string())
            }
        }
    }

    /// Removes an item by id. `200 { message, item }` with the prior
    /// representation, or `404 { message }` when the id is unknown.
    pub fn delete_item(&self, caller: &OwnerId, item_id: &str) -> ApiResponse {
        let id = match parse_item_id(item_id) {
            Ok(id) => id,
            Err(detail) => {
                error!("event=item_delete module=api status=error error={detail}");
                return ApiResponse::failure("Error deleting item", &detail);
            }
        };

        match self.service.delete_item(caller, id) {
            Ok(item) => ApiResponse::item(STATUS_OK, "Item deleted successfully", Some(&item)),
            Err(RepoError::NotFound(_)) => {
                ApiResponse::message_only(STATUS_NOT_FOUND, "Item not found")
            }
            Err(err) => {
                error!("event=item_delete module=api status=error error={err}");
                ApiResponse::failure("Error deleting item", &err.to_string())
            }
        }
    }
}

// A malformed id cannot match any stored item; it surfaces as a cast
// failure on the storage call, i.e. a server fault.
fn parse_item_id(value: &str) -> Result<ItemId, String> {
    Uuid::parse_str(value).map_err(|err| format!("invalid item id `{value}`: {err}"))
}
