//! Item lifecycle use-case service.
//!
//! # Responsibility
//! - Provide the create/list/update/delete entry points for boundary
//!   callers, scoped to an authenticated caller identity.
//! - Apply the configured ownership policy before mutations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - The service layer remains storage-agnostic.
//! - Each operation performs at most the repository calls it documents; no
//!   retries, no background work, failures surface synchronously.

use crate::model::item::{Item, ItemDraft, ItemId, ItemPatch, OwnerId};
use crate::repo::item_repo::{ItemRepository, RepoError, RepoResult};

/// Governs whether mutations are scoped to the caller's own items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OwnershipPolicy {
    /// Update and delete match purely by id: any caller who knows an id can
    /// mutate the item. This is the historical contract of the service and
    /// remains the default.
    #[default]
    ByIdOnly,
    /// Update and delete first verify `item.owner == caller`. A mismatch is
    /// reported as `NotFound`, so foreign items are indistinguishable from
    /// absent ones.
    OwnerChecked,
}

/// Use-case service wrapper for item CRUD operations.
pub struct ItemService<R: ItemRepository> {
    repo: R,
    policy: OwnershipPolicy,
}

impl<R: ItemRepository> ItemService<R> {
    /// Creates a service with the default (by-id) ownership policy.
    pub fn new(repo: R) -> Self {
        Self::with_policy(repo, OwnershipPolicy::default())
    }

    /// Creates a service with an explicit ownership policy.
    pub fn with_policy(repo: R, policy: OwnershipPolicy) -> Self {
        Self { repo, policy }
    }

    /// Returns the active ownership policy.
    pub fn policy(&self) -> OwnershipPolicy {
        self.policy
    }

    /// Creates a new item owned by `owner`.
    ///
    /// # Contract
    /// - `is_complete` starts as `false`.
    /// - `due_date` is stored as absent when `None`.
    /// - Returns the fully populated stored item, including the generated
    ///   id and storage-assigned timestamps.
    pub fn create_item(
        &self,
        owner: &OwnerId,
        text: impl Into<String>,
        due_date: Option<i64>,
    ) -> RepoResult<Item> {
        let draft = ItemDraft::with_due_date(owner.clone(), text, due_date);
        self.repo.insert_item(&draft)
    }

    /// Lists all of `owner`'s items, due date ascending.
    ///
    /// Never yields an item belonging to a different identity. Rows with no
    /// due date come first under the backend's ascending NULL placement.
    pub fn list_items(&self, owner: &OwnerId) -> RepoResult<Vec<Item>> {
        self.repo.list_items_for_owner(owner)
    }

    /// Applies `patch` to the item with the given id.
    ///
    /// Under `ByIdOnly`, `caller` does not constrain the match and an
    /// unknown id yields `Ok(None)`. Under `OwnerChecked`, an unknown id or
    /// a foreign item is reported as `NotFound` before any mutation.
    pub fn update_item(
        &self,
        caller: &OwnerId,
        id: ItemId,
        patch: &ItemPatch,
    ) -> RepoResult<Option<Item>> {
        if self.policy == OwnershipPolicy::OwnerChecked {
            self.guard_owner(caller, id)?;
        }
        self.repo.update_item(id, patch)
    }

    /// Removes the item with the given id and returns its prior
    /// representation.
    ///
    /// Absence is reported as `NotFound` on both policies; `OwnerChecked`
    /// additionally reports foreign items the same way.
    pub fn delete_item(&self, caller: &OwnerId, id: ItemId) -> RepoResult<Item> {
        if self.policy == OwnershipPolicy::OwnerChecked {
            self.guard_owner(caller, id)?;
        }
        self.repo.delete_item(id)
    }

    fn guard_owner(&self, caller: &OwnerId, id: ItemId) -> RepoResult<()> {
        match self.repo.get_item(id)? {
            Some(item) if item.owner == *caller => Ok(()),
            // Foreign items are reported exactly like absent ones.
            _ => Err(RepoError::NotFound(id)),
        }
    }
}
