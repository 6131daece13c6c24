use duetrack_core::db::open_db_in_memory;
use duetrack_core::{
    ItemPatch, ItemRepository, ItemService, OwnerId, OwnershipPolicy, RepoError,
    SqliteItemRepository,
};

#[test]
fn create_item_fills_defaults_and_returns_stored_record() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    let alice = OwnerId::from("alice");

    let item = service.create_item(&alice, "Buy milk", None).unwrap();

    assert!(!item.id.is_nil());
    assert_eq!(item.owner, alice);
    assert!(!item.is_complete);
    assert_eq!(item.due_date, None);
    assert!(item.created_at > 0);
}

#[test]
fn list_round_trips_submitted_fields() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    let alice = OwnerId::from("alice");
    let due = 1_700_000_000_000_i64;

    let created = service
        .create_item(&alice, "water plants", Some(due))
        .unwrap();

    let listed = service.list_items(&alice).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
    assert_eq!(listed[0].text, "water plants");
    assert_eq!(listed[0].due_date, Some(due));
}

#[test]
fn list_never_returns_foreign_items() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    let alice = OwnerId::from("alice");
    let bob = OwnerId::from("bob");

    service.create_item(&alice, "alice only", None).unwrap();

    assert!(service.list_items(&bob).unwrap().is_empty());
}

#[test]
fn by_id_policy_lets_any_caller_mutate_by_id() {
    // The historical contract: update/delete match purely by id, so a
    // caller holding a foreign id can mutate the item. Pinned on purpose.
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    let alice = OwnerId::from("alice");
    let bob = OwnerId::from("bob");

    let item = service.create_item(&alice, "alice task", None).unwrap();

    let updated = service
        .update_item(&bob, item.id, &ItemPatch::new("taken over", true))
        .unwrap()
        .unwrap();
    assert_eq!(updated.text, "taken over");
    assert_eq!(updated.owner, alice);

    let deleted = service.delete_item(&bob, item.id).unwrap();
    assert_eq!(deleted.id, item.id);
}

#[test]
fn owner_checked_policy_hides_foreign_items_from_mutation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let service = ItemService::with_policy(repo, OwnershipPolicy::OwnerChecked);
    let alice = OwnerId::from("alice");
    let bob = OwnerId::from("bob");

    let item = service.create_item(&alice, "alice task", None).unwrap();

    let update_err = service
        .update_item(&bob, item.id, &ItemPatch::new("hijack", true))
        .unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound(id) if id == item.id));

    let delete_err = service.delete_item(&bob, item.id).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound(id) if id == item.id));

    // The item is untouched and still mutable by its owner.
    let verify = SqliteItemRepository::try_new(&conn).unwrap();
    let current = verify.get_item(item.id).unwrap().unwrap();
    assert_eq!(current.text, "alice task");
    assert!(!current.is_complete);

    let owned_update = service
        .update_item(&alice, item.id, &ItemPatch::new("still mine", false))
        .unwrap()
        .unwrap();
    assert_eq!(owned_update.text, "still mine");
}

#[test]
fn owner_checked_policy_reports_unknown_ids_as_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteItemRepository::try_new(&conn).unwrap();
    let service = ItemService::with_policy(repo, OwnershipPolicy::OwnerChecked);
    let alice = OwnerId::from("alice");

    let missing = uuid::Uuid::new_v4();
    let err = service
        .update_item(&alice, missing, &ItemPatch::new("ghost", false))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn default_policy_is_by_id_only() {
    let conn = open_db_in_memory().unwrap();
    let service = ItemService::new(SqliteItemRepository::try_new(&conn).unwrap());
    assert_eq!(service.policy(), OwnershipPolicy::ByIdOnly);
}
