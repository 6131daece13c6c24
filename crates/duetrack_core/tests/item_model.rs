use duetrack_core::{DueDatePatch, Item, ItemDraft, ItemPatch, ItemValidationError, OwnerId};
use uuid::Uuid;

#[test]
fn draft_new_sets_defaults() {
    let draft = ItemDraft::new(OwnerId::from("user-1"), "buy milk");

    assert_eq!(draft.owner.as_str(), "user-1");
    assert_eq!(draft.text, "buy milk");
    assert_eq!(draft.due_date, None);
    draft.validate().expect("non-empty text should validate");
}

#[test]
fn draft_validate_rejects_empty_text() {
    let draft = ItemDraft::new(OwnerId::from("user-1"), "");

    let err = draft.validate().unwrap_err();
    assert_eq!(err, ItemValidationError::EmptyText);
}

#[test]
fn overdue_requires_past_due_date_and_open_item() {
    let now = 1_700_000_000_000;
    let mut item = fixed_item();

    item.due_date = Some(now - 1);
    item.is_complete = false;
    assert!(item.is_overdue(now));

    item.is_complete = true;
    assert!(!item.is_overdue(now));

    item.is_complete = false;
    item.due_date = Some(now + 1);
    assert!(!item.is_overdue(now));

    item.due_date = None;
    assert!(!item.is_overdue(now));
}

#[test]
fn item_serialization_uses_expected_wire_fields() {
    let item = fixed_item();

    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["id"], item.id.to_string());
    assert_eq!(json["owner"], "user-1");
    assert_eq!(json["text"], "ship release");
    assert_eq!(json["isComplete"], false);
    assert_eq!(json["dueDate"], 1_699_999_999_000_i64);
    assert_eq!(json["createdAt"], 1_690_000_000_000_i64);
    assert_eq!(json["updatedAt"], 1_690_000_360_000_i64);

    let decoded: Item = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, item);
}

#[test]
fn patch_builder_defaults_to_keeping_due_date() {
    let patch = ItemPatch::new("new text", true);
    assert_eq!(patch.due_date, DueDatePatch::Keep);

    let patch = patch.due_date(DueDatePatch::Clear);
    assert_eq!(patch.due_date, DueDatePatch::Clear);
}

fn fixed_item() -> Item {
    Item {
        id: Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap(),
        owner: OwnerId::from("user-1"),
        text: "ship release".to_string(),
        is_complete: false,
        due_date: Some(1_699_999_999_000),
        created_at: 1_690_000_000_000,
        updated_at: 1_690_000_360_000,
    }
}
