//! End-to-end desk scenarios against an in-memory store.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use chrono_tz::Tz;

use frontdesk_core::{
    AccessGate, GuestBoard, LookupState, MailKind, MailStatus, RecordPatch, Role,
    SqliteRecordStore, StaffBoard, StaffFilter, StatusFilter,
};

async fn store() -> SqliteRecordStore {
    SqliteRecordStore::in_memory().await.unwrap()
}

#[tokio::test]
async fn test_pickup_shows_on_guest_lookup() {
    let store = store().await;
    let staff = AccessGate::staff(Role::Staff, &store, Tz::UTC).unwrap();
    let guest = AccessGate::guest(Role::Guest, &store, Tz::UTC).unwrap();

    let created = staff
        .create("210", "KB", MailKind::Unspecified)
        .await
        .unwrap();

    let found = guest.lookup("210", "kb").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].status, MailStatus::Pending);
    assert_eq!(found[0].status.guest_label(), "Ready for pickup");
    assert_eq!(found[0].kind.label(), "Mail");

    staff.mark_received(created.id).await.unwrap();

    let found = guest.lookup("210", "kb").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].status, MailStatus::Received);
    assert_eq!(found[0].status.guest_label(), "Picked up");
    assert_eq!(found[0].created_at, created.created_at);
}

#[tokio::test]
async fn test_default_filter_lists_newest_first() {
    let store = store().await;
    let staff = AccessGate::staff(Role::Staff, &store, Tz::UTC).unwrap();

    let first = staff.create("101", "AB", MailKind::Letter).await.unwrap();
    let second = staff.create("102", "CD", MailKind::Package).await.unwrap();
    staff
        .edit(
            first.id,
            RecordPatch::new().created_at(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()),
        )
        .await
        .unwrap();
    staff
        .edit(
            second.id,
            RecordPatch::new()
                .status(MailStatus::Received)
                .created_at(Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap()),
        )
        .await
        .unwrap();

    let filter = StaffFilter::new().with_date_str("").unwrap();
    let listed = staff.browse(&filter).await.unwrap();
    let rooms: Vec<&str> = listed.iter().map(|r| r.room_number.as_str()).collect();
    assert_eq!(rooms, ["102", "101"]);

    let received = staff
        .browse(&StaffFilter::new().status(StatusFilter::Received))
        .await
        .unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].initials, "CD");

    let on_day_one = staff
        .browse(&StaffFilter::new().with_date_str("2024-05-01").unwrap())
        .await
        .unwrap();
    assert_eq!(on_day_one.len(), 1);
    assert_eq!(on_day_one[0].room_number, "101");
}

#[tokio::test]
async fn test_edit_moves_record_to_new_room() {
    let store = store().await;
    let staff = AccessGate::staff(Role::Staff, &store, Tz::UTC).unwrap();
    let guest = AccessGate::guest(Role::Guest, &store, Tz::UTC).unwrap();

    let record = staff.create("101", "AB", MailKind::Letter).await.unwrap();
    staff
        .edit(record.id, RecordPatch::new().room_number("105").initials("cd"))
        .await
        .unwrap();

    let mut board = GuestBoard::new();
    board.set_room_number("105");
    board.set_initials("cd");
    assert!(board.search(&guest).await.is_none());
    match board.state() {
        LookupState::Searched(records) => {
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].initials, "CD");
        }
        LookupState::NotSearched | LookupState::Failed => panic!("lookup did not complete"),
    }

    board.set_room_number("101");
    board.set_initials("AB");
    assert!(board.search(&guest).await.is_none());
    assert_eq!(board.state(), &LookupState::Searched(Vec::new()));
    assert!(board.state().has_searched());
}

#[tokio::test]
async fn test_staff_board_refreshes_after_mutation() {
    let store = store().await;
    let staff = AccessGate::staff(Role::Staff, &store, Tz::UTC).unwrap();
    let mut board = StaffBoard::new();

    board.refresh(&staff).await;
    assert_eq!(board.count_label(), "Showing 0 posts");

    staff.create("301", "EF", MailKind::Package).await.unwrap();
    board.invalidate();
    assert!(board.needs_refresh());

    board.refresh(&staff).await;
    assert_eq!(board.count_label(), "Showing 1 posts");

    let snapshot = staff.snapshot("Posts List", board.records());
    assert_eq!(snapshot.rows.len(), 1);
    assert_eq!(snapshot.rows[0].room_number, "301");
}

#[tokio::test]
async fn test_guest_cannot_open_staff_desk() {
    let store = store().await;
    let err = AccessGate::staff(Role::Guest, &store, Tz::UTC).unwrap_err();
    assert!(matches!(err, frontdesk_core::Error::Access(_)));
}
