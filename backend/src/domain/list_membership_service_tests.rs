//! Tests for the watch-list service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::*;
use crate::domain::ports::{MockCatalogLookup, MockUserStore};
use crate::domain::{Email, ErrorCode, NewUser, UserId};
use rstest::{fixture, rstest};

const ENTRY: MediaId = MediaId::new(7);

#[fixture]
fn user() -> User {
    User::from_new(
        UserId::random(),
        NewUser::new(
            "Ana",
            Email::new("a@x.com").expect("valid email"),
            Some("secret1".to_owned()),
        ),
    )
}

fn catalog_with_entry() -> MockCatalogLookup {
    let mut catalog = MockCatalogLookup::new();
    catalog
        .expect_find_by_id()
        .returning(|media_id| Ok(MediaEntry::new(media_id, "Cowboy Bebop")));
    catalog
}

fn catalog_without_entries() -> MockCatalogLookup {
    let mut catalog = MockCatalogLookup::new();
    catalog
        .expect_find_by_id()
        .returning(|media_id| Err(CatalogLookupError::not_found(media_id)));
    catalog
}

fn make_service(
    store: MockUserStore,
    catalog: MockCatalogLookup,
) -> ListMembershipService<MockUserStore, MockCatalogLookup> {
    ListMembershipService::new(Arc::new(store), Arc::new(catalog))
}

fn with_entry(mut user: User, category: ListCategory) -> User {
    user.lists_mut().insert(ENTRY, category).expect("absent");
    user
}

#[rstest]
#[tokio::test]
async fn add_appends_entry_and_persists(user: User) {
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .withf(|saved: &User, expected: &u32| {
            *expected == 1
                && saved.revision() == 2
                && saved.lists().want_to_watch() == [ENTRY]
        })
        .times(1)
        .return_once(|_, _| Ok(()));

    let saved = make_service(store, catalog_with_entry())
        .add_to_list(&user, ENTRY, ListCategory::WantToWatch)
        .await
        .expect("added");

    assert_eq!(saved.lists().want_to_watch(), &[ENTRY]);
    assert_eq!(saved.revision(), 2);
}

#[rstest]
#[tokio::test]
async fn add_fails_when_catalog_cannot_resolve_entry(user: User) {
    let mut store = MockUserStore::new();
    store.expect_save().times(0);

    let error = make_service(store, catalog_without_entries())
        .add_to_list(&user, ENTRY, ListCategory::Watching)
        .await
        .expect_err("missing media");

    assert_eq!(error, Error::media_not_found(ENTRY));
}

#[rstest]
#[case(ListCategory::Watching, ListCategory::Watching)]
#[case(ListCategory::Watching, ListCategory::Completed)]
#[case(ListCategory::WantToWatch, ListCategory::Watching)]
#[case(ListCategory::Completed, ListCategory::WantToWatch)]
#[tokio::test]
async fn add_rejects_entry_present_in_any_list(
    user: User,
    #[case] present_in: ListCategory,
    #[case] target: ListCategory,
) {
    let user = with_entry(user, present_in);
    let mut store = MockUserStore::new();
    store.expect_save().times(0);

    let error = make_service(store, catalog_with_entry())
        .add_to_list(&user, ENTRY, target)
        .await
        .expect_err("already listed");

    assert_eq!(error.code(), ErrorCode::InvalidOperation);
    assert!(error.to_string().contains("entry already in a list"));
    assert_eq!(user.lists().category_of(ENTRY), Some(present_in));
}

#[rstest]
#[tokio::test]
async fn remove_of_absent_entry_still_persists(user: User) {
    let user = with_entry(user, ListCategory::Watching);
    let before = user.lists().clone();
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(1)
        .return_once(|_, _| Ok(()));

    let saved = make_service(store, catalog_with_entry())
        .remove_from_list(&user, ENTRY, ListCategory::Completed)
        .await
        .expect("no-op removal");

    assert_eq!(saved.lists(), &before);
}

#[rstest]
#[tokio::test]
async fn remove_drops_entry_from_named_list(user: User) {
    let user = with_entry(user, ListCategory::WantToWatch);
    let mut store = MockUserStore::new();
    store.expect_save().times(1).return_once(|_, _| Ok(()));

    let saved = make_service(store, catalog_with_entry())
        .remove_from_list(&user, ENTRY, ListCategory::WantToWatch)
        .await
        .expect("removed");

    assert!(saved.lists().want_to_watch().is_empty());
    assert_eq!(saved.lists().category_of(ENTRY), None);
}

#[rstest]
#[tokio::test]
async fn remove_fails_when_catalog_cannot_resolve_entry(user: User) {
    let mut store = MockUserStore::new();
    store.expect_save().times(0);

    let error = make_service(store, catalog_without_entries())
        .remove_from_list(&user, ENTRY, ListCategory::Watching)
        .await
        .expect_err("missing media");

    assert_eq!(error.code(), ErrorCode::MediaNotFound);
}

#[rstest]
#[tokio::test]
async fn stale_write_rechecks_fresh_lists(user: User) {
    let fresh = with_entry(user.clone(), ListCategory::Watching).with_revision(2);
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(1)
        .return_once(|_, _| Err(UserStoreError::revision_mismatch(1_u32, 2_u32)));
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(fresh)));

    let error = make_service(store, catalog_with_entry())
        .add_to_list(&user, ENTRY, ListCategory::Completed)
        .await
        .expect_err("entry arrived concurrently");

    assert_eq!(error.code(), ErrorCode::InvalidOperation);
}

#[rstest]
#[tokio::test]
async fn stale_write_retries_against_reloaded_revision(user: User) {
    let fresh = user.clone().with_revision(4);
    let saves = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&saves);
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(2)
        .returning(move |_, expected| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(UserStoreError::revision_mismatch(expected, 4_u32))
            } else {
                Ok(())
            }
        });
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(fresh)));

    let saved = make_service(store, catalog_with_entry())
        .add_to_list(&user, ENTRY, ListCategory::Watching)
        .await
        .expect("added on retry");

    assert_eq!(saves.load(Ordering::SeqCst), 2);
    assert_eq!(saved.revision(), 5);
    assert_eq!(saved.lists().watching(), &[ENTRY]);
}

#[rstest]
#[tokio::test]
async fn persistent_conflicts_exhaust_attempts(user: User) {
    let reloaded = user.clone();
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(2)
        .returning(|_, expected| Err(UserStoreError::revision_mismatch(expected, 99_u32)));
    store
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(reloaded.clone())));

    let service = ListMembershipService::with_config(
        Arc::new(store),
        Arc::new(catalog_with_entry()),
        ListMembershipConfig::with_max_write_attempts(2),
    );
    let error = service
        .add_to_list(&user, ENTRY, ListCategory::Watching)
        .await
        .expect_err("conflict");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn stale_write_for_deleted_user_reports_not_found(user: User) {
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(1)
        .return_once(|_, _| Err(UserStoreError::revision_mismatch(1_u32, 0_u32)));
    store.expect_find_by_id().times(0);

    let error = make_service(store, catalog_with_entry())
        .remove_from_list(&user, ENTRY, ListCategory::Watching)
        .await
        .expect_err("user gone");

    assert_eq!(error, Error::user_not_found(*user.id()));
}

#[rstest]
#[tokio::test]
async fn missing_user_is_not_found_with_single_attempt(user: User) {
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(1)
        .return_once(|_, _| Err(UserStoreError::revision_mismatch(1_u32, 0_u32)));
    store.expect_find_by_id().times(0);

    let service = ListMembershipService::with_config(
        Arc::new(store),
        Arc::new(catalog_with_entry()),
        ListMembershipConfig::with_max_write_attempts(1),
    );
    let error = service
        .add_to_list(&user, ENTRY, ListCategory::Watching)
        .await
        .expect_err("user absent");

    assert_eq!(error.code(), ErrorCode::UserNotFound);
}

#[rstest]
#[tokio::test]
async fn user_deleted_between_retries_reports_not_found(user: User) {
    let fresh = user.clone().with_revision(2);
    let saves = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&saves);
    let mut store = MockUserStore::new();
    store
        .expect_save()
        .times(2)
        .returning(move |_, expected| {
            let actual = if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                2_u32
            } else {
                0_u32
            };
            Err(UserStoreError::revision_mismatch(expected, actual))
        });
    store
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(fresh)));

    let error = make_service(store, catalog_with_entry())
        .add_to_list(&user, ENTRY, ListCategory::Completed)
        .await
        .expect_err("user gone");

    assert_eq!(error, Error::user_not_found(*user.id()));
}

#[rstest]
#[tokio::test]
async fn named_category_is_parsed_at_the_boundary(user: User) {
    let mut store = MockUserStore::new();
    store.expect_save().times(1).return_once(|_, _| Ok(()));

    let saved = make_service(store, catalog_with_entry())
        .add_to_list_named(&user, ENTRY, "completed")
        .await
        .expect("added");

    assert_eq!(saved.lists().completed(), &[ENTRY]);
}

#[rstest]
#[tokio::test]
async fn unknown_category_name_is_invalid_operation(user: User) {
    let mut store = MockUserStore::new();
    store.expect_save().times(0);

    let error = make_service(store, catalog_with_entry())
        .remove_from_list_named(&user, ENTRY, "DROPPED")
        .await
        .expect_err("invalid category");

    assert_eq!(error.code(), ErrorCode::InvalidOperation);
    assert!(error.to_string().contains("invalid category"));
}

#[rstest]
#[tokio::test]
async fn unresolved_entry_wins_over_unknown_category_name(user: User) {
    let mut store = MockUserStore::new();
    store.expect_save().times(0);

    let error = make_service(store, catalog_without_entries())
        .add_to_list_named(&user, ENTRY, "DROPPED")
        .await
        .expect_err("missing media");

    assert_eq!(error.code(), ErrorCode::MediaNotFound);
}

#[rstest]
#[case(CatalogLookupError::not_found(7_u64), ErrorCode::MediaNotFound)]
#[case(CatalogLookupError::connection("timeout"), ErrorCode::ServiceUnavailable)]
fn catalog_errors_map_to_domain_codes(
    #[case] error: CatalogLookupError,
    #[case] expected: ErrorCode,
) {
    assert_eq!(map_catalog_error(error).code(), expected);
}
