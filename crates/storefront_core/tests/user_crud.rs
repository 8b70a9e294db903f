use storefront_core::db::open_db_in_memory;
use storefront_core::{
    EntityKind, NewOrder, NewUser, RepoError, SqliteUserRepository, Storefront, UserRepository,
};

fn ada() -> NewUser {
    NewUser::new("Ada", Some("1 Analytical Way".to_string()), "ada@example.com")
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let created = repo.create_user(&ada()).unwrap();
    assert!(created.id > 0);

    let loaded = repo.get_user(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.name, "Ada");
    assert_eq!(loaded.address.as_deref(), Some("1 Analytical Way"));
    assert_eq!(loaded.email, "ada@example.com");
}

#[test]
fn list_returns_every_user() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    repo.create_user(&ada()).unwrap();
    repo.create_user(&NewUser::new("Grace", None, "grace@example.com"))
        .unwrap();

    let users = repo.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().any(|user| user.email == "grace@example.com"));
}

#[test]
fn update_replaces_every_mutable_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);
    let created = repo.create_user(&ada()).unwrap();

    let replacement = NewUser::new("Ada L.", None, "lovelace@example.com");
    let updated = repo.update_user(created.id, &replacement).unwrap();
    assert_eq!(updated.id, created.id);

    let loaded = repo.get_user(created.id).unwrap().unwrap();
    assert_eq!(loaded.name, "Ada L.");
    assert_eq!(loaded.address, None);
    assert_eq!(loaded.email, "lovelace@example.com");
}

#[test]
fn update_and_delete_missing_user_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let err = repo.update_user(42, &ada()).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            kind: EntityKind::User,
            id: 42
        }
    ));

    let err = repo.delete_user(42).unwrap_err();
    assert!(matches!(err, RepoError::NotFound { id: 42, .. }));
}

#[test]
fn delete_twice_reports_not_found_the_second_time() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);
    let created = repo.create_user(&ada()).unwrap();

    repo.delete_user(created.id).unwrap();
    assert!(repo.get_user(created.id).unwrap().is_none());
    assert!(matches!(
        repo.delete_user(created.id).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn duplicate_email_is_reported_as_duplicate_not_db_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);
    let first = repo.create_user(&ada()).unwrap();

    let err = repo
        .create_user(&NewUser::new("Other", None, "ada@example.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { field: "email" }));

    let second = repo
        .create_user(&NewUser::new("Grace", None, "grace@example.com"))
        .unwrap();
    let err = repo
        .update_user(second.id, &NewUser::new("Grace", None, "ada@example.com"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate { field: "email" }));
    assert_eq!(repo.get_user(first.id).unwrap().unwrap().name, "Ada");
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteUserRepository::new(&conn);

    let invalid = NewUser::new("n".repeat(101), None, "ada@example.com");
    assert!(matches!(
        repo.create_user(&invalid).unwrap_err(),
        RepoError::Validation(_)
    ));
    assert!(repo.list_users().unwrap().is_empty());

    let created = repo.create_user(&ada()).unwrap();
    let invalid = NewUser::new("Ada", None, "not-an-email");
    assert!(matches!(
        repo.update_user(created.id, &invalid).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn deleting_user_with_orders_is_blocked() {
    let conn = open_db_in_memory().unwrap();
    let store = Storefront::new(&conn);
    let user = store.users.create_user(&ada()).unwrap();
    store.orders.create_order(&NewOrder::new(user.id)).unwrap();

    let err = store.users.delete_user(user.id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::InUse {
            kind: EntityKind::User,
            ..
        }
    ));
    assert!(store.users.get_user(user.id).is_ok());
}

#[test]
fn service_get_reports_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = Storefront::new(&conn);

    let err = store.users.get_user(7).unwrap_err();
    assert_eq!(err.to_string(), "user not found: 7");
}
