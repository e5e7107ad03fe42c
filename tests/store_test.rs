mod common;

use anyhow::Result;
use common::{TEDI_HASH, TestEnvironment, VIDUL_HASH};
use usermode::{NewUser, UserRecord, UserStore, UserStoreError, UserUpdate, password_digest};

#[test]
fn test_open_reads_seeded_store() -> Result<()> {
    let env = TestEnvironment::seeded()?;
    let store = UserStore::open(env.store_path())?;

    assert_eq!(store.len(), 2);
    assert_eq!(store.get_user("tedi").map(|u| u.username.as_str()), Some("tedi"));
    assert_eq!(store.get_user("vidul").map(|u| u.username.as_str()), Some("vidul"));
    assert!(store.get_user("none").is_none());
    assert_eq!(store.home_base(), env.path());
    Ok(())
}

#[test]
fn test_update_example_is_persisted() -> Result<()> {
    let env = TestEnvironment::seeded()?;
    let mut store = UserStore::open(env.store_path())?;

    let credential = UserRecord {
        username: "tedi".to_string(),
        password: password_digest("pass-1"),
        fullname: None,
    };
    let user = store.set_user(&credential, UserUpdate::new().password("pass-2"))?;

    let expected = UserRecord {
        username: "tedi".to_string(),
        password: password_digest("pass-2"),
        fullname: Some("Teodora".to_string()),
    };
    assert_eq!(user, expected);

    let on_disk = env.read_store()?;
    assert_eq!(on_disk["tedi"]["password"], expected.password.as_str());
    assert_eq!(on_disk["tedi"]["fullname"], "Teodora");
    Ok(())
}

#[test]
fn test_reopen_matches_memory_after_mutations() -> Result<()> {
    let env = TestEnvironment::seeded()?;
    let mut store = UserStore::open(env.store_path())?;

    store.add_user(NewUser::new("tester", "pass").with_fullname("Jasmine unit test"))?;
    store.add_user(NewUser::new("nameless", "secret"))?;
    let vidul = store.get_user("vidul").cloned().expect("vidul is seeded");
    store.set_user(&vidul, UserUpdate::new().fullname("Vidul P"))?;

    assert_eq!(store.get_user("vidul").map(|u| u.password.as_str()), Some(VIDUL_HASH));

    let reopened = UserStore::open(env.store_path())?;
    let before: Vec<_> = store.iter().collect();
    let after: Vec<_> = reopened.iter().collect();
    assert_eq!(before, after);
    assert_eq!(reopened.get_user("nameless").and_then(|u| u.fullname.clone()), None);
    Ok(())
}

#[test]
fn test_failed_mutations_do_not_touch_disk() -> Result<()> {
    let env = TestEnvironment::seeded()?;
    let mut store = UserStore::open(env.store_path())?;
    let before = std::fs::read_to_string(env.store_path())?;

    let duplicate = store.add_user(NewUser::new("tedi", "anything"));
    assert!(matches!(duplicate, Err(UserStoreError::AlreadyExists(_))));

    let wrong = UserRecord {
        username: "tedi".to_string(),
        password: password_digest("N/A"),
        fullname: None,
    };
    let mismatch = store.set_user(&wrong, UserUpdate::new().password("pass-3").fullname("New fullname"));
    assert!(matches!(mismatch, Err(UserStoreError::PasswordMismatch(_))));

    let missing = UserRecord {
        username: "N/A".to_string(),
        password: String::new(),
        fullname: None,
    };
    let not_found = store.set_user(&missing, UserUpdate::new());
    assert!(matches!(not_found, Err(UserStoreError::NotFound(_))));

    assert_eq!(std::fs::read_to_string(env.store_path())?, before);
    assert_eq!(store.get_user("tedi").map(|u| u.password.as_str()), Some(TEDI_HASH));
    Ok(())
}

#[test]
fn test_force_override_replaces_only_given_fields() -> Result<()> {
    let env = TestEnvironment::seeded()?;
    let mut store = UserStore::open(env.store_path())?;
    let tedi = store.get_user("tedi").cloned().expect("tedi is seeded");

    let user = store.set_user(
        &tedi,
        UserUpdate::new().password("new pass").fullname("Tedi M").force(),
    )?;
    assert_eq!(user.username, tedi.username);
    assert_eq!(user.password, password_digest("new pass"));
    assert_eq!(user.fullname.as_deref(), Some("Tedi M"));

    let stale = UserRecord {
        username: "tedi".to_string(),
        password: "stale".to_string(),
        fullname: None,
    };
    let user = store.set_user(&stale, UserUpdate::new().password("newer pass").force())?;
    assert_eq!(user.password, password_digest("newer pass"));
    assert_eq!(user.fullname.as_deref(), Some("Tedi M"));
    assert!(store.pass_match("tedi", "newer pass"));
    assert!(!store.pass_match("tedi", "new pass"));
    Ok(())
}

#[test]
fn test_home_directory_lifecycle() -> Result<()> {
    let env = TestEnvironment::seeded()?;
    let store = UserStore::open(env.store_path())?;

    assert!(store.get_home("vidul").is_none());

    let home = store.set_home("vidul")?;
    assert_eq!(home, env.path().join("vidul"));
    assert!(home.is_dir());
    assert_eq!(store.get_home("vidul"), Some(home.clone()));
    assert_eq!(store.set_home("vidul")?, home);
    Ok(())
}

#[test]
fn test_missing_store_is_created_empty() -> Result<()> {
    let env = TestEnvironment::new()?;
    let mut store = UserStore::open(env.store_path())?;
    assert!(store.is_empty());
    assert_eq!(env.read_store()?, serde_json::json!({}));

    store.add_user(NewUser::new("tester", "pass"))?;
    assert_eq!(
        env.read_store()?,
        serde_json::json!({
            "tester": {
                "username": "tester",
                "password": "b354786a5222a19437a564af0e3db78c85cf58f2d5ebc0074cd5d8b1abd041bd"
            }
        })
    );
    Ok(())
}
