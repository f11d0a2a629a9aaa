//! User identity through the public API.

use rentledger::{Command, Error, Output};
use serde_json::json;

use crate::common::*;

#[test]
fn create_user_is_get_or_create() {
    let executor = executor();

    let first = executor.invoke(Command::USER_CREATE, &user_args("ada", "one")).unwrap();
    assert_eq!(body(&first), json!({}));

    let second = executor.invoke(Command::USER_CREATE, &user_args("ada", "two")).unwrap();
    assert_eq!(body(&second), json!({"username": "ada", "password": "one"}));

    assert_eq!(executor.ledger().len(), 1);
}

#[test]
fn existing_identity_is_never_overwritten() {
    let executor = executor();
    executor.invoke(Command::USER_CREATE, &user_args("ada", "one")).unwrap();
    // Contract creation with a different password must not replace the user
    executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "ada", "two"))
        .unwrap();

    let auth = |password: &str| {
        executor
            .invoke(
                Command::USER_AUTHENTICATE,
                &[json!({"username": "ada", "password": password}).to_string()],
            )
            .unwrap()
    };
    assert_eq!(auth("one"), Output::Authenticated(true));
    assert_eq!(auth("two"), Output::Authenticated(false));
}

#[test]
fn user_info_hides_password() {
    let executor = executor();
    executor.invoke(Command::USER_CREATE, &user_args("ada", "one")).unwrap();

    let info = executor
        .invoke(Command::USER_GET_INFO, &[json!({"username": "ada"}).to_string()])
        .unwrap();
    assert_eq!(
        body(&info),
        json!({"username": "ada", "first_name": "Jane", "last_name": "Doe"})
    );
}

#[test]
fn user_info_for_unknown_user_fails() {
    let executor = executor();
    let err = executor
        .invoke(Command::USER_GET_INFO, &[json!({"username": "nobody"}).to_string()])
        .unwrap_err();
    assert_eq!(
        err,
        Error::UserNotFound {
            username: "nobody".into()
        }
    );
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn usernames_with_separators_stay_distinct() {
    let executor = executor();
    for name in ["a/b", "a", "a:b", "a b", "ä"] {
        let out = executor.invoke(Command::USER_CREATE, &user_args(name, "pw")).unwrap();
        assert_eq!(out, Output::Empty, "{} should be new", name);
    }
    assert_eq!(executor.ledger().len(), 5);
}

#[test]
fn nul_in_username_is_rejected_deterministically() {
    let executor = executor();
    for _ in 0..2 {
        let err = executor
            .invoke(Command::USER_CREATE, &user_args("evil\u{0}name", "pw"))
            .unwrap_err();
        assert!(matches!(err, Error::KeyEncodingError { .. }));
    }
    assert!(executor.ledger().is_empty());
}
