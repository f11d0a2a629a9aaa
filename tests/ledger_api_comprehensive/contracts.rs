//! Contract creation through the public API.

use rentledger::{Command, Error, Output};
use serde_json::json;

use crate::common::*;

#[test]
fn new_owner_gets_credentials_back() {
    let executor = executor();
    let out = executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "bea", "pw"))
        .unwrap();
    assert_eq!(body(&out), json!({"username": "bea", "password": "pw"}));

    // Owner now exists
    let info = executor
        .invoke(Command::USER_GET_INFO, &[json!({"username": "bea"}).to_string()])
        .unwrap();
    assert!(matches!(info, Output::UserInfo(_)));
}

#[test]
fn existing_owner_gets_empty_body() {
    let executor = executor();
    executor.invoke(Command::USER_CREATE, &user_args("bea", "pw")).unwrap();
    let out = executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "bea", "pw"))
        .unwrap();
    assert_eq!(out.to_payload().unwrap(), b"{}".to_vec());
}

#[test]
fn second_contract_for_created_owner_gets_empty_body() {
    let executor = executor();
    executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "bea", "pw"))
        .unwrap();
    let out = executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-2", "bea", "pw"))
        .unwrap();
    assert_eq!(out, Output::Empty);
}

#[test]
fn empty_password_requires_existing_owner() {
    let executor = executor();
    let err = executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "cal", ""))
        .unwrap_err();
    assert!(matches!(err, Error::UserNotFound { .. }));
    assert!(executor.ledger().is_empty());
}

#[test]
fn duplicate_uuid_overwrites_previous_contract() {
    let executor = executor();
    executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "bea", "pw"))
        .unwrap();

    let mut replacement = contract_body("c-1", "bea", "pw");
    replacement["contract_type_uuid"] = json!("bike-premium");
    replacement["special_rate"] = json!(0.3);
    let out = executor
        .invoke(Command::CONTRACT_CREATE, &[replacement.to_string()])
        .unwrap();
    assert_eq!(out, Output::Empty);

    let listing = executor.invoke(Command::SHOP_CONTRACT_LS, &list_args("bea")).unwrap();
    let entries = body(&listing);
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["contract_type_uuid"], "bike-premium");
    assert_eq!(entries[0]["special_rate"], json!(0.3));
}

#[test]
fn created_contract_is_not_void_and_has_no_claims() {
    let executor = executor();
    executor
        .invoke(Command::CONTRACT_CREATE, &contract_args("c-1", "bea", "pw"))
        .unwrap();

    match executor.invoke(Command::SHOP_CONTRACT_LS, &[]).unwrap() {
        Output::Contracts(views) => {
            assert_eq!(views.len(), 1);
            assert!(!views[0].contract.void);
            assert!(views[0].contract.claim_index.is_empty());
            assert!(views[0].claims.is_empty());
            assert_eq!(views[0].contract.start_date, date(2024, 4, 1));
            assert_eq!(views[0].contract.item.serial_no, "BR-c-1");
        }
        other => panic!("Expected Contracts, got {:?}", other),
    }
}

#[test]
fn malformed_contract_payload_is_decode_error() {
    let executor = executor();
    let mut bad = contract_body("c-1", "bea", "pw");
    bad["start_date"] = json!("first of april");
    let err = executor
        .invoke(Command::CONTRACT_CREATE, &[bad.to_string()])
        .unwrap_err();
    assert_eq!(err.code(), "decode_error");
    assert!(executor.ledger().is_empty());
}

#[test]
fn contract_without_dates_lists_zero_dates() {
    let executor = executor();
    let mut request = contract_body("c-1", "bea", "pw");
    let obj = request.as_object_mut().unwrap();
    obj.remove("start_date");
    obj.remove("end_date");
    executor
        .invoke(Command::CONTRACT_CREATE, &[request.to_string()])
        .unwrap();

    let listing = executor.invoke(Command::SHOP_CONTRACT_LS, &[]).unwrap();
    let listed = body(&listing);
    assert_eq!(listed[0]["uuid"], "c-1");
    assert_eq!(listed[0]["start_date"], "0001-01-01T00:00:00Z");
    assert_eq!(listed[0]["end_date"], "0001-01-01T00:00:00Z");
}

#[test]
fn contract_dates_keep_submitted_offset() {
    let executor = executor();
    let mut request = contract_body("c-1", "bea", "pw");
    request["start_date"] = json!("2024-01-01T00:00:00+02:00");
    request["end_date"] = json!("2024-12-31T18:00:00-05:00");
    executor
        .invoke(Command::CONTRACT_CREATE, &[request.to_string()])
        .unwrap();

    let listing = executor.invoke(Command::SHOP_CONTRACT_LS, &[]).unwrap();
    let listed = body(&listing);
    assert_eq!(listed[0]["start_date"], "2024-01-01T00:00:00+02:00");
    assert_eq!(listed[0]["end_date"], "2024-12-31T18:00:00-05:00");
}
