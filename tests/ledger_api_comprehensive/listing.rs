//! Contract listing through the public API.

use rentledger::{ClaimStatus, Command, Output};
use rentledger_core::Claim;
use rentledger_primitives::RecordStore;
use serde_json::json;

use crate::common::*;

fn seed(executor: &rentledger::Executor, contracts: &[(&str, &str)]) {
    for (uuid, owner) in contracts {
        executor
            .invoke(Command::CONTRACT_CREATE, &contract_args(uuid, owner, "pw"))
            .unwrap();
    }
}

#[test]
fn listing_by_owner_returns_only_their_contracts() {
    let executor = executor();
    seed(&executor, &[("c1", "u1"), ("c2", "u1"), ("c3", "u2")]);

    let out = executor.invoke(Command::SHOP_CONTRACT_LS, &list_args("u1")).unwrap();
    assert_eq!(listed_uuids(&out), vec!["c1", "c2"]);
}

#[test]
fn empty_owner_lists_union_of_all_owners() {
    let executor = executor();
    seed(&executor, &[("c1", "u1"), ("c2", "u1"), ("c3", "u2")]);

    let with_empty = executor.invoke(Command::SHOP_CONTRACT_LS, &list_args("")).unwrap();
    let with_object = executor
        .invoke(Command::SHOP_CONTRACT_LS, &["{}".to_string()])
        .unwrap();
    let with_nothing = executor.invoke(Command::SHOP_CONTRACT_LS, &[]).unwrap();

    assert_eq!(listed_uuids(&with_empty), vec!["c1", "c2", "c3"]);
    assert_eq!(with_empty, with_object);
    assert_eq!(with_empty, with_nothing);
}

#[test]
fn owner_name_prefix_does_not_leak() {
    let executor = executor();
    seed(&executor, &[("c1", "sam"), ("c2", "samantha"), ("c3", "sa")]);

    let out = executor.invoke(Command::SHOP_CONTRACT_LS, &list_args("sam")).unwrap();
    assert_eq!(listed_uuids(&out), vec!["c1"]);
}

#[test]
fn listing_preserves_store_key_order() {
    let executor = executor();
    seed(&executor, &[("b", "u1"), ("a", "u1"), ("c", "u1")]);

    let out = executor.invoke(Command::SHOP_CONTRACT_LS, &list_args("u1")).unwrap();
    assert_eq!(listed_uuids(&out), vec!["a", "b", "c"]);
}

#[test]
fn claims_are_embedded_in_index_order() {
    let executor = executor();
    seed(&executor, &[("c1", "u1"), ("c2", "u1")]);

    let store = RecordStore::new(executor.ledger().as_ref());
    let claim = |description: &str, is_theft: bool| Claim {
        contract_uuid: "c1".to_string(),
        date: date(2024, 8, 3).into(),
        description: description.to_string(),
        is_theft,
        status: ClaimStatus::Pending,
        reimbursable: 0.0,
        repaired: false,
        file_reference: String::new(),
    };
    store.save_claim("k2", &claim("stolen at station", true)).unwrap();
    store.save_claim("k1", &claim("bent wheel", false)).unwrap();
    let mut contract = store.load_contract("u1", "c1").unwrap().unwrap();
    contract.claim_index = vec!["k2".to_string(), "k1".to_string(), "k-gone".to_string()];
    store.save_contract("c1", &contract).unwrap();

    let out = executor.invoke(Command::SHOP_CONTRACT_LS, &list_args("u1")).unwrap();
    let entries = body(&out);
    let claims = entries[0]["claims"].as_array().unwrap();
    assert_eq!(claims.len(), 2, "dangling claim id is skipped");
    assert_eq!(claims[0]["uuid"], "k2");
    assert_eq!(claims[0]["is_theft"], json!(true));
    assert_eq!(claims[0]["status"], "pending");
    assert_eq!(claims[1]["description"], "bent wheel");
    assert!(entries[1].get("claims").is_none());
}

#[test]
fn listing_releases_scan() {
    let executor = executor();
    seed(&executor, &[("c1", "u1"), ("c2", "u2")]);

    for owner in ["", "u1", "nobody"] {
        executor.invoke(Command::SHOP_CONTRACT_LS, &list_args(owner)).unwrap();
        assert_eq!(executor.ledger().open_scans(), 0, "owner {:?}", owner);
    }
}

#[test]
fn listing_is_deterministic() {
    let executor = executor();
    seed(&executor, &[("x", "u2"), ("y", "u1"), ("z", "u3")]);

    let first = executor.invoke(Command::SHOP_CONTRACT_LS, &[]).unwrap();
    for _ in 0..3 {
        let again = executor.invoke(Command::SHOP_CONTRACT_LS, &[]).unwrap();
        assert_eq!(again.to_payload().unwrap(), first.to_payload().unwrap());
    }
    match first {
        Output::Contracts(views) => {
            let owners: Vec<_> = views.iter().map(|v| v.contract.username.clone()).collect();
            assert_eq!(owners, vec!["u1", "u2", "u3"]);
        }
        other => panic!("Expected Contracts, got {:?}", other),
    }
}
