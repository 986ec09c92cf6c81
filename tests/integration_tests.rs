use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tripsplit_engine::core::currency::{Currency, RateTable};
use tripsplit_engine::core::group::Group;
use tripsplit_engine::core::member::{Member, MemberId};
use tripsplit_engine::core::transaction::{Category, Transaction};
use tripsplit_engine::engine::balance::compute_balances;
use tripsplit_engine::engine::settlement::{compute_settlements, SettlementReport};
use tripsplit_engine::engine::SettleError;
use tripsplit_engine::scan::receipt::ReceiptScan;

/// Full pipeline test: group → balances → settlements, across three
/// currencies displayed in USD.
#[test]
fn full_pipeline_seoul_trip() {
    let mut group = Group::with_id("seoulTrip_1700000000000", "Seoul Trip")
        .with_default_currency(Currency::Eur);
    group.add_member(Member::new("u1", "Alice"));
    group.add_member(Member::new("u2", "Bob"));
    group.add_member(Member::new("u3", "Carol"));

    group.add_transaction(
        Transaction::new(MemberId::new("u1"), dec!(100), Currency::Eur, "Hotel night")
            .with_category(Category::Accommodation),
    );
    group.add_transaction(
        Transaction::new(MemberId::new("u2"), dec!(26740), Currency::Krw, "BBQ dinner")
            .with_category(Category::Food),
    );
    group.add_transaction(
        Transaction::new(MemberId::new("u3"), dec!(30), Currency::Usd, "Museum tickets")
            .with_category(Category::Entertainment),
    );

    let rates = RateTable::default();
    let report =
        SettlementReport::compute(&group.members, &group.transactions, Currency::Usd, &rates)
            .unwrap();

    // Alice: 100 EUR → ~110.62 USD. Bob: 26740 KRW → 20 USD. Carol: 30 USD.
    assert_eq!(report.balances[0].1.round_dp(2), dec!(110.62));
    assert_eq!(report.balances[1].1, dec!(20));
    assert_eq!(report.balances[2].1, dec!(30));

    // Bob then Carol pay Alice up to the average (~53.54).
    assert_eq!(report.settlements.len(), 2);
    assert_eq!(report.settlements[0].from, "Bob");
    assert_eq!(report.settlements[0].to, "Alice");
    assert_eq!(report.settlements[1].from, "Carol");
    assert_eq!(report.settlements[1].to, "Alice");

    // Transfers cover Alice's surplus within per-transfer rounding.
    let paid: Decimal = report.settlements.iter().map(|s| s.amount).sum();
    let alice_surplus = report.balances[0].1 - report.average_spent;
    assert!((paid - alice_surplus).abs() <= dec!(0.02));
}

/// Switching the display currency changes numbers, not the direction of
/// any transfer.
#[test]
fn display_currency_does_not_change_transfer_directions() {
    let members = vec![Member::new("u1", "Alice"), Member::new("u2", "Bob")];
    let transactions = vec![Transaction::new(
        MemberId::new("u1"),
        dec!(80),
        Currency::Eur,
        "Groceries",
    )];
    let rates = RateTable::default();

    for display in rates.supported_currencies() {
        let report =
            SettlementReport::compute(&members, &transactions, display, &rates).unwrap();
        assert_eq!(report.settlements.len(), 1);
        assert_eq!(report.settlements[0].from, "Bob");
        assert_eq!(report.settlements[0].to, "Alice");
    }
}

/// A group file in the persisted JSON shape loads and settles.
#[test]
fn group_json_loads_and_settles() {
    let json = r#"{
        "id": "weekendInBerlin_1700000000000",
        "name": "Weekend in Berlin",
        "defaultCurrency": "EUR",
        "members": [
            { "id": "u1", "name": "Alice" },
            { "id": "u2", "name": "Bob" }
        ],
        "transactions": [
            {
                "id": 1700000000001,
                "amount": "100.00",
                "currency": "EUR",
                "message": "Dinner",
                "details": "",
                "category": "Food",
                "memberId": "u1",
                "datetime": "2024-10-03T19:45:00Z"
            },
            {
                "id": 1700000000002,
                "amount": "0.00",
                "currency": "EUR",
                "message": "Water",
                "memberId": "u2",
                "datetime": "2024-10-03T20:00:00Z"
            }
        ]
    }"#;

    let group: Group = serde_json::from_str(json).unwrap();
    assert_eq!(group.default_currency, Currency::Eur);

    let report = SettlementReport::compute(
        &group.members,
        &group.transactions,
        group.default_currency,
        &RateTable::default(),
    )
    .unwrap();

    assert_eq!(report.total_spent, dec!(100));
    assert_eq!(report.settlements.len(), 1);
    assert_eq!(report.settlements[0].from, "Bob");
    assert_eq!(report.settlements[0].to, "Alice");
    assert_eq!(report.settlements[0].amount, dec!(50.00));
}

/// Settlement reports serialize with stable camelCase fields.
#[test]
fn settlement_report_serializes() {
    let members = vec![Member::new("u1", "Alice"), Member::new("u2", "Bob")];
    let transactions = vec![Transaction::new(
        MemberId::new("u1"),
        dec!(50),
        Currency::Eur,
        "Lunch",
    )];
    let report = SettlementReport::compute(
        &members,
        &transactions,
        Currency::Eur,
        &RateTable::default(),
    )
    .unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(parsed.get("displayCurrency").is_some());
    assert!(parsed.get("totalSpent").is_some());
    assert!(parsed.get("averageSpent").is_some());
    assert_eq!(parsed["settlements"][0]["from"], "Bob");
}

/// A scanned receipt flows into the group like any manual transaction.
#[test]
fn receipt_scan_flows_into_settlement() {
    let scan: ReceiptScan = serde_json::from_str(
        r#"{
            "message": "Dinner at Oseyo",
            "details": "Bibimbap and drinks",
            "amount": "42.80",
            "currency": "EUR",
            "category": "Food",
            "datetime": "2024-10-03T19:45:00Z"
        }"#,
    )
    .unwrap();

    let mut group = Group::with_id("g1", "Test");
    group.add_member(Member::new("u1", "Alice"));
    group.add_member(Member::new("u2", "Bob"));
    group.add_transaction(scan.into_transaction(MemberId::new("u1")).unwrap());

    let report = SettlementReport::compute(
        &group.members,
        &group.transactions,
        Currency::Eur,
        &RateTable::default(),
    )
    .unwrap();
    assert_eq!(report.settlements.len(), 1);
    assert_eq!(report.settlements[0].amount, dec!(21.40));
}

/// Corrupted groups fail loudly instead of producing a wrong total.
#[test]
fn orphan_transaction_is_rejected() {
    let members = vec![Member::new("u1", "Alice")];
    let orphan = Transaction::new(MemberId::new("u9"), dec!(10), Currency::Eur, "Ghost");
    let err = compute_balances(&members, &[orphan], Currency::Eur, &RateTable::default())
        .unwrap_err();
    assert!(matches!(err, SettleError::OrphanTransaction { .. }));
}

/// An empty group cannot be settled.
#[test]
fn empty_group_is_rejected() {
    let sheet = compute_balances(&[], &[], Currency::Eur, &RateTable::default()).unwrap();
    assert_eq!(
        compute_settlements(&sheet, &[]).unwrap_err(),
        SettleError::NoMembers
    );
    assert_eq!(
        SettlementReport::compute(&[], &[], Currency::Eur, &RateTable::default()).unwrap_err(),
        SettleError::NoMembers
    );
}

/// Deleting a transaction and recomputing reflects the removal; the
/// sheet itself is derived, never stored.
#[test]
fn recompute_after_transaction_removal() {
    let mut group = Group::with_id("g1", "Test");
    group.add_member(Member::new("u1", "Alice"));
    group.add_member(Member::new("u2", "Bob"));

    let keep = Transaction::new(MemberId::new("u1"), dec!(60), Currency::Eur, "Dinner");
    let drop = Transaction::new(MemberId::new("u2"), dec!(40), Currency::Eur, "Mistake");
    let drop_id = drop.id;
    group.add_transaction(keep);
    group.add_transaction(drop);

    let rates = RateTable::default();
    let before = compute_balances(
        &group.members,
        &group.transactions,
        Currency::Eur,
        &rates,
    )
    .unwrap();
    assert_eq!(before.total_spent(), dec!(100));

    group.remove_transaction(drop_id).unwrap();
    let after = compute_balances(
        &group.members,
        &group.transactions,
        Currency::Eur,
        &rates,
    )
    .unwrap();
    assert_eq!(after.total_spent(), dec!(60));
    assert_eq!(after.balance(&MemberId::new("u2")), Decimal::ZERO);
}
