mod common;

use common::{expense, id, members, money};
use ledger::{Money, compute_net_balances, compute_pairwise_balances, pairwise_records};
use rust_decimal_macros::dec;

#[test]
fn single_payer_single_debtor_attributes_the_full_amount() {
    let group = members(&["alice", "bob", "carol"]);
    let expenses = vec![expense(dec!(42), &[("alice", dec!(42))], &[("bob", dec!(42))])];

    let alice_view = compute_pairwise_balances(&expenses, &group, &id("alice"));
    assert_eq!(alice_view[&id("bob")], money(dec!(42)));
    assert_eq!(alice_view[&id("carol")], Money::ZERO);
    assert!(!alice_view.contains_key(&id("alice")));

    let bob_view = compute_pairwise_balances(&expenses, &group, &id("bob"));
    assert_eq!(bob_view[&id("alice")], money(dec!(-42)));
    assert_eq!(bob_view[&id("carol")], Money::ZERO);
}

#[test]
fn multiple_payers_share_each_debt_by_payment_ratio() {
    let group = members(&["p1", "p2", "d1", "d2", "d3"]);
    let expenses = vec![expense(
        dec!(300),
        &[("p1", dec!(180)), ("p2", dec!(120))],
        &[("d1", dec!(100)), ("d2", dec!(100)), ("d3", dec!(100))],
    )];

    let p1_view = compute_pairwise_balances(&expenses, &group, &id("p1"));
    let p2_view = compute_pairwise_balances(&expenses, &group, &id("p2"));
    for debtor in ["d1", "d2", "d3"] {
        assert_eq!(p1_view[&id(debtor)], money(dec!(60)));
        assert_eq!(p2_view[&id(debtor)], money(dec!(40)));
    }
    assert_eq!(p1_view[&id("p2")], Money::ZERO);

    let d1_view = compute_pairwise_balances(&expenses, &group, &id("d1"));
    assert_eq!(d1_view[&id("p1")], money(dec!(-60)));
    assert_eq!(d1_view[&id("p2")], money(dec!(-40)));
    assert_eq!(d1_view[&id("d2")], Money::ZERO);
}

#[test]
fn viewer_paying_own_share_is_not_attributed() {
    let group = members(&["alice", "bob"]);
    let expenses = vec![expense(
        dec!(50),
        &[("alice", dec!(50))],
        &[("alice", dec!(25)), ("bob", dec!(25))],
    )];

    let view = compute_pairwise_balances(&expenses, &group, &id("alice"));

    assert_eq!(view.len(), 1);
    assert_eq!(view[&id("bob")], money(dec!(25)));
}

#[test]
fn expenses_nobody_paid_for_are_skipped() {
    let group = members(&["alice", "bob"]);
    let unpaid = expense(dec!(30), &[], &[("bob", dec!(30))]);
    let zero_paid = expense(dec!(30), &[("alice", dec!(0))], &[("bob", dec!(30))]);
    let cancelling = expense(
        dec!(0),
        &[("alice", dec!(10)), ("alice", dec!(-10))],
        &[("bob", dec!(30))],
    );

    let view = compute_pairwise_balances(&[unpaid, zero_paid, cancelling], &group, &id("alice"));

    assert_eq!(view[&id("bob")], Money::ZERO);
}

#[test]
fn accumulates_across_expenses_in_both_directions() {
    let group = members(&["alice", "bob"]);
    let expenses = vec![
        expense(dec!(40), &[("alice", dec!(40))], &[("bob", dec!(40))]),
        expense(dec!(15), &[("bob", dec!(15))], &[("alice", dec!(15))]),
    ];

    let view = compute_pairwise_balances(&expenses, &group, &id("alice"));

    assert_eq!(view[&id("bob")], money(dec!(25)));
}

#[test]
fn counterparties_outside_the_roster_are_kept() {
    let group = members(&["alice"]);
    let expenses = vec![expense(dec!(10), &[("alice", dec!(10))], &[("zoe", dec!(10))])];

    let view = compute_pairwise_balances(&expenses, &group, &id("alice"));

    assert_eq!(view[&id("zoe")], money(dec!(10)));
}

#[test]
fn tiny_balances_are_kept_but_reported_settled() {
    let group = members(&["alice", "bob"]);
    let expenses = vec![expense(dec!(0.004), &[("alice", dec!(0.004))], &[("bob", dec!(0.004))])];

    let view = compute_pairwise_balances(&expenses, &group, &id("alice"));
    let records = pairwise_records(&id("alice"), &view);

    assert_eq!(view[&id("bob")], money(dec!(0.004)));
    assert_eq!(records.len(), 1);
    assert!(records[0].is_settled(Money::CENT));
    let record = records[0].to_record(Money::CENT);
    assert!(record.settled);
    assert_eq!(record.amount, dec!(0));
}

#[test]
fn debts_are_not_routed_through_third_parties() {
    // Alice covers Bob, Bob covers Carol. Netting would have Carol pay Alice,
    // but they never shared an expense, so neither sees the other.
    let group = members(&["alice", "bob", "carol"]);
    let expenses = vec![
        expense(dec!(30), &[("alice", dec!(30))], &[("bob", dec!(30))]),
        expense(dec!(30), &[("bob", dec!(30))], &[("carol", dec!(30))]),
    ];

    let net = compute_net_balances(&expenses, &group);
    assert_eq!(net[&id("alice")], money(dec!(30)));
    assert_eq!(net[&id("bob")], Money::ZERO);
    assert_eq!(net[&id("carol")], money(dec!(-30)));

    let alice_view = compute_pairwise_balances(&expenses, &group, &id("alice"));
    assert_eq!(alice_view[&id("bob")], money(dec!(30)));
    assert_eq!(alice_view[&id("carol")], Money::ZERO);

    let carol_view = compute_pairwise_balances(&expenses, &group, &id("carol"));
    assert_eq!(carol_view[&id("bob")], money(dec!(-30)));
    assert_eq!(carol_view[&id("alice")], Money::ZERO);

    let bob_view = compute_pairwise_balances(&expenses, &group, &id("bob"));
    assert_eq!(bob_view[&id("alice")], money(dec!(-30)));
    assert_eq!(bob_view[&id("carol")], money(dec!(30)));
}

#[test]
fn pairwise_sum_matches_net_balance_when_rows_reconcile() {
    let group = members(&["alice", "bob", "carol"]);
    let expenses = vec![
        expense(
            dec!(90),
            &[("alice", dec!(60)), ("bob", dec!(30))],
            &[("alice", dec!(30)), ("bob", dec!(30)), ("carol", dec!(30))],
        ),
        expense(
            dec!(60),
            &[("bob", dec!(30)), ("carol", dec!(30))],
            &[("alice", dec!(20)), ("bob", dec!(20)), ("carol", dec!(20))],
        ),
    ];

    let net = compute_net_balances(&expenses, &group);
    for viewer in ["alice", "bob", "carol"] {
        let view = compute_pairwise_balances(&expenses, &group, &id(viewer));
        let pairwise_total: Money = view.values().sum();
        assert_eq!(pairwise_total, net[&id(viewer)], "viewer {viewer}");
    }

    let alice_view = compute_pairwise_balances(&expenses, &group, &id("alice"));
    assert_eq!(alice_view[&id("bob")], money(dec!(0)));
    assert_eq!(alice_view[&id("carol")], money(dec!(10)));
}

#[test]
fn pairwise_sum_drifts_from_net_balance_when_splits_lose_cents() {
    // Equal split of 100 among three leaves 99.99 of splits against 100 paid.
    // The net balance counts the full payment, the pairwise view only what
    // the other members owe.
    let group = members(&["alice", "bob", "carol"]);
    let expenses = vec![expense(
        dec!(100),
        &[("alice", dec!(100))],
        &[("alice", dec!(33.33)), ("bob", dec!(33.33)), ("carol", dec!(33.33))],
    )];

    let net = compute_net_balances(&expenses, &group);
    let view = compute_pairwise_balances(&expenses, &group, &id("alice"));
    let pairwise_total: Money = view.values().sum();

    assert_eq!(net[&id("alice")], money(dec!(66.67)));
    assert_eq!(pairwise_total, money(dec!(66.66)));
    assert_eq!(net[&id("alice")] - pairwise_total, Money::CENT);
}

#[test]
fn repeated_calls_are_identical() {
    let group = members(&["alice", "bob", "carol"]);
    let expenses = vec![expense(
        dec!(100),
        &[("alice", dec!(70)), ("bob", dec!(30))],
        &[("bob", dec!(50)), ("carol", dec!(50))],
    )];

    let first = compute_pairwise_balances(&expenses, &group, &id("carol"));
    let second = compute_pairwise_balances(&expenses, &group, &id("carol"));

    assert_eq!(first, second);
}

#[test]
fn large_amounts_are_attributed_without_overflow() {
    let group = members(&["alice", "bob", "carol"]);
    let expenses = vec![expense(
        dec!(1000000000000000),
        &[("alice", dec!(600000000000000)), ("carol", dec!(400000000000000))],
        &[("bob", dec!(1000000000000000))],
    )];

    let bob_view = compute_pairwise_balances(&expenses, &group, &id("bob"));
    let net = compute_net_balances(&expenses, &group);

    assert_eq!(bob_view[&id("alice")], money(dec!(-600000000000000)));
    assert_eq!(bob_view[&id("carol")], money(dec!(-400000000000000)));
    assert_eq!(bob_view.values().sum::<Money>(), net[&id("bob")]);
}
