mod common;

use common::{group_id, id, members, money};
use ledger::{
    ExpenseDraft, LedgerError, Money, SplitPolicy, UserId, compute_net_balances, split_equally,
};
use rust_decimal_macros::dec;

fn participants(names: &[&str]) -> Vec<UserId> {
    names.iter().map(|name| id(name)).collect()
}

fn draft(amount: Money, names: &[&str]) -> ExpenseDraft {
    ExpenseDraft {
        group_id: group_id(),
        title: "Groceries".to_string(),
        amount,
        payer_id: id("alice"),
        participants: participants(names),
        created_by: id("alice"),
        created_at: None,
    }
}

#[test]
fn even_amount_splits_exactly() {
    let shares = split_equally(money(dec!(300)), &participants(&["a", "b", "c"]));

    assert_eq!(shares.len(), 3);
    for name in ["a", "b", "c"] {
        assert_eq!(shares[&id(name)], money(dec!(100)));
    }
}

#[test]
fn odd_amount_loses_the_remainder_cent() {
    let shares = split_equally(money(dec!(100)), &participants(&["a", "b", "c"]));
    let total: Money = shares.values().sum();

    assert!(shares.values().all(|share| *share == money(dec!(33.33))));
    assert!((money(dec!(100)) - total).abs() <= Money::CENT);
    assert_eq!(total, money(dec!(99.99)));
}

#[test]
fn incomplete_forms_yield_no_shares() {
    assert!(split_equally(money(dec!(50)), &[]).is_empty());
    assert!(split_equally(Money::ZERO, &participants(&["a", "b"])).is_empty());
    assert!(split_equally(money(dec!(-5)), &participants(&["a"])).is_empty());
}

#[test]
fn draft_builds_one_payment_and_one_split_per_participant() {
    let expense = draft(money(dec!(60)), &["alice", "bob", "carol"])
        .build(SplitPolicy::Equal)
        .unwrap();

    assert_eq!(expense.title, "Groceries");
    assert_eq!(expense.payments.len(), 1);
    assert_eq!(expense.payments[0].user_id, id("alice"));
    assert_eq!(expense.payments[0].paid_amount, money(dec!(60)));
    assert_eq!(expense.splits.len(), 3);
    assert!(expense.splits.iter().all(|split| split.share == money(dec!(20))));
    assert!(expense.splits.iter().all(|split| split.expense_id == expense.id));

    let balances = compute_net_balances(&[expense], &members(&["alice", "bob", "carol"]));
    assert_eq!(balances[&id("alice")], money(dec!(40)));
    assert_eq!(balances[&id("bob")], money(dec!(-20)));
}

#[test]
fn largest_remainder_draft_reconciles() {
    let expense = draft(money(dec!(100)), &["alice", "bob", "carol"])
        .build(SplitPolicy::LargestRemainder)
        .unwrap();

    assert_eq!(expense.total_split(), money(dec!(100)));
    assert!(expense.reconcile().is_within(Money::ZERO));
}

#[test]
fn draft_rejects_incomplete_input() {
    let mut untitled = draft(money(dec!(10)), &["alice"]);
    untitled.title = "   ".to_string();
    assert!(matches!(
        untitled.build(SplitPolicy::Equal),
        Err(LedgerError::InvalidExpense(_))
    ));

    assert!(matches!(
        draft(Money::ZERO, &["alice"]).build(SplitPolicy::Equal),
        Err(LedgerError::InvalidExpense(_))
    ));

    assert_eq!(
        draft(money(dec!(10)), &[]).build(SplitPolicy::Equal),
        Err(LedgerError::InvalidExpense(
            "at least one participant is required".to_string()
        ))
    );
}

#[test]
fn draft_rejects_amounts_that_round_to_nothing() {
    let names = ["alice", "bob", "carol"];

    assert_eq!(
        draft(money(dec!(0.01)), &names).build(SplitPolicy::Equal),
        Err(LedgerError::InvalidExpense(
            "amount is too small to split".to_string()
        ))
    );

    let expense = draft(money(dec!(0.01)), &names)
        .build(SplitPolicy::LargestRemainder)
        .unwrap();
    assert_eq!(expense.total_split(), money(dec!(0.01)));
}
