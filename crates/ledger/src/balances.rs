//! Net balance per member: everything they paid minus everything they owe.

use std::collections::{BTreeMap, HashMap};

use api_types::balance::BalanceRecord;

use crate::{Expense, Member, Money, UserId};

/// Computes each member's net balance across `expenses`.
///
/// Every member starts at zero so members without activity still show up.
/// Payments and splits of users outside `members` are accumulated like any
/// other but do not get an entry in the result.
///
/// Nothing is rounded here; see [`balance_records`] for the presentation
/// form.
pub fn compute_net_balances(expenses: &[Expense], members: &[Member]) -> BTreeMap<UserId, Money> {
    let mut totals: HashMap<&UserId, Money> = HashMap::new();

    for expense in expenses {
        for payment in &expense.payments {
            *totals.entry(&payment.user_id).or_default() += payment.paid_amount;
        }
        for split in &expense.splits {
            *totals.entry(&split.user_id).or_default() -= split.share;
        }
    }

    let balances: BTreeMap<UserId, Money> = members
        .iter()
        .map(|member| {
            let balance = totals.get(&member.user_id).copied().unwrap_or_default();
            (member.user_id.clone(), balance)
        })
        .collect();

    tracing::debug!(
        expenses = expenses.len(),
        members = members.len(),
        outside_members = totals
            .keys()
            .filter(|user_id| !balances.contains_key(**user_id))
            .count(),
        "computed net balances"
    );

    balances
}

/// `{ id, amount }` records rounded to cents, in id order.
pub fn balance_records(balances: &BTreeMap<UserId, Money>) -> Vec<BalanceRecord> {
    balances
        .iter()
        .map(|(user_id, amount)| BalanceRecord {
            id: user_id.to_string(),
            amount: amount.rounded().amount(),
        })
        .collect()
}
