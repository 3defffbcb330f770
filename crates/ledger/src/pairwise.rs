//! Who owes whom, from one member's point of view.
//!
//! Only direct history counts: an amount is attributed between the viewer
//! and another member when, inside the same expense, one of them paid and the
//! other owes a share. Debts between third parties are never routed through
//! the viewer, so the sum of the pairwise balances can differ from the
//! viewer's net balance when other members share an expense among themselves.
//!
//! When an expense has several payers, every debtor's share is spread over
//! the payers in proportion to what each of them paid:
//!
//! ```text
//! attributed = share * paid_amount / total_paid
//! ```

use std::collections::BTreeMap;

use api_types::balance::PairwiseRecord;
use serde::{Deserialize, Serialize};

use crate::{Expense, Member, Money, UserId};

/// Signed balance between the viewer and one other member.
///
/// Positive: `other_id` owes the viewer. Negative: the viewer owes `other_id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairwiseBalance {
    pub viewer_id: UserId,
    pub other_id: UserId,
    pub amount: Money,
}

impl PairwiseBalance {
    pub fn is_settled(&self, epsilon: Money) -> bool {
        self.amount.is_settled(epsilon)
    }

    pub fn to_record(&self, epsilon: Money) -> PairwiseRecord {
        PairwiseRecord {
            viewer_id: self.viewer_id.to_string(),
            other_id: self.other_id.to_string(),
            amount: self.amount.rounded().amount(),
            settled: self.is_settled(epsilon),
        }
    }
}

/// Computes the viewer's balance against every other member.
///
/// Members other than the viewer start at zero. Counterparties missing from
/// `members` still get an entry when they transacted with the viewer.
/// Expenses whose payments add up to zero are skipped.
pub fn compute_pairwise_balances(
    expenses: &[Expense],
    members: &[Member],
    viewer: &UserId,
) -> BTreeMap<UserId, Money> {
    let mut balances: BTreeMap<UserId, Money> = members
        .iter()
        .filter(|member| &member.user_id != viewer)
        .map(|member| (member.user_id.clone(), Money::ZERO))
        .collect();

    let mut skipped = 0usize;
    for expense in expenses {
        let total_paid = expense.total_paid();
        if total_paid.is_zero() {
            skipped += 1;
            continue;
        }

        for payment in &expense.payments {
            for split in &expense.splits {
                let viewer_paid = &payment.user_id == viewer;
                let viewer_owes = &split.user_id == viewer;
                if viewer_paid == viewer_owes {
                    continue;
                }

                let Some(attributed) = split.share.pro_rata(payment.paid_amount, total_paid)
                else {
                    tracing::warn!(
                        expense_id = %expense.id,
                        "attribution overflowed, pair ignored"
                    );
                    continue;
                };

                if viewer_paid {
                    *balances.entry(split.user_id.clone()).or_default() += attributed;
                } else {
                    *balances.entry(payment.user_id.clone()).or_default() -= attributed;
                }
            }
        }
    }

    tracing::debug!(
        viewer = %viewer,
        expenses = expenses.len(),
        skipped,
        counterparties = balances.len(),
        "computed pairwise balances"
    );

    balances
}

/// Pairwise balances as records, in counterparty id order.
pub fn pairwise_records(viewer: &UserId, balances: &BTreeMap<UserId, Money>) -> Vec<PairwiseBalance> {
    balances
        .iter()
        .map(|(other_id, amount)| PairwiseBalance {
            viewer_id: viewer.clone(),
            other_id: other_id.clone(),
            amount: *amount,
        })
        .collect()
}
