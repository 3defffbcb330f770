//! Spending insights for a group.

use std::collections::BTreeMap;

use api_types::balance;
use uuid::Uuid;

use crate::{Expense, Member, Money, UserId};

/// What one member paid and owes across a set of expenses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemberTotals {
    pub paid: Money,
    pub owed: Money,
}

impl MemberTotals {
    /// Same value [`compute_net_balances`](crate::compute_net_balances)
    /// reports for the member.
    pub fn net(&self) -> Money {
        self.paid - self.owed
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GroupSummary {
    /// Sum of shared expense amounts; settlements are left out.
    pub total_spent: Money,
    pub members: BTreeMap<UserId, MemberTotals>,
    /// Expenses whose payments or splits do not add up to their amount.
    pub unreconciled: Vec<Uuid>,
}

impl GroupSummary {
    pub fn to_record(&self) -> balance::GroupSummary {
        balance::GroupSummary {
            total_spent: self.total_spent.rounded().amount(),
            members: self
                .members
                .iter()
                .map(|(user_id, totals)| balance::MemberTotals {
                    id: user_id.to_string(),
                    paid: totals.paid.rounded().amount(),
                    owed: totals.owed.rounded().amount(),
                    net: totals.net().rounded().amount(),
                })
                .collect(),
            unreconciled: self.unreconciled.clone(),
        }
    }
}

/// Builds the group summary.
///
/// Equal splits drop up to one cent per participant, so an expense counts as
/// reconciled while each total is within one cent per row of its amount.
pub fn summarize(expenses: &[Expense], members: &[Member]) -> GroupSummary {
    let mut summary = GroupSummary {
        members: members
            .iter()
            .map(|member| (member.user_id.clone(), MemberTotals::default()))
            .collect(),
        ..GroupSummary::default()
    };

    for expense in expenses {
        if !expense.is_settlement() {
            summary.total_spent += expense.amount;
        }

        let rows = expense.payments.len().max(expense.splits.len()).max(1);
        let tolerance = Money::from_cents(i64::try_from(rows).unwrap_or(i64::MAX));
        let report = expense.reconcile();
        if !report.is_within(tolerance) {
            tracing::warn!(
                expense_id = %expense.id,
                paid_delta = %report.paid_delta,
                split_delta = %report.split_delta,
                "expense rows do not add up to its amount"
            );
            summary.unreconciled.push(expense.id);
        }

        for payment in &expense.payments {
            if let Some(totals) = summary.members.get_mut(&payment.user_id) {
                totals.paid += payment.paid_amount;
            }
        }
        for split in &expense.splits {
            if let Some(totals) = summary.members.get_mut(&split.user_id) {
                totals.owed += split.share;
            }
        }
    }

    summary
}
