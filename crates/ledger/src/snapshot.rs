//! Assembling fetched table rows into ledger records.
//!
//! Rows come from separate `expenses`, `expense_payments` and
//! `expense_splits` queries and may be incomplete. Amounts that are missing
//! or not numeric are read as zero so a single bad row does not blank out a
//! whole balance panel; every such coercion is logged.

use std::{collections::BTreeMap, str::FromStr};

use api_types::{
    RawAmount,
    expense::{ExpenseRow, PaymentRow, SplitRow},
    member::MemberRow,
    snapshot::SnapshotRows,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    Expense, GroupSummary, Member, Money, Payment, Split, UserId, compute_net_balances,
    compute_pairwise_balances, summarize,
};

/// Reads a raw backend amount, falling back to zero.
pub fn lenient_amount(raw: Option<&RawAmount>, field: &str) -> Money {
    let parsed = match raw {
        None => {
            tracing::warn!(field, "missing amount, using 0");
            return Money::ZERO;
        }
        Some(RawAmount::Number(number)) => Decimal::from_str(&number.to_string())
            .or_else(|_| Decimal::from_scientific(&number.to_string())),
        Some(RawAmount::Text(text)) => Decimal::from_str(text.trim()),
        Some(RawAmount::Other(value)) => {
            tracing::warn!(field, %value, "amount is not a number or string, using 0");
            return Money::ZERO;
        }
    };

    match parsed {
        Ok(value) => Money::new(value),
        Err(err) => {
            tracing::warn!(field, ?raw, "non-numeric amount, using 0: {err}");
            Money::ZERO
        }
    }
}

impl From<MemberRow> for Member {
    fn from(row: MemberRow) -> Self {
        Self {
            user_id: UserId::from(row.user_id),
            name: row.name,
            avatar_url: row.avatar_url,
        }
    }
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            expense_id: row.expense_id,
            user_id: UserId::from(row.user_id),
            paid_amount: lenient_amount(row.paid_amount.as_ref(), "paid_amount"),
        }
    }
}

impl From<SplitRow> for Split {
    fn from(row: SplitRow) -> Self {
        Self {
            expense_id: row.expense_id,
            user_id: UserId::from(row.user_id),
            share: lenient_amount(row.share.as_ref(), "share"),
        }
    }
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            group_id: row.group_id,
            title: row.title,
            amount: lenient_amount(row.amount.as_ref(), "amount"),
            created_by: UserId::from(row.created_by),
            created_at: row.created_at,
            payments: Vec::new(),
            splits: Vec::new(),
        }
    }
}

/// Members and fully populated expenses of one group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub members: Vec<Member>,
    pub expenses: Vec<Expense>,
}

impl LedgerSnapshot {
    pub fn new(members: Vec<Member>, expenses: Vec<Expense>) -> Self {
        Self { members, expenses }
    }

    /// Joins payment and split rows to their expense.
    ///
    /// Expenses keep the order they were fetched in. Payment and split rows
    /// pointing to an expense that is not in `rows.expenses` are dropped.
    pub fn from_rows(rows: SnapshotRows) -> Self {
        let mut expenses: Vec<Expense> = rows.expenses.into_iter().map(Expense::from).collect();
        let index: BTreeMap<Uuid, usize> = expenses
            .iter()
            .enumerate()
            .map(|(position, expense)| (expense.id, position))
            .collect();

        let mut orphans = 0usize;
        for row in rows.payments {
            match index.get(&row.expense_id) {
                Some(&position) => expenses[position].payments.push(Payment::from(row)),
                None => {
                    tracing::warn!(expense_id = %row.expense_id, "payment for unknown expense dropped");
                    orphans += 1;
                }
            }
        }
        for row in rows.splits {
            match index.get(&row.expense_id) {
                Some(&position) => expenses[position].splits.push(Split::from(row)),
                None => {
                    tracing::warn!(expense_id = %row.expense_id, "split for unknown expense dropped");
                    orphans += 1;
                }
            }
        }

        let members: Vec<Member> = rows.members.into_iter().map(Member::from).collect();
        tracing::debug!(
            members = members.len(),
            expenses = expenses.len(),
            orphans,
            "assembled ledger snapshot"
        );

        Self { members, expenses }
    }

    pub fn member(&self, user_id: &UserId) -> Option<&Member> {
        self.members.iter().find(|member| &member.user_id == user_id)
    }

    /// Same expense set with `expense` appended.
    #[must_use]
    pub fn with_expense(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    pub fn net_balances(&self) -> BTreeMap<UserId, Money> {
        compute_net_balances(&self.expenses, &self.members)
    }

    pub fn pairwise_balances(&self, viewer: &UserId) -> BTreeMap<UserId, Money> {
        compute_pairwise_balances(&self.expenses, &self.members, viewer)
    }

    pub fn summary(&self) -> GroupSummary {
        summarize(&self.expenses, &self.members)
    }
}
