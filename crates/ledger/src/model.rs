//! Ledger records: members, expenses and the payments and splits that make
//! an expense.
//!
//! An [`Expense`] is one shared cost event. Its [`Payment`]s say who covered
//! the cost and its [`Split`]s say who owes a part of it. Both lists are
//! expected to add up to the expense amount; the ledger does not enforce it
//! but [`Expense::reconcile`] reports when they do not.

use std::{borrow::Borrow, fmt};

use api_types::expense::{ExpenseInsert, ExpenseRows, PaymentInsert, SplitInsert};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Money;

/// Profile id of a group member.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A participant of a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub user_id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl Member {
    pub fn new(user_id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: name.into(),
            avatar_url: None,
        }
    }

    /// Name to show in generated titles, falling back to the id.
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            self.user_id.as_str()
        } else {
            name
        }
    }
}

/// One member's contribution toward covering an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub expense_id: Uuid,
    pub user_id: UserId,
    pub paid_amount: Money,
}

/// One member's assigned portion of an expense.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    pub expense_id: Uuid,
    pub user_id: UserId,
    pub share: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub title: String,
    pub amount: Money,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub splits: Vec<Split>,
}

/// Difference between what an expense declares and what its rows add up to.
///
/// Both deltas are `rows - amount`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    pub paid_delta: Money,
    pub split_delta: Money,
}

impl Reconciliation {
    /// `true` when both deltas are within `tolerance`.
    pub fn is_within(&self, tolerance: Money) -> bool {
        self.paid_delta.abs() <= tolerance && self.split_delta.abs() <= tolerance
    }
}

impl Expense {
    /// Creates an expense with a fresh id and no payments or splits.
    pub fn new(
        group_id: Uuid,
        title: impl Into<String>,
        amount: Money,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), group_id, title, amount, created_by, created_at)
    }

    pub fn with_id(
        id: Uuid,
        group_id: Uuid,
        title: impl Into<String>,
        amount: Money,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            group_id,
            title: title.into(),
            amount,
            created_by,
            created_at,
            payments: Vec::new(),
            splits: Vec::new(),
        }
    }

    /// Adds a payment row for `user_id`.
    #[must_use]
    pub fn paid_by(mut self, user_id: impl Into<UserId>, paid_amount: Money) -> Self {
        self.payments.push(Payment {
            expense_id: self.id,
            user_id: user_id.into(),
            paid_amount,
        });
        self
    }

    /// Adds a split row for `user_id`.
    #[must_use]
    pub fn owed_by(mut self, user_id: impl Into<UserId>, share: Money) -> Self {
        self.splits.push(Split {
            expense_id: self.id,
            user_id: user_id.into(),
            share,
        });
        self
    }

    pub fn total_paid(&self) -> Money {
        self.payments.iter().map(|payment| payment.paid_amount).sum()
    }

    pub fn total_split(&self) -> Money {
        self.splits.iter().map(|split| split.share).sum()
    }

    pub fn reconcile(&self) -> Reconciliation {
        Reconciliation {
            paid_delta: self.total_paid() - self.amount,
            split_delta: self.total_split() - self.amount,
        }
    }

    /// Whether this expense has the shape of a direct repayment: one payer,
    /// one different debtor, both for the full amount.
    ///
    /// The backend has no column telling settlements apart, so the shape is
    /// all there is to go on.
    pub fn is_settlement(&self) -> bool {
        match (self.payments.as_slice(), self.splits.as_slice()) {
            ([payment], [split]) => {
                payment.user_id != split.user_id
                    && payment.paid_amount == self.amount
                    && split.share == self.amount
            }
            _ => false,
        }
    }

    /// Rows to insert, in write order. Amounts are rounded to cents.
    pub fn to_rows(&self) -> ExpenseRows {
        ExpenseRows {
            expense: ExpenseInsert {
                id: self.id,
                group_id: self.group_id,
                title: self.title.clone(),
                amount: self.amount.rounded().amount(),
                created_by: self.created_by.to_string(),
                created_at: self.created_at,
            },
            payments: self
                .payments
                .iter()
                .map(|payment| PaymentInsert {
                    expense_id: self.id,
                    user_id: payment.user_id.to_string(),
                    paid_amount: payment.paid_amount.rounded().amount(),
                })
                .collect(),
            splits: self
                .splits
                .iter()
                .map(|split| SplitInsert {
                    expense_id: self.id,
                    user_id: split.user_id.to_string(),
                    share: split.share.rounded().amount(),
                })
                .collect(),
        }
    }
}
