//! Shares of a new expense and the expense drafted from them.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Expense, LedgerError, Money, ResultLedger, UserId};

/// How an amount is divided among participants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Same share for everyone, rounded to cents. Leftover cents are not
    /// redistributed, so `100 / 3` gives `33.33` three times.
    #[default]
    Equal,
    /// Cents floored, then the leftover cents go one each to participants
    /// in id order. Shares always add up to the amount.
    LargestRemainder,
}

impl SplitPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::LargestRemainder => "largest_remainder",
        }
    }
}

impl TryFrom<&str> for SplitPolicy {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "largest_remainder" => Ok(Self::LargestRemainder),
            other => Err(LedgerError::InvalidExpense(format!(
                "unknown split policy: {other}"
            ))),
        }
    }
}

/// Equal share per participant.
///
/// Forms call this while they are still being filled in, so an empty
/// participant list or a non-positive amount yields an empty map instead of
/// an error. Repeated ids count once.
pub fn split_equally(amount: Money, participants: &[UserId]) -> BTreeMap<UserId, Money> {
    split(SplitPolicy::Equal, amount, participants)
}

/// Share per participant under `policy`. Same empty-input rules as
/// [`split_equally`].
pub fn split(
    policy: SplitPolicy,
    amount: Money,
    participants: &[UserId],
) -> BTreeMap<UserId, Money> {
    let unique: BTreeSet<&UserId> = participants.iter().collect();
    if unique.is_empty() || !amount.is_positive() {
        return BTreeMap::new();
    }
    let Some(share) = amount.divide(unique.len()) else {
        return BTreeMap::new();
    };

    match policy {
        SplitPolicy::Equal => {
            let share = share.rounded();
            unique
                .into_iter()
                .map(|user_id| (user_id.clone(), share))
                .collect()
        }
        SplitPolicy::LargestRemainder => {
            let floor = share.truncated();
            let mut leftover = amount.rounded();
            for _ in 0..unique.len() {
                leftover -= floor;
            }
            unique
                .into_iter()
                .map(|user_id| {
                    let mut share = floor;
                    if leftover.is_positive() {
                        share += Money::CENT;
                        leftover -= Money::CENT;
                    }
                    (user_id.clone(), share)
                })
                .collect()
        }
    }
}

/// A new shared expense paid in full by one member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub group_id: Uuid,
    pub title: String,
    pub amount: Money,
    pub payer_id: UserId,
    pub participants: Vec<UserId>,
    pub created_by: UserId,
    /// Defaults to now.
    pub created_at: Option<DateTime<Utc>>,
}

impl ExpenseDraft {
    /// Builds the expense with one payment for the full amount and one split
    /// per participant.
    pub fn build(self, policy: SplitPolicy) -> ResultLedger<Expense> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(LedgerError::InvalidExpense(
                "title must not be empty".to_string(),
            ));
        }
        if !self.amount.is_positive() {
            return Err(LedgerError::InvalidExpense(
                "amount must be > 0".to_string(),
            ));
        }

        let shares = split(policy, self.amount, &self.participants);
        if shares.is_empty() {
            return Err(LedgerError::InvalidExpense(
                "at least one participant is required".to_string(),
            ));
        }
        if shares.values().all(|share| share.is_zero()) {
            return Err(LedgerError::InvalidExpense(
                "amount is too small to split".to_string(),
            ));
        }

        let mut expense = Expense::new(
            self.group_id,
            title,
            self.amount,
            self.created_by,
            self.created_at.unwrap_or_else(Utc::now),
        )
        .paid_by(self.payer_id, self.amount);
        for (user_id, share) in shares {
            expense = expense.owed_by(user_id, share);
        }

        Ok(expense)
    }
}
