//! Direct repayments between two members.
//!
//! A settlement is stored like any other expense: one payment by the member
//! paying back and one split, for the full amount, on the member receiving
//! the money. Once it is part of the expense set the payer's balance goes up
//! and the recipient's goes down by exactly that amount. The ledger does not
//! look up the existing debt; callers pick the amount, usually the pairwise
//! balance currently on screen.

use std::collections::BTreeMap;

use api_types::expense::ExpenseRows;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Expense, LedgerError, Member, Money, Payment, ResultLedger, Split, UserId};

/// Parameters of a settlement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementRequest {
    pub group_id: Uuid,
    pub payer_id: UserId,
    pub recipient_id: UserId,
    pub amount: Money,
    pub created_by: UserId,
    pub payer_name: Option<String>,
    pub recipient_name: Option<String>,
    /// Defaults to now.
    pub created_at: Option<DateTime<Utc>>,
}

impl SettlementRequest {
    #[must_use]
    pub fn new(
        group_id: Uuid,
        payer_id: impl Into<UserId>,
        recipient_id: impl Into<UserId>,
        amount: Money,
        created_by: impl Into<UserId>,
    ) -> Self {
        Self {
            group_id,
            payer_id: payer_id.into(),
            recipient_id: recipient_id.into(),
            amount,
            created_by: created_by.into(),
            payer_name: None,
            recipient_name: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn payer_name(mut self, name: impl Into<String>) -> Self {
        self.payer_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn recipient_name(mut self, name: impl Into<String>) -> Self {
        self.recipient_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Fills both display names from the group roster.
    #[must_use]
    pub fn names_from(mut self, members: &[Member]) -> Self {
        let name_of = |user_id: &UserId| {
            members
                .iter()
                .find(|member| &member.user_id == user_id)
                .map(|member| member.display_name().to_string())
        };
        if let Some(name) = name_of(&self.payer_id) {
            self.payer_name = Some(name);
        }
        if let Some(name) = name_of(&self.recipient_id) {
            self.recipient_name = Some(name);
        }
        self
    }

    fn title(&self) -> String {
        let payer = self.payer_name.as_deref().unwrap_or(self.payer_id.as_str());
        let recipient = self
            .recipient_name
            .as_deref()
            .unwrap_or(self.recipient_id.as_str());
        format!("{payer} paid {recipient}")
    }
}

/// The three records of a settlement.
///
/// `expense` carries no payments or splits of its own; use
/// [`Settlement::into_expense`] to get the populated expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    pub expense: Expense,
    pub payment: Payment,
    pub split: Split,
}

impl Settlement {
    pub fn into_expense(self) -> Expense {
        let mut expense = self.expense;
        expense.payments = vec![self.payment];
        expense.splits = vec![self.split];
        expense
    }

    /// Expense, payment and split rows, in write order.
    pub fn into_rows(self) -> ExpenseRows {
        self.into_expense().to_rows()
    }
}

/// Builds the records of `request.payer_id` paying `request.recipient_id`
/// back.
pub fn build_settlement(request: SettlementRequest) -> ResultLedger<Settlement> {
    if request.payer_id == request.recipient_id {
        return Err(LedgerError::InvalidSettlement(
            "payer and recipient must be different members".to_string(),
        ));
    }
    if !request.amount.is_positive() {
        return Err(LedgerError::InvalidSettlement(
            "amount must be > 0".to_string(),
        ));
    }

    let title = request.title();
    let created_at = request.created_at.unwrap_or_else(Utc::now);
    let expense = Expense::new(
        request.group_id,
        title,
        request.amount,
        request.created_by,
        created_at,
    );
    let payment = Payment {
        expense_id: expense.id,
        user_id: request.payer_id,
        paid_amount: request.amount,
    };
    let split = Split {
        expense_id: expense.id,
        user_id: request.recipient_id,
        share: request.amount,
    };

    tracing::debug!(
        expense_id = %expense.id,
        payer = %payment.user_id,
        recipient = %split.user_id,
        amount = %request.amount,
        "built settlement"
    );

    Ok(Settlement {
        expense,
        payment,
        split,
    })
}

/// One settlement request per counterparty the viewer is not settled with.
///
/// A positive balance means the other member pays the viewer, a negative one
/// means the viewer pays. Amounts are the balances rounded to cents, the
/// value the debts screen shows.
pub fn suggest_settlements(
    viewer: &UserId,
    pairwise: &BTreeMap<UserId, Money>,
    group_id: Uuid,
    epsilon: Money,
) -> Vec<SettlementRequest> {
    pairwise
        .iter()
        .filter(|(other, amount)| *other != viewer && !amount.is_settled(epsilon))
        .filter_map(|(other, amount)| {
            let rounded = amount.rounded();
            if rounded.is_positive() {
                Some(SettlementRequest::new(
                    group_id,
                    other.clone(),
                    viewer.clone(),
                    rounded,
                    viewer.clone(),
                ))
            } else if rounded.is_negative() {
                Some(SettlementRequest::new(
                    group_id,
                    viewer.clone(),
                    other.clone(),
                    -rounded,
                    viewer.clone(),
                ))
            } else {
                None
            }
        })
        .collect()
}
