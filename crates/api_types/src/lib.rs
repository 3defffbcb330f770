use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A monetary field exactly as it arrives from the backend.
///
/// `numeric` columns come back either as JSON numbers or as strings depending
/// on the client library, and partially filled rows may carry `null`. Any
/// other JSON value lands in `Other` so one malformed field never fails the
/// whole row set. The ledger decides how to interpret each variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        Self::Text(value.to_string())
    }
}

pub mod member {
    use super::*;

    /// A `group_members` row joined with its `profiles` row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MemberRow {
        pub user_id: String,
        #[serde(default)]
        pub name: String,
        #[serde(default)]
        pub avatar_url: Option<String>,
    }
}

pub mod expense {
    use super::*;

    /// An `expenses` row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseRow {
        pub id: Uuid,
        pub group_id: Uuid,
        #[serde(default)]
        pub title: String,
        #[serde(default)]
        pub amount: Option<RawAmount>,
        pub created_by: String,
        pub created_at: DateTime<Utc>,
    }

    /// An `expense_payments` row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PaymentRow {
        pub expense_id: Uuid,
        pub user_id: String,
        #[serde(default)]
        pub paid_amount: Option<RawAmount>,
    }

    /// An `expense_splits` row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SplitRow {
        pub expense_id: Uuid,
        pub user_id: String,
        #[serde(default)]
        pub share: Option<RawAmount>,
    }

    /// Insert body for `expenses`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseInsert {
        pub id: Uuid,
        pub group_id: Uuid,
        pub title: String,
        pub amount: Decimal,
        pub created_by: String,
        pub created_at: DateTime<Utc>,
    }

    /// Insert body for `expense_payments`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PaymentInsert {
        pub expense_id: Uuid,
        pub user_id: String,
        pub paid_amount: Decimal,
    }

    /// Insert body for `expense_splits`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SplitInsert {
        pub expense_id: Uuid,
        pub user_id: String,
        pub share: Decimal,
    }

    /// The rows of one expense, in the order they must be written.
    ///
    /// The expense row goes first, then every payment, then every split. The
    /// persistence side is expected to write them inside a single transaction:
    /// an expense without its payments and splits still shows up in lists but
    /// contributes nothing to any balance.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseRows {
        pub expense: ExpenseInsert,
        pub payments: Vec<PaymentInsert>,
        pub splits: Vec<SplitInsert>,
    }
}

pub mod snapshot {
    use super::*;

    /// Everything the ledger needs for one group, as fetched.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SnapshotRows {
        pub members: Vec<member::MemberRow>,
        pub expenses: Vec<expense::ExpenseRow>,
        pub payments: Vec<expense::PaymentRow>,
        pub splits: Vec<expense::SplitRow>,
    }
}

pub mod balance {
    use super::*;

    /// `{ id, amount }` as rendered by the balance panels.
    ///
    /// Positive means the member is owed money, negative means they owe.
    /// `amount` is rounded to cents and serialized as a decimal string.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct BalanceRecord {
        pub id: String,
        pub amount: Decimal,
    }

    /// One edge of the viewer's relationship graph.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct PairwiseRecord {
        pub viewer_id: String,
        pub other_id: String,
        /// Positive: `other_id` owes the viewer.
        pub amount: Decimal,
        /// `true` when `|amount|` is below the display epsilon.
        pub settled: bool,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MemberTotals {
        pub id: String,
        pub paid: Decimal,
        pub owed: Decimal,
        pub net: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct GroupSummary {
        /// Sum of shared expenses, settlements excluded.
        pub total_spent: Decimal,
        pub members: Vec<MemberTotals>,
        /// Expenses whose payments or splits do not add up to their amount.
        pub unreconciled: Vec<Uuid>,
    }
}
