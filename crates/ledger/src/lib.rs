//! SpliBiz ledger engine.
//!
//! Pure computations over a group's expenses, shared by every screen that
//! shows money:
//!
//! - [`compute_net_balances`]: total paid minus total owed, per member.
//! - [`compute_pairwise_balances`]: who owes whom, from one member's view.
//! - [`build_settlement`]: the records of a direct repayment.
//! - [`split_equally`]: shares of a new expense.
//!
//! Nothing here performs I/O or keeps state between calls. Callers fetch the
//! rows, hand them over (see [`LedgerSnapshot::from_rows`]) and persist the
//! records the ledger builds.

pub use balances::{balance_records, compute_net_balances};
pub use error::LedgerError;
pub use model::{Expense, Member, Payment, Reconciliation, Split, UserId};
pub use money::Money;
pub use pairwise::{PairwiseBalance, compute_pairwise_balances, pairwise_records};
pub use settlement::{Settlement, SettlementRequest, build_settlement, suggest_settlements};
pub use snapshot::{LedgerSnapshot, lenient_amount};
pub use split::{ExpenseDraft, SplitPolicy, split, split_equally};
pub use summary::{GroupSummary, MemberTotals, summarize};

mod balances;
mod error;
mod model;
mod money;
mod pairwise;
mod settlement;
mod snapshot;
mod split;
mod summary;

type ResultLedger<T> = Result<T, LedgerError>;
