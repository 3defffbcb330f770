//! The module contains the errors the ledger can return.
//!
//! - [`InvalidSettlement`] when a settlement would pay oneself or a
//!   non-positive amount.
//! - [`InvalidExpense`] when a new expense draft is incomplete.
//! - [`InvalidAmount`] when a strict amount parse fails.
//!
//! Balance computations never fail: malformed amounts in fetched rows are
//! read as zero instead (see [`LedgerSnapshot`]).
//!
//!  [`InvalidSettlement`]: LedgerError::InvalidSettlement
//!  [`InvalidExpense`]: LedgerError::InvalidExpense
//!  [`InvalidAmount`]: LedgerError::InvalidAmount
//!  [`LedgerSnapshot`]: crate::LedgerSnapshot
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid settlement: {0}")]
    InvalidSettlement(String),
    #[error("Invalid expense: {0}")]
    InvalidExpense(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
