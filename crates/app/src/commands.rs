//! One function per subcommand. Each takes already parsed input and returns
//! the value printed as JSON, so they can be exercised without touching the
//! filesystem.

use std::{fs, path::Path};

use api_types::{
    balance::{BalanceRecord, GroupSummary, PairwiseRecord},
    expense::ExpenseRows,
    snapshot::SnapshotRows,
};
use ledger::{
    LedgerSnapshot, Money, SettlementRequest, SplitPolicy, UserId, balance_records,
    build_settlement, pairwise_records, split, suggest_settlements,
};
use uuid::Uuid;

use crate::error::Result;

pub fn load_snapshot(path: &Path) -> Result<LedgerSnapshot> {
    let raw = fs::read_to_string(path)?;
    let rows: SnapshotRows = serde_json::from_str(&raw)?;
    tracing::info!(path = %path.display(), "loaded snapshot");
    Ok(LedgerSnapshot::from_rows(rows))
}

pub fn balances(snapshot: &LedgerSnapshot) -> Vec<BalanceRecord> {
    balance_records(&snapshot.net_balances())
}

pub fn pairwise(snapshot: &LedgerSnapshot, viewer: &UserId, epsilon: Money) -> Vec<PairwiseRecord> {
    let balances = snapshot.pairwise_balances(viewer);
    pairwise_records(viewer, &balances)
        .iter()
        .map(|balance| balance.to_record(epsilon))
        .collect()
}

pub fn summary(snapshot: &LedgerSnapshot) -> GroupSummary {
    snapshot.summary().to_record()
}

pub fn split_amount(amount: Money, participants: &[UserId], policy: SplitPolicy) -> Vec<BalanceRecord> {
    balance_records(&split(policy, amount, participants))
}

pub fn settle(request: SettlementRequest, snapshot: Option<&LedgerSnapshot>) -> Result<ExpenseRows> {
    let request = match snapshot {
        Some(snapshot) => request.names_from(&snapshot.members),
        None => request,
    };
    Ok(build_settlement(request)?.into_rows())
}

pub fn settle_up(
    snapshot: &LedgerSnapshot,
    viewer: &UserId,
    group_id: Uuid,
    epsilon: Money,
) -> Result<Vec<ExpenseRows>> {
    let balances = snapshot.pairwise_balances(viewer);
    suggest_settlements(viewer, &balances, group_id, epsilon)
        .into_iter()
        .map(|request| settle(request, Some(snapshot)))
        .collect()
}
