#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use ledger::{Expense, Member, Money, UserId};
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn group_id() -> Uuid {
    Uuid::from_u128(0x5f1b_0000_0000_4000_8000_0000_0000_0001)
}

pub fn id(name: &str) -> UserId {
    UserId::from(name)
}

pub fn money(value: Decimal) -> Money {
    Money::new(value)
}

pub fn members(names: &[&str]) -> Vec<Member> {
    names
        .iter()
        .map(|name| Member::new(*name, name.to_uppercase()))
        .collect()
}

/// An expense of `amount` with the given payments and splits.
pub fn expense(amount: Decimal, payments: &[(&str, Decimal)], splits: &[(&str, Decimal)]) -> Expense {
    let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let mut expense = Expense::new(group_id(), "Shared", Money::new(amount), id("alice"), created_at);
    for (user, paid) in payments {
        expense = expense.paid_by(*user, Money::new(*paid));
    }
    for (user, share) in splits {
        expense = expense.owed_by(*user, Money::new(*share));
    }
    expense
}
