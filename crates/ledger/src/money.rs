use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// Fraction digits shown to users and written back to the backend.
pub const PRESENTATION_DIGITS: u32 = 2;

/// Signed money amount backed by a fixed-point decimal.
///
/// Every amount in the ledger (expense totals, payments, splits, balances)
/// uses this type so sums never pick up binary floating-point drift.
/// Arithmetic is exact; rounding to cents only happens through
/// [`Money::rounded`] and `Display`.
///
/// The `+`/`-` operators panic past `Decimal::MAX` (about 7.9e28), like
/// `Decimal`'s own. Use [`Money::checked_add`] and [`Money::checked_sub`]
/// where that range is not guaranteed.
///
/// The value is signed. In balances:
/// - positive = the member is owed money
/// - negative = the member owes money
///
/// # Examples
///
/// ```rust
/// use ledger::Money;
/// use rust_decimal::Decimal;
///
/// let amount = Money::new(Decimal::new(12_34, 2));
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use ledger::Money;
///
/// assert_eq!("10,5".parse::<Money>().unwrap(), Money::from_cents(1050));
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// Smallest amount shown as non-zero: one cent.
    pub const CENT: Money = Money(Decimal::from_parts(1, 0, 0, false, 2));

    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, PRESENTATION_DIGITS))
    }

    /// Returns the underlying decimal, unrounded.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Rounds to cents, half away from zero.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(PRESENTATION_DIGITS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Rounds to cents toward zero.
    #[must_use]
    pub fn truncated(self) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(PRESENTATION_DIGITS, RoundingStrategy::ToZero),
        )
    }

    /// `true` when the amount is too small to show as a debt.
    ///
    /// This is a display test only: balances keep their exact value.
    #[must_use]
    pub fn is_settled(self, epsilon: Money) -> bool {
        self.0.abs() < epsilon.0
    }

    /// `self * part / whole`, or `None` when `whole` is zero or the result
    /// does not fit.
    ///
    /// Multiplies first for precision. When `self * part` overflows, the
    /// ratio `part / whole` is taken first instead.
    #[must_use]
    pub fn pro_rata(self, part: Money, whole: Money) -> Option<Money> {
        if whole.is_zero() {
            return None;
        }
        self.0
            .checked_mul(part.0)
            .and_then(|scaled| scaled.checked_div(whole.0))
            .or_else(|| {
                part.0
                    .checked_div(whole.0)
                    .and_then(|ratio| self.0.checked_mul(ratio))
            })
            .map(Money)
    }

    /// Checked addition, `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction, `None` on overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Divides into `parts` equal pieces, unrounded.
    #[must_use]
    pub fn divide(self, parts: usize) -> Option<Money> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts)).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rounded = self.rounded().0;
        if rounded.is_zero() {
            rounded = Decimal::ZERO;
        }
        write!(f, "{rounded:.2}")
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = LedgerError;

    /// Parses a decimal string typed by a user.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::InvalidAmount("empty amount".to_string()));
        }

        let unsigned = trimmed.trim_start_matches(['+', '-']);
        if unsigned.is_empty()
            || !unsigned
                .chars()
                .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return Err(LedgerError::InvalidAmount("invalid amount".to_string()));
        }

        let normalized = trimmed.replace(',', ".");
        let value = Decimal::from_str(&normalized)
            .map_err(|_| LedgerError::InvalidAmount("invalid amount".to_string()))?;
        if value.scale() > PRESENTATION_DIGITS {
            return Err(LedgerError::InvalidAmount("too many decimals".to_string()));
        }

        Ok(Money(value))
    }
}
