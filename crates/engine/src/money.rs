use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Signed money amount represented as integer **minor units** (cents).
///
/// Every cost, share, debt and balance in the engine is a `Money`, so
/// splitting and netting never accumulate floating-point residue.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.minor(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more than 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("90".parse::<Money>().unwrap().minor(), 9000);
/// assert_eq!("12,5".parse::<Money>().unwrap().minor(), 1250);
/// assert!("1.005".parse::<Money>().is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from minor units.
    #[must_use]
    pub const fn new(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub const fn checked_add(self, rhs: Money) -> Option<Money> {
        match self.0.checked_add(rhs.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        match self.0.checked_sub(rhs.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Splits the amount into `parts` shares that add up exactly to `self`.
    ///
    /// Each share is `self / parts`; the leftover minor units go one each to
    /// the first shares, so `100` over 3 yields `[34, 33, 33]`. Returns an
    /// empty vector when `parts` is 0.
    #[must_use]
    pub fn split_evenly(self, parts: usize) -> Vec<Money> {
        let Ok(divisor) = i64::try_from(parts) else {
            return Vec::new();
        };
        if divisor == 0 {
            return Vec::new();
        }

        let base = self.0 / divisor;
        let leftover = self.0 % divisor;
        let step = leftover.signum();
        let extra = usize::try_from(leftover.unsigned_abs()).unwrap_or(parts);

        (0..parts)
            .map(|index| {
                if index < extra {
                    Money(base + step)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

// Operators saturate at the `i64` bounds so that summing and netting never
// panic. Use `checked_add`/`checked_sub` where overflow must be reported.
impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(self.0.saturating_neg())
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
    type Err = EngineError;

    /// Parses a decimal string into minor units.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    /// At most 2 fractional digits are allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| EngineError::InvalidAmount(reason.to_string());

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, trimmed[1..].trim_start()),
            Some(b'+') => (false, trimmed[1..].trim_start()),
            _ => (false, trimmed),
        };
        if unsigned.is_empty() {
            return Err(invalid("empty amount"));
        }

        let normalized = unsigned.replace(',', ".");
        let (whole, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (normalized.as_str(), ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid("invalid amount"));
        }

        let fraction_minor: i64 = match fraction.len() {
            0 => 0,
            1 => i64::from(fraction.as_bytes()[0] - b'0') * 10,
            2 => fraction.parse().map_err(|_| invalid("invalid amount"))?,
            _ => return Err(invalid("too many decimals")),
        };

        let whole_units: i64 = whole.parse().map_err(|_| invalid("amount too large"))?;
        let minor = whole_units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction_minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -minor } else { minor }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_minor_units() {
        assert_eq!(Money::new(0).to_string(), "0.00");
        assert_eq!(Money::new(7).to_string(), "0.07");
        assert_eq!(Money::new(3000).to_string(), "30.00");
        assert_eq!(Money::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn parse_accepts_dot_or_comma() {
        assert_eq!("60".parse::<Money>().unwrap().minor(), 6000);
        assert_eq!("12.5".parse::<Money>().unwrap().minor(), 1250);
        assert_eq!("12,50".parse::<Money>().unwrap().minor(), 1250);
        assert_eq!("-0.01".parse::<Money>().unwrap().minor(), -1);
        assert_eq!("+1.00".parse::<Money>().unwrap().minor(), 100);
        assert_eq!("  2.30 ".parse::<Money>().unwrap().minor(), 230);
        assert_eq!("4.".parse::<Money>().unwrap().minor(), 400);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("-".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("12.345".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn split_evenly_hands_out_leftover_minor_units_first() {
        let shares = Money::new(10_000).split_evenly(3);
        assert_eq!(shares, vec![Money::new(3334), Money::new(3333), Money::new(3333)]);
        assert_eq!(shares.iter().sum::<Money>(), Money::new(10_000));

        assert_eq!(Money::new(9000).split_evenly(3), vec![Money::new(3000); 3]);
        assert!(Money::new(9000).split_evenly(0).is_empty());
    }

    #[test]
    fn operators_saturate_instead_of_overflowing() {
        let max = Money::new(i64::MAX);
        let min = Money::new(i64::MIN);

        assert_eq!(max + max, max);
        assert_eq!(min - max, min);
        assert_eq!(-min, max);
        assert_eq!(min.abs(), max);
        assert_eq!([max, max, Money::new(1)].iter().sum::<Money>(), max);

        let mut total = max;
        total += Money::new(1);
        assert_eq!(total, max);
        total = min;
        total -= Money::new(1);
        assert_eq!(total, min);
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let max = Money::new(i64::MAX);
        assert_eq!(max.checked_add(Money::new(1)), None);
        assert_eq!(Money::new(i64::MIN).checked_sub(Money::new(1)), None);
        assert_eq!(
            Money::new(250).checked_add(Money::new(50)),
            Some(Money::new(300))
        );
        assert_eq!(
            Money::new(250).checked_sub(Money::new(300)),
            Some(Money::new(-50))
        );
    }

    #[test]
    fn split_evenly_keeps_sign_of_negative_amounts() {
        let shares = Money::new(-100).split_evenly(3);
        assert_eq!(shares, vec![Money::new(-34), Money::new(-33), Money::new(-33)]);
    }
}
