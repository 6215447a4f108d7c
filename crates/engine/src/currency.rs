use serde::{Deserialize, Serialize};

use crate::{EngineError, Money};

/// ISO-like currency code used to present money values.
///
/// The engine is currency-agnostic: every amount of a household shares the
/// same currency, which only matters when formatting for display.
///
/// ## Minor units
///
/// Amounts are stored as an `i64` number of **minor units** (see [`Money`]).
/// Both supported currencies use 2 fraction digits, so `12.50` ⇄ `1250`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// Formats `amount` the way it is shown to roommates.
    ///
    /// ```rust
    /// use engine::{Currency, Money};
    ///
    /// assert_eq!(Currency::Usd.format(Money::new(1250)), "$12.50");
    /// assert_eq!(Currency::Eur.format(Money::new(-5)), "-0.05€");
    /// ```
    #[must_use]
    pub fn format(self, amount: Money) -> String {
        match self {
            Currency::Usd => {
                let sign = if amount.is_negative() { "-" } else { "" };
                format!("{sign}{}{}", self.symbol(), amount.abs())
            }
            Currency::Eur => format!("{amount}{}", self.symbol()),
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for Currency {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(EngineError::UnsupportedCurrency(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes_case_insensitively() {
        assert_eq!(Currency::try_from("usd"), Ok(Currency::Usd));
        assert_eq!(Currency::try_from(" Eur "), Ok(Currency::Eur));
        assert_eq!(
            Currency::try_from("gbp"),
            Err(EngineError::UnsupportedCurrency("GBP".to_string()))
        );
    }

    #[test]
    fn formats_with_symbol() {
        assert_eq!(Currency::Usd.format(Money::new(3000)), "$30.00");
        assert_eq!(Currency::Usd.format(Money::new(-1)), "-$0.01");
        assert_eq!(Currency::Eur.format(Money::new(1050)), "10.50€");
    }
}
