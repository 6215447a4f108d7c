//! Shared expenses.
//!
//! An [`Expense`] is one cost fronted by a single roommate (`paid_by`) and
//! shared by a list of participants according to a [`Split`] policy.
//!
//! Expenses reaching the engine are trusted as-is: an inconsistent expense
//! simply contributes fewer (or surprising) debts. Checks on user input live
//! in [`ExpenseDraft::validate`], which is meant to run at data entry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Money, ResultEngine};

/// How the cost of an expense is divided among its participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Split {
    /// Every listed participant owes the same share.
    Equally,
    /// Each participant owes the amount recorded in `custom_amounts`.
    Exactly,
}

impl Split {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equally => "equally",
            Self::Exactly => "exactly",
        }
    }
}

impl TryFrom<&str> for Split {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "equally" => Ok(Self::Equally),
            "exactly" => Ok(Self::Exactly),
            other => Err(EngineError::InvalidExpense(format!(
                "invalid split: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub cost: Money,
    pub paid_by: String,
    pub date: DateTime<Utc>,
    /// `None` means no split was recorded: the expense contributes no debts.
    pub split: Option<Split>,
    #[serde(default)]
    pub participants: Vec<String>,
    /// Exact share per participant, only meaningful for [`Split::Exactly`].
    #[serde(default)]
    pub custom_amounts: Option<BTreeMap<String, Money>>,
}

impl Expense {
    /// Per-participant breakdown of the cost, in participant order.
    ///
    /// - `Equally`: `cost` spread over the participants, leftover minor units
    ///   going to the first ones (see [`Money::split_evenly`]).
    /// - `Exactly`: each participant's custom amount, or zero when none was
    ///   recorded for them.
    /// - no split: empty.
    ///
    /// The payer is included like anyone else.
    pub fn shares(&self) -> Vec<(&str, Money)> {
        match self.split {
            None => Vec::new(),
            Some(Split::Equally) => self
                .participants
                .iter()
                .map(String::as_str)
                .zip(self.cost.split_evenly(self.participants.len()))
                .collect(),
            Some(Split::Exactly) => self
                .participants
                .iter()
                .map(|participant| {
                    let amount = self
                        .custom_amounts
                        .as_ref()
                        .and_then(|amounts| amounts.get(participant))
                        .copied()
                        .unwrap_or_default();
                    (participant.as_str(), amount)
                })
                .collect(),
        }
    }
}

/// Orders expenses by date, most recent first.
pub fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Raw user input for a new expense, before validation.
///
/// Amounts are kept as typed so that [`ExpenseDraft::validate`] can report
/// the same problems the entry form does.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub amount: String,
    pub paid_by: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub split: Option<Split>,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub custom_amounts: BTreeMap<String, String>,
}

/// Largest gap between the custom amounts total and the cost still accepted.
pub const EXACT_SPLIT_TOLERANCE: Money = Money::new(1);

impl ExpenseDraft {
    /// Turns the draft into an [`Expense`], or explains what is wrong with it.
    ///
    /// Custom amounts that do not parse count as zero. A missing id gets a
    /// fresh UUID and a missing date becomes "now".
    pub fn validate(self) -> ResultEngine<Expense> {
        let rejected = |reason: &str| EngineError::InvalidExpense(reason.to_string());

        let title = self.title.trim();
        if title.is_empty() {
            return Err(rejected("please enter a title"));
        }

        let cost = self
            .amount
            .parse::<Money>()
            .ok()
            .filter(|cost| !cost.is_negative())
            .ok_or_else(|| rejected("please enter a valid amount"))?;

        let paid_by = self.paid_by.trim();
        if paid_by.is_empty() {
            return Err(rejected("please enter who paid"));
        }

        let custom_amounts = match self.split {
            Some(Split::Equally) => {
                if self.participants.is_empty() {
                    return Err(rejected("please select who shares this expense"));
                }
                None
            }
            Some(Split::Exactly) => {
                let amounts: BTreeMap<String, Money> = self
                    .custom_amounts
                    .iter()
                    .map(|(participant, raw)| {
                        (participant.clone(), raw.parse::<Money>().unwrap_or_default())
                    })
                    .collect();
                let too_large = || rejected("custom amounts are too large");
                let total = amounts
                    .values()
                    .try_fold(Money::ZERO, |total, amount| total.checked_add(*amount))
                    .ok_or_else(too_large)?;
                let gap = total.checked_sub(cost).ok_or_else(too_large)?;
                if gap.abs() > EXACT_SPLIT_TOLERANCE {
                    return Err(EngineError::InvalidExpense(format!(
                        "custom amounts add up to {total}, expected {cost}"
                    )));
                }
                Some(amounts)
            }
            None => None,
        };

        Ok(Expense {
            id: self.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: title.to_string(),
            cost,
            paid_by: paid_by.to_string(),
            date: self.date.unwrap_or_else(Utc::now),
            split: self.split,
            participants: self.participants,
            custom_amounts,
        })
    }
}
