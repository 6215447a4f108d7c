//! Netting of pairwise debts into balances.
//!
//! Debts between the same two roommates cancel out: whatever flows in both
//! directions is reduced to a single directed [`Balance`] per pair, or to
//! nothing when the pair is even.

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{Currency, Debt, Expense, Money, derive_all_debts};

/// Netted amount `debtor` owes `creditor` across every expense.
///
/// `amount` is always strictly positive and `debtor != creditor`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub debtor: String,
    pub creditor: String,
    pub amount: Money,
}

impl Balance {
    /// Human readable settlement line, e.g. `"jac owes ava $10.00"`.
    pub fn describe(&self, currency: Currency) -> String {
        format!(
            "{} owes {} {}",
            self.debtor,
            self.creditor,
            currency.format(self.amount)
        )
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} owes {} {}", self.debtor, self.creditor, self.amount)
    }
}

impl From<Balance> for Debt {
    /// A balance fed back as a debt. It has no originating expense.
    fn from(balance: Balance) -> Self {
        Debt::new(balance.debtor, balance.creditor, balance.amount, String::new())
    }
}

/// Directed `(debtor, creditor)` pair, borrowed from the debts being netted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PairKey<'a> {
    debtor: &'a str,
    creditor: &'a str,
}

impl<'a> PairKey<'a> {
    fn of(debt: &'a Debt) -> Self {
        Self {
            debtor: &debt.debtor,
            creditor: &debt.creditor,
        }
    }

    fn reversed(self) -> Self {
        Self {
            debtor: self.creditor,
            creditor: self.debtor,
        }
    }
}

/// Collapses `debts` into at most one [`Balance`] per pair of roommates.
///
/// Each debt first pays down an open amount owed the other way; if it
/// exceeds it, the direction flips. Pairs that end even are dropped.
/// Output is sorted by `(debtor, creditor)`.
///
/// Debts owed to oneself or with a non-positive amount are ignored.
pub fn net_debts(debts: &[Debt]) -> Vec<Balance> {
    let mut ledger: BTreeMap<PairKey<'_>, Money> = BTreeMap::new();

    for debt in debts {
        if debt.debtor == debt.creditor || !debt.amount.is_positive() {
            tracing::trace!(
                debtor = %debt.debtor,
                creditor = %debt.creditor,
                amount = %debt.amount,
                "ignoring debt"
            );
            continue;
        }

        let forward = PairKey::of(debt);
        if let Some(open) = ledger
            .get_mut(&forward.reversed())
            .filter(|open| !open.is_zero())
        {
            *open -= debt.amount;
            if open.is_negative() {
                let flipped = -*open;
                *open = Money::ZERO;
                ledger.insert(forward, flipped);
            }
            continue;
        }

        *ledger.entry(forward).or_default() += debt.amount;
    }

    ledger
        .into_iter()
        .filter(|(_, amount)| amount.is_positive())
        .map(|(pair, amount)| Balance {
            debtor: pair.debtor.to_string(),
            creditor: pair.creditor.to_string(),
            amount,
        })
        .collect()
}

/// Derives and nets the debts of a full snapshot of expenses.
pub fn compute_balances(expenses: &[Expense]) -> Vec<Balance> {
    let debts = derive_all_debts(expenses);
    let balances = net_debts(&debts);
    tracing::debug!(
        expenses = expenses.len(),
        debts = debts.len(),
        balances = balances.len(),
        "balances computed"
    );
    balances
}
