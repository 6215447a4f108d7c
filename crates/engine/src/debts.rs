//! Pairwise debts implied by single expenses.
//!
//! A [`Debt`] says that `debtor` owes `creditor` an amount because of one
//! expense. Debts are transient: they are derived from expenses and handed
//! straight to [`net_debts`](crate::net_debts).

use serde::{Deserialize, Serialize};

use crate::{Expense, Money, Split};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub debtor: String,
    pub creditor: String,
    pub amount: Money,
    /// Expense this debt comes from, kept for traceability only.
    pub expense_id: String,
}

impl Debt {
    pub fn new(
        debtor: impl Into<String>,
        creditor: impl Into<String>,
        amount: Money,
        expense_id: impl Into<String>,
    ) -> Self {
        Self {
            debtor: debtor.into(),
            creditor: creditor.into(),
            amount,
            expense_id: expense_id.into(),
        }
    }
}

/// Expands one expense into the debts it implies, all owed to the payer.
///
/// The payer never owes themself, and shares that are not strictly positive
/// produce no debt. An expense without a split, an equal split without
/// participants and an exact split without custom amounts yield nothing.
pub fn derive_debts(expense: &Expense) -> Vec<Debt> {
    let owed_to_payer = |debtor: &str, amount: Money| {
        (debtor != expense.paid_by && amount.is_positive())
            .then(|| Debt::new(debtor, expense.paid_by.as_str(), amount, expense.id.as_str()))
    };

    match expense.split {
        None => {
            tracing::debug!(expense = %expense.id, "expense has no split, skipping");
            Vec::new()
        }
        Some(Split::Equally) => {
            if expense.participants.is_empty() {
                tracing::debug!(expense = %expense.id, "equal split without participants");
            }
            expense
                .shares()
                .into_iter()
                .filter_map(|(participant, share)| owed_to_payer(participant, share))
                .collect()
        }
        Some(Split::Exactly) => {
            let Some(amounts) = expense.custom_amounts.as_ref() else {
                tracing::debug!(expense = %expense.id, "exact split without custom amounts");
                return Vec::new();
            };
            amounts
                .iter()
                .filter_map(|(participant, amount)| owed_to_payer(participant.as_str(), *amount))
                .collect()
        }
    }
}

/// Derives the debts of every expense, in expense order.
pub fn derive_all_debts(expenses: &[Expense]) -> Vec<Debt> {
    expenses.iter().flat_map(derive_debts).collect()
}
