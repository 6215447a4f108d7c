//! Loading of the household expense list.
//!
//! The expenses file is a JSON array of [`ExpenseDraft`]s, amounts written as
//! decimal strings (`"12.50"`). Every draft goes through validation before it
//! reaches the engine; rejected drafts are kept aside so they can be reported.

use std::path::Path;

use engine::{EngineError, Expense, ExpenseDraft};

use crate::error::Result;

#[derive(Debug)]
pub struct Rejected {
    /// Position of the draft in the file (0-based).
    pub index: usize,
    pub title: String,
    pub error: EngineError,
}

#[derive(Debug, Default)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub rejected: Vec<Rejected>,
}

impl Snapshot {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("loading expenses from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let drafts: Vec<ExpenseDraft> = serde_json::from_str(raw)?;
        let mut snapshot = Self::default();

        for (index, draft) in drafts.into_iter().enumerate() {
            let title = draft.title.clone();
            match draft.validate() {
                Ok(expense) => snapshot.expenses.push(expense),
                Err(error) => {
                    tracing::warn!("skipping expense #{index} ({title}): {error}");
                    snapshot.rejected.push(Rejected {
                        index,
                        title,
                        error,
                    });
                }
            }
        }

        Ok(snapshot)
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }
}

#[cfg(test)]
mod tests {
    use engine::{Money, compute_balances};

    use super::*;

    const EXPENSES: &str = r#"[
        {
            "id": "dinner",
            "title": "Dinner",
            "amount": "60",
            "paid_by": "ava",
            "date": "2025-04-26T19:00:00Z",
            "split": "equally",
            "participants": ["ava", "jac"]
        },
        {
            "title": "",
            "amount": "12",
            "paid_by": "jac"
        },
        {
            "id": "cleaning",
            "title": "Cleaning",
            "amount": "40",
            "paid_by": "jac",
            "split": "exactly",
            "participants": ["ava", "jac"],
            "custom_amounts": { "ava": "20", "jac": "20" }
        }
    ]"#;

    #[test]
    fn invalid_drafts_are_set_aside() {
        let snapshot = Snapshot::from_json(EXPENSES).unwrap();

        assert_eq!(snapshot.expenses.len(), 2);
        assert_eq!(snapshot.rejected.len(), 1);
        assert_eq!(snapshot.rejected[0].index, 1);
        assert_eq!(
            snapshot.rejected[0].error,
            EngineError::InvalidExpense("please enter a title".to_string())
        );
    }

    #[test]
    fn loaded_snapshot_computes_balances() {
        let snapshot = Snapshot::from_json(EXPENSES).unwrap();
        let balances = compute_balances(&snapshot.expenses);

        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].debtor, "jac");
        assert_eq!(balances[0].amount, Money::new(1000));
    }

    #[test]
    fn finds_expense_by_id() {
        let snapshot = Snapshot::from_json(EXPENSES).unwrap();
        assert_eq!(
            snapshot.expense("cleaning").map(|e| e.cost),
            Some(Money::new(4000))
        );
        assert!(snapshot.expense("missing").is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(Snapshot::from_json("{").is_err());
    }
}
