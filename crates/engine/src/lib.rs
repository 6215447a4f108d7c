//! Expense splitting and debt settlement for a shared household.
//!
//! The engine is a pure function of a snapshot of expenses:
//!
//! 1. [`derive_debts`] expands each [`Expense`] into the [`Debt`]s its split
//!    implies (everyone owes the payer their share);
//! 2. [`net_debts`] cancels debts flowing in opposite directions and keeps a
//!    single [`Balance`] per pair of roommates.
//!
//! [`compute_balances`] chains the two. Nothing here performs I/O or keeps
//! state between calls; re-run it whenever the expense list changes.
//!
//! ```rust
//! use chrono::Utc;
//! use engine::{Expense, Money, Split, compute_balances};
//!
//! let dinner = Expense {
//!     id: "dinner".to_string(),
//!     title: "Dinner".to_string(),
//!     cost: "60".parse::<Money>().unwrap(),
//!     paid_by: "ava".to_string(),
//!     date: Utc::now(),
//!     split: Some(Split::Equally),
//!     participants: vec!["ava".to_string(), "jac".to_string()],
//!     custom_amounts: None,
//! };
//!
//! let balances = compute_balances(&[dinner]);
//! assert_eq!(balances[0].to_string(), "jac owes ava 30.00");
//! ```

pub use balances::{Balance, compute_balances, net_debts};
pub use currency::Currency;
pub use debts::{Debt, derive_all_debts, derive_debts};
pub use error::EngineError;
pub use expense::{EXACT_SPLIT_TOLERANCE, Expense, ExpenseDraft, Split, sort_newest_first};
pub use money::Money;

mod balances;
mod currency;
mod debts;
mod error;
mod expense;
mod money;

type ResultEngine<T> = Result<T, EngineError>;
