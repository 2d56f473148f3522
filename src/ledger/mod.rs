//! Ledger domain models, persistence-friendly types, and helpers.

pub mod budget;
pub mod category;
pub mod period;
pub mod recurring;
pub mod schedule;
pub mod transaction;

pub use budget::BudgetLedger;
pub use category::{Category, CategoryFlags, CategoryRegistry};
pub use period::{MonthKey, ReportingPeriod};
pub use recurring::RecurringTransaction;
pub use schedule::Frequency;
pub use transaction::{Transaction, TransactionKind, DEFAULT_CURRENCY};

/// Identity of a category within one user scope.
pub type CategoryId = i64;
/// Identity of a ledger transaction.
pub type TransactionId = i64;
/// Identity of a recurring-transaction definition.
pub type RecurringId = i64;
/// Identity of a user account.
pub type AccountId = i64;
/// Identity of a payee.
pub type PayeeId = i64;
