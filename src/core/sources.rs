//! Interfaces the core consumes from external collaborators.
//!
//! Persistence technology is out of scope here; the engine only requires
//! that a `BudgetSource` implementation keeps per-category updates
//! linearizable and that recurring materialization treats "advance cursor +
//! insert transaction" as one atomic unit (or deduplicates on
//! `(recurring_id, occurrence_date)`).

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::LedgerResult;
use crate::ledger::{
    AccountId, Category, CategoryId, CategoryRegistry, RecurringId, RecurringTransaction,
    ReportingPeriod, Transaction, TransactionKind,
};

/// Supplies the canonical category lists.
pub trait CategorySource {
    fn list_active(&self) -> Vec<Category>;
    fn list_archived(&self) -> Vec<Category>;
}

impl CategorySource for CategoryRegistry {
    fn list_active(&self) -> Vec<Category> {
        CategoryRegistry::list_active(self)
    }

    fn list_archived(&self) -> Vec<Category> {
        CategoryRegistry::list_archived(self)
    }
}

/// Narrowing criteria for a transaction query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    pub category_id: Option<CategoryId>,
    pub account_id: Option<AccountId>,
}

/// The external ledger store that persists transactions.
pub trait TransactionSource {
    fn query(&self, period: &ReportingPeriod, filter: &TransactionFilter) -> Vec<Transaction>;

    /// Whether any persisted transaction still references the category.
    fn references_category(&self, category_id: CategoryId) -> bool;
}

/// The budget persistence collaborator.
pub trait BudgetSource {
    fn get(&self, category_id: CategoryId) -> Option<Decimal>;
    fn set(&mut self, category_id: CategoryId, amount: Decimal) -> LedgerResult<()>;
}

impl BudgetSource for crate::ledger::BudgetLedger {
    fn get(&self, category_id: CategoryId) -> Option<Decimal> {
        crate::ledger::BudgetLedger::get(self, category_id)
    }

    fn set(&mut self, category_id: CategoryId, amount: Decimal) -> LedgerResult<()> {
        crate::ledger::BudgetLedger::set(self, category_id, amount)
    }
}

/// The recurring-definition store.
pub trait RecurringStore {
    fn list_active(&self) -> Vec<RecurringTransaction>;

    /// Persists one occurrence as a concrete transaction and advances the
    /// definition's cursor past it, atomically.
    fn materialize(
        &mut self,
        recurring_id: RecurringId,
        occurrence: NaiveDate,
    ) -> LedgerResult<Transaction>;
}
