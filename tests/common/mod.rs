#![allow(dead_code)]

use chrono::NaiveDate;
use rust_decimal::Decimal;

use reconcile_core::core::services::RecurringService;
use reconcile_core::core::sources::{RecurringStore, TransactionFilter, TransactionSource};
use reconcile_core::errors::{LedgerError, LedgerResult};
use reconcile_core::ledger::{
    Category, CategoryFlags, CategoryId, RecurringId, RecurringTransaction, ReportingPeriod,
    Transaction, TransactionId, TransactionKind,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal literal")
}

pub fn category(id: CategoryId, name: &str, flags: CategoryFlags, order: i64) -> Category {
    Category::new(id, name, flags, order)
}

pub fn expense_flags() -> CategoryFlags {
    CategoryFlags::default()
}

pub fn income_flags() -> CategoryFlags {
    CategoryFlags {
        is_income: true,
        ..CategoryFlags::default()
    }
}

pub fn transaction(
    id: TransactionId,
    date: NaiveDate,
    amount: &str,
    kind: TransactionKind,
    category_id: Option<CategoryId>,
) -> Transaction {
    let mut txn = Transaction::new(id, 1, date, dec(amount), kind);
    txn.category_id = category_id;
    txn
}

/// In-memory stand-in for the external ledger store.
#[derive(Default)]
pub struct InMemoryLedger {
    pub transactions: Vec<Transaction>,
}

impl TransactionSource for InMemoryLedger {
    fn query(&self, period: &ReportingPeriod, filter: &TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .filter(|t| filter.kind.map_or(true, |kind| t.kind == kind))
            .filter(|t| {
                filter
                    .category_id
                    .map_or(true, |id| t.category_id == Some(id))
            })
            .filter(|t| filter.account_id.map_or(true, |id| t.account_id == id))
            .cloned()
            .collect()
    }

    fn references_category(&self, category_id: CategoryId) -> bool {
        self.transactions
            .iter()
            .any(|t| t.category_id == Some(category_id))
    }
}

/// In-memory recurring store that treats "advance cursor + insert" as one
/// unit and deduplicates on `(recurring_id, occurrence_date)`.
#[derive(Default)]
pub struct InMemoryRecurringStore {
    pub definitions: Vec<RecurringTransaction>,
    pub materialized: Vec<Transaction>,
    next_txn_id: TransactionId,
}

impl InMemoryRecurringStore {
    pub fn with_definitions(definitions: Vec<RecurringTransaction>) -> Self {
        Self {
            definitions,
            materialized: Vec::new(),
            next_txn_id: 1,
        }
    }
}

impl RecurringStore for InMemoryRecurringStore {
    fn list_active(&self) -> Vec<RecurringTransaction> {
        self.definitions
            .iter()
            .filter(|r| r.is_active)
            .cloned()
            .collect()
    }

    fn materialize(
        &mut self,
        recurring_id: RecurringId,
        occurrence: NaiveDate,
    ) -> LedgerResult<Transaction> {
        let duplicate = self
            .materialized
            .iter()
            .any(|t| t.recurring_id == Some(recurring_id) && t.date == occurrence);
        if duplicate {
            return Err(LedgerError::Conflict(format!(
                "occurrence {occurrence} of recurring {recurring_id} already materialized"
            )));
        }
        let definition = self
            .definitions
            .iter_mut()
            .find(|r| r.id == recurring_id)
            .ok_or_else(|| LedgerError::NotFound(format!("recurring {recurring_id}")))?;
        let id = self.next_txn_id;
        self.next_txn_id += 1;
        let txn = RecurringService::materialize(definition, id, occurrence);
        self.materialized.push(txn.clone());
        Ok(txn)
    }
}
