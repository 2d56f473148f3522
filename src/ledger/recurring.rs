use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::schedule::Frequency;
use super::transaction::DEFAULT_CURRENCY;
use super::{AccountId, CategoryId, PayeeId, RecurringId};

/// A template that generates dated ledger entries on a fixed cadence until
/// deactivated or expired.
///
/// `next_due` is the materialization cursor: the first occurrence on the
/// cadence that has not yet been turned into a concrete transaction. The
/// scheduler advances it past every occurrence it hands out, which is what
/// makes re-invocation idempotent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringTransaction {
    pub id: RecurringId,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    /// Open-ended when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<PayeeId>,
    pub account_id: AccountId,
    pub next_due: NaiveDate,
}

impl RecurringTransaction {
    pub fn new(
        id: RecurringId,
        description: impl Into<String>,
        amount: Decimal,
        frequency: Frequency,
        start_date: NaiveDate,
        account_id: AccountId,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            frequency,
            start_date,
            end_date: None,
            is_active: true,
            category_id: None,
            payee_id: None,
            account_id,
            next_due: start_date,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Stops future occurrences. Already-materialized transactions are never
    /// touched by deactivation.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Whether `date` falls within the definition's activation window.
    pub fn within_window(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }
}
