use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, CategoryId, PayeeId, RecurringId, TransactionId};
use crate::errors::{LedgerError, LedgerResult};

/// Fixed default ISO currency code for single-currency ledgers.
pub const DEFAULT_CURRENCY: &str = "EUR";

/// A single signed ledger movement in one currency.
///
/// The sign of `amount` is authoritative for totals: negative is an outflow,
/// positive an inflow, regardless of `kind`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<PayeeId>,
    /// Counterpart account, present exactly when `kind` is `Transfer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_account_id: Option<AccountId>,
    /// Back-reference to the recurring definition this entry materializes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_id: Option<RecurringId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Transaction {
    pub fn new(
        id: TransactionId,
        account_id: AccountId,
        date: NaiveDate,
        amount: Decimal,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id,
            description: String::new(),
            amount,
            currency: DEFAULT_CURRENCY.to_string(),
            date,
            kind,
            account_id,
            category_id: None,
            payee_id: None,
            transfer_account_id: None,
            recurring_id: None,
            notes: None,
        }
    }

    /// Checks the transfer invariant: `transfer_account_id` is set iff the
    /// transaction is a transfer.
    pub fn validate(&self) -> LedgerResult<()> {
        match (self.kind, self.transfer_account_id) {
            (TransactionKind::Transfer, None) => Err(LedgerError::Validation(
                "transfer is missing a counterpart account".into(),
            )),
            (TransactionKind::Income | TransactionKind::Expense, Some(_)) => {
                Err(LedgerError::Validation(
                    "only transfers may carry a counterpart account".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Classification of a ledger movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

impl TransactionKind {
    /// Naive sign heuristic: negative amounts are expenses, the rest income.
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}
