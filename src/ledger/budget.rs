use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CategoryId;
use crate::errors::{LedgerError, LedgerResult};

/// One planned amount per category, independent of actuals.
///
/// Updating replaces the previous value; no history is retained here. Setting
/// a budget for a category flagged `exclude_from_budget` is permitted, the
/// aggregation engine is the one that ignores it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetLedger {
    planned: BTreeMap<CategoryId, Decimal>,
}

impl BudgetLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the planned amount for a category. Amounts are non-negative.
    pub fn set(&mut self, category_id: CategoryId, amount: Decimal) -> LedgerResult<()> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "planned amount for category {category_id} must be non-negative"
            )));
        }
        self.planned.insert(category_id, amount);
        Ok(())
    }

    pub fn get(&self, category_id: CategoryId) -> Option<Decimal> {
        self.planned.get(&category_id).copied()
    }

    /// Removes the planned amount, returning the previous value if any.
    pub fn clear(&mut self, category_id: CategoryId) -> Option<Decimal> {
        self.planned.remove(&category_id)
    }

    pub fn is_empty(&self) -> bool {
        self.planned.is_empty()
    }
}
