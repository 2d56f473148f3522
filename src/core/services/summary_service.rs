//! Budget-vs-actual aggregation for a reporting period.
//!
//! A pure function of its inputs: no persistent state, no I/O. The budget
//! input is assumed to be one consistent snapshot for the duration of a call.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::ledger::{BudgetLedger, Category, CategoryId, ReportingPeriod, Transaction, TransactionKind};

/// Label for the implicit bucket that collects transactions whose category
/// is unset or no longer exists.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// One aggregated row of the budget table. `category_id` is `None` for the
/// implicit Uncategorized bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetRow {
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub planned: Decimal,
    pub actual: Decimal,
    pub variance: Decimal,
}

/// Sums over a whole budget table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetTotals {
    pub planned: Decimal,
    pub actual: Decimal,
    pub variance: Decimal,
}

pub struct SummaryService;

impl SummaryService {
    /// Computes per-category planned/actual/variance rows for the period.
    ///
    /// Only `Income` and `Expense` make sense as the requested kind;
    /// transfers never aggregate, so asking for them yields an empty table.
    /// `actual` is reported as a non-negative magnitude regardless of the
    /// underlying sign convention. Categories flagged `exclude_from_budget`
    /// still report their actual but always with `planned = 0`.
    pub fn aggregate(
        period: &ReportingPeriod,
        kind: TransactionKind,
        categories: &[Category],
        budgets: &BudgetLedger,
        transactions: &[Transaction],
    ) -> Vec<BudgetRow> {
        if kind == TransactionKind::Transfer {
            tracing::warn!("transfer aggregation requested; transfers never aggregate");
            return Vec::new();
        }
        let want_income = kind == TransactionKind::Income;

        // Sums keyed by category; unknown or unset categories pool under None.
        let mut sums: HashMap<Option<CategoryId>, Decimal> = HashMap::new();
        for txn in transactions {
            if txn.kind != kind || !period.contains(txn.date) {
                continue;
            }
            let key = txn
                .category_id
                .filter(|id| categories.iter().any(|c| c.id == *id));
            *sums.entry(key).or_insert(Decimal::ZERO) += txn.amount;
        }

        let mut eligible: Vec<&Category> = categories
            .iter()
            .filter(|c| c.is_income == want_income && !c.exclude_from_totals)
            .collect();
        eligible.sort_by_key(|c| (c.order, c.id));

        let mut rows = Vec::with_capacity(eligible.len() + 1);
        for category in eligible {
            let actual = sums
                .get(&Some(category.id))
                .copied()
                .unwrap_or(Decimal::ZERO)
                .abs();
            let planned = if category.exclude_from_budget {
                Decimal::ZERO
            } else {
                budgets.get(category.id).unwrap_or(Decimal::ZERO)
            };
            rows.push(BudgetRow {
                category_id: Some(category.id),
                category_name: category.name.clone(),
                planned,
                actual,
                variance: planned - actual,
            });
        }

        if let Some(sum) = sums.get(&None) {
            let actual = sum.abs();
            rows.push(BudgetRow {
                category_id: None,
                category_name: UNCATEGORIZED_LABEL.to_string(),
                planned: Decimal::ZERO,
                actual,
                variance: -actual,
            });
        }

        rows
    }

    pub fn totals(rows: &[BudgetRow]) -> BudgetTotals {
        let mut totals = BudgetTotals::default();
        for row in rows {
            totals.planned += row.planned;
            totals.actual += row.actual;
            totals.variance += row.variance;
        }
        totals
    }
}
