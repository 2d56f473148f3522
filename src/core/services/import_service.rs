//! Spreadsheet import mapping.
//!
//! Turns a table with unknown column headers into validated transaction
//! candidates via an explicit header-to-role assignment. CSV tokenizing and
//! persistence belong to collaborators; this service performs no I/O.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{Category, TransactionKind};

/// Recognized roles a spreadsheet column can play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    Ignore,
    Date,
    Payee,
    Amount,
    Category,
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ColumnRole::Ignore => "ignore",
            ColumnRole::Date => "date",
            ColumnRole::Payee => "payee",
            ColumnRole::Amount => "amount",
            ColumnRole::Category => "category",
        };
        f.write_str(label)
    }
}

impl FromStr for ColumnRole {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "ignore" => Ok(ColumnRole::Ignore),
            "date" => Ok(ColumnRole::Date),
            "payee" => Ok(ColumnRole::Payee),
            "amount" => Ok(ColumnRole::Amount),
            "category" => Ok(ColumnRole::Category),
            other => Err(LedgerError::Mapping(format!("unknown column role `{other}`"))),
        }
    }
}

/// A validated header-to-role assignment.
///
/// Exactly one header carries each of `Date`, `Payee`, and `Amount`; at most
/// one carries `Category`; any number may be ignored. Violations surface at
/// construction, not at row-mapping time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    date: String,
    payee: String,
    amount: String,
    category: Option<String>,
}

impl ColumnMapping {
    pub fn new(
        assignments: impl IntoIterator<Item = (String, ColumnRole)>,
    ) -> LedgerResult<Self> {
        let mut date = Vec::new();
        let mut payee = Vec::new();
        let mut amount = Vec::new();
        let mut category = Vec::new();
        for (header, role) in assignments {
            match role {
                ColumnRole::Ignore => {}
                ColumnRole::Date => date.push(header),
                ColumnRole::Payee => payee.push(header),
                ColumnRole::Amount => amount.push(header),
                ColumnRole::Category => category.push(header),
            }
        }

        let date = Self::exactly_one(date, ColumnRole::Date)?;
        let payee = Self::exactly_one(payee, ColumnRole::Payee)?;
        let amount = Self::exactly_one(amount, ColumnRole::Amount)?;
        if category.len() > 1 {
            return Err(LedgerError::Mapping(
                "column role `category` is mapped more than once".into(),
            ));
        }

        Ok(Self {
            date,
            payee,
            amount,
            category: category.into_iter().next(),
        })
    }

    fn exactly_one(mut headers: Vec<String>, role: ColumnRole) -> LedgerResult<String> {
        match headers.len() {
            0 => Err(LedgerError::Mapping(format!(
                "column role `{role}` is unmapped"
            ))),
            1 => Ok(headers.remove(0)),
            _ => Err(LedgerError::Mapping(format!(
                "column role `{role}` is mapped more than once"
            ))),
        }
    }

    fn mapped_headers(&self) -> impl Iterator<Item = &str> {
        [
            Some(self.date.as_str()),
            Some(self.payee.as_str()),
            Some(self.amount.as_str()),
            self.category.as_deref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Case-insensitive category name to income flag table.
#[derive(Debug, Clone, Default)]
pub struct CategoryTypeLookup {
    by_name: HashMap<String, bool>,
}

impl CategoryTypeLookup {
    pub fn new(entries: impl IntoIterator<Item = (String, bool)>) -> Self {
        Self {
            by_name: entries
                .into_iter()
                .map(|(name, is_income)| (name.trim().to_lowercase(), is_income))
                .collect(),
        }
    }

    pub fn from_categories(categories: &[Category]) -> Self {
        Self::new(
            categories
                .iter()
                .map(|c| (c.name.clone(), c.is_income)),
        )
    }

    pub fn is_income(&self, name: &str) -> Option<bool> {
        self.by_name.get(&name.trim().to_lowercase()).copied()
    }
}

/// A mapped transaction candidate. Raw strings are preserved so the
/// persistence collaborator stays in charge of parsing dates and storing
/// exact amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub payee: String,
    pub amount: String,
    pub date: String,
    pub category: Option<String>,
    pub kind: TransactionKind,
}

/// A row excluded from the accepted set, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub row_index: usize,
    pub reason: String,
}

/// Outcome of one mapping batch. A batch with zero accepted rows is still a
/// successful outcome.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub accepted: Vec<MappedRow>,
    pub rejected: Vec<RejectedRow>,
}

pub struct ImportService;

impl ImportService {
    /// Maps a table of raw rows into transaction candidates.
    ///
    /// Type inference precedence: a mapped category value that resolves
    /// through `lookup` decides income vs expense; only otherwise does the
    /// numeric sign of the amount decide. Invalid rows are reported
    /// individually and never abort the batch.
    pub fn map_import(
        headers: &[String],
        rows: &[HashMap<String, String>],
        mapping: &ColumnMapping,
        lookup: Option<&CategoryTypeLookup>,
    ) -> LedgerResult<ImportOutcome> {
        for header in mapping.mapped_headers() {
            if !headers.iter().any(|h| h.as_str() == header) {
                return Err(LedgerError::Mapping(format!(
                    "mapped header `{header}` is not present in the sheet"
                )));
            }
        }

        let mut outcome = ImportOutcome::default();
        for (row_index, row) in rows.iter().enumerate() {
            match Self::map_row(row, mapping, lookup) {
                Ok(mapped) => outcome.accepted.push(mapped),
                Err(reason) => outcome.rejected.push(RejectedRow { row_index, reason }),
            }
        }
        tracing::debug!(
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            "import batch mapped"
        );
        Ok(outcome)
    }

    fn map_row(
        row: &HashMap<String, String>,
        mapping: &ColumnMapping,
        lookup: Option<&CategoryTypeLookup>,
    ) -> Result<MappedRow, String> {
        let date = Self::cell(row, &mapping.date);
        let payee = Self::cell(row, &mapping.payee);
        let amount = Self::cell(row, &mapping.amount);
        if date.is_empty() {
            return Err("date is empty".into());
        }
        if payee.is_empty() {
            return Err("payee is empty".into());
        }
        if amount.is_empty() {
            return Err("amount is empty".into());
        }

        let category = mapping
            .category
            .as_deref()
            .map(|header| Self::cell(row, header))
            .filter(|value| !value.is_empty());

        let kind = Self::infer_kind(&amount, category.as_deref(), lookup)?;

        Ok(MappedRow {
            payee,
            amount,
            date,
            category,
            kind,
        })
    }

    /// An explicit category classification overrides the sign heuristic.
    fn infer_kind(
        amount: &str,
        category: Option<&str>,
        lookup: Option<&CategoryTypeLookup>,
    ) -> Result<TransactionKind, String> {
        if let (Some(category), Some(lookup)) = (category, lookup) {
            if let Some(is_income) = lookup.is_income(category) {
                return Ok(if is_income {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                });
            }
        }
        let value: Decimal = amount
            .parse()
            .map_err(|_| format!("amount `{amount}` is not a number"))?;
        Ok(TransactionKind::from_amount(value))
    }

    fn cell(row: &HashMap<String, String>, header: &str) -> String {
        row.get(header).map(|v| v.trim().to_string()).unwrap_or_default()
    }
}
