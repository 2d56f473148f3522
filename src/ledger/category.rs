use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CategoryId;

/// Categorises ledger activity for budgeting and reporting.
///
/// An archived category may still be referenced by historical transactions
/// but never shows up in active listings and is not assignable to new ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub is_income: bool,
    pub exclude_from_budget: bool,
    pub exclude_from_totals: bool,
    /// Display/priority position, ascending. Not necessarily contiguous.
    pub order: i64,
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_on: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(id: CategoryId, name: impl Into<String>, flags: CategoryFlags, order: i64) -> Self {
        Self {
            id,
            name: name.into(),
            is_income: flags.is_income,
            exclude_from_budget: flags.exclude_from_budget,
            exclude_from_totals: flags.exclude_from_totals,
            order,
            archived: false,
            archived_on: None,
        }
    }

    /// Name normalized for case-insensitive duplicate checks.
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Behaviour flags set at category creation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryFlags {
    pub is_income: bool,
    /// Participates in the ledger but never counts toward a budget target.
    pub exclude_from_budget: bool,
    /// Excluded from aggregate totals entirely.
    pub exclude_from_totals: bool,
}

/// Canonical list of categories for one user scope, owning id allocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    next_id: CategoryId,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuilds a registry from persisted categories.
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let next_id = categories.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            categories,
            next_id,
        }
    }

    pub(crate) fn allocate_id(&mut self) -> CategoryId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub(crate) fn remove(&mut self, id: CategoryId) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(index))
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Active categories ordered by `order` ascending, ties broken by id.
    pub fn list_active(&self) -> Vec<Category> {
        let mut active: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| !c.archived)
            .cloned()
            .collect();
        active.sort_by_key(|c| (c.order, c.id));
        active
    }

    pub fn list_archived(&self) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|c| c.archived)
            .cloned()
            .collect()
    }

    /// Whether `id` names an active category that new transactions may use.
    pub fn is_assignable(&self, id: CategoryId) -> bool {
        self.category(id).map_or(false, |c| !c.archived)
    }
}
