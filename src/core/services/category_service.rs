use chrono::{DateTime, Utc};

use crate::core::sources::TransactionSource;
use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{Category, CategoryFlags, CategoryId, CategoryRegistry};

pub struct CategoryService;

impl CategoryService {
    /// Creates a category, placing it last in the active ordering.
    pub fn create(
        registry: &mut CategoryRegistry,
        name: &str,
        flags: CategoryFlags,
    ) -> LedgerResult<CategoryId> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Validation("category name is empty".into()));
        }
        Self::validate_unique_name(registry, trimmed)?;

        let order = registry
            .categories()
            .iter()
            .map(|c| c.order)
            .max()
            .map_or(0, |max| max + 1);
        let id = registry.allocate_id();
        registry.push(Category::new(id, trimmed, flags, order));
        tracing::debug!(category = trimmed, id, "category created");
        Ok(id)
    }

    /// Toggles archival, stamping or clearing `archived_on`.
    pub fn archive(
        registry: &mut CategoryRegistry,
        id: CategoryId,
        archived: bool,
        now: DateTime<Utc>,
    ) -> LedgerResult<()> {
        let category = registry
            .category_mut(id)
            .ok_or_else(|| LedgerError::NotFound(format!("category {id}")))?;
        category.archived = archived;
        category.archived_on = archived.then_some(now);
        Ok(())
    }

    /// Removes a category once the ledger store confirms nothing references it.
    pub fn delete(
        registry: &mut CategoryRegistry,
        id: CategoryId,
        ledger: &dyn TransactionSource,
    ) -> LedgerResult<Category> {
        if registry.category(id).is_none() {
            return Err(LedgerError::NotFound(format!("category {id}")));
        }
        if ledger.references_category(id) {
            return Err(LedgerError::Conflict(format!(
                "category {id} is still referenced by transactions"
            )));
        }
        let removed = registry
            .remove(id)
            .ok_or_else(|| LedgerError::NotFound(format!("category {id}")))?;
        tracing::debug!(id, "category deleted");
        Ok(removed)
    }

    /// Reassigns `order` to match the given sequence. The sequence must be a
    /// bijection on the active id set.
    pub fn reorder(registry: &mut CategoryRegistry, ordered_ids: &[CategoryId]) -> LedgerResult<()> {
        let mut active: Vec<CategoryId> = registry
            .categories()
            .iter()
            .filter(|c| !c.archived)
            .map(|c| c.id)
            .collect();
        active.sort_unstable();
        let mut requested: Vec<CategoryId> = ordered_ids.to_vec();
        requested.sort_unstable();
        requested.dedup();
        if requested.len() != ordered_ids.len() || requested != active {
            return Err(LedgerError::Validation(
                "reorder must name every active category exactly once".into(),
            ));
        }

        for (position, id) in ordered_ids.iter().enumerate() {
            if let Some(category) = registry.category_mut(*id) {
                category.order = position as i64;
            }
        }
        Ok(())
    }

    fn validate_unique_name(registry: &CategoryRegistry, candidate: &str) -> LedgerResult<()> {
        let normalized = candidate.trim().to_lowercase();
        let duplicate = registry
            .categories()
            .iter()
            .any(|category| !category.archived && category.normalized_name() == normalized);
        if duplicate {
            Err(LedgerError::Validation(format!(
                "category `{candidate}` already exists"
            )))
        } else {
            Ok(())
        }
    }
}
