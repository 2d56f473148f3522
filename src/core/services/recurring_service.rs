//! Recurring-transaction scheduling: deterministic date projection and
//! due-occurrence collection, with wall-clock effects confined to the `now`
//! parameter callers pass in.

use chrono::NaiveDate;

use crate::ledger::schedule::occurrence_after;
use crate::ledger::{RecurringTransaction, Transaction, TransactionId, TransactionKind};

/// Hard cap on occurrences handed out in one call, matching a five-year
/// weekly backlog with slack. Keeps a bad cursor from looping forever.
const MAX_OCCURRENCES: usize = 1024;

/// Lifecycle position of a recurring definition relative to `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurringState {
    /// Active, next occurrence lies in the future, nothing generated yet.
    Scheduled,
    /// Active with at least one occurrence at or before `now`.
    Due,
    /// The latest due occurrence has been materialized; the cursor waits on
    /// a future date.
    Materialized,
    /// Deactivated, or the cursor has passed `end_date`.
    Ended,
}

pub struct RecurringService;

impl RecurringService {
    pub fn state(recurring: &RecurringTransaction, now: NaiveDate) -> RecurringState {
        if !recurring.is_active {
            return RecurringState::Ended;
        }
        if let Some(end) = recurring.end_date {
            if recurring.next_due > end {
                return RecurringState::Ended;
            }
        }
        if recurring.next_due <= now {
            RecurringState::Due
        } else if recurring.next_due > recurring.start_date {
            RecurringState::Materialized
        } else {
            RecurringState::Scheduled
        }
    }

    /// Pure projection of the due occurrence dates between the definition's
    /// cursor and `now`, inclusive, stopping at `end_date`. The cursor is
    /// left untouched; callers perform materialization.
    pub fn project_due(recurring: &RecurringTransaction, now: NaiveDate) -> Vec<NaiveDate> {
        if !recurring.is_active {
            return Vec::new();
        }
        let mut due = Vec::new();
        let mut cursor = recurring.next_due;
        while cursor <= now && recurring.within_window(cursor) && due.len() < MAX_OCCURRENCES {
            due.push(cursor);
            cursor = occurrence_after(recurring.start_date, recurring.frequency, cursor);
        }
        due
    }

    /// Like [`Self::project_due`], but advances the cursor past every
    /// returned occurrence so the same occurrence is never handed out twice.
    /// Re-invocation with the same `now` yields an empty set.
    pub fn collect_due_occurrences(
        recurring: &mut RecurringTransaction,
        now: NaiveDate,
    ) -> Vec<NaiveDate> {
        let due = Self::project_due(recurring, now);
        if let Some(last) = due.last() {
            recurring.next_due =
                occurrence_after(recurring.start_date, recurring.frequency, *last);
            tracing::debug!(
                recurring = recurring.id,
                occurrences = due.len(),
                next_due = %recurring.next_due,
                "recurring occurrences collected"
            );
        }
        due
    }

    /// Builds the concrete ledger entry for one occurrence, carrying the
    /// definition's description, amount, currency, category, payee, and
    /// account, plus a back-reference to the definition.
    pub fn materialize(
        recurring: &RecurringTransaction,
        id: TransactionId,
        occurrence: NaiveDate,
    ) -> Transaction {
        let mut txn = Transaction::new(
            id,
            recurring.account_id,
            occurrence,
            recurring.amount,
            TransactionKind::from_amount(recurring.amount),
        );
        txn.description = recurring.description.clone();
        txn.currency = recurring.currency.clone();
        txn.category_id = recurring.category_id;
        txn.payee_id = recurring.payee_id;
        txn.recurring_id = Some(recurring.id);
        txn
    }

    /// Deactivates a definition whose cursor has passed its `end_date`.
    pub fn refresh(recurring: &mut RecurringTransaction, _now: NaiveDate) {
        if let Some(end) = recurring.end_date {
            if recurring.is_active && recurring.next_due > end {
                recurring.deactivate();
                tracing::debug!(recurring = recurring.id, "recurring definition ended");
            }
        }
    }
}
