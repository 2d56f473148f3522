#![doc(test(attr(deny(warnings))))]

//! Reconcile Core offers the ledger reconciliation primitives behind a
//! personal finance tracker: category registry, spreadsheet import mapping,
//! recurring-transaction scheduling, and budget-vs-actual aggregation.
//!
//! Persistence, HTTP, and rendering are collaborators reached through the
//! traits in [`core::sources`]; every service here is a pure computation over
//! the inputs it is handed.

pub mod core;
pub mod errors;
pub mod ledger;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Reconcile Core tracing initialized.");
    });
}
