pub mod category_service;
pub mod import_service;
pub mod recurring_service;
pub mod summary_service;

pub use category_service::CategoryService;
pub use import_service::{
    CategoryTypeLookup, ColumnMapping, ColumnRole, ImportOutcome, ImportService, MappedRow,
    RejectedRow,
};
pub use recurring_service::{RecurringService, RecurringState};
pub use summary_service::{BudgetRow, BudgetTotals, SummaryService, UNCATEGORIZED_LABEL};
