mod common;

use common::{category, date, dec, expense_flags, income_flags, transaction};
use reconcile_core::core::services::{SummaryService, UNCATEGORIZED_LABEL};
use reconcile_core::ledger::{
    BudgetLedger, CategoryFlags, MonthKey, ReportingPeriod, TransactionKind,
};
use rust_decimal::Decimal;

#[test]
fn expense_aggregation_reports_magnitude_and_variance() {
    let categories = vec![category(1, "Groceries", expense_flags(), 0)];
    let mut budgets = BudgetLedger::new();
    budgets.set(1, dec("500")).unwrap();
    let transactions = vec![
        transaction(1, date(2025, 3, 2), "-120.00", TransactionKind::Expense, Some(1)),
        transaction(2, date(2025, 3, 18), "-200.00", TransactionKind::Expense, Some(1)),
        // Outside the period, must not count.
        transaction(3, date(2025, 4, 1), "-75.00", TransactionKind::Expense, Some(1)),
    ];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &budgets,
        &transactions,
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_id, Some(1));
    assert_eq!(rows[0].planned, dec("500"));
    assert_eq!(rows[0].actual, dec("320.00"));
    assert_eq!(rows[0].variance, dec("180.00"));
}

#[test]
fn exclude_from_budget_forces_planned_to_zero() {
    let categories = vec![category(
        1,
        "Gifts",
        CategoryFlags {
            exclude_from_budget: true,
            ..CategoryFlags::default()
        },
        0,
    )];
    let mut budgets = BudgetLedger::new();
    // A set value is permitted but must be ignored.
    budgets.set(1, dec("300")).unwrap();
    let transactions = vec![transaction(
        1,
        date(2025, 3, 10),
        "-40.00",
        TransactionKind::Expense,
        Some(1),
    )];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &budgets,
        &transactions,
    );

    assert_eq!(rows[0].planned, Decimal::ZERO);
    assert_eq!(rows[0].actual, dec("40.00"));
    assert_eq!(rows[0].variance, dec("-40.00"));
}

#[test]
fn exclude_from_totals_hides_the_category_entirely() {
    let categories = vec![
        category(1, "Groceries", expense_flags(), 0),
        category(
            2,
            "Internal",
            CategoryFlags {
                exclude_from_totals: true,
                ..CategoryFlags::default()
            },
            1,
        ),
    ];
    let transactions = vec![
        transaction(1, date(2025, 3, 2), "-10.00", TransactionKind::Expense, Some(1)),
        transaction(2, date(2025, 3, 3), "-99.00", TransactionKind::Expense, Some(2)),
    ];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &BudgetLedger::new(),
        &transactions,
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_id, Some(1));
}

#[test]
fn unknown_category_lands_in_the_uncategorized_bucket() {
    let categories = vec![category(1, "Groceries", expense_flags(), 0)];
    let transactions = vec![
        transaction(1, date(2025, 3, 2), "-10.00", TransactionKind::Expense, Some(1)),
        // Category 9 was deleted without reassigning its transactions.
        transaction(2, date(2025, 3, 4), "-25.00", TransactionKind::Expense, Some(9)),
        transaction(3, date(2025, 3, 5), "-5.00", TransactionKind::Expense, None),
    ];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &BudgetLedger::new(),
        &transactions,
    );

    assert_eq!(rows.len(), 2);
    let bucket = rows.last().unwrap();
    assert_eq!(bucket.category_id, None);
    assert_eq!(bucket.category_name, UNCATEGORIZED_LABEL);
    assert_eq!(bucket.planned, Decimal::ZERO);
    assert_eq!(bucket.actual, dec("30.00"));
    assert_eq!(bucket.variance, dec("-30.00"));
}

#[test]
fn rows_follow_category_order_not_identity() {
    let categories = vec![
        category(1, "Zeta", expense_flags(), 5),
        category(2, "Alpha", expense_flags(), 1),
        category(3, "Mid", expense_flags(), 3),
    ];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &BudgetLedger::new(),
        &[],
    );

    let names: Vec<_> = rows.iter().map(|r| r.category_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
}

#[test]
fn income_aggregation_filters_by_polarity_and_kind() {
    let categories = vec![
        category(1, "Salary", income_flags(), 0),
        category(2, "Groceries", expense_flags(), 1),
    ];
    let transactions = vec![
        transaction(1, date(2025, 3, 1), "1500.00", TransactionKind::Income, Some(1)),
        transaction(2, date(2025, 3, 2), "-80.00", TransactionKind::Expense, Some(2)),
    ];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Income,
        &categories,
        &BudgetLedger::new(),
        &transactions,
    );

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].category_name, "Salary");
    assert_eq!(rows[0].actual, dec("1500.00"));
}

#[test]
fn transfers_never_aggregate() {
    let categories = vec![category(1, "Groceries", expense_flags(), 0)];
    let mut transfer = transaction(1, date(2025, 3, 2), "-100.00", TransactionKind::Transfer, Some(1));
    transfer.transfer_account_id = Some(2);

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &BudgetLedger::new(),
        &[transfer.clone()],
    );
    assert_eq!(rows[0].actual, Decimal::ZERO);

    let as_filter = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Transfer,
        &categories,
        &BudgetLedger::new(),
        &[transfer],
    );
    assert!(as_filter.is_empty());
}

#[test]
fn multi_month_periods_sum_across_buckets() {
    let categories = vec![category(1, "Groceries", expense_flags(), 0)];
    let transactions = vec![
        transaction(1, date(2025, 1, 15), "-10.00", TransactionKind::Expense, Some(1)),
        transaction(2, date(2025, 2, 15), "-20.00", TransactionKind::Expense, Some(1)),
        transaction(3, date(2025, 3, 15), "-40.00", TransactionKind::Expense, Some(1)),
    ];
    let period = ReportingPeriod::from_keys([MonthKey::new(2025, 1), MonthKey::new(2025, 3)]);

    let rows = SummaryService::aggregate(
        &period,
        TransactionKind::Expense,
        &categories,
        &BudgetLedger::new(),
        &transactions,
    );

    assert_eq!(rows[0].actual, dec("50.00"));
}

#[test]
fn transaction_source_query_honors_period_and_filter() {
    use common::InMemoryLedger;
    use reconcile_core::core::sources::{BudgetSource, TransactionFilter, TransactionSource};

    let ledger = InMemoryLedger {
        transactions: vec![
            transaction(1, date(2025, 3, 2), "-10.00", TransactionKind::Expense, Some(1)),
            transaction(2, date(2025, 3, 5), "200.00", TransactionKind::Income, Some(2)),
            transaction(3, date(2025, 4, 2), "-30.00", TransactionKind::Expense, Some(1)),
        ],
    };
    let filter = TransactionFilter {
        kind: Some(TransactionKind::Expense),
        ..TransactionFilter::default()
    };

    let hits = ledger.query(&ReportingPeriod::single(2025, 3), &filter);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    // BudgetLedger doubles as the BudgetSource collaborator.
    let mut budgets = BudgetLedger::new();
    BudgetSource::set(&mut budgets, 1, dec("100")).unwrap();
    assert_eq!(BudgetSource::get(&budgets, 1), Some(dec("100")));
}

#[test]
fn totals_sum_the_whole_table() {
    let categories = vec![
        category(1, "Groceries", expense_flags(), 0),
        category(2, "Transport", expense_flags(), 1),
    ];
    let mut budgets = BudgetLedger::new();
    budgets.set(1, dec("500")).unwrap();
    budgets.set(2, dec("100")).unwrap();
    let transactions = vec![
        transaction(1, date(2025, 3, 2), "-320.00", TransactionKind::Expense, Some(1)),
        transaction(2, date(2025, 3, 3), "-60.00", TransactionKind::Expense, Some(2)),
    ];

    let rows = SummaryService::aggregate(
        &ReportingPeriod::single(2025, 3),
        TransactionKind::Expense,
        &categories,
        &budgets,
        &transactions,
    );
    let totals = SummaryService::totals(&rows);

    assert_eq!(totals.planned, dec("600"));
    assert_eq!(totals.actual, dec("380.00"));
    assert_eq!(totals.variance, dec("220.00"));
}
