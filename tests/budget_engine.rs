use budget_tracker::models::{
    BudgetField, BudgetGoal, Category, IncomeSource, LabelPattern, Money, Month, PlannedExpense,
    Recurrence, Transaction,
};
use budget_tracker::services::{
    budgetize, compute_budget_goals, compute_categories, extract_inter_account_transactions,
    BudgetPlan,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tx(id: &str, label: &str, day: NaiveDate, units: i64) -> Transaction {
    Transaction::new(id, label, day, Money::from_units(units), "checking")
}

fn plan() -> BudgetPlan {
    BudgetPlan {
        income_sources: vec![IncomeSource::new("salary", Money::from_units(3000))],
        planned_expenses: vec![PlannedExpense::new(
            "rent",
            Money::from_units(1000),
            Recurrence::Monthly,
        )
        .with_match(LabelPattern::new("RENT").unwrap())],
        budget_goals: vec![
            BudgetGoal::new("trip", Money::from_units(3000)),
            BudgetGoal::catch_all("misc"),
        ],
        income_delay: 0,
    }
}

fn transactions() -> Vec<Transaction> {
    vec![
        tx("1", "SALARY JANUARY", date(2025, 1, 2), 3000),
        tx("2", "RENT JANUARY", date(2025, 1, 3), -1000),
        tx("3", "SHOP", date(2025, 1, 10), -500).with_categories(["Food"]),
        tx("4", "VIR OUT 11", date(2025, 1, 15), -200),
        Transaction::new("5", "VIR IN 11", date(2025, 1, 15), Money::from_units(200), "savings"),
        tx("6", "SALARY FEBRUARY", date(2025, 2, 2), 3000),
        tx("7", "RENT FEBRUARY", date(2025, 2, 3), -1000),
        tx("8", "SHOP", date(2025, 2, 10), -1200).with_categories(["Food"]),
        tx("9", "TRAVEL AGENCY", date(2025, 2, 20), -300)
            .with_categories(["Travel"])
            .with_goal(Some("trip".into())),
        tx("10", "RENT MARCH", date(2025, 3, 3), -1000),
        tx("11", "SHOP", date(2025, 3, 4), -100).with_categories(["Food"]),
    ]
}

fn without_transfers() -> Vec<Transaction> {
    let (transfers, rest) = extract_inter_account_transactions(
        &transactions(),
        &LabelPattern::new(r"VIR OUT (?P<id>\d+)").unwrap(),
        &LabelPattern::new(r"VIR IN (?P<id>\d+)").unwrap(),
    );
    assert_eq!(transfers.len(), 2);
    rest
}

#[test]
fn yearly_budgets_mix_real_and_expected_figures() {
    let budgets = budgetize(
        &without_transfers(),
        date(2025, 1, 1),
        date(2025, 4, 1),
        &plan(),
        Month::new(2025, 3).unwrap(),
    );
    assert_eq!(budgets.len(), 3);

    let january = budgets.get(Month::new(2025, 1).unwrap()).unwrap();
    assert_eq!(january.income, Money::from_units(3000));
    assert_eq!(january.planned_expenses, Money::from_units(1000));
    assert_eq!(january.expenses, Money::from_units(500));
    assert_eq!(january.savings, Money::from_units(1500));
    assert_eq!(january.savings_goal, Money::from_units(250));
    assert_eq!(january.balance, Money::from_units(1250));

    let march = budgets.get(Month::new(2025, 3).unwrap()).unwrap();
    assert_eq!(march.income, Money::zero());
    assert_eq!(march.savings, Money::from_units(-1100));
    assert_eq!(march.expected_savings, Money::from_units(1900));
    assert_eq!(march.expected_remaining, Money::from_units(1650));

    // The running month counts what is expected
    assert_eq!(budgets.total(BudgetField::Savings), Money::from_units(3900));
    assert_eq!(budgets.total(BudgetField::Income), Money::from_units(9000));
    assert_eq!(budgets.total(BudgetField::Expenses), Money::from_units(2100));
}

#[test]
fn goal_allocation_over_the_year() {
    let budgets = budgetize(
        &without_transfers(),
        date(2025, 1, 1),
        date(2026, 1, 1),
        &plan(),
        Month::new(2025, 3).unwrap(),
    );
    let (goals, savings_after) = compute_budget_goals(&budgets, &plan().budget_goals);

    assert_eq!(goals.len(), 2);
    let trip = &goals[0];
    assert_eq!(trip.label, "trip");
    assert_eq!(trip.used, Money::from_units(300));
    assert_eq!(trip.saved, Money::from_units(2700));
    assert!(trip.is_completed());

    let misc = &goals[1];
    assert_eq!(misc.target, Money::zero());
    assert_eq!(misc.saved, Money::zero());

    assert_eq!(savings_after, Money::from_units(1200));
}

#[test]
fn category_breakdown_of_the_quarter() {
    let categories = vec![
        Category::new("Food", ["shop"]),
        Category::new("Travel", ["travel"]).with_warning_threshold(Money::from_units(100)),
        Category::new("Health", ["pharmacy"]),
    ];
    let computed = compute_categories(
        &without_transfers(),
        &categories,
        Some(date(2025, 1, 1)),
        Some(date(2025, 4, 1)),
        Decimal::ONE,
    );

    let summary: Vec<(&str, Money, u32)> = computed
        .iter()
        .map(|c| (c.display_name(), c.amount, c.pct))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Uncategorized", Money::from_units(3000), 59),
            ("Food", Money::from_units(1800), 35),
            ("Travel", Money::from_units(300), 6),
            ("Health", Money::zero(), 0),
        ]
    );
    assert!(computed[2].has_warning());
    assert!(!computed[1].has_warning());
}
