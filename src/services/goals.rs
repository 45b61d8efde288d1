//! Savings goal allocation
//!
//! Walks the months of a [`BudgetList`] in order and distributes each
//! month's savings across the goals that still need funding. Goal-tagged
//! expenses count as draws on their goal. A deficit is carried in a running
//! buffer and must be repaid before goals receive anything again.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{BudgetGoal, BudgetList, ComputedBudgetGoal, Money};

/// Allocate savings across goals
///
/// Returns one entry per configured goal plus the savings left once the
/// goals have taken their share. Months after the list's current month are
/// ignored; the current month contributes its expected savings.
pub fn compute_budget_goals(
    budgets: &BudgetList,
    budget_goals: &[BudgetGoal],
) -> (Vec<ComputedBudgetGoal>, Money) {
    if budget_goals.is_empty() {
        return (Vec::new(), Money::zero());
    }

    let mut targets: HashMap<&str, Option<Money>> = HashMap::new();
    for goal in budget_goals {
        targets.entry(goal.label.as_str()).or_insert(goal.amount);
    }
    let mut used: HashMap<&str, Money> = targets.keys().map(|l| (*l, Money::zero())).collect();
    let mut saved = used.clone();

    let mut remaining_goals: Vec<&str> = Vec::new();
    for goal in budget_goals.iter().filter(|g| g.has_target()) {
        if !remaining_goals.contains(&goal.label.as_str()) {
            remaining_goals.push(goal.label.as_str());
        }
    }

    let current_month = budgets.current_month();
    let mut total_savings = Money::zero();

    for budget in budgets {
        let month = budget.period();
        if month > current_month {
            break;
        }

        let mut savings_this_month = if month < current_month {
            budget.savings
        } else {
            budget.expected_savings
        };
        debug!(%month, savings = %savings_this_month, "goal allocation: month savings");

        for tx in budget.transactions.iter().filter(|tx| tx.amount.is_negative()) {
            let Some(label) = tx.goal.as_deref() else {
                continue;
            };
            let Some((label, target)) = targets.get_key_value(label) else {
                continue;
            };
            let drawn = tx.amount.abs();
            if let Some(used) = used.get_mut(label) {
                *used += drawn;
            }
            if target.is_some() && !remaining_goals.contains(label) {
                // Completed goal: the draw comes back out of general savings
                savings_this_month += drawn;
            }
        }

        if savings_this_month.is_negative() && !total_savings.is_positive() {
            total_savings += savings_this_month;
            debug!(buffer = %total_savings, "goal allocation: deficit absorbed");
            continue;
        }

        if total_savings.is_negative() {
            total_savings += savings_this_month;
            if total_savings.is_negative() {
                debug!(buffer = %total_savings, "goal allocation: still repaying deficit");
                continue;
            }
            savings_this_month = total_savings;
            debug!(leftover = %savings_this_month, "goal allocation: deficit repaid");
        } else {
            total_savings += savings_this_month;
        }

        while !savings_this_month.is_zero() && !remaining_goals.is_empty() {
            let savings_per_goal = savings_this_month.split(remaining_goals.len());
            savings_this_month = Money::zero();
            debug!(
                share = %savings_per_goal,
                goals = remaining_goals.len(),
                "goal allocation: distributing"
            );

            let mut still_open = Vec::with_capacity(remaining_goals.len());
            for label in remaining_goals.drain(..) {
                let target = targets.get(label).copied().flatten().unwrap_or_default();
                let goal_used = used.get(label).copied().unwrap_or_default();
                let goal_saved = saved.entry(label).or_default();

                let new_saved = (*goal_saved + savings_per_goal).non_negative();
                if goal_used + new_saved >= target {
                    // Overflow is bounded by what the goal holds
                    let overflow = (goal_used + new_saved - target).min(new_saved);
                    *goal_saved = new_saved - overflow;
                    savings_this_month += overflow;
                    debug!(goal = label, overflow = %overflow, "goal allocation: goal completed");
                } else {
                    *goal_saved = new_saved;
                    still_open.push(label);
                }
            }
            remaining_goals = still_open;
        }

        if remaining_goals.is_empty() {
            break;
        }
    }

    let total_saved: Money = saved.values().sum();
    let savings_after_goals = (total_savings - total_saved).non_negative();
    debug!(
        buffer = %total_savings,
        saved = %total_saved,
        after_goals = %savings_after_goals,
        "goal allocation: done"
    );

    let computed = budget_goals
        .iter()
        .map(|goal| {
            let label = goal.label.as_str();
            ComputedBudgetGoal {
                label: goal.label.clone(),
                target: goal.target(),
                saved: saved.get(label).copied().unwrap_or_default().rounded(),
                used: used.get(label).copied().unwrap_or_default().rounded(),
            }
        })
        .collect();

    (computed, savings_after_goals.rounded())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, Month, Transaction};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn budget(month: u32, savings: Money, transactions: Vec<Transaction>) -> Budget {
        Budget {
            month: NaiveDate::from_ymd_opt(2025, month, 1).unwrap(),
            transactions,
            income_transactions: Vec::new(),
            planned_expenses_transactions: Vec::new(),
            expenses_transactions: Vec::new(),
            income: Money::zero(),
            planned_expenses: Money::zero(),
            expenses: Money::zero(),
            real_balance: Money::zero(),
            savings,
            savings_goal: Money::zero(),
            balance: savings,
            expected_income: Money::zero(),
            expected_planned_expenses: Money::zero(),
            expected_real_balance: Money::zero(),
            expected_savings: savings,
            expected_balance: savings,
            expected_remaining: savings.non_negative(),
        }
    }

    fn list(savings: &[Money], current_month: u32) -> BudgetList {
        let budgets = savings
            .iter()
            .enumerate()
            .map(|(i, s)| budget(i as u32 + 1, *s, Vec::new()))
            .collect();
        BudgetList::new(budgets, Month::new(2025, current_month).unwrap())
    }

    fn money(amount: rust_decimal::Decimal) -> Money {
        Money::from_decimal(amount)
    }

    fn draw(id: &str, month: u32, amount: rust_decimal::Decimal, goal: &str) -> Transaction {
        Transaction::new(
            id,
            "CB GARAGE",
            NaiveDate::from_ymd_opt(2025, month, 12).unwrap(),
            money(-amount),
            "checking",
        )
        .with_goal(Some(goal.to_string()))
    }

    #[test]
    fn test_no_goals() {
        let (goals, after) = compute_budget_goals(&list(&[money(dec!(100))], 1), &[]);
        assert!(goals.is_empty());
        assert_eq!(after, Money::zero());
    }

    #[test]
    fn test_goal_filled_over_a_year() {
        let budgets = list(&[money(dec!(100)); 12], 12);
        let car = BudgetGoal::new("car", money(dec!(1200)));

        let (goals, after) = compute_budget_goals(&budgets, &[car]);
        assert_eq!(goals[0].saved, money(dec!(1200)));
        assert!(goals[0].is_completed());
        assert_eq!(after, Money::zero());
    }

    #[test]
    fn test_overflow_becomes_savings_after_goals() {
        let budgets = list(&[money(dec!(1500))], 1);
        let car = BudgetGoal::new("car", money(dec!(1200)));

        let (goals, after) = compute_budget_goals(&budgets, &[car]);
        assert_eq!(goals[0].saved, money(dec!(1200)));
        assert_eq!(after, money(dec!(300)));
    }

    #[test]
    fn test_overflow_cascades_to_open_goals() {
        let budgets = list(&[money(dec!(1000))], 1);
        let goals = [
            BudgetGoal::new("phone", money(dec!(200))),
            BudgetGoal::new("car", money(dec!(5000))),
        ];

        let (computed, after) = compute_budget_goals(&budgets, &goals);
        // 500 each, phone keeps 200 and hands 300 over to car
        assert_eq!(computed[0].saved, money(dec!(200)));
        assert_eq!(computed[1].saved, money(dec!(800)));
        assert_eq!(after, Money::zero());
    }

    #[test]
    fn test_negative_buffer_is_repaid_first() {
        let budgets = list(&[money(dec!(-50)), money(dec!(80))], 2);
        let car = BudgetGoal::new("car", money(dec!(1200)));

        let (goals, after) = compute_budget_goals(&budgets, &[car]);
        assert_eq!(goals[0].saved, money(dec!(30)));
        assert_eq!(after, Money::zero());
    }

    #[test]
    fn test_deficit_not_fully_repaid_allocates_nothing() {
        let budgets = list(&[money(dec!(-100)), money(dec!(-20)), money(dec!(60))], 3);
        let car = BudgetGoal::new("car", money(dec!(1200)));

        let (goals, after) = compute_budget_goals(&budgets, &[car]);
        assert_eq!(goals[0].saved, Money::zero());
        assert_eq!(after, Money::zero());
    }

    #[test]
    fn test_negative_month_draws_down_funded_goal() {
        let budgets = list(&[money(dec!(600)), money(dec!(-200))], 2);
        let car = BudgetGoal::new("car", money(dec!(1200)));

        let (goals, after) = compute_budget_goals(&budgets, &[car]);
        assert_eq!(goals[0].saved, money(dec!(400)));
        assert!(!goals[0].is_completed());
        assert_eq!(after, Money::zero());
    }

    #[test]
    fn test_future_months_are_ignored() {
        let budgets = list(&[money(dec!(100)), money(dec!(100)), money(dec!(100))], 2);
        let car = BudgetGoal::new("car", money(dec!(1200)));

        let (goals, _) = compute_budget_goals(&budgets, &[car]);
        assert_eq!(goals[0].saved, money(dec!(200)));
    }

    #[test]
    fn test_draws_count_as_used() {
        let budgets = BudgetList::new(
            vec![budget(1, money(dec!(100)), vec![draw("1", 1, dec!(400), "car")])],
            Month::new(2025, 1).unwrap(),
        );
        let goals = [
            BudgetGoal::new("car", money(dec!(1200))),
            BudgetGoal::catch_all("misc"),
        ];

        let (computed, _) = compute_budget_goals(&budgets, &goals);
        assert_eq!(computed[0].used, money(dec!(400)));
        assert_eq!(computed[0].saved, money(dec!(100)));
        assert_eq!(computed[0].completed_amount(), money(dec!(500)));
        assert_eq!(computed[1].target, Money::zero());
    }

    #[test]
    fn test_draw_completes_goal_and_caps_saved() {
        let budgets = BudgetList::new(
            vec![
                budget(1, money(dec!(600)), Vec::new()),
                budget(2, money(dec!(600)), vec![draw("1", 2, dec!(1000), "car")]),
            ],
            Month::new(2025, 2).unwrap(),
        );
        let goals = [
            BudgetGoal::new("car", money(dec!(1200))),
            BudgetGoal::new("bike", money(dec!(3000))),
        ];

        let (computed, _) = compute_budget_goals(&budgets, &goals);
        // Month 2: car holds 300 + 300 with 1000 used, so 400 of the 600 saved overflows
        assert_eq!(computed[0].saved, money(dec!(200)));
        assert_eq!(computed[0].used, money(dec!(1000)));
        assert!(computed[0].is_completed());
        assert_eq!(computed[1].saved, money(dec!(1000)));
    }

    #[test]
    fn test_draw_on_completed_goal_refunds_savings() {
        let budgets = BudgetList::new(
            vec![
                budget(1, money(dec!(1200)), Vec::new()),
                budget(2, money(dec!(0)), vec![draw("1", 2, dec!(100), "phone")]),
            ],
            Month::new(2025, 2).unwrap(),
        );
        let goals = [
            BudgetGoal::new("phone", money(dec!(200))),
            BudgetGoal::new("car", money(dec!(5000))),
        ];

        let (computed, _) = compute_budget_goals(&budgets, &goals);
        assert_eq!(computed[0].saved, money(dec!(200)));
        assert_eq!(computed[0].used, money(dec!(100)));
        // 1000 in January, then the 100 drawn on the completed phone goal
        assert_eq!(computed[1].saved, money(dec!(1100)));
    }
}
