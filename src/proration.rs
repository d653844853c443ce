use chrono::{Local, NaiveDate};

use crate::period::Period;
use crate::recurring::{
    Figure, ProratableExpense, RecurringExpense, RecurringExpensesVaultValues,
};
use crate::vault::{Vault, VaultReadable};

#[derive(Debug, PartialEq, Clone)]
pub struct BreakdownEntry {
    pub name: String,
    pub daily_amount: Figure,
}

#[derive(Debug, PartialEq)]
pub struct DailyAmountScreen {
    pub date: NaiveDate,
    pub total: Figure,
    pub breakdown: Vec<BreakdownEntry>,
}

#[derive(Debug, PartialEq)]
pub struct PeriodAmountScreen {
    pub period: Period,
    pub total: Figure,
}

#[derive(Debug, PartialEq, Clone)]
pub struct DailyCostEntry {
    pub name: String,
    pub daily_amount: Figure,
    pub monthly_amount: Figure,
}

#[derive(Debug, PartialEq)]
pub struct MonthlyDailyCostScreen {
    pub date: NaiveDate,
    pub total: Figure,
    pub breakdown: Vec<DailyCostEntry>,
}

/// Total fixed expenses landing on a single date, with one breakdown
/// entry per contributing expense, in input order.
pub fn daily_recurring_amount<E: ProratableExpense>(
    expenses: &[E],
    date: &NaiveDate,
) -> DailyAmountScreen {
    let breakdown: Vec<BreakdownEntry> = expenses
        .iter()
        .filter_map(|expense| {
            expense.daily_amount_on(date).map(|daily_amount| BreakdownEntry {
                name: expense.name().clone(),
                daily_amount,
            })
        })
        .collect();

    let total = breakdown.iter().map(|entry| entry.daily_amount).sum();

    return DailyAmountScreen {
        date: *date,
        total,
        breakdown,
    };
}

/// Total fixed expenses landing inside an inclusive date range.
pub fn period_recurring_amount<E: ProratableExpense>(
    expenses: &[E],
    period: &Period,
) -> PeriodAmountScreen {
    let total = expenses
        .iter()
        .map(|expense| expense.amount_over(period))
        .sum();

    return PeriodAmountScreen {
        period: period.clone(),
        total,
    };
}

/// Today's daily burn from monthly commitments only, each amortized
/// over 30 days. One-time and distributed expenses are left out so
/// they do not inflate the recurring figure.
pub fn monthly_expenses_daily_cost<E: ProratableExpense>(
    expenses: &[E],
    today: &NaiveDate,
) -> MonthlyDailyCostScreen {
    let breakdown: Vec<DailyCostEntry> = expenses
        .iter()
        .filter_map(|expense| {
            expense.thirty_day_rate_on(today).map(|daily_amount| DailyCostEntry {
                name: expense.name().clone(),
                daily_amount,
                monthly_amount: *expense.amount(),
            })
        })
        .collect();

    let total = breakdown.iter().map(|entry| entry.daily_amount).sum();

    return MonthlyDailyCostScreen {
        date: *today,
        total,
        breakdown,
    };
}

/// The vault-backed entry point behind every CLI subcommand: loads the
/// expense list once and captures today's date. Everything after
/// construction is pure computation.
#[cfg_attr(test, derive(Debug))]
pub struct FixedExpensesOperation {
    pub today: NaiveDate,
    pub expenses: Vec<RecurringExpense>,
}

impl FixedExpensesOperation {
    pub fn from_vault_values<V: Vault>(vault: &V) -> Result<FixedExpensesOperation, String> {
        return Ok(FixedExpensesOperation {
            today: Local::now().date_naive(),
            expenses: RecurringExpensesVaultValues::from_vault(vault)?,
        });
    }

    pub fn daily_amount(&self, date: Option<NaiveDate>) -> DailyAmountScreen {
        return daily_recurring_amount(&self.expenses, &date.unwrap_or(self.today));
    }

    pub fn period_amount(&self, period: &Period) -> PeriodAmountScreen {
        return period_recurring_amount(&self.expenses, period);
    }

    pub fn monthly_daily_cost(&self) -> MonthlyDailyCostScreen {
        return monthly_expenses_daily_cost(&self.expenses, &self.today);
    }
}
