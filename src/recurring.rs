use chrono::{Datelike, NaiveDate};
#[cfg(test)]
use derive_builder::Builder;
#[cfg(test)]
use mockall::automock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::period::Period;
use crate::vault::VaultReadable;

pub type Figure = Decimal;

/// Flat divisor turning a monthly commitment into a daily rate.
const MONTH_DAYS: Decimal = dec!(30);

/// How a recurring expense lands on the calendar.
///
/// The vocabulary is the union of the two schemes found in the wild:
/// "single"/"monthly" and "monthly_fixed_day"/"distributed". The two
/// monthly models have different math and are kept as separate
/// variants rather than merged.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "recurrence_type")]
pub enum Recurrence {
    /// Full amount once, on the expense's start date.
    #[serde(rename = "single")]
    Single,
    /// Amount divided by 30, applied on every day of the validity window.
    #[serde(rename = "monthly")]
    Monthly,
    /// Full amount on a given day of every month within the validity
    /// window. A missing recurrence_day never matches any date.
    #[serde(rename = "monthly_fixed_day")]
    MonthlyFixedDay { recurrence_day: Option<u32> },
    /// Amount spread evenly from the start date to the end date, or
    /// over the start date alone when there is no end date.
    #[serde(rename = "distributed")]
    Distributed,
}

#[cfg_attr(test, derive(Builder))]
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct RecurringExpense {
    pub name: String,
    pub amount: Figure,
    pub start_date: NaiveDate,
    #[serde(default)]
    #[cfg_attr(test, builder(default))]
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    #[serde(flatten)]
    pub recurrence: Recurrence,
}

pub type RecurringExpensesVaultValues = Vec<RecurringExpense>;
impl VaultReadable for RecurringExpensesVaultValues {
    const KEY: &'static str = "recurring_expenses";
}

#[cfg_attr(test, automock)]
pub trait ProratableExpense {
    fn name(&self) -> &String;
    fn amount(&self) -> &Figure;

    /// The amount this expense attributes to a single date, or None
    /// when nothing lands on it.
    fn daily_amount_on(&self, date: &NaiveDate) -> Option<Figure>;

    /// The amount this expense attributes to an inclusive date range.
    fn amount_over(&self, period: &Period) -> Figure;

    /// The 30-day amortized daily rate of a monthly commitment that is
    /// valid on the given date. None for one-time and distributed
    /// expenses, which are not part of the recurring daily burn.
    fn thirty_day_rate_on(&self, date: &NaiveDate) -> Option<Figure>;
}

impl RecurringExpense {
    /// True when the date falls inside the expense's validity window,
    /// ignoring the active flag.
    fn within_window(&self, date: &NaiveDate) -> bool {
        if &self.start_date > date {
            return false;
        }
        if let Some(end_date) = &self.end_date {
            if end_date < date {
                return false;
            }
        }
        return true;
    }

    fn is_valid_on(&self, date: &NaiveDate) -> bool {
        return self.is_active && self.within_window(date);
    }

    /// The window a distributed expense is spread over. Without an end
    /// date the whole amount belongs to the start date.
    fn distributed_window(&self) -> Period {
        return Period {
            start_date: self.start_date,
            end_date: self.end_date.unwrap_or(self.start_date),
        };
    }

    /// The part of the query period that overlaps the validity window,
    /// treating a missing end date as open-ended.
    fn validity_overlap(&self, period: &Period) -> Option<Period> {
        let start_date = self.start_date.max(period.start_date);
        let end_date = match &self.end_date {
            Some(end_date) => *end_date.min(&period.end_date),
            None => period.end_date,
        };

        if start_date > end_date {
            return None;
        }

        return Some(Period {
            start_date,
            end_date,
        });
    }
}

impl ProratableExpense for RecurringExpense {
    fn name(&self) -> &String {
        return &self.name;
    }

    fn amount(&self) -> &Figure {
        return &self.amount;
    }

    fn daily_amount_on(&self, date: &NaiveDate) -> Option<Figure> {
        if !self.is_valid_on(date) {
            return None;
        }

        return match &self.recurrence {
            Recurrence::Single => (date == &self.start_date).then(|| self.amount),
            Recurrence::Monthly => Some(self.amount / MONTH_DAYS),
            Recurrence::MonthlyFixedDay { recurrence_day } => {
                (*recurrence_day == Some(date.day())).then(|| self.amount)
            }
            Recurrence::Distributed => {
                let window = self.distributed_window();
                if !window.contains(date) {
                    return None;
                }
                // day_count is floored at 1 so a malformed window can
                // never divide by zero
                Some(self.amount / Figure::from(window.day_count().max(1)))
            }
        };
    }

    fn amount_over(&self, period: &Period) -> Figure {
        if !self.is_active {
            return Figure::ZERO;
        }

        return match &self.recurrence {
            Recurrence::Single => {
                if period.contains(&self.start_date) {
                    self.amount
                } else {
                    Figure::ZERO
                }
            }
            Recurrence::Monthly => match self.validity_overlap(period) {
                Some(overlap) => self.amount / MONTH_DAYS * Figure::from(overlap.day_count()),
                None => Figure::ZERO,
            },
            Recurrence::MonthlyFixedDay { recurrence_day } => {
                let Some(recurrence_day) = recurrence_day else {
                    return Figure::ZERO;
                };

                // One occurrence for every day of the period that
                // matches the anchor day and sits inside the validity
                // window. Walked one day at a time; ranges are
                // UI-scale, not multi-year aggregations.
                period
                    .days()
                    .filter(|day| day.day() == *recurrence_day && self.within_window(day))
                    .map(|_| self.amount)
                    .sum()
            }
            Recurrence::Distributed => {
                let window = self.distributed_window();
                let daily_rate = self.amount / Figure::from(window.day_count().max(1));

                match window.intersect(period) {
                    Some(overlap) => daily_rate * Figure::from(overlap.day_count()),
                    None => Figure::ZERO,
                }
            }
        };
    }

    fn thirty_day_rate_on(&self, date: &NaiveDate) -> Option<Figure> {
        if !self.is_valid_on(date) {
            return None;
        }

        return match &self.recurrence {
            Recurrence::Monthly | Recurrence::MonthlyFixedDay { .. } => {
                Some(self.amount / MONTH_DAYS)
            }
            Recurrence::Single | Recurrence::Distributed => None,
        };
    }
}


#[allow(non_snake_case)]
#[cfg(test)]
mod tests_daily_amount_on {
    use super::test_helpers::{date, make_expense};
    use super::{ProratableExpense, Recurrence};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn march(day: u32) -> NaiveDate {
        return date(2024, 3, day);
    }

    #[test]
    fn inactive__contributes_nothing() {
        let expense = make_expense("Insurance", dec!(300), march(15), Recurrence::Single)
            .is_active(false)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(15)), None)
    }

    #[test]
    fn single__on_start_date() {
        let expense = make_expense("Insurance", dec!(300), march(15), Recurrence::Single)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(15)), Some(dec!(300)))
    }

    #[test]
    fn single__day_before_start_date() {
        let expense = make_expense("Insurance", dec!(300), march(15), Recurrence::Single)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(14)), None)
    }

    #[test]
    fn single__day_after_start_date() {
        let expense = make_expense("Insurance", dec!(300), march(15), Recurrence::Single)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(16)), None)
    }

    #[test]
    fn monthly__valid_day_is_thirtieth_of_amount() {
        let expense = make_expense("Rent", dec!(900), march(1), Recurrence::Monthly)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(20)), Some(dec!(30)))
    }

    #[test]
    fn monthly__before_start_date() {
        let expense = make_expense("Rent", dec!(900), march(10), Recurrence::Monthly)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(9)), None)
    }

    #[test]
    fn monthly__on_end_date__inclusive_boundary() {
        let expense = make_expense("Rent", dec!(900), march(1), Recurrence::Monthly)
            .end_date(Some(march(20)))
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(20)), Some(dec!(30)))
    }

    #[test]
    fn monthly__day_after_end_date() {
        let expense = make_expense("Rent", dec!(900), march(1), Recurrence::Monthly)
            .end_date(Some(march(20)))
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(21)), None)
    }

    #[test]
    fn monthly_fixed_day__matching_day_of_month() {
        let expense = make_expense(
            "MEI",
            dec!(200),
            date(2024, 1, 1),
            Recurrence::MonthlyFixedDay {
                recurrence_day: Some(5),
            },
        )
        .build()
        .unwrap();

        assert_eq!(expense.daily_amount_on(&march(5)), Some(dec!(200)))
    }

    #[test]
    fn monthly_fixed_day__other_day_of_month() {
        let expense = make_expense(
            "MEI",
            dec!(200),
            date(2024, 1, 1),
            Recurrence::MonthlyFixedDay {
                recurrence_day: Some(5),
            },
        )
        .build()
        .unwrap();

        assert_eq!(expense.daily_amount_on(&march(6)), None)
    }

    #[test]
    fn monthly_fixed_day__no_recurrence_day_never_matches() {
        let expense = make_expense(
            "MEI",
            dec!(200),
            date(2024, 1, 1),
            Recurrence::MonthlyFixedDay {
                recurrence_day: None,
            },
        )
        .build()
        .unwrap();

        assert_eq!(expense.daily_amount_on(&march(5)), None)
    }

    #[test]
    fn distributed__inside_window() {
        let expense = make_expense("Tires", dec!(310), date(2024, 1, 1), Recurrence::Distributed)
            .end_date(Some(date(2024, 1, 31)))
            .build()
            .unwrap();

        assert_eq!(
            expense.daily_amount_on(&date(2024, 1, 15)),
            Some(dec!(10))
        )
    }

    #[test]
    fn distributed__on_both_boundaries() {
        let expense = make_expense("Tires", dec!(310), date(2024, 1, 1), Recurrence::Distributed)
            .end_date(Some(date(2024, 1, 31)))
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&date(2024, 1, 1)), Some(dec!(10)));
        assert_eq!(expense.daily_amount_on(&date(2024, 1, 31)), Some(dec!(10)))
    }

    #[test]
    fn distributed__day_after_window() {
        let expense = make_expense("Tires", dec!(310), date(2024, 1, 1), Recurrence::Distributed)
            .end_date(Some(date(2024, 1, 31)))
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&date(2024, 2, 1)), None)
    }

    #[test]
    fn distributed__no_end_date__full_amount_on_start_date_only() {
        let expense = make_expense("Repair", dec!(450), march(10), Recurrence::Distributed)
            .build()
            .unwrap();

        assert_eq!(expense.daily_amount_on(&march(10)), Some(dec!(450)));
        assert_eq!(expense.daily_amount_on(&march(11)), None)
    }

    #[test]
    fn idempotent__same_inputs_same_output() {
        let expense = make_expense("Rent", dec!(900), march(1), Recurrence::Monthly)
            .build()
            .unwrap();

        assert_eq!(
            expense.daily_amount_on(&march(20)),
            expense.daily_amount_on(&march(20))
        )
    }
}
