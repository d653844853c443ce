use chrono::NaiveDate;

/// An inclusive range of calendar dates. Both boundary days belong
/// to the period.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Period {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Period {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Period, String> {
        if start_date > end_date {
            return Err("Start date is after end date".to_string());
        }

        return Ok(Period {
            start_date,
            end_date,
        });
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        return date >= &self.start_date && date <= &self.end_date;
    }

    /// Number of days in the period, counting both boundary days.
    /// Never less than 1, since end_date cannot precede start_date.
    pub fn day_count(&self) -> i64 {
        return (self.end_date - self.start_date).num_days() + 1;
    }

    /// The period covered by both self and other, if any.
    pub fn intersect(&self, other: &Period) -> Option<Period> {
        let start_date = self.start_date.max(other.start_date);
        let end_date = self.end_date.min(other.end_date);

        if start_date > end_date {
            return None;
        }

        return Some(Period {
            start_date,
            end_date,
        });
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        return self
            .start_date
            .iter_days()
            .take_while(|day| day <= &self.end_date);
    }
}
