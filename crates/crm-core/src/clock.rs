//! Injected time source
//!
//! Operations that derive dates ("close in one month") read the current time
//! through a `Clock` so tests can pin it.

use chrono::{DateTime, Months, NaiveDate, Utc};

use crate::errors::{CrmError, Result};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in UTC
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at midnight UTC of the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Add calendar months to a date
///
/// The day of month is clamped to the end of the target month, so
/// 31 January plus one month is the last day of February.
///
/// # Errors
///
/// Returns `InvalidDate` if the result is outside chrono's supported range.
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CrmError::InvalidDate {
            reason: format!("{} plus {} months is out of range", date, months),
        })
}
