use chrono::{NaiveDate, Utc};

/// Source of "today" for draft defaults and export file names
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Current date in UTC, matching ISO timestamps cut to their date part
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
