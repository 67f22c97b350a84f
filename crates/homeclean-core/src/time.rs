use chrono::{NaiveDate, NaiveDateTime};

use crate::CatalogService;

/// Number of days offered by the date picker.
pub const BOOKING_WINDOW_DAYS: u32 = 7;

/// Local wall-clock source for the date picker.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Bookable dates, starting today.
    fn booking_window(&self) -> Vec<NaiveDate> {
        CatalogService::upcoming_dates(self.today(), BOOKING_WINDOW_DAYS)
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
