use chrono::{Local, NaiveDateTime};

use homeclean_core::Clock;

/// Wall clock in the user's local time zone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
