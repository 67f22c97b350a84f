use homeclean_domain::{BookingRecord, Route};

use crate::{
    BookingPersister, BookingRepository, ConfirmationProgress, ConfirmationSimulator, Sleeper,
    StorageNotice,
};

/// Result of finishing the wizard.
#[derive(Debug, Clone)]
pub struct BookingConfirmation {
    pub record: BookingRecord,
    pub stored: bool,
    pub notices: Vec<StorageNotice>,
    pub route: Route,
}

/// Persists `record` once, runs the confirmation wait, and returns the redirect.
pub fn complete_booking(
    repository: &BookingRepository,
    record: BookingRecord,
    simulator: &ConfirmationSimulator,
    sleeper: &mut dyn Sleeper,
    observer: &mut dyn FnMut(ConfirmationProgress),
) -> BookingConfirmation {
    let report = BookingPersister::new(repository).persist(record);
    let route = simulator.run(sleeper, observer);
    BookingConfirmation {
        record: report.record,
        stored: report.stored,
        notices: report.notices,
        route,
    }
}
