use std::time::Duration;

use homeclean_domain::Route;
use tracing::debug;

/// Length of the simulated "finding a maid" wait.
pub const DEFAULT_CONFIRMATION_DELAY: Duration = Duration::from_millis(2000);

const PROGRESS_TICKS: u32 = 10;

/// Blocks the current thread; swapped out in tests.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationProgress {
    /// Indeterminate phase shown before the first tick.
    Searching,
    /// Determinate percentage, 1..=100.
    Progress(u8),
    Found,
}

/// Simulated provider matching: a fixed wait followed by a redirect home.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationSimulator {
    delay: Duration,
}

impl Default for ConfirmationSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION_DELAY)
    }
}

impl ConfirmationSimulator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs the wait to completion. There is no cancellation path.
    pub fn run(
        &self,
        sleeper: &mut dyn Sleeper,
        observer: &mut dyn FnMut(ConfirmationProgress),
    ) -> Route {
        debug!(delay_ms = self.delay.as_millis() as u64, "confirmation wait started");
        observer(ConfirmationProgress::Searching);
        if !self.delay.is_zero() {
            // Ticks end on cumulative boundaries, so they sum to exactly `delay`.
            let mut elapsed = Duration::ZERO;
            for step in 1..=PROGRESS_TICKS {
                let boundary = self.delay * step / PROGRESS_TICKS;
                sleeper.sleep(boundary - elapsed);
                elapsed = boundary;
                let pct = (step * 100 / PROGRESS_TICKS) as u8;
                observer(ConfirmationProgress::Progress(pct));
            }
        }
        observer(ConfirmationProgress::Found);
        Route::Home
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSleeper {
        naps: Vec<Duration>,
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&mut self, duration: Duration) {
            self.naps.push(duration);
        }
    }

    #[test]
    fn waits_for_the_full_delay_then_redirects_home() {
        let simulator = ConfirmationSimulator::default();
        let mut sleeper = RecordingSleeper::default();
        let mut events = Vec::new();
        let route = simulator.run(&mut sleeper, &mut |event| events.push(event));

        assert_eq!(route, Route::Home);
        assert_eq!(sleeper.naps.iter().sum::<Duration>(), Duration::from_millis(2000));
        assert_eq!(events.first(), Some(&ConfirmationProgress::Searching));
        assert_eq!(events.last(), Some(&ConfirmationProgress::Found));
        assert!(events.contains(&ConfirmationProgress::Progress(100)));
    }

    #[test]
    fn progress_is_monotonic() {
        let simulator = ConfirmationSimulator::new(Duration::from_millis(500));
        let mut sleeper = RecordingSleeper::default();
        let mut percentages = Vec::new();
        simulator.run(&mut sleeper, &mut |event| {
            if let ConfirmationProgress::Progress(pct) = event {
                percentages.push(pct);
            }
        });
        assert_eq!(percentages.len(), PROGRESS_TICKS as usize);
        assert!(percentages.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn uneven_delays_are_slept_in_full() {
        for millis in [5, 2005, 7] {
            let delay = Duration::from_millis(millis);
            let mut sleeper = RecordingSleeper::default();
            ConfirmationSimulator::new(delay).run(&mut sleeper, &mut |_| {});
            assert_eq!(sleeper.naps.len(), PROGRESS_TICKS as usize);
            assert_eq!(sleeper.naps.iter().sum::<Duration>(), delay);
        }
    }

    #[test]
    fn zero_delay_skips_sleeping() {
        let simulator = ConfirmationSimulator::new(Duration::ZERO);
        let mut sleeper = RecordingSleeper::default();
        let mut events = Vec::new();
        let route = simulator.run(&mut sleeper, &mut |event| events.push(event));
        assert_eq!(route, Route::Home);
        assert!(sleeper.naps.is_empty());
        assert_eq!(
            events,
            vec![ConfirmationProgress::Searching, ConfirmationProgress::Found]
        );
    }
}
