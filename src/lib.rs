#![doc(test(attr(deny(warnings))))]

//! HomeClean books home-cleaning visits from the terminal: pick a service,
//! schedule it, choose an address and a payment method, then wait for a maid
//! to be matched.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("HomeClean tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
