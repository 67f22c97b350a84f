//! homeclean-core
//!
//! Booking logic for the home-cleaning app: catalogs, pricing, the booking
//! wizard, persistence services, and the confirmation simulator.
//! Depends on homeclean-domain. No CLI, no terminal I/O, no direct file access.

pub mod address_service;
pub mod booking_service;
pub mod catalog_service;
pub mod checkout;
pub mod confirmation;
pub mod error;
pub mod pricing_service;
pub mod storage;
pub mod support_service;
pub mod time;
pub mod wizard;

pub use address_service::*;
pub use booking_service::*;
pub use catalog_service::*;
pub use checkout::*;
pub use confirmation::*;
pub use error::CoreError;
pub use pricing_service::*;
pub use storage::{KeyValueStore, MemoryStore};
pub use support_service::*;
pub use time::{Clock, FixedClock, BOOKING_WINDOW_DAYS};
pub use wizard::*;

#[cfg(test)]
mod tests;
