//! homeclean-domain
//!
//! Pure domain models (catalog entries, booking selections, booking records,
//! addresses, payment methods, routes). No I/O, no CLI, no storage.

pub mod booking;
pub mod catalog;
pub mod common;
pub mod profile;
pub mod route;

pub use booking::*;
pub use catalog::*;
pub use common::*;
pub use profile::*;
pub use route::*;
