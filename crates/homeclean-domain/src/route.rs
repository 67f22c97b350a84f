//! Navigation targets produced by the booking flow.

use std::fmt;

use serde::{Deserialize, Serialize};

const SERVICE_PREFIX: &str = "/service/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    /// Previous route in history.
    Back,
    /// Booking wizard for a category key.
    Service(String),
    Bookings,
}

impl Route {
    /// Parses an app path such as `/service/regular`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim();
        match trimmed.trim_end_matches('/') {
            "" | "/" | "/home" => return Some(Route::Home),
            "/bookings" => return Some(Route::Bookings),
            _ => {}
        }
        let key = trimmed.strip_prefix(SERVICE_PREFIX)?.trim_matches('/');
        if key.is_empty() || key.contains('/') {
            None
        } else {
            Some(Route::Service(key.to_string()))
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/home"),
            Route::Back => f.write_str("<back>"),
            Route::Service(key) => write!(f, "{SERVICE_PREFIX}{key}"),
            Route::Bookings => f.write_str("/bookings"),
        }
    }
}
