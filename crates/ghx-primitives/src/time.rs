//! Time units in whole seconds.
//!
//! Ledger time is always Unix epoch seconds. Month and year lengths use the
//! mean Gregorian year of 365.2425 days, which divides evenly into seconds.

/// Unix timestamp in seconds
pub type Timestamp = u64;

/// One minute
pub const MINUTE: u64 = 60;

/// One hour
pub const HOUR: u64 = 60 * MINUTE;

/// One day
pub const DAY: u64 = 24 * HOUR;

/// One week
pub const WEEK: u64 = 7 * DAY;

/// Mean Gregorian year (365.2425 days)
pub const GREGORIAN_YEAR: u64 = 31_556_952;

/// One twelfth of a Gregorian year
pub const GREGORIAN_MONTH: u64 = GREGORIAN_YEAR / 12;
