//! Utility Module
//!
//! - [`HostClock`]: monotonic seconds source for hosts that do not already own one

pub mod time;

pub use time::HostClock;
