//! psched-tick - kernel packet-scheduler tick diagnostics
//!
//! This library reads the clock conversion constants Linux publishes in
//! `/proc/net/psched`, applies the nanosecond-clock compatibility correction
//! and derives the length of one scheduler tick in microseconds.

pub mod calculator;
pub mod cli;
pub mod convert;
pub mod error;
pub mod psched;
pub mod report;
