//! Tick/time conversion for traffic-control values
//!
//! Qdisc options such as the TBF `buffer` and `mtu` are stored by the kernel
//! in scheduler ticks. These helpers turn them into microseconds using the
//! derived [`TickReport`], and pretty-print the result the way `tc` does.

use crate::report::{TickReport, TIME_UNITS_PER_SEC};

/// Placeholder printed for a duration that cannot be derived
pub const UNDEFINED_TIME: &str = "n/a";

impl TickReport {
    /// Convert a kernel tick count into microseconds.
    ///
    /// Returns `None` when the tick length is zero (`t2us == 0`), since the
    /// conversion has no finite value then.
    pub fn ticks_to_usec(&self, ticks: u32) -> Option<f64> {
        let usec = f64::from(ticks) / self.tick_in_usec;
        usec.is_finite().then_some(usec)
    }
}

/// Format a duration in microseconds as `1.5s`, `2.0ms` or `250us`
pub fn format_time(usec: f64) -> String {
    if !usec.is_finite() {
        UNDEFINED_TIME.to_string()
    } else if usec >= TIME_UNITS_PER_SEC {
        format!("{:.1}s", usec / TIME_UNITS_PER_SEC)
    } else if usec >= TIME_UNITS_PER_SEC / 1000.0 {
        format!("{:.1}ms", usec / (TIME_UNITS_PER_SEC / 1000.0))
    } else {
        format!("{}us", usec.trunc() as u64)
    }
}
