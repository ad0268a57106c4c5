//! Derived tick report and its output formats

use crate::psched::PschedParams;
use serde::Serialize;
use std::fmt;

/// Time units per second used by the packet scheduler (microseconds)
pub const TIME_UNITS_PER_SEC: f64 = 1_000_000.0;

/// Clock resolution advertised by kernels with a nanosecond clock source
pub const NSEC_CLOCK_RES: u32 = 1_000_000_000;

/// Tick timing derived from the psched parameters
///
/// `t2us` holds the value after the nanosecond compatibility correction, so
/// the report always reflects the ratio actually used in the computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickReport {
    /// Duration of one kernel tick in microseconds
    pub tick_in_usec: f64,
    /// Clock resolution relative to one microsecond
    pub clock_factor: f64,
    pub t2us: u32,
    pub us2t: u32,
    pub clock_res: u32,
}

impl TickReport {
    /// Derive the report from raw kernel parameters.
    ///
    /// Old iproute binaries ignored the clock resolution, so kernels with a
    /// nanosecond clock advertise a tick multiplier of 1000 that really means
    /// 1. In that case `t2us` is replaced with `us2t`.
    ///
    /// All arithmetic is done in `f64`. A zero `us2t` yields a non-finite
    /// `tick_in_usec`; [`PschedParams::read_from`] rejects such input.
    pub fn from_params(params: PschedParams) -> Self {
        let PschedParams {
            mut t2us,
            us2t,
            clock_res,
        } = params;

        if clock_res == NSEC_CLOCK_RES {
            tracing::debug!(
                "Nanosecond clock resolution, treating t2us={} as {}",
                t2us,
                us2t
            );
            t2us = us2t;
        }

        let clock_factor = f64::from(clock_res) / TIME_UNITS_PER_SEC;
        let tick_in_usec = f64::from(t2us) / f64::from(us2t) * clock_factor;

        Self {
            tick_in_usec,
            clock_factor,
            t2us,
            us2t,
            clock_res,
        }
    }

    /// Render as a single JSON object.
    ///
    /// With `ticks`, the count and its duration in microseconds are appended;
    /// the duration is omitted when it is undefined.
    pub fn to_json(&self, ticks: Option<u32>) -> serde_json::Result<String> {
        serde_json::to_string(&JsonReport {
            report: self,
            ticks,
            time_usec: ticks.and_then(|t| self.ticks_to_usec(t)),
        })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a TickReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    ticks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_usec: Option<f64>,
}

impl fmt::Display for TickReport {
    /// `tick_in_usec=%f,clock_factor=%f,t2us=%d,us2t=%d,clock_res=%d`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick_in_usec={:.6},clock_factor={:.6},t2us={},us2t={},clock_res={}",
            self.tick_in_usec, self.clock_factor, self.t2us, self.us2t, self.clock_res
        )
    }
}
