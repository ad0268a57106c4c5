//! Read-parse-compute pipeline for the tick report

use crate::error::Result;
use crate::psched::{PschedParams, PSCHED_PATH};
use crate::report::TickReport;
use std::path::{Path, PathBuf};

/// Computes a [`TickReport`] from a psched parameter source
///
/// # Example
///
/// ```no_run
/// use psched_tick::calculator::TickCalculator;
///
/// let report = TickCalculator::default().compute()?;
/// println!("{}", report);
/// # Ok::<(), psched_tick::error::TickError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TickCalculator {
    source: PathBuf,
}

impl Default for TickCalculator {
    fn default() -> Self {
        Self::new(PSCHED_PATH)
    }
}

impl TickCalculator {
    /// Create a calculator that reads from `source`
    pub fn new<P: Into<PathBuf>>(source: P) -> Self {
        Self {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Read the source and derive the report.
    ///
    /// Fails with `SourceUnavailable` if the source cannot be opened and with
    /// `MalformedData` if it does not hold three hex fields. Nothing is retried.
    pub fn compute(&self) -> Result<TickReport> {
        tracing::debug!("Reading psched parameters from {}", self.source.display());

        let params = PschedParams::read_from(&self.source)?;
        let report = TickReport::from_params(params);

        tracing::debug!(
            tick_in_usec = report.tick_in_usec,
            clock_factor = report.clock_factor,
            "Computed tick report"
        );

        Ok(report)
    }
}
