//! Probe configuration.

use crate::discovery::DEFAULT_SIZE_CEILING;
use contour_types::{reference_payload, Element, ProbeError, ProbeResult};
use serde::{Deserialize, Serialize};

/// Largest accepted size ceiling.
pub const MAX_SIZE_CEILING: usize = 1024;

/// Configuration for an analysis run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Largest size probed during size-range discovery.
    pub size_ceiling: usize,
    /// Elements of the reference sample, truncated per factory.
    pub reference_payload: Vec<Element>,
    /// Analyze registry entries on a worker pool.
    pub parallel: bool,
    /// Abort a registry run at the first failed container type.
    pub fail_fast: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            size_ceiling: DEFAULT_SIZE_CEILING,
            reference_payload: reference_payload(),
            parallel: false,
            fail_fast: false,
        }
    }
}

impl ProbeConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> ProbeResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ProbeError::InvalidConfiguration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Largest size probed during discovery.
    pub fn with_size_ceiling(mut self, size_ceiling: usize) -> Self {
        self.size_ceiling = size_ceiling;
        self
    }

    /// Elements the probe samples are built from.
    pub fn with_reference_payload(mut self, payload: Vec<Element>) -> Self {
        self.reference_payload = payload;
        self
    }

    /// Whether registry runs fan out across threads.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Whether the first failing container aborts a registry run.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Rejects a zero or oversized ceiling and an empty payload.
    pub fn validate(&self) -> ProbeResult<()> {
        if self.size_ceiling == 0 || self.size_ceiling > MAX_SIZE_CEILING {
            return Err(ProbeError::InvalidConfiguration(format!(
                "size ceiling must be between 1 and {}, got {}",
                MAX_SIZE_CEILING, self.size_ceiling
            )));
        }
        if self.reference_payload.is_empty() {
            return Err(ProbeError::InvalidConfiguration(
                "reference payload is empty".into(),
            ));
        }
        for (i, element) in self.reference_payload.iter().enumerate() {
            if element.is_null() {
                return Err(ProbeError::InvalidConfiguration(
                    "reference payload contains null".into(),
                ));
            }
            if self.reference_payload[..i].contains(element) {
                return Err(ProbeError::InvalidConfiguration(format!(
                    "reference payload repeats {}",
                    element
                )));
            }
        }
        Ok(())
    }
}
