//! Probe runner.
//!
//! One probe runs one catalog operation twice: once, recorded, against a
//! permissive reference copy of the sample (the calibration run) and once
//! directly against the sample built by the factory under test. The two
//! runs must agree whenever the container under test accepts the call.

use crate::classifier::{calibration_effect, classify};
use crate::factory::ContainerFactory;
use crate::interceptor::InvocationLog;
use crate::operation::{Operation, OperationCatalog};
use contour_types::{Element, Finding, Invocation, ProbeError, ProbeResult};
use tracing::{debug, warn};

/// Runs probes for one container factory.
pub struct ProbeRunner<'a> {
    factory: &'a ContainerFactory,
    payload: &'a [Element],
}

impl<'a> ProbeRunner<'a> {
    /// Probes against samples built from `payload`.
    pub fn new(factory: &'a ContainerFactory, payload: &'a [Element]) -> Self {
        Self { factory, payload }
    }

    /// Runs every operation of `catalog` in order.
    pub fn run_catalog(&self, catalog: &OperationCatalog) -> ProbeResult<Vec<Finding>> {
        catalog
            .operations()
            .iter()
            .map(|operation| self.run(operation))
            .collect()
    }

    /// Runs one probe.
    pub fn run(&self, operation: &Operation) -> ProbeResult<Finding> {
        let name = self.factory.name();
        let mut sample = self.factory.create_sample(self.payload)?;
        let reference = sample.snapshot();
        let mut calibration = reference.to_reference();

        let log = InvocationLog::new();
        let calibrated = operation.invoke(name, &mut calibration, Some(&log))?;
        let calibrated_effect = calibration_effect(&calibrated);
        let invocation = log.last().unwrap_or_else(|| {
            Invocation::new(operation.capability(), operation.name(), Vec::new(), Vec::new())
        });

        let outcome = operation.invoke(name, &mut sample, None)?;
        let (effect, error) = match outcome {
            Ok(()) => {
                let after = sample.snapshot();
                let mirrored = calibration.snapshot();
                if after != mirrored {
                    warn!(
                        container = %name,
                        operation = %invocation,
                        reference = %after,
                        calibrated = %mirrored,
                        "calibration copy diverged from container under test"
                    );
                    return Err(ProbeError::CalibrationDivergence {
                        container: name.to_string(),
                        operation: invocation.to_string(),
                        reference: after.to_string(),
                        calibrated: mirrored.to_string(),
                    });
                }
                (classify(&reference, &after), None)
            }
            Err(err) => {
                let effect = calibrated_effect
                    .unwrap_or_else(|| classify(&reference, &calibration.snapshot()));
                (effect, Some(err.kind))
            }
        };

        debug!(
            container = %name,
            operation = %invocation,
            effect = %effect,
            error = ?error,
            "probe classified"
        );

        Ok(Finding {
            probe: operation.name().to_string(),
            invocation,
            tags: operation.tags().clone(),
            effect,
            error,
        })
    }
}
