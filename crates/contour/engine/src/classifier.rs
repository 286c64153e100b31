//! Effect classification.

use contour_containers::Snapshot;
use contour_types::{ContainerResult, Effect};

/// Effect of a call that returned normally, from the state before and
/// after it.
pub fn classify(before: &Snapshot, after: &Snapshot) -> Effect {
    if before.len() != after.len() {
        Effect::SizeAltering
    } else if before != after {
        Effect::Modifying
    } else {
        Effect::NonModifying
    }
}

/// Effect captured on the calibration copy, if the copy refused the call
/// with a positional error.
pub fn calibration_effect(outcome: &ContainerResult<()>) -> Option<Effect> {
    outcome
        .as_ref()
        .err()
        .and_then(|err| Effect::from_error_kind(err.kind))
}
