use sdf_kernel::{Kernel, Solid3, ThreadSide, ThreadTable};
use tracing::{debug, instrument};

use crate::chamfer::chamfered_cylinder;
use crate::config::Proportions;
use crate::types::{
    require_non_negative, require_positive, SynthesisError, ThreadMode, ThreadedCylinderParms,
};

/// Threaded cylinder of the named standard, centered on the origin.
///
/// `Male` gives a screw with a chamfered top. `Female` gives the thread
/// cutting tool, to be subtracted from a body by the caller.
pub fn threaded_cylinder(
    kernel: &mut dyn Kernel,
    threads: &dyn ThreadTable,
    parms: &ThreadedCylinderParms,
) -> Result<Solid3, SynthesisError> {
    threaded_cylinder_with(kernel, threads, parms, &Proportions::default())
}

#[instrument(skip(kernel, threads, proportions), level = "debug")]
pub fn threaded_cylinder_with(
    kernel: &mut dyn Kernel,
    threads: &dyn ThreadTable,
    parms: &ThreadedCylinderParms,
    proportions: &Proportions,
) -> Result<Solid3, SynthesisError> {
    let spec = threads
        .lookup(&parms.thread)
        .ok_or_else(|| SynthesisError::UnknownThread {
            name: parms.thread.clone(),
        })?;
    require_positive("length", parms.length)?;
    require_non_negative("tolerance", parms.tolerance)?;

    let (radius, side) = match parms.mode {
        ThreadMode::Male => {
            if parms.tolerance >= spec.radius {
                return Err(SynthesisError::invalid(
                    "tolerance",
                    format!("must be smaller than the thread radius {}", spec.radius),
                ));
            }
            if !(0.0..1.0).contains(&proportions.thread_chamfer) {
                return Err(SynthesisError::invalid(
                    "thread_chamfer",
                    format!("must be in [0, 1), got {}", proportions.thread_chamfer),
                ));
            }
            (spec.radius - parms.tolerance, ThreadSide::External)
        }
        ThreadMode::Female => (spec.radius + parms.tolerance, ThreadSide::Internal),
    };
    debug!(radius, pitch = spec.pitch, "thread");

    let profile = kernel.iso_thread(radius, spec.pitch, side)?;
    let screw = kernel.screw3d(&profile, parms.length, spec.pitch, 1)?;
    match parms.mode {
        ThreadMode::Male => chamfered_cylinder(kernel, &screw, 0.0, proportions.thread_chamfer),
        ThreadMode::Female => Ok(screw),
    }
}
