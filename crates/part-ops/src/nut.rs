use sdf_kernel::{Kernel, Solid3, ThreadSide, ThreadTable};
use tracing::{debug, instrument};

use crate::config::Proportions;
use crate::hex_head::hex_head3d_with;
use crate::knurl::{knurled_head3d_with, knurled_head_dims};
use crate::types::{require_non_negative, HeadStyle, HexRound, NutParms, SynthesisError};

/// Nut for the named thread: a hex or knurled body minus an internal thread.
pub fn nut(
    kernel: &mut dyn Kernel,
    threads: &dyn ThreadTable,
    parms: &NutParms,
) -> Result<Solid3, SynthesisError> {
    nut_with(kernel, threads, parms, &Proportions::default())
}

#[instrument(skip(kernel, threads, proportions), level = "debug")]
pub fn nut_with(
    kernel: &mut dyn Kernel,
    threads: &dyn ThreadTable,
    parms: &NutParms,
    proportions: &Proportions,
) -> Result<Solid3, SynthesisError> {
    let spec = threads
        .lookup(&parms.thread)
        .ok_or_else(|| SynthesisError::UnknownThread {
            name: parms.thread.clone(),
        })?;
    require_non_negative("tolerance", parms.tolerance)?;

    let (hex_r, hex_h) = (spec.hex_radius, spec.hex_height);
    let knurl_pitch = hex_r * proportions.nut_knurl_pitch;
    if parms.style == HeadStyle::Knurl {
        // head dimensions are validated before any kernel call
        knurled_head_dims(hex_r, hex_h, knurl_pitch, proportions)?;
    }
    debug!(hex_r, hex_h, pitch = spec.pitch, "nut dimensions");

    let body = match parms.style {
        HeadStyle::Hex => hex_head3d_with(kernel, hex_r, hex_h, HexRound::Both, proportions)?,
        HeadStyle::Knurl => knurled_head3d_with(kernel, hex_r, hex_h, knurl_pitch, proportions)?,
    };
    let profile = kernel.iso_thread(spec.radius + parms.tolerance, spec.pitch, ThreadSide::Internal)?;
    let thread = kernel.screw3d(&profile, hex_h, spec.pitch, 1)?;
    Ok(kernel.difference3d(&body, &thread))
}
