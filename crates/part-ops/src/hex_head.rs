use nalgebra::Vector3;
use sdf_kernel::{nagon, Kernel, Solid3};
use tracing::{debug, instrument};

use crate::config::Proportions;
use crate::types::{require_positive, HexRound, SynthesisError};

/// Hexagonal head with rounded corners, optionally domed at either end.
pub fn hex_head3d(
    kernel: &mut dyn Kernel,
    radius: f64,
    height: f64,
    round: HexRound,
) -> Result<Solid3, SynthesisError> {
    hex_head3d_with(kernel, radius, height, round, &Proportions::default())
}

#[instrument(skip(kernel, proportions), level = "debug")]
pub fn hex_head3d_with(
    kernel: &mut dyn Kernel,
    radius: f64,
    height: f64,
    round: HexRound,
    proportions: &Proportions,
) -> Result<Solid3, SynthesisError> {
    require_positive("radius", radius)?;
    require_positive("height", height)?;
    let corner_round = radius * proportions.hex_corner_round;
    if !(0.0..radius).contains(&corner_round) {
        return Err(SynthesisError::invalid(
            "hex_corner_round",
            format!("corner round {corner_round} must be in [0, {radius})"),
        ));
    }
    // distance from the axis to the middle of a flat
    let flat = radius * 30.0_f64.to_radians().cos();
    let dome_radius = radius * proportions.hex_dome_radius;
    if round != HexRound::None && dome_radius <= flat {
        return Err(SynthesisError::invalid(
            "hex_dome_radius",
            format!("dome radius {dome_radius} does not clear the flats at {flat}"),
        ));
    }

    let hexagon = kernel.polygon2d(&nagon(6, radius - corner_round))?;
    let outline = kernel.offset2d(&hexagon, corner_round);
    let mut head = kernel.extrude3d(&outline, height)?;
    if round == HexRound::None {
        return Ok(head);
    }

    // place the sphere so it meets the end face on the inscribed circle
    let z_ofs = (dome_radius * dome_radius - flat * flat).sqrt() - 0.5 * height;
    debug!(dome_radius, z_ofs, "hex dome");
    let dome = kernel.sphere3d(dome_radius)?;
    if round.top() {
        let s = kernel.translate3d(&dome, Vector3::new(0.0, 0.0, -z_ofs));
        head = kernel.intersect3d(&[head, s])?;
    }
    if round.bottom() {
        let s = kernel.translate3d(&dome, Vector3::new(0.0, 0.0, z_ofs));
        head = kernel.intersect3d(&[head, s])?;
    }
    Ok(head)
}
