use std::f64::consts::{FRAC_PI_2, TAU};

use sdf_kernel::{Kernel, Polygon, Solid3};
use tracing::{debug, instrument};

use crate::config::Proportions;
use crate::types::{require_positive, KnurlParms, KnurledHeadDims, SynthesisError};

/// Number of helix starts that realises helix angle `theta` at the given
/// radius and pitch. Fractional starts are truncated.
pub fn knurl_starts(radius: f64, pitch: f64, theta: f64) -> i32 {
    (TAU * radius * theta.tan() / pitch).floor() as i32
}

impl KnurlParms {
    pub fn validate(&self) -> Result<(), SynthesisError> {
        require_positive("length", self.length)?;
        require_positive("radius", self.radius)?;
        require_positive("pitch", self.pitch)?;
        require_positive("height", self.height)?;
        if !(0.0..FRAC_PI_2).contains(&self.theta) {
            return Err(SynthesisError::invalid(
                "theta",
                format!("must be in [0, π/2), got {}", self.theta),
            ));
        }
        Ok(())
    }
}

/// Diamond knurl: two opposite-handed multi-start screws of a pointed
/// ridge profile, intersected.
#[instrument(skip(kernel), level = "debug")]
pub fn knurl3d(kernel: &mut dyn Kernel, parms: &KnurlParms) -> Result<Solid3, SynthesisError> {
    parms.validate()?;
    let starts = knurl_starts(parms.radius, parms.pitch, parms.theta);
    debug!(starts, "knurl helix starts");

    let half_pitch = 0.5 * parms.pitch;
    let mut ridge = Polygon::new();
    ridge.add(half_pitch, 0.0);
    ridge.add(half_pitch, parms.radius);
    ridge.add(0.0, parms.radius + parms.height);
    ridge.add(-half_pitch, parms.radius);
    ridge.add(-half_pitch, 0.0);
    let profile = kernel.polygon2d(&ridge.vertices())?;

    let right = kernel.screw3d(&profile, parms.length, parms.pitch, starts)?;
    let left = kernel.screw3d(&profile, parms.length, parms.pitch, -starts)?;
    Ok(kernel.intersect3d(&[right, left])?)
}

/// Dimensions of a knurled head of the given radius and height.
///
/// The knurl band is shortened to a whole number of pitches so the pattern
/// ends on complete diamonds.
pub fn knurled_head_dims(
    radius: f64,
    height: f64,
    pitch: f64,
    proportions: &Proportions,
) -> Result<KnurledHeadDims, SynthesisError> {
    require_positive("radius", radius)?;
    require_positive("height", height)?;
    require_positive("pitch", pitch)?;

    let cylinder_round = radius * proportions.head_round;
    if !(0.0..=radius).contains(&cylinder_round) {
        return Err(SynthesisError::invalid(
            "head_round",
            format!("edge round {cylinder_round} must be in [0, {radius}]"),
        ));
    }
    if height < 2.0 * cylinder_round {
        return Err(SynthesisError::invalid(
            "height",
            format!("head of height {height} cannot take an edge round of {cylinder_round}"),
        ));
    }
    let knurl_length = pitch * ((height - cylinder_round) / pitch).floor();
    if knurl_length <= 0.0 {
        return Err(SynthesisError::invalid(
            "height",
            format!("head of height {height} is shorter than one knurl pitch {pitch}"),
        ));
    }
    Ok(KnurledHeadDims {
        cylinder_round,
        knurl_length,
        knurl_height: pitch * proportions.knurl_height,
        theta: proportions.knurl_theta,
    })
}

/// Rounded cylinder with a knurled band, using the default proportions.
pub fn knurled_head3d(
    kernel: &mut dyn Kernel,
    radius: f64,
    height: f64,
    pitch: f64,
) -> Result<Solid3, SynthesisError> {
    knurled_head3d_with(kernel, radius, height, pitch, &Proportions::default())
}

#[instrument(skip(kernel, proportions), level = "debug")]
pub fn knurled_head3d_with(
    kernel: &mut dyn Kernel,
    radius: f64,
    height: f64,
    pitch: f64,
    proportions: &Proportions,
) -> Result<Solid3, SynthesisError> {
    let dims = knurled_head_dims(radius, height, pitch, proportions)?;
    let knurl = KnurlParms {
        length: dims.knurl_length,
        radius,
        pitch,
        height: dims.knurl_height,
        theta: dims.theta,
    };
    knurl.validate()?;
    debug!(knurl_length = dims.knurl_length, "knurled head");

    let cylinder = kernel.cylinder3d(height, radius, dims.cylinder_round)?;
    let band = knurl3d(kernel, &knurl)?;
    Ok(kernel.union3d(&[cylinder, band])?)
}
