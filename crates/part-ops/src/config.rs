use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

/// Fixed proportions used by the composite parts, as fractions of the
/// part's own radius or pitch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proportions {
    /// Edge round of a knurled head's cylinder, times its radius.
    pub head_round: f64,
    /// Knurl ridge height on a knurled head, times the knurl pitch.
    pub knurl_height: f64,
    /// Knurl helix angle on a knurled head (radians).
    pub knurl_theta: f64,
    /// Knurl pitch of a knurled nut, times the hex radius.
    pub nut_knurl_pitch: f64,
    /// Corner round of a hex head, times its radius.
    pub hex_corner_round: f64,
    /// Radius of the doming sphere on a hex head, times its radius.
    pub hex_dome_radius: f64,
    /// Top chamfer factor of a male threaded cylinder.
    pub thread_chamfer: f64,
}

impl Default for Proportions {
    fn default() -> Self {
        Self {
            head_round: 0.05,
            knurl_height: 0.3,
            knurl_theta: FRAC_PI_4,
            nut_knurl_pitch: 0.25,
            hex_corner_round: 0.08,
            hex_dome_radius: 1.6,
            thread_chamfer: 0.25,
        }
    }
}

impl Proportions {
    /// Sharp-edged variant: no cylinder round, no hex corner round and no chamfer.
    pub fn sharp() -> Self {
        Self {
            head_round: 0.0,
            hex_corner_round: 0.0,
            thread_chamfer: 0.0,
            ..Self::default()
        }
    }
}
