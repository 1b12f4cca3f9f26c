use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;
use sdf_kernel::KernelError;
use serde::{Deserialize, Serialize};

/// Errors from part synthesis. Parameter checks run before any kernel call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("invalid parameter {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("unknown thread standard: {name}")]
    UnknownThread { name: String },

    #[error("unknown style: {style}")]
    UnknownStyle { style: String },

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

impl SynthesisError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SynthesisError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SynthesisError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), SynthesisError> {
    // NaN fails the comparison
    if !(value > 0.0) {
        return Err(SynthesisError::invalid(field, format!("must be > 0, got {value}")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), SynthesisError> {
    if !(value >= 0.0) {
        return Err(SynthesisError::invalid(field, format!("must be >= 0, got {value}")));
    }
    Ok(())
}

// ── Parameter records ───────────────────────────────────────────────────────

/// Diamond knurl over a cylinder of `length` and `radius`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnurlParms {
    pub length: f64,
    pub radius: f64,
    /// Axial period of the ridges.
    pub pitch: f64,
    /// Ridge height above the cylinder surface.
    pub height: f64,
    /// Helix angle in radians, `0 <= theta < π/2`.
    pub theta: f64,
}

/// Body shape of a nut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HeadStyle {
    Hex,
    Knurl,
}

impl HeadStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadStyle::Hex => "hex",
            HeadStyle::Knurl => "knurl",
        }
    }
}

impl FromStr for HeadStyle {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(HeadStyle::Hex),
            "knurl" => Ok(HeadStyle::Knurl),
            other => Err(SynthesisError::UnknownStyle {
                style: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for HeadStyle {
    type Error = SynthesisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HeadStyle> for String {
    fn from(style: HeadStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for HeadStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutParms {
    /// Thread standard name, e.g. `M6` or `unc_1/4`.
    pub thread: String,
    pub style: HeadStyle,
    /// Radial clearance added to the internal thread.
    pub tolerance: f64,
}

impl NutParms {
    /// Build from a style name, failing with `UnknownStyle` for unrecognised values.
    pub fn parse(thread: &str, style: &str, tolerance: f64) -> Result<Self, SynthesisError> {
        Ok(Self {
            thread: thread.to_string(),
            style: style.parse()?,
            tolerance,
        })
    }
}

/// Rectangular pyramid with rounded edges, truncated at `size.z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncRectPyramidParms {
    pub size: Vector3<f64>,
    /// Slope of the side walls in radians, `0 < base_angle <= π/2`.
    pub base_angle: f64,
    /// Corner radius of the base footprint.
    pub base_radius: f64,
    /// Edge rounding radius.
    pub round_radius: f64,
}

/// Quantities derived from [`TruncRectPyramidParms`] before any solid is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncRectPyramidDims {
    pub h: f64,
    /// Horizontal draft offset between base and top.
    pub dr: f64,
    /// Base corner radius.
    pub rb: f64,
    /// Top corner radius; zero means a pointed top.
    pub rt: f64,
    /// Clamped edge rounding.
    pub round: f64,
    pub wx: f64,
    pub wy: f64,
}

/// Derived dimensions of a knurled head.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnurledHeadDims {
    pub cylinder_round: f64,
    /// Whole number of pitches covered by the knurl band.
    pub knurl_length: f64,
    pub knurl_height: f64,
    pub theta: f64,
}

/// Which ends of a hex head are domed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexRound {
    #[default]
    None,
    Top,
    Bottom,
    Both,
}

impl HexRound {
    pub fn top(&self) -> bool {
        matches!(self, HexRound::Top | HexRound::Both)
    }

    pub fn bottom(&self) -> bool {
        matches!(self, HexRound::Bottom | HexRound::Both)
    }
}

/// Gender of a threaded cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ThreadMode {
    /// Solid screw.
    Male,
    /// Cutting tool for a threaded bore.
    Female,
}

impl ThreadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadMode::Male => "male",
            ThreadMode::Female => "female",
        }
    }
}

impl FromStr for ThreadMode {
    type Err = SynthesisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(ThreadMode::Male),
            "female" => Ok(ThreadMode::Female),
            other => Err(SynthesisError::UnknownStyle {
                style: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ThreadMode {
    type Error = SynthesisError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ThreadMode> for String {
    fn from(mode: ThreadMode) -> Self {
        mode.as_str().to_string()
    }
}

impl fmt::Display for ThreadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadedCylinderParms {
    pub thread: String,
    pub length: f64,
    /// Radial clearance: shrinks a male thread, grows a female one.
    pub tolerance: f64,
    pub mode: ThreadMode,
}
