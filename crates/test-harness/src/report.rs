//! Structured text reports of synthesized solids.

use std::fmt;

use sdf_kernel::Solid3;
use serde::Serialize;

use crate::helpers::{slice_area, HarnessError};
use crate::oracle::{run_solid_checks, OracleVerdict};

/// Summary of one solid: extents, sampled cross-sections and oracle verdicts.
#[derive(Debug, Clone, Serialize)]
pub struct SolidReport {
    pub name: String,
    pub bounding_box: ([f64; 3], [f64; 3]),
    /// (z, area) pairs at evenly spaced heights.
    pub slice_areas: Vec<(f64, f64)>,
    pub oracle_results: Vec<OracleVerdict>,
}

impl SolidReport {
    /// Sample `slices` cross-sections between the bottom and top of the solid
    /// and run the standard oracles.
    pub fn build(name: &str, solid: &Solid3, slices: usize, resolution: usize) -> Self {
        let bb = solid.bounding_box();
        let h = bb.size().z;
        let slice_areas = (0..slices)
            .map(|i| {
                let z = bb.min.z + h * (i as f64 + 0.5) / slices as f64;
                (z, slice_area(solid, z, resolution))
            })
            .collect();
        Self {
            name: name.to_string(),
            bounding_box: (
                [bb.min.x, bb.min.y, bb.min.z],
                [bb.max.x, bb.max.y, bb.max.z],
            ),
            slice_areas,
            oracle_results: run_solid_checks(solid, resolution.min(24)),
        }
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== Solid Report: {} ===\n\n", self.name));

        let (min, max) = self.bounding_box;
        out.push_str(&format!(
            "Bounding Box: ({:.3}, {:.3}, {:.3}) -> ({:.3}, {:.3}, {:.3})\n",
            min[0], min[1], min[2], max[0], max[1], max[2],
        ));

        if !self.slice_areas.is_empty() {
            out.push_str(&format!("\nCross Sections ({}):\n", self.slice_areas.len()));
            for (z, area) in &self.slice_areas {
                out.push_str(&format!("  z={:>9.3}  area={:.3}\n", z, area));
            }
        }

        out.push_str(&format!(
            "\nOracle Results ({} checks):\n",
            self.oracle_results.len()
        ));
        for v in &self.oracle_results {
            let status = if v.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
        }
        out
    }
}

impl fmt::Display for SolidReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
