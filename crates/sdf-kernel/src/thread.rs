//! Screw thread standards: the named parameter table and the ISO profile.

use std::collections::HashMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::polygon::Polygon;
use crate::types::KernelError;

pub const MILLIMETRES_PER_INCH: f64 = 25.4;

/// Which side of the thread form is solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThreadSide {
    /// Bolt thread: material inside the major radius.
    External,
    /// Nut thread: the cutting tool for a threaded bore.
    Internal,
}

/// Geometric constants of a named thread standard. All lengths in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSpec {
    pub name: String,
    /// Major radius.
    pub radius: f64,
    pub pitch: f64,
    /// Corner radius of the matching hex head.
    pub hex_radius: f64,
    /// Height of the matching hex head.
    pub hex_height: f64,
}

impl ThreadSpec {
    /// Build a spec from the major diameter and the hex across-flats size.
    pub fn from_hex_flats(name: &str, diameter: f64, pitch: f64, hex_flat_to_flat: f64) -> Self {
        let hex_radius = hex_flat_to_flat / (2.0 * 30.0_f64.to_radians().cos());
        Self {
            name: name.to_string(),
            radius: 0.5 * diameter,
            pitch,
            hex_radius,
            hex_height: 2.0 * hex_radius * (5.0 / 12.0),
        }
    }
}

/// Name lookup for thread standards.
pub trait ThreadTable {
    fn lookup(&self, name: &str) -> Option<ThreadSpec>;
}

/// ISO metric coarse/fine and UNC threads.
///
/// Metric coarse threads are registered both by their bare name (`M6`) and
/// with the pitch suffix (`M6x1`).
#[derive(Debug, Clone)]
pub struct StandardThreads {
    entries: HashMap<String, ThreadSpec>,
}

impl StandardThreads {
    pub fn new() -> Self {
        let mut t = Self {
            entries: HashMap::new(),
        };
        // UNC: diameter (in), threads per inch, hex flat-to-flat (in)
        t.uts("unc_1/4", 1.0 / 4.0, 20.0, 7.0 / 16.0);
        t.uts("unc_5/16", 5.0 / 16.0, 18.0, 1.0 / 2.0);
        t.uts("unc_3/8", 3.0 / 8.0, 16.0, 9.0 / 16.0);
        t.uts("unc_7/16", 7.0 / 16.0, 14.0, 5.0 / 8.0);
        t.uts("unc_1/2", 1.0 / 2.0, 13.0, 3.0 / 4.0);
        t.uts("unc_9/16", 9.0 / 16.0, 12.0, 13.0 / 16.0);
        t.uts("unc_5/8", 5.0 / 8.0, 11.0, 15.0 / 16.0);
        t.uts("unc_3/4", 3.0 / 4.0, 10.0, 9.0 / 8.0);
        t.uts("unc_7/8", 7.0 / 8.0, 9.0, 21.0 / 16.0);
        t.uts("unc_1", 1.0, 8.0, 3.0 / 2.0);
        // ISO coarse: diameter, pitch, hex flat-to-flat (mm)
        t.iso_coarse("M1.6", 1.6, 0.35, 3.2);
        t.iso_coarse("M2", 2.0, 0.4, 4.0);
        t.iso_coarse("M2.5", 2.5, 0.45, 5.0);
        t.iso_coarse("M3", 3.0, 0.5, 6.0);
        t.iso_coarse("M4", 4.0, 0.7, 7.0);
        t.iso_coarse("M5", 5.0, 0.8, 8.0);
        t.iso_coarse("M6", 6.0, 1.0, 10.0);
        t.iso_coarse("M8", 8.0, 1.25, 13.0);
        t.iso_coarse("M10", 10.0, 1.5, 17.0);
        t.iso_coarse("M12", 12.0, 1.75, 19.0);
        t.iso_coarse("M16", 16.0, 2.0, 24.0);
        t.iso_coarse("M20", 20.0, 2.5, 30.0);
        t.iso_coarse("M24", 24.0, 3.0, 36.0);
        t.iso_coarse("M30", 30.0, 3.5, 46.0);
        t.iso_coarse("M36", 36.0, 4.0, 55.0);
        // ISO fine
        t.insert(ThreadSpec::from_hex_flats("M8x1", 8.0, 1.0, 13.0));
        t.insert(ThreadSpec::from_hex_flats("M10x1.25", 10.0, 1.25, 17.0));
        t.insert(ThreadSpec::from_hex_flats("M12x1.5", 12.0, 1.5, 19.0));
        t.insert(ThreadSpec::from_hex_flats("M16x1.5", 16.0, 1.5, 24.0));
        t.insert(ThreadSpec::from_hex_flats("M20x2", 20.0, 2.0, 30.0));
        t
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, spec: ThreadSpec) {
        self.entries.insert(spec.name.clone(), spec);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn iso_coarse(&mut self, name: &str, diameter: f64, pitch: f64, hex: f64) {
        self.insert(ThreadSpec::from_hex_flats(name, diameter, pitch, hex));
        let long_name = format!("{name}x{pitch}");
        self.insert(ThreadSpec::from_hex_flats(&long_name, diameter, pitch, hex));
    }

    fn uts(&mut self, name: &str, diameter: f64, tpi: f64, hex: f64) {
        self.insert(ThreadSpec::from_hex_flats(
            name,
            diameter * MILLIMETRES_PER_INCH,
            MILLIMETRES_PER_INCH / tpi,
            hex * MILLIMETRES_PER_INCH,
        ));
    }
}

impl Default for StandardThreads {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadTable for StandardThreads {
    fn lookup(&self, name: &str) -> Option<ThreadSpec> {
        self.entries.get(name).cloned()
    }
}

/// Vertices of the ISO 60° basic thread form over two pitches, in the
/// (position along pitch, radius) plane.
pub fn iso_thread_profile(
    radius: f64,
    pitch: f64,
    side: ThreadSide,
) -> Result<Vec<Point2<f64>>, KernelError> {
    if pitch <= 0.0 {
        return Err(KernelError::invalid("iso_thread", "pitch <= 0"));
    }
    let theta = 30.0_f64.to_radians();
    // height of the fundamental triangle
    let h = pitch / (2.0 * theta.tan());
    let r_major = radius;
    let r0 = r_major - (7.0 / 8.0) * h;
    if r0 <= 0.0 {
        return Err(KernelError::invalid(
            "iso_thread",
            format!("radius {radius} too small for pitch {pitch}"),
        ));
    }

    let mut iso = Polygon::new();
    match side {
        ThreadSide::External => {
            let r_root = (pitch / 8.0) / theta.cos();
            let x_ofs = pitch / 16.0;
            iso.add(pitch, 0.0);
            iso.add(pitch, r0 + h);
            iso.add(pitch / 2.0, r0).smooth(r_root, 5);
            iso.add(x_ofs, r_major);
            iso.add(-x_ofs, r_major);
            iso.add(-pitch / 2.0, r0).smooth(r_root, 5);
            iso.add(-pitch, r0 + h);
            iso.add(-pitch, 0.0);
        }
        ThreadSide::Internal => {
            let r_minor = r0 + h / 4.0;
            let r_crest = (pitch / 16.0) / theta.cos();
            let x_ofs = pitch / 8.0;
            iso.add(pitch, 0.0);
            iso.add(pitch, r_minor);
            iso.add(pitch / 2.0 - x_ofs, r_minor);
            iso.add(0.0, r0 + h).smooth(r_crest, 5);
            iso.add(-pitch / 2.0 + x_ofs, r_minor);
            iso.add(-pitch, r_minor);
            iso.add(-pitch, 0.0);
        }
    }
    Ok(iso.vertices())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_m6_lookup() {
        let table = StandardThreads::new();
        let m6 = table.lookup("M6").unwrap();
        assert_relative_eq!(m6.radius, 3.0);
        assert_relative_eq!(m6.pitch, 1.0);
        assert_relative_eq!(m6.hex_radius, 10.0 / 3.0_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(m6.hex_height, m6.hex_radius * 10.0 / 12.0, epsilon = 1e-12);
        assert_eq!(table.lookup("M6x1").unwrap().radius, m6.radius);
    }

    #[test]
    fn test_unc_converted_to_mm() {
        let table = StandardThreads::new();
        let t = table.lookup("unc_1/4").unwrap();
        assert_relative_eq!(t.radius, 0.125 * 25.4);
        assert_relative_eq!(t.pitch, 25.4 / 20.0);
    }

    #[test]
    fn test_unknown_thread() {
        assert!(StandardThreads::new().lookup("bogus").is_none());
    }

    #[test]
    fn test_custom_entry() {
        let mut table = StandardThreads::new();
        table.insert(ThreadSpec::from_hex_flats("M7", 7.0, 1.0, 11.0));
        assert!(table.lookup("M7").is_some());
        assert!(table.names().any(|n| n == "M7"));
    }

    #[test]
    fn test_external_profile_reaches_major_radius() {
        let v = iso_thread_profile(3.0, 1.0, ThreadSide::External).unwrap();
        let crest = v.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        // the flanks run past the major radius at the profile ends
        assert!(crest > 3.0);
        assert!(v.iter().any(|p| (p.y - 3.0).abs() < 1e-12 && p.x.abs() < 0.1));
    }

    #[test]
    fn test_internal_profile_crest_below_major() {
        let v = iso_thread_profile(3.0, 1.0, ThreadSide::Internal).unwrap();
        let top = v.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let h = 1.0 / (2.0 * 30.0_f64.to_radians().tan());
        assert!(top < 3.0 + h / 8.0);
    }

    #[test]
    fn test_profile_rejects_bad_input() {
        assert!(iso_thread_profile(3.0, 0.0, ThreadSide::External).is_err());
        assert!(iso_thread_profile(0.2, 1.0, ThreadSide::Internal).is_err());
    }
}
