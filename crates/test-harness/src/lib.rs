//! Test harness for synthesized parts.
//!
//! Samples solids through their distance functions and checks the
//! geometric properties each part promises.
//!
//! # Key Components
//!
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Text and JSON summaries of a solid
//! - [`helpers`]: Error type, slice and lattice sampling
//! - [`assertions`]: Assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;

pub use helpers::{slice_area, slice_membership, HarnessError, Slice};
pub use oracle::OracleVerdict;
pub use report::SolidReport;
