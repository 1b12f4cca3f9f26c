//! Signed distance field kernel: planar profiles, solids, sweeps and
//! combinators behind the [`Kernel`] trait, plus the thread standards table.

pub mod config;
pub mod operations;
pub mod polygon;
pub mod primitives;
pub mod recording_kernel;
pub mod sdf_kernel;
pub mod thread;
pub mod traits;
pub mod types;

pub use config::{default_tolerance, Tolerance};
pub use polygon::{nagon, Polygon, PolygonVertex, VertexBlend};
pub use recording_kernel::{KernelOp, RecordingKernel};
pub use sdf_kernel::SdfKernel;
pub use thread::{iso_thread_profile, StandardThreads, ThreadSide, ThreadSpec, ThreadTable};
pub use traits::*;
pub use types::*;
