//! Parametric part synthesis on top of the SDF kernel.
//!
//! Each part function takes `&mut dyn Kernel` and a parameter record,
//! validates every parameter, then composes kernel operations into a solid.

pub mod chamfer;
pub mod config;
pub mod hex_head;
pub mod knurl;
pub mod nut;
pub mod pyramid;
pub mod threaded;
pub mod types;

pub use chamfer::chamfered_cylinder;
pub use config::Proportions;
pub use hex_head::{hex_head3d, hex_head3d_with};
pub use knurl::{knurl3d, knurl_starts, knurled_head3d, knurled_head3d_with, knurled_head_dims};
pub use nut::{nut, nut_with};
pub use pyramid::trunc_rect_pyramid3d;
pub use threaded::{threaded_cylinder, threaded_cylinder_with};
pub use types::*;
