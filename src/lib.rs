//! Extraction of B-rep bodies into portable NURBS documents
//!
//! A [`kernel::Kernel`] exposes bodies, faces, loops and coedges and hands out
//! native spline buffers. The [`document::Assembler`] walks them, normalizes each
//! face's surface and trim curves into immutable records and groups them into one
//! [`record::BodyDocument`] per body, ready to be written with [`document::write_document`].

pub mod config;
pub mod document;
pub mod error;
pub mod kernel;
pub mod knot;
pub mod misc;
pub mod normalize;
pub mod record;
pub mod trim;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::document::*;
    pub use crate::error::*;
    pub use crate::kernel::*;
    pub use crate::knot::*;
    pub use crate::misc::*;
    pub use crate::normalize::*;
    pub use crate::record::*;
    pub use crate::trim::*;
}
