//! Geometry kernel trait definitions
//!
//! The extraction pipeline only talks to a modeling kernel through [`Kernel`].
//! Entity storage, spline conversion and persistence stay on the kernel side.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::misc::Sense;
use crate::record::LoopKind;

use super::{CurveBuffer, ParamRange, SurfaceBuffer};

/// Critical kernel failure
/// Non-critical failures are reported as [`Diagnostic`]s instead.
#[derive(Debug, Clone, Error)]
#[error("Kernel call '{call}' failed: {message}")]
pub struct KernelError {
    pub call: &'static str,
    pub message: String,
}

impl KernelError {
    pub fn new(call: &'static str, message: impl Into<String>) -> Self {
        Self {
            call,
            message: message.into(),
        }
    }
}

/// Result type for kernel calls
pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    /// The call failed but the kernel recovered
    Error,
    Warning,
}

/// Advisory message accumulated by the kernel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub call: &'static str,
    pub message: String,
}

impl Diagnostic {
    pub fn error(call: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            call,
            message: message.into(),
        }
    }

    pub fn warning(call: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            call,
            message: message.into(),
        }
    }
}

/// Outcome of unlocking a licensed kernel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockStatus {
    Pass,
    PassWithWarning(String),
    Fail(String),
}

/// Underlying geometry of a face
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Spline,
    /// Any non-spline geometry, named by the kernel
    Other(String),
}

/// Loop classification reported by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopType {
    #[default]
    Unknown,
    Periphery,
    Hole,
    Separation,
    USeparation,
    VSeparation,
    UvSeparation,
}

impl LoopType {
    /// Numeric code written to documents
    pub fn code(&self) -> u8 {
        match self {
            LoopType::Unknown => 0,
            LoopType::Periphery => 1,
            LoopType::Hole => 2,
            LoopType::Separation => 3,
            LoopType::USeparation => 4,
            LoopType::VSeparation => 5,
            LoopType::UvSeparation => 6,
        }
    }

    pub fn kind(&self) -> LoopKind {
        match self {
            LoopType::Periphery => LoopKind::Periphery,
            LoopType::Hole => LoopKind::Hole,
            _ => LoopKind::Other,
        }
    }
}

/// Interface to a B-rep modeling kernel
///
/// Handles are cheap copies that stay valid for the lifetime of the kernel.
/// Every enumeration returns entities in the kernel's own order.
pub trait Kernel {
    type Body: Copy + Debug;
    type Face: Copy + Debug;
    type Loop: Copy + Debug;
    type Coedge: Copy + Debug;

    /// Unlock a licensed kernel
    fn unlock(&mut self, _license: &str) -> KernelResult<UnlockStatus> {
        Ok(UnlockStatus::Pass)
    }

    /// Top level entities of the loaded model
    fn entities(&self) -> KernelResult<Vec<Self::Body>>;

    /// Split periodic faces so that every face has a seam-free domain
    fn split_periodic_faces(&mut self, body: Self::Body) -> KernelResult<()>;

    /// Drop the body transform, leaving geometry in local coordinates
    fn remove_transform(&mut self, body: Self::Body) -> KernelResult<()>;

    fn faces(&self, body: Self::Body) -> KernelResult<Vec<Self::Face>>;

    fn face_sense(&self, face: Self::Face) -> KernelResult<Sense>;

    /// Convert the face and its edges to spline geometry in place
    fn convert_to_spline(&mut self, face: Self::Face) -> KernelResult<()>;

    fn face_geometry(&self, face: Self::Face) -> KernelResult<Geometry>;

    /// Array form of the face's spline surface
    /// Returns `None` if the kernel cannot compute one.
    fn surface_buffer(
        &self,
        face: Self::Face,
        apply_transform: bool,
    ) -> KernelResult<Option<SurfaceBuffer>>;

    /// Parametric range of the face's spline surface
    fn surface_range(&self, face: Self::Face) -> KernelResult<ParamRange>;

    fn loops(&self, face: Self::Face) -> KernelResult<Vec<Self::Loop>>;

    fn loop_type(&self, lp: Self::Loop) -> KernelResult<LoopType>;

    fn coedges(&self, lp: Self::Loop) -> KernelResult<Vec<Self::Coedge>>;

    fn coedge_sense(&self, coedge: Self::Coedge) -> KernelResult<Sense>;

    /// Array form of the coedge's parameter space curve on `face`
    /// The geometry must already be a spline, see [`Kernel::convert_to_spline`].
    fn curve_buffer(
        &self,
        coedge: Self::Coedge,
        face: Self::Face,
        apply_transform: bool,
    ) -> KernelResult<CurveBuffer>;

    fn release_surface_buffer(&self, buffer: SurfaceBuffer) {
        drop(buffer);
    }

    fn release_curve_buffer(&self, buffer: CurveBuffer) {
        drop(buffer);
    }

    /// Drain the diagnostics accumulated since the last call
    fn take_diagnostics(&mut self) -> Vec<Diagnostic>;
}
