use std::ops::Deref;

use nalgebra::{Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::misc::Sense;

use super::Kernel;

/// Closure classification of one parametric direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineForm {
    /// clamped
    #[default]
    Open,
    /// unclamped but closed
    Closed,
    Periodic,
}

impl SplineForm {
    pub fn code(&self) -> u8 {
        match self {
            SplineForm::Open => 0,
            SplineForm::Closed => 1,
            SplineForm::Periodic => 2,
        }
    }
}

/// Native array form of a 3D B-spline surface, as handed out by a kernel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBuffer {
    #[serde(default)]
    pub rational_u: bool,
    #[serde(default)]
    pub rational_v: bool,
    #[serde(default)]
    pub form_u: SplineForm,
    #[serde(default)]
    pub form_v: SplineForm,
    pub degree_u: usize,
    pub degree_v: usize,
    pub knots_u: Vec<f64>,
    pub knots_v: Vec<f64>,
    pub count_u: usize,
    pub count_v: usize,
    /// Control point grid in v-fastest order
    pub control_points: Vec<Point3<f64>>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    #[serde(default)]
    pub sense: Sense,
}

/// Native array form of a 2D B-spline curve in a face's parameter space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveBuffer {
    pub degree: usize,
    #[serde(default)]
    pub rational: bool,
    pub knots: Vec<f64>,
    pub control_points: Vec<Point2<f64>>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
}

/// Parametric range of a surface, `(start, end)` per direction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub u: (f64, f64),
    pub v: (f64, f64),
}

/// A buffer the kernel expects back once its content has been copied
pub trait KernelBuffer<K: Kernel + ?Sized>: Sized {
    fn release(self, kernel: &K);
}

impl<K: Kernel + ?Sized> KernelBuffer<K> for SurfaceBuffer {
    fn release(self, kernel: &K) {
        kernel.release_surface_buffer(self);
    }
}

impl<K: Kernel + ?Sized> KernelBuffer<K> for CurveBuffer {
    fn release(self, kernel: &K) {
        kernel.release_curve_buffer(self);
    }
}

/// Scoped ownership of a kernel buffer
/// The buffer is handed back to the kernel when the guard is dropped, on every exit path.
pub struct ScopedBuffer<'k, K: Kernel + ?Sized, B: KernelBuffer<K>> {
    kernel: &'k K,
    buffer: Option<B>,
}

impl<'k, K: Kernel + ?Sized, B: KernelBuffer<K>> ScopedBuffer<'k, K, B> {
    pub fn new(kernel: &'k K, buffer: B) -> Self {
        Self {
            kernel,
            buffer: Some(buffer),
        }
    }
}

impl<K: Kernel + ?Sized, B: KernelBuffer<K>> Deref for ScopedBuffer<'_, K, B> {
    type Target = B;

    fn deref(&self) -> &Self::Target {
        // only `drop` takes the buffer out
        match self.buffer.as_ref() {
            Some(buffer) => buffer,
            None => unreachable!("scoped buffer accessed after release"),
        }
    }
}

impl<K: Kernel + ?Sized, B: KernelBuffer<K>> Drop for ScopedBuffer<'_, K, B> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            buffer.release(self.kernel);
        }
    }
}
