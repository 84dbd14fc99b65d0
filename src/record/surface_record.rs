use nalgebra::Point3;

use crate::kernel::SplineForm;
use crate::knot::KnotVector;
use crate::misc::{grid_index, unflatten_grid, Sense};

/// Canonical record of one face's B-spline surface
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRecord {
    pub(crate) rational: bool,
    pub(crate) degree_u: usize,
    pub(crate) degree_v: usize,
    pub(crate) form_u: SplineForm,
    pub(crate) form_v: SplineForm,
    pub(crate) knots_u: KnotVector<f64>,
    pub(crate) knots_v: KnotVector<f64>,
    pub(crate) count_u: usize,
    pub(crate) count_v: usize,
    /// v-fastest control point grid
    pub(crate) control_points: Vec<Point3<f64>>,
    /// present iff `rational`, parallel to `control_points`
    pub(crate) weights: Option<Vec<f64>>,
    pub(crate) sense: Sense,
}

impl SurfaceRecord {
    pub fn is_rational(&self) -> bool {
        self.rational
    }

    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    pub fn form_u(&self) -> SplineForm {
        self.form_u
    }

    pub fn form_v(&self) -> SplineForm {
        self.form_v
    }

    pub fn knots_u(&self) -> &KnotVector<f64> {
        &self.knots_u
    }

    pub fn knots_v(&self) -> &KnotVector<f64> {
        &self.knots_v
    }

    /// Number of control points in (u, v)
    pub fn size(&self) -> (usize, usize) {
        (self.count_u, self.count_v)
    }

    pub fn control_points(&self) -> &[Point3<f64>] {
        &self.control_points
    }

    /// Control point at (u, v) of the grid
    pub fn control_point(&self, u: usize, v: usize) -> Option<&Point3<f64>> {
        if u >= self.count_u || v >= self.count_v {
            return None;
        }
        self.control_points.get(grid_index(u, v, self.count_v))
    }

    /// Control points reshaped into rows (`grid[u][v]`)
    pub fn control_grid(&self) -> Vec<Vec<Point3<f64>>> {
        unflatten_grid(&self.control_points, self.count_u, self.count_v).unwrap_or_default()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Sense of the surface relative to its own equation
    pub fn sense(&self) -> Sense {
        self.sense
    }
}
