use nalgebra::Point2;

use crate::error::{ExtractError, ExtractResult};
use crate::kernel::ParamRange;

/// Offset and length of a face's parametric domain per axis
/// Computed once per face and shared by all of its trim curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametricFrame {
    offset: [f64; 2],
    length: [f64; 2],
}

impl ParametricFrame {
    pub fn new(offset: [f64; 2], length: [f64; 2]) -> Self {
        Self { offset, length }
    }

    pub fn from_range(range: &ParamRange) -> Self {
        Self {
            offset: [range.u.0, range.v.0],
            length: [range.u.1 - range.u.0, range.v.1 - range.v.0],
        }
    }

    pub fn offset(&self) -> [f64; 2] {
        self.offset
    }

    pub fn length(&self) -> [f64; 2] {
        self.length
    }

    /// Map a parametric point into the unit square, `(c - offset) / length` per axis
    pub fn try_normalize(&self, point: &Point2<f64>) -> ExtractResult<Point2<f64>> {
        let mut normalized = Point2::origin();
        for axis in 0..2 {
            let length = self.length[axis];
            if !(length.abs() > 0.) || !length.is_finite() {
                return Err(ExtractError::DegenerateDomain {
                    what: if axis == 0 { "parametric u" } else { "parametric v" },
                    start: self.offset[axis],
                    end: self.offset[axis] + length,
                });
            }
            normalized[axis] = (point[axis] - self.offset[axis]) / length;
        }
        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_into_unit_square() {
        let frame = ParametricFrame::from_range(&ParamRange {
            u: (-2., 2.),
            v: (10., 15.),
        });
        assert_eq!(frame.offset(), [-2., 10.]);
        assert_eq!(frame.length(), [4., 5.]);
        let p = frame.try_normalize(&Point2::new(0., 15.)).unwrap();
        assert_eq!(p, Point2::new(0.5, 1.));
    }

    #[test]
    fn zero_length_axis() {
        let frame = ParametricFrame::new([0., 1.], [1., 0.]);
        assert!(matches!(
            frame.try_normalize(&Point2::new(0.5, 1.)),
            Err(ExtractError::DegenerateDomain {
                what: "parametric v",
                ..
            })
        ));
    }
}
