use crate::config::Config;
use crate::error::{ExtractError, ExtractResult};
use crate::kernel::{Kernel, ScopedBuffer, SurfaceBuffer};
use crate::record::SurfaceRecord;

use super::{prepare_knots, prepare_weights};

impl SurfaceRecord {
    /// Build a surface record from a kernel buffer
    /// # Failures
    /// - if the buffer breaks the grid, knot or weight invariants
    /// - if `normalize` is set and a knot vector has a degenerate range
    pub fn try_from_buffer(buffer: &SurfaceBuffer, normalize: bool) -> ExtractResult<Self> {
        let count = buffer.count_u * buffer.count_v;
        if buffer.control_points.len() != count {
            return Err(ExtractError::invalid_buffer(
                "surface",
                format!(
                    "{} control points for a {}x{} grid",
                    buffer.control_points.len(),
                    buffer.count_u,
                    buffer.count_v
                ),
            ));
        }

        let knots_u = prepare_knots(
            "surface u",
            &buffer.knots_u,
            buffer.degree_u,
            buffer.count_u,
            normalize,
        )?;
        let knots_v = prepare_knots(
            "surface v",
            &buffer.knots_v,
            buffer.degree_v,
            buffer.count_v,
            normalize,
        )?;

        let rational = buffer.rational_u || buffer.rational_v;
        let weights = prepare_weights("surface", rational, buffer.weights.as_deref(), count)?;

        Ok(Self {
            rational,
            degree_u: buffer.degree_u,
            degree_v: buffer.degree_v,
            form_u: buffer.form_u,
            form_v: buffer.form_v,
            knots_u,
            knots_v,
            count_u: buffer.count_u,
            count_v: buffer.count_v,
            // kernels hand the grid out v-fastest already
            control_points: buffer.control_points.clone(),
            weights,
            sense: buffer.sense,
        })
    }
}

/// Extract the spline surface of `face`
/// The kernel buffer is released before returning, on success and on failure.
pub fn extract_surface<K: Kernel + ?Sized>(
    kernel: &K,
    face: K::Face,
    config: &Config,
) -> ExtractResult<SurfaceRecord> {
    let buffer = kernel
        .surface_buffer(face, config.transform)?
        .ok_or(ExtractError::MissingSpline)?;
    let buffer = ScopedBuffer::new(kernel, buffer);
    SurfaceRecord::try_from_buffer(&buffer, config.normalize)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    use super::*;
    use crate::kernel::SplineForm;
    use crate::misc::Sense;

    fn flat(knots: Vec<f64>) -> SurfaceBuffer {
        SurfaceBuffer {
            rational_u: false,
            rational_v: false,
            form_u: SplineForm::Open,
            form_v: SplineForm::Open,
            degree_u: 1,
            degree_v: 1,
            knots_u: knots.clone(),
            knots_v: knots,
            count_u: 2,
            count_v: 2,
            control_points: vec![
                Point3::new(0., 0., 0.),
                Point3::new(0., 1., 0.),
                Point3::new(1., 0., 0.),
                Point3::new(1., 1., 0.),
            ],
            weights: None,
            sense: Sense::Forward,
        }
    }

    #[test]
    fn flat_face_is_already_normalized() {
        let buffer = flat(vec![0., 0., 1., 1.]);
        let record = SurfaceRecord::try_from_buffer(&buffer, true).unwrap();
        assert!(!record.is_rational());
        assert!(record.weights().is_none());
        assert_eq!(record.knots_u().to_vec(), vec![0., 0., 1., 1.]);
        assert_eq!(record.knots_v().to_vec(), vec![0., 0., 1., 1.]);
        assert_eq!(record.size(), (2, 2));
        assert_eq!(record.control_points(), buffer.control_points.as_slice());
        assert_eq!(record.control_point(1, 0), Some(&Point3::new(1., 0., 0.)));
        assert_eq!(record.control_point(2, 0), None);
        assert_eq!(record.control_grid()[0][1], Point3::new(0., 1., 0.));
    }

    #[test]
    fn rational_weights_keep_grid_order() {
        let mut buffer = flat(vec![0., 0., 1., 1.]);
        buffer.rational_v = true;
        buffer.weights = Some(vec![1., 1., 1., 2.]);
        let record = SurfaceRecord::try_from_buffer(&buffer, true).unwrap();
        assert!(record.is_rational());
        assert_eq!(record.weights(), Some([1., 1., 1., 2.].as_slice()));
        assert_eq!(record.weights().unwrap().len(), record.control_points().len());
    }

    #[test]
    fn normalize_per_direction() {
        let mut buffer = flat(vec![0., 0., 1., 1.]);
        buffer.degree_u = 2;
        buffer.count_u = 3;
        buffer.knots_u = vec![-1., -1., -1., 3., 3., 3.];
        buffer.knots_v = vec![10., 10., 20., 20.];
        buffer.control_points = (0..6).map(|i| Point3::new(i as f64, 0., 0.)).collect();

        let record = SurfaceRecord::try_from_buffer(&buffer, true).unwrap();
        assert_eq!(record.knots_u().to_vec(), vec![0., 0., 0., 1., 1., 1.]);
        assert_eq!(record.knots_v().to_vec(), vec![0., 0., 1., 1.]);

        let raw = SurfaceRecord::try_from_buffer(&buffer, false).unwrap();
        assert_relative_eq!(raw.knots_v()[2], 20.);
    }

    #[test]
    fn degenerate_knots_fail_only_when_normalizing() {
        let buffer = flat(vec![5., 5., 5., 5.]);
        assert!(matches!(
            SurfaceRecord::try_from_buffer(&buffer, true),
            Err(ExtractError::DegenerateDomain { .. })
        ));
        assert!(SurfaceRecord::try_from_buffer(&buffer, false).is_ok());
    }

    #[test]
    fn reject_inconsistent_buffers() {
        let mut short = flat(vec![0., 0., 1., 1.]);
        short.control_points.pop();
        assert!(matches!(
            SurfaceRecord::try_from_buffer(&short, true),
            Err(ExtractError::InvalidBuffer { .. })
        ));

        let mut unweighted = flat(vec![0., 0., 1., 1.]);
        unweighted.rational_u = true;
        assert!(SurfaceRecord::try_from_buffer(&unweighted, true).is_err());

        let mut clamped = flat(vec![0., 0., 0.5, 1., 1.]);
        clamped.knots_v = vec![0., 0., 1., 1.];
        assert!(SurfaceRecord::try_from_buffer(&clamped, true).is_err());

        let decreasing = flat(vec![0., 1., 0., 1.]);
        assert!(SurfaceRecord::try_from_buffer(&decreasing, true).is_err());
    }

    #[test]
    fn stray_weights_are_dropped() {
        let mut buffer = flat(vec![0., 0., 1., 1.]);
        buffer.weights = Some(vec![1., 1., 1., 1.]);
        let record = SurfaceRecord::try_from_buffer(&buffer, true).unwrap();
        assert!(!record.is_rational());
        assert!(record.weights().is_none());
        assert_eq!(record.control_points().len(), 4);
    }
}
