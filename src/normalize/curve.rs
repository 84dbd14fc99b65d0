use crate::config::Config;
use crate::error::{ExtractError, ExtractResult};
use crate::kernel::{CurveBuffer, Kernel, ScopedBuffer};
use crate::misc::Sense;
use crate::record::TrimCurveRecord;

use super::{prepare_knots, prepare_weights, ParametricFrame};

impl TrimCurveRecord {
    /// Build a trim curve record from a kernel buffer
    /// Control points are mapped through `frame` when `normalize` is set.
    pub fn try_from_buffer(
        buffer: &CurveBuffer,
        frame: &ParametricFrame,
        normalize: bool,
        sense: Option<Sense>,
    ) -> ExtractResult<Self> {
        let count = buffer.control_points.len();
        if count == 0 {
            return Err(ExtractError::invalid_buffer("trim curve", "no control points"));
        }
        let knots = prepare_knots("trim curve", &buffer.knots, buffer.degree, count, normalize)?;
        let weights = prepare_weights(
            "trim curve",
            buffer.rational,
            buffer.weights.as_deref(),
            count,
        )?;
        let control_points = if normalize {
            buffer
                .control_points
                .iter()
                .map(|p| frame.try_normalize(p))
                .collect::<ExtractResult<Vec<_>>>()?
        } else {
            buffer.control_points.clone()
        };

        Ok(Self {
            degree: buffer.degree,
            rational: buffer.rational,
            knots,
            control_points,
            weights,
            sense,
        })
    }
}

/// Extract the parameter space curve of `coedge` on `face`
/// The curve must already be in spline form.
pub fn extract_trim_curve<K: Kernel + ?Sized>(
    kernel: &K,
    coedge: K::Coedge,
    face: K::Face,
    frame: &ParametricFrame,
    config: &Config,
) -> ExtractResult<TrimCurveRecord> {
    let sense = kernel.coedge_sense(coedge)?;
    let buffer = ScopedBuffer::new(kernel, kernel.curve_buffer(coedge, face, config.transform)?);
    TrimCurveRecord::try_from_buffer(
        &buffer,
        frame,
        config.normalize,
        config.sense.then_some(sense),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    use super::*;

    fn line() -> CurveBuffer {
        CurveBuffer {
            degree: 1,
            rational: false,
            knots: vec![3., 3., 7., 7.],
            control_points: vec![Point2::new(2., 10.), Point2::new(4., 15.)],
            weights: None,
        }
    }

    #[test]
    fn rescale_into_face_domain() {
        let frame = ParametricFrame::new([2., 10.], [4., 5.]);
        let record =
            TrimCurveRecord::try_from_buffer(&line(), &frame, true, Some(Sense::Reversed))
                .unwrap();
        assert_eq!(record.degree(), 1);
        assert_eq!(record.knots().to_vec(), vec![0., 0., 1., 1.]);
        assert_eq!(record.control_points()[0], Point2::new(0., 0.));
        assert_relative_eq!(record.control_points()[1], Point2::new(0.5, 1.));
        assert_eq!(record.sense(), Some(Sense::Reversed));
        assert!(record.weights().is_none());
    }

    #[test]
    fn copy_verbatim_without_normalization() {
        let frame = ParametricFrame::new([0., 0.], [0., 0.]);
        let record = TrimCurveRecord::try_from_buffer(&line(), &frame, false, None).unwrap();
        assert_eq!(record.control_points(), line().control_points.as_slice());
        assert_eq!(record.knots().to_vec(), line().knots);
        assert_eq!(record.sense(), None);
    }

    #[test]
    fn zero_length_domain_is_degenerate() {
        let frame = ParametricFrame::new([0., 0.], [0., 1.]);
        assert!(matches!(
            TrimCurveRecord::try_from_buffer(&line(), &frame, true, None),
            Err(ExtractError::DegenerateDomain { .. })
        ));
    }

    #[test]
    fn rational_curve_weights() {
        let mut buffer = line();
        buffer.rational = true;
        buffer.weights = Some(vec![1., 0.5]);
        let frame = ParametricFrame::new([0., 0.], [10., 20.]);
        let record = TrimCurveRecord::try_from_buffer(&buffer, &frame, true, None).unwrap();
        assert!(record.is_rational());
        assert_eq!(record.weights(), Some([1., 0.5].as_slice()));

        buffer.weights = Some(vec![1.]);
        assert!(TrimCurveRecord::try_from_buffer(&buffer, &frame, true, None).is_err());
    }

    #[test]
    fn stray_curve_weights_are_dropped() {
        let mut buffer = line();
        buffer.weights = Some(vec![1., 1.]);
        let frame = ParametricFrame::new([0., 0.], [10., 20.]);
        let record = TrimCurveRecord::try_from_buffer(&buffer, &frame, true, None).unwrap();
        assert!(!record.is_rational());
        assert!(record.weights().is_none());
    }
}
