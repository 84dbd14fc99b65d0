pub mod curve;
pub mod frame;
pub mod surface;

pub use curve::*;
pub use frame::*;
pub use surface::*;

use crate::error::{ExtractError, ExtractResult};
use crate::knot::KnotVector;

/// Validate a knot vector against its control point count and optionally rescale it
fn prepare_knots(
    what: &'static str,
    knots: &[f64],
    degree: usize,
    count: usize,
    normalize: bool,
) -> ExtractResult<KnotVector<f64>> {
    let knots = KnotVector::new(knots.to_vec());
    if !knots.is_non_decreasing() {
        return Err(ExtractError::invalid_buffer(what, "decreasing knot vector"));
    }
    if knots.is_clamped(degree) && knots.clamped_control_point_count(degree) != Some(count) {
        return Err(ExtractError::invalid_buffer(
            what,
            format!(
                "{} control points for {} knots of degree {}",
                count,
                knots.len(),
                degree
            ),
        ));
    }
    if normalize {
        knots.try_normalize()
    } else {
        Ok(knots)
    }
}

/// Copy weights, present iff the record is rational
/// Weights on a non-rational buffer are dropped.
fn prepare_weights(
    what: &'static str,
    rational: bool,
    weights: Option<&[f64]>,
    count: usize,
) -> ExtractResult<Option<Vec<f64>>> {
    match (rational, weights) {
        (true, Some(weights)) if weights.len() == count => Ok(Some(weights.to_vec())),
        (true, Some(weights)) => Err(ExtractError::invalid_buffer(
            what,
            format!("{} weights for {} control points", weights.len(), count),
        )),
        (true, None) => Err(ExtractError::invalid_buffer(what, "rational without weights")),
        (false, Some(_)) => {
            log::warn!("dropping weights of non-rational {} buffer", what);
            Ok(None)
        }
        (false, None) => Ok(None),
    }
}
