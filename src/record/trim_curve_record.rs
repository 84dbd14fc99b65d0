use nalgebra::Point2;
use serde::ser::SerializeStruct;

use crate::knot::KnotVector;
use crate::misc::Sense;

use super::ControlPointsDef;

/// Canonical record of one trim curve
/// Control points live in the owning face's (normalized) parameter space.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimCurveRecord {
    pub(crate) degree: usize,
    pub(crate) rational: bool,
    pub(crate) knots: KnotVector<f64>,
    pub(crate) control_points: Vec<Point2<f64>>,
    pub(crate) weights: Option<Vec<f64>>,
    /// `None` when sense output is disabled
    pub(crate) sense: Option<Sense>,
}

impl TrimCurveRecord {
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_rational(&self) -> bool {
        self.rational
    }

    pub fn knots(&self) -> &KnotVector<f64> {
        &self.knots
    }

    pub fn control_points(&self) -> &[Point2<f64>] {
        &self.control_points
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn sense(&self) -> Option<Sense> {
        self.sense
    }
}

impl serde::Serialize for TrimCurveRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("TrimCurveRecord", 6)?;
        state.serialize_field(
            "control_points",
            &ControlPointsDef {
                points: self.control_points.iter().map(|p| [p.x, p.y]).collect(),
                weights: self.weights(),
            },
        )?;
        state.serialize_field("degree", &self.degree)?;
        state.serialize_field("knotvector", self.knots.as_slice())?;
        state.serialize_field("rational", &self.rational)?;
        match &self.sense {
            Some(sense) => state.serialize_field("sense", sense)?,
            None => state.skip_field("sense")?,
        }
        state.serialize_field("type", "spline")?;
        state.end()
    }
}
