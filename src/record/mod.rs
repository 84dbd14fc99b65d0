pub mod document;
pub mod loop_record;
pub mod surface_record;
pub mod trim_curve_record;

pub use document::*;
pub use loop_record::*;
pub use surface_record::*;
pub use trim_curve_record::*;

use serde::Serialize;

/// `control_points` object shared by surfaces and trim curves
#[derive(Serialize)]
struct ControlPointsDef<'a, P: Serialize> {
    points: Vec<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    weights: Option<&'a [f64]>,
}
