use serde::ser::SerializeStruct;
use serde::Serialize;

use crate::error::ExtractError;
use crate::misc::Sense;

use super::{ControlPointsDef, LoopRecord, SurfaceRecord};

/// One extracted face: its surface, its trimming loops and its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct FaceDocument {
    pub(crate) id: usize,
    /// Sense of the face itself, `None` when sense output is disabled
    pub(crate) sense: Option<Sense>,
    pub(crate) surface: SurfaceRecord,
    /// `None` when trim extraction is disabled
    pub(crate) trims: Option<Vec<LoopRecord>>,
}

impl FaceDocument {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn sense(&self) -> Option<Sense> {
        self.sense
    }

    pub fn surface(&self) -> &SurfaceRecord {
        &self.surface
    }

    pub fn loops(&self) -> &[LoopRecord] {
        self.trims.as_deref().unwrap_or_default()
    }

    pub fn loop_count(&self) -> usize {
        self.loops().len()
    }

    pub fn has_trims(&self) -> bool {
        self.trims.is_some()
    }
}

#[derive(Serialize)]
struct TrimsDef<'a> {
    count: usize,
    data: &'a [LoopRecord],
}

/// Legacy surface entry
/// `form_u` / `form_v` repeat the degrees, the closure form goes to `surface_form_u` / `surface_form_v`.
impl Serialize for FaceDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let surface = &self.surface;
        let mut state = serializer.serialize_struct("FaceDocument", 15)?;
        state.serialize_field(
            "control_points",
            &ControlPointsDef {
                points: surface
                    .control_points()
                    .iter()
                    .map(|p| [p.x, p.y, p.z])
                    .collect(),
                weights: surface.weights(),
            },
        )?;
        state.serialize_field("degree_u", &surface.degree_u())?;
        state.serialize_field("degree_v", &surface.degree_v())?;
        state.serialize_field("form_u", &surface.degree_u())?;
        state.serialize_field("form_v", &surface.degree_v())?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("knotvector_u", surface.knots_u().as_slice())?;
        state.serialize_field("knotvector_v", surface.knots_v().as_slice())?;
        state.serialize_field("rational", &surface.is_rational())?;
        match &self.sense {
            Some(sense) => state.serialize_field("sense", sense)?,
            None => state.skip_field("sense")?,
        }
        let (size_u, size_v) = surface.size();
        state.serialize_field("size_u", &size_u)?;
        state.serialize_field("size_v", &size_v)?;
        state.serialize_field("surface_form_u", &surface.form_u().code())?;
        state.serialize_field("surface_form_v", &surface.form_v().code())?;
        match &self.trims {
            Some(loops) => state.serialize_field(
                "trims",
                &TrimsDef {
                    count: loops.len(),
                    data: loops,
                },
            )?,
            None => state.skip_field("trims")?,
        }
        state.end()
    }
}

/// A face left out of its body's document
#[derive(Debug)]
pub struct SkippedFace {
    pub face_index: usize,
    pub reason: ExtractError,
}

/// The document of one body
#[derive(Debug, Default)]
pub struct BodyDocument {
    pub(crate) faces: Vec<FaceDocument>,
    pub(crate) skipped: Vec<SkippedFace>,
}

impl BodyDocument {
    pub fn faces(&self) -> &[FaceDocument] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn skipped(&self) -> &[SkippedFace] {
        &self.skipped
    }
}

#[derive(Serialize)]
struct ShapeDef<'a> {
    count: usize,
    data: &'a [FaceDocument],
    #[serde(rename = "type")]
    shape_type: &'static str,
}

impl Serialize for BodyDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("BodyDocument", 1)?;
        state.serialize_field(
            "shape",
            &ShapeDef {
                count: self.face_count(),
                data: &self.faces,
                shape_type: "surface",
            },
        )?;
        state.end()
    }
}
