use std::cell::Cell;
use std::path::Path;

use nalgebra::Matrix4;
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, ExtractResult};
use crate::knot::KnotVector;
use crate::misc::Sense;

use super::{
    CurveBuffer, Diagnostic, Geometry, Kernel, KernelError, KernelResult, LoopType, ParamRange,
    SurfaceBuffer,
};

/// Serialized B-rep model understood by [`MemoryKernel`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Model {
    pub bodies: Vec<BodyModel>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyModel {
    /// Column-major body transform
    #[serde(default)]
    pub transform: Option<Matrix4<f64>>,
    #[serde(default)]
    pub faces: Vec<FaceModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceModel {
    #[serde(default)]
    pub sense: Sense,
    pub surface: SurfaceModel,
    /// Spline used to replace analytic geometry on conversion
    #[serde(default)]
    pub spline_approximation: Option<SplineSurfaceModel>,
    #[serde(default)]
    pub loops: Vec<LoopModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceModel {
    Spline(SplineSurfaceModel),
    Analytic { name: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplineSurfaceModel {
    /// `None` models a spline the kernel failed to evaluate
    #[serde(default)]
    pub data: Option<SurfaceBuffer>,
    /// Defaults to the knot domain of `data`
    #[serde(default)]
    pub range: Option<ParamRange>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopModel {
    #[serde(rename = "type", default)]
    pub loop_type: LoopType,
    #[serde(default)]
    pub coedges: Vec<CoedgeModel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoedgeModel {
    #[serde(default)]
    pub sense: Sense,
    pub curve: CurveBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyRef(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceRef {
    body: usize,
    face: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoopRef {
    face: FaceRef,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoedgeRef {
    lp: LoopRef,
    index: usize,
}

/// In-memory kernel over a [`Model`]
/// Counts the buffers it hands out that have not been released yet.
#[derive(Debug, Default)]
pub struct MemoryKernel {
    model: Model,
    diagnostics: Vec<Diagnostic>,
    live_buffers: Cell<usize>,
}

impl MemoryKernel {
    pub fn new(model: Model) -> Self {
        Self {
            model,
            ..Default::default()
        }
    }

    /// Load a JSON model file
    pub fn open(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let model: Model = serde_json::from_str(&content)?;
        log::debug!(
            "loaded {} bodies from '{}'",
            model.bodies.len(),
            path.display()
        );
        Ok(Self::new(model))
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Number of buffers handed out and not released
    pub fn live_buffers(&self) -> usize {
        self.live_buffers.get()
    }

    fn body(&self, call: &'static str, body: BodyRef) -> KernelResult<&BodyModel> {
        self.model
            .bodies
            .get(body.0)
            .ok_or_else(|| KernelError::new(call, format!("no body #{}", body.0)))
    }

    fn face(&self, call: &'static str, face: FaceRef) -> KernelResult<&FaceModel> {
        self.body(call, BodyRef(face.body))?
            .faces
            .get(face.face)
            .ok_or_else(|| KernelError::new(call, format!("no face #{}", face.face)))
    }

    fn face_mut(&mut self, call: &'static str, face: FaceRef) -> KernelResult<&mut FaceModel> {
        self.model
            .bodies
            .get_mut(face.body)
            .and_then(|body| body.faces.get_mut(face.face))
            .ok_or_else(|| KernelError::new(call, format!("no face #{}", face.face)))
    }

    fn lp(&self, call: &'static str, lp: LoopRef) -> KernelResult<&LoopModel> {
        self.face(call, lp.face)?
            .loops
            .get(lp.index)
            .ok_or_else(|| KernelError::new(call, format!("no loop #{}", lp.index)))
    }

    fn coedge(&self, call: &'static str, coedge: CoedgeRef) -> KernelResult<&CoedgeModel> {
        self.lp(call, coedge.lp)?
            .coedges
            .get(coedge.index)
            .ok_or_else(|| KernelError::new(call, format!("no coedge #{}", coedge.index)))
    }

    fn spline(&self, call: &'static str, face: FaceRef) -> KernelResult<&SplineSurfaceModel> {
        match &self.face(call, face)?.surface {
            SurfaceModel::Spline(spline) => Ok(spline),
            SurfaceModel::Analytic { name } => Err(KernelError::new(
                call,
                format!("face #{} is a {} surface", face.face, name),
            )),
        }
    }

    fn acquire(&self) {
        self.live_buffers.set(self.live_buffers.get() + 1);
    }

    fn release(&self) {
        self.live_buffers.set(self.live_buffers.get().saturating_sub(1));
    }
}

impl Kernel for MemoryKernel {
    type Body = BodyRef;
    type Face = FaceRef;
    type Loop = LoopRef;
    type Coedge = CoedgeRef;

    fn entities(&self) -> KernelResult<Vec<BodyRef>> {
        Ok((0..self.model.bodies.len()).map(BodyRef).collect())
    }

    fn split_periodic_faces(&mut self, body: BodyRef) -> KernelResult<()> {
        // model faces are stored with seam-free domains
        self.body("split_periodic_faces", body).map(|_| ())
    }

    fn remove_transform(&mut self, body: BodyRef) -> KernelResult<()> {
        let model = self
            .model
            .bodies
            .get_mut(body.0)
            .ok_or_else(|| KernelError::new("remove_transform", format!("no body #{}", body.0)))?;
        model.transform = None;
        Ok(())
    }

    fn faces(&self, body: BodyRef) -> KernelResult<Vec<FaceRef>> {
        let count = self.body("faces", body)?.faces.len();
        Ok((0..count)
            .map(|face| FaceRef { body: body.0, face })
            .collect())
    }

    fn face_sense(&self, face: FaceRef) -> KernelResult<Sense> {
        Ok(self.face("face_sense", face)?.sense)
    }

    fn convert_to_spline(&mut self, face: FaceRef) -> KernelResult<()> {
        let model = self.face_mut("convert_to_spline", face)?;
        let SurfaceModel::Analytic { name } = &model.surface else {
            return Ok(());
        };
        let message = format!("no spline approximation for {} surface", name);
        match model.spline_approximation.take() {
            Some(spline) => model.surface = SurfaceModel::Spline(spline),
            None => self
                .diagnostics
                .push(Diagnostic::error("convert_to_spline", message)),
        }
        Ok(())
    }

    fn face_geometry(&self, face: FaceRef) -> KernelResult<Geometry> {
        Ok(match &self.face("face_geometry", face)?.surface {
            SurfaceModel::Spline(_) => Geometry::Spline,
            SurfaceModel::Analytic { name } => Geometry::Other(name.clone()),
        })
    }

    fn surface_buffer(
        &self,
        face: FaceRef,
        apply_transform: bool,
    ) -> KernelResult<Option<SurfaceBuffer>> {
        let Some(mut buffer) = self.spline("surface_buffer", face)?.data.clone() else {
            return Ok(None);
        };
        if apply_transform {
            if let Some(transform) = self.body("surface_buffer", BodyRef(face.body))?.transform {
                buffer
                    .control_points
                    .iter_mut()
                    .for_each(|p| *p = transform.transform_point(p));
            }
        }
        self.acquire();
        Ok(Some(buffer))
    }

    fn surface_range(&self, face: FaceRef) -> KernelResult<ParamRange> {
        let spline = self.spline("surface_range", face)?;
        if let Some(range) = spline.range {
            return Ok(range);
        }
        let data = spline
            .data
            .as_ref()
            .ok_or_else(|| KernelError::new("surface_range", "spline has no data"))?;
        let u = KnotVector::new(data.knots_u.clone()).domain(data.degree_u);
        let v = KnotVector::new(data.knots_v.clone()).domain(data.degree_v);
        match (u, v) {
            (Some(u), Some(v)) => Ok(ParamRange { u, v }),
            _ => Err(KernelError::new(
                "surface_range",
                "too few knots for the surface degree",
            )),
        }
    }

    fn loops(&self, face: FaceRef) -> KernelResult<Vec<LoopRef>> {
        let count = self.face("loops", face)?.loops.len();
        Ok((0..count).map(|index| LoopRef { face, index }).collect())
    }

    fn loop_type(&self, lp: LoopRef) -> KernelResult<LoopType> {
        Ok(self.lp("loop_type", lp)?.loop_type)
    }

    fn coedges(&self, lp: LoopRef) -> KernelResult<Vec<CoedgeRef>> {
        let count = self.lp("coedges", lp)?.coedges.len();
        Ok((0..count).map(|index| CoedgeRef { lp, index }).collect())
    }

    fn coedge_sense(&self, coedge: CoedgeRef) -> KernelResult<Sense> {
        Ok(self.coedge("coedge_sense", coedge)?.sense)
    }

    fn curve_buffer(
        &self,
        coedge: CoedgeRef,
        face: FaceRef,
        _apply_transform: bool,
    ) -> KernelResult<CurveBuffer> {
        if coedge.lp.face != face {
            return Err(KernelError::new(
                "curve_buffer",
                "coedge does not belong to the face",
            ));
        }
        // parameter space curves are unaffected by body transforms
        let buffer = self.coedge("curve_buffer", coedge)?.curve.clone();
        self.acquire();
        Ok(buffer)
    }

    fn release_surface_buffer(&self, buffer: SurfaceBuffer) {
        drop(buffer);
        self.release();
    }

    fn release_curve_buffer(&self, buffer: CurveBuffer) {
        drop(buffer);
        self.release();
    }

    fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use nalgebra::{Matrix4, Point3, Vector3};

    use super::*;

    fn plane() -> SurfaceBuffer {
        SurfaceBuffer {
            rational_u: false,
            rational_v: false,
            form_u: Default::default(),
            form_v: Default::default(),
            degree_u: 1,
            degree_v: 1,
            knots_u: vec![2., 2., 4., 4.],
            knots_v: vec![0., 0., 1., 1.],
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

    fn kernel() -> MemoryKernel {
        MemoryKernel::new(Model {
            bodies: vec![BodyModel {
                transform: Some(Matrix4::new_translation(&Vector3::new(0., 0., 5.))),
                faces: vec![
                    FaceModel {
                        sense: Sense::Reversed,
                        surface: SurfaceModel::Spline(SplineSurfaceModel {
                            data: Some(plane()),
                            range: None,
                        }),
                        spline_approximation: None,
                        loops: vec![],
                    },
                    FaceModel {
                        sense: Sense::Forward,
                        surface: SurfaceModel::Analytic {
                            name: "cone".to_string(),
                        },
                        spline_approximation: None,
                        loops: vec![],
                    },
                ],
            }],
        })
    }

    #[test]
    fn traverse_model() {
        let kernel = kernel();
        let bodies = kernel.entities().unwrap();
        assert_eq!(bodies.len(), 1);
        let faces = kernel.faces(bodies[0]).unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(kernel.face_sense(faces[0]).unwrap(), Sense::Reversed);
        assert_eq!(kernel.face_geometry(faces[0]).unwrap(), Geometry::Spline);
        assert_eq!(
            kernel.face_geometry(faces[1]).unwrap(),
            Geometry::Other("cone".to_string())
        );
        let range = kernel.surface_range(faces[0]).unwrap();
        assert_eq!(range.u, (2., 4.));
        assert_eq!(range.v, (0., 1.));
        assert!(kernel.surface_range(faces[1]).is_err());
    }

    #[test]
    fn transform_and_release() {
        let mut kernel = kernel();
        let face = kernel.faces(BodyRef(0)).unwrap()[0];

        let moved = kernel.surface_buffer(face, true).unwrap().unwrap();
        assert_eq!(moved.control_points[3], Point3::new(1., 1., 5.));
        assert_eq!(kernel.live_buffers(), 1);
        kernel.release_surface_buffer(moved);
        assert_eq!(kernel.live_buffers(), 0);

        kernel.remove_transform(BodyRef(0)).unwrap();
        let local = kernel.surface_buffer(face, true).unwrap().unwrap();
        assert_eq!(local.control_points[3], Point3::new(1., 1., 0.));
        kernel.release_surface_buffer(local);
    }

    #[test]
    fn failed_conversion_is_reported() {
        let mut kernel = kernel();
        let face = kernel.faces(BodyRef(0)).unwrap()[1];
        kernel.convert_to_spline(face).unwrap();
        let diagnostics = kernel.take_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].call, "convert_to_spline");
        assert!(kernel.take_diagnostics().is_empty());
        assert!(kernel.faces(BodyRef(3)).is_err());
    }

    #[test]
    fn deserialize_model() {
        let json = r#"{
            "bodies": [{
                "faces": [{
                    "sense": true,
                    "surface": { "type": "analytic", "name": "plane" },
                    "loops": [{ "type": "hole", "coedges": [] }]
                }]
            }]
        }"#;
        let model: Model = serde_json::from_str(json).unwrap();
        let face = &model.bodies[0].faces[0];
        assert_eq!(face.sense, Sense::Reversed);
        assert_eq!(face.loops[0].loop_type, LoopType::Hole);
        assert!(model.bodies[0].transform.is_none());
    }
}
