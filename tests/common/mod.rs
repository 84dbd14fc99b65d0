#![allow(dead_code)]

use nalgebra::{Point2, Point3};
use splinex::prelude::*;

/// Degree 1 patch over a 2x2 grid
pub fn plane_buffer(knots_u: Vec<f64>, knots_v: Vec<f64>) -> SurfaceBuffer {
    SurfaceBuffer {
        rational_u: false,
        rational_v: false,
        form_u: SplineForm::Open,
        form_v: SplineForm::Open,
        degree_u: 1,
        degree_v: 1,
        knots_u,
        knots_v,
        count_u: 2,
        count_v: 2,
        control_points: vec![
            Point3::new(0., 0., 0.),
            Point3::new(0., 2., 0.),
            Point3::new(3., 0., 0.),
            Point3::new(3., 2., 0.),
        ],
        weights: None,
        sense: Sense::Forward,
    }
}

pub fn line(from: [f64; 2], to: [f64; 2]) -> CurveBuffer {
    CurveBuffer {
        degree: 1,
        rational: false,
        knots: vec![0., 0., 1., 1.],
        control_points: vec![Point2::new(from[0], from[1]), Point2::new(to[0], to[1])],
        weights: None,
    }
}

/// Closed polyline loop through the given parametric points
pub fn polygon(loop_type: LoopType, points: &[[f64; 2]], sense: Sense) -> LoopModel {
    let coedges = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| CoedgeModel {
            sense,
            curve: line(*a, *b),
        })
        .collect();
    LoopModel { loop_type, coedges }
}

pub fn spline_face(buffer: SurfaceBuffer, sense: Sense, loops: Vec<LoopModel>) -> FaceModel {
    FaceModel {
        sense,
        surface: SurfaceModel::Spline(SplineSurfaceModel {
            data: Some(buffer),
            range: None,
        }),
        spline_approximation: None,
        loops,
    }
}

pub fn analytic_face(name: &str) -> FaceModel {
    FaceModel {
        sense: Sense::Forward,
        surface: SurfaceModel::Analytic {
            name: name.to_string(),
        },
        spline_approximation: None,
        loops: vec![],
    }
}

/// Unit square face with an outer boundary
pub fn square_face() -> FaceModel {
    spline_face(
        plane_buffer(vec![0., 0., 1., 1.], vec![0., 0., 1., 1.]),
        Sense::Forward,
        vec![polygon(
            LoopType::Periphery,
            &[[0., 0.], [1., 0.], [1., 1.], [0., 1.]],
            Sense::Forward,
        )],
    )
}

pub fn body(faces: Vec<FaceModel>) -> BodyModel {
    BodyModel {
        transform: None,
        faces,
    }
}
