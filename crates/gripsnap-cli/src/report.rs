//! Query results printed by the CLI.

use anyhow::{Context, Result};
use gripsnap_math::{Point3, Vec3};
use serde::Serialize;
use tracing::debug;

use crate::scene::Scene;

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub start: Point3,
    pub end: Point3,
    pub direction: Vec3,
    pub height: f64,
    pub radius: f64,
    pub angle: f64,
    pub start_angle_dir: Vec3,
    pub end_angle_dir: Vec3,
    pub single_point: bool,
}

#[derive(Debug, Serialize)]
pub struct NearestReport {
    pub target: Point3,
    pub nearest: Point3,
    pub distance: f64,
}

#[derive(Debug, Serialize)]
pub struct SnapReport {
    pub name: Option<String>,
    pub position: Point3,
    /// Quaternion as `[x, y, z, w]`.
    pub rotation: [f64; 4],
    /// Euler angles in degrees about X, Y, Z.
    pub euler_degrees: [f64; 3],
}

pub fn info(scene: &Scene) -> Result<InfoReport> {
    let frame = scene.frame.to_frame().context("invalid [frame]")?;
    let surface = scene.constraint.bind(&frame, scene.grip_point(&frame));
    Ok(InfoReport {
        start: surface.start_point(),
        end: surface.end_point(),
        direction: surface.direction().into_inner(),
        height: surface.height(),
        radius: surface.radius(),
        angle: surface.angle(),
        start_angle_dir: surface.start_angle_dir().into_inner(),
        end_angle_dir: surface.end_angle_dir().into_inner(),
        single_point: scene.constraint.is_single_point(),
    })
}

pub fn nearest(scene: &Scene, extra: Option<Point3>) -> Result<Vec<NearestReport>> {
    let frame = scene.frame.to_frame().context("invalid [frame]")?;
    let surface = scene.constraint.bind(&frame, scene.grip_point(&frame));
    let targets = scene
        .queries
        .iter()
        .map(|q| Point3::from(q.point))
        .chain(extra);
    Ok(targets
        .map(|target| {
            let nearest = surface.nearest_point_in_surface(&target);
            NearestReport {
                target,
                nearest,
                distance: (nearest - target).norm(),
            }
        })
        .collect())
}

pub fn snap(scene: &Scene) -> Result<Vec<SnapReport>> {
    let frame = scene.frame.to_frame().context("invalid [frame]")?;
    let surface = scene.constraint.bind(&frame, scene.grip_point(&frame));
    scene
        .poses
        .iter()
        .enumerate()
        .map(|(i, def)| {
            let reference = def
                .relative_to
                .to_frame()
                .with_context(|| format!("invalid relative_to frame for pose {i}"))?;
            let snapped = surface.snap(&def.to_pose(), &reference, &Point3::from(def.target));
            debug!(pose = i, position = %snapped.position, "snapped pose");
            let (roll, pitch, yaw) = snapped.rotation.euler_angles();
            let q = snapped.rotation.coords;
            Ok(SnapReport {
                name: def.name.clone(),
                position: snapped.position,
                rotation: [q.x, q.y, q.z, q.w],
                euler_degrees: [roll.to_degrees(), pitch.to_degrees(), yaw.to_degrees()],
            })
        })
        .collect()
}
