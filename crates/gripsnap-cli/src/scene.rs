//! TOML scene files: a frame, a grip point, one constraint, and the queries to run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gripsnap_math::{Point3, Rotation, Vec3};
use gripsnap_surface::{CylinderConstraint, Frame, HandSnapPose, SpatialFrame, SurfaceError};
use serde::Deserialize;

/// A frame as written in a scene file. Rotation is Euler degrees about X, Y, Z.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FrameDef {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Default for FrameDef {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl FrameDef {
    pub fn to_frame(&self) -> Result<Frame, SurfaceError> {
        Frame::new(
            Point3::from(self.position),
            euler_degrees(self.rotation),
            Vec3::from(self.scale),
        )
    }
}

/// Grip reference point. Without a position the frame origin is the grip.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GripDef {
    pub position: Option<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Query {
    pub point: [f64; 3],
}

/// A hand pose to snap, relative to its own reference frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoseDef {
    #[serde(default)]
    pub name: Option<String>,
    pub grip_position: [f64; 3],
    #[serde(default)]
    pub grip_rotation: [f64; 3],
    #[serde(default)]
    pub relative_to: FrameDef,
    pub target: [f64; 3],
}

impl PoseDef {
    pub fn to_pose(&self) -> HandSnapPose {
        HandSnapPose::new(Point3::from(self.grip_position), euler_degrees(self.grip_rotation))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub frame: FrameDef,
    pub grip: GripDef,
    pub constraint: CylinderConstraint,
    pub queries: Vec<Query>,
    pub poses: Vec<PoseDef>,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scene {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse scene {}", path.display()))
    }

    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// World-space grip point for `frame`.
    pub fn grip_point(&self, frame: &Frame) -> Point3 {
        self.grip
            .position
            .map(Point3::from)
            .unwrap_or_else(|| frame.position())
    }
}

fn euler_degrees(degrees: [f64; 3]) -> Rotation {
    Rotation::from_euler_angles(
        degrees[0].to_radians(),
        degrees[1].to_radians(),
        degrees[2].to_radians(),
    )
}
