//! Hand poses expressed relative to a reference frame.

use gripsnap_math::{Point3, Rotation};
use serde::{Deserialize, Serialize};

use crate::frame::SpatialFrame;

/// A candidate hand pose: where the grip sits and how it is oriented,
/// relative to some reference frame (usually the grabbed object).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandSnapPose {
    /// Grip position in the reference frame's local space.
    pub grip_position: Point3,
    /// Grip orientation relative to the reference frame's rotation.
    pub grip_rotation: Rotation,
}

impl HandSnapPose {
    /// Create a pose from local grip position and rotation.
    pub fn new(grip_position: Point3, grip_rotation: Rotation) -> Self {
        Self {
            grip_position,
            grip_rotation,
        }
    }

    /// Express a world-space grip placement relative to `relative_to`.
    pub fn from_world<F: SpatialFrame + ?Sized>(
        relative_to: &F,
        world_position: &Point3,
        world_rotation: &Rotation,
    ) -> Self {
        Self {
            grip_position: relative_to.to_local(world_position),
            grip_rotation: relative_to.rotation().inverse() * world_rotation,
        }
    }

    /// World-space grip position.
    pub fn world_position<F: SpatialFrame + ?Sized>(&self, relative_to: &F) -> Point3 {
        relative_to.to_world(&self.grip_position)
    }

    /// World-space grip rotation.
    pub fn world_rotation<F: SpatialFrame + ?Sized>(&self, relative_to: &F) -> Rotation {
        relative_to.rotation() * self.grip_rotation
    }
}

impl Default for HandSnapPose {
    fn default() -> Self {
        Self::new(Point3::origin(), Rotation::identity())
    }
}

/// A grip placement on a surface: the snapped point and the corrected world rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GripSnap {
    /// World-space point on the surface.
    pub position: Point3,
    /// World-space grip rotation at that point.
    pub rotation: Rotation,
}
