//! Spatial frames: the scene-graph node a grip surface is authored in.

use gripsnap_math::{up, Dir3, Point3, Rotation, Tolerance, Vec3};

use crate::error::{Result, SurfaceError};

/// A coordinate frame that can move points between its local space and world space.
///
/// Grip surfaces store their geometry in a frame's local space and never own
/// the frame; every query reads the frame's current state.
pub trait SpatialFrame {
    /// Map a local-space point to world space.
    fn to_world(&self, local: &Point3) -> Point3;

    /// Map a world-space point to local space. Inverse of [`SpatialFrame::to_world`].
    fn to_local(&self, world: &Point3) -> Point3;

    /// The frame's up axis in world space.
    fn up_axis(&self) -> Dir3;

    /// World-space orientation of the frame.
    fn rotation(&self) -> Rotation;

    /// World-space origin of the frame.
    fn position(&self) -> Point3;
}

impl<T: SpatialFrame + ?Sized> SpatialFrame for &T {
    fn to_world(&self, local: &Point3) -> Point3 {
        (**self).to_world(local)
    }

    fn to_local(&self, world: &Point3) -> Point3 {
        (**self).to_local(world)
    }

    fn up_axis(&self) -> Dir3 {
        (**self).up_axis()
    }

    fn rotation(&self) -> Rotation {
        (**self).rotation()
    }

    fn position(&self) -> Point3 {
        (**self).position()
    }
}

/// A scene-graph node: position, rotation and per-axis scale.
///
/// Local points are scaled, then rotated, then translated into world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    position: Point3,
    rotation: Rotation,
    scale: Vec3,
}

impl Frame {
    /// Create a frame, rejecting non-finite components and scales that cannot be inverted.
    pub fn new(position: Point3, rotation: Rotation, scale: Vec3) -> Result<Self> {
        if !position.coords.iter().all(|c| c.is_finite()) {
            return Err(SurfaceError::NonFiniteFrame("position"));
        }
        if !rotation.coords.iter().all(|c| c.is_finite()) {
            return Err(SurfaceError::NonFiniteFrame("rotation"));
        }
        if !scale.iter().all(|c| c.is_finite()) {
            return Err(SurfaceError::NonFiniteFrame("scale"));
        }
        let tol = Tolerance::DEFAULT;
        for (axis, value) in ['x', 'y', 'z'].into_iter().zip(scale.iter().copied()) {
            if tol.is_zero(value) {
                return Err(SurfaceError::DegenerateScale { axis, value });
            }
        }
        Ok(Self {
            position,
            rotation,
            scale,
        })
    }

    /// Identity frame at the world origin.
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: Rotation::identity(),
            scale: Vec3::repeat(1.0),
        }
    }

    /// Unrotated, unscaled frame at `position`.
    pub fn at(position: Point3) -> Result<Self> {
        Self::new(position, Rotation::identity(), Vec3::repeat(1.0))
    }

    /// Replace the frame's rotation, with the same checks as [`Frame::new`].
    pub fn with_rotation(self, rotation: Rotation) -> Result<Self> {
        Self::new(self.position, rotation, self.scale)
    }

    /// Per-axis scale.
    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

impl SpatialFrame for Frame {
    fn to_world(&self, local: &Point3) -> Point3 {
        self.position + self.rotation * local.coords.component_mul(&self.scale)
    }

    fn to_local(&self, world: &Point3) -> Point3 {
        let unrotated = self.rotation.inverse() * (world - self.position);
        Point3::from(unrotated.component_div(&self.scale))
    }

    fn up_axis(&self) -> Dir3 {
        self.rotation * up()
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }

    fn position(&self) -> Point3 {
        self.position
    }
}
