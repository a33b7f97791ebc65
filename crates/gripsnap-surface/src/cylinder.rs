//! Cylindrical grip constraint.
//!
//! A [`CylinderConstraint`] stores an axis segment in a frame's local space
//! plus an angular sweep. Everything else (direction, height, radius, the
//! sweep boundaries) is derived on demand through a [`BoundCylinder`], which
//! pairs the constraint with the frame and grip point it is evaluated against.
//!
//! Surface parameterization, for an angle `a` (degrees) and axial distance `h`:
//!
//! `P(a, h) = start + h * direction + radius * rotate(start_angle_dir, a, direction)`
//!
//! The valid surface is `a ∈ [0, angle]`, `h ∈ [0, height]`.

use gripsnap_math::{
    forward, from_to_rotation, project_on_axis, project_on_plane, repeat_degrees, right,
    signed_angle_degrees, Dir3, Point3, Rotation, Tolerance, Vec3,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace};

use crate::frame::SpatialFrame;
use crate::pose::{GripSnap, HandSnapPose};

/// A cylindrical grip region: axis segment plus angular sweep.
///
/// Points are stored in the owning frame's local space. The angle is kept in
/// `[0, 360)` degrees; writes wrap rather than clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CylinderConstraint {
    start: Point3,
    end: Point3,
    #[serde(deserialize_with = "deserialize_angle")]
    angle: f64,
}

fn deserialize_angle<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(repeat_degrees)
}

impl CylinderConstraint {
    /// Sweep of a freshly authored handle, in degrees.
    pub const DEFAULT_ANGLE: f64 = 230.0;

    /// Half the axis length of a freshly authored handle.
    pub const DEFAULT_HALF_HEIGHT: f64 = 0.2;

    /// Create a constraint from local-space axis points and a sweep in degrees.
    pub fn new(start_local: Point3, end_local: Point3, angle: f64) -> Self {
        Self {
            start: start_local,
            end: end_local,
            angle: repeat_degrees(angle),
        }
    }

    /// Axis start in local space.
    pub fn start_local(&self) -> Point3 {
        self.start
    }

    /// Axis end in local space.
    pub fn end_local(&self) -> Point3 {
        self.end
    }

    /// Sweep angle in degrees, in `[0, 360)`.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Set the sweep angle, wrapping into `[0, 360)`.
    pub fn set_angle(&mut self, degrees: f64) {
        self.angle = repeat_degrees(degrees);
    }

    /// Axis start in world space.
    pub fn start_point<F: SpatialFrame + ?Sized>(&self, frame: &F) -> Point3 {
        frame.to_world(&self.start)
    }

    /// Move the axis start to a world-space point.
    pub fn set_start_point<F: SpatialFrame + ?Sized>(&mut self, frame: &F, world: &Point3) {
        self.start = frame.to_local(world);
    }

    /// Axis end in world space.
    pub fn end_point<F: SpatialFrame + ?Sized>(&self, frame: &F) -> Point3 {
        frame.to_world(&self.end)
    }

    /// Move the axis end to a world-space point.
    pub fn set_end_point<F: SpatialFrame + ?Sized>(&mut self, frame: &F, world: &Point3) {
        self.end = frame.to_local(world);
    }

    /// Collapse to a zero-height, zero-sweep ring at the frame origin.
    pub fn make_single_point(&mut self) {
        self.start = Point3::origin();
        self.end = Point3::origin();
        self.angle = 0.0;
    }

    /// Whether the constraint is in the collapsed single-point state.
    pub fn is_single_point(&self) -> bool {
        self.start == self.end && self.angle == 0.0
    }

    /// Evaluate against `frame` with an explicit grip point.
    pub fn bind<'a, F: SpatialFrame + ?Sized>(
        &'a self,
        frame: &'a F,
        grip: Point3,
    ) -> BoundCylinder<'a, F> {
        BoundCylinder {
            constraint: self,
            frame,
            grip,
        }
    }

    /// Evaluate against `frame`, using the frame's own origin as the grip point.
    pub fn bind_to_frame<'a, F: SpatialFrame + ?Sized>(
        &'a self,
        frame: &'a F,
    ) -> BoundCylinder<'a, F> {
        self.bind(frame, frame.position())
    }
}

impl Default for CylinderConstraint {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, Self::DEFAULT_HALF_HEIGHT, 0.0),
            Point3::new(0.0, -Self::DEFAULT_HALF_HEIGHT, 0.0),
            Self::DEFAULT_ANGLE,
        )
    }
}

/// A [`CylinderConstraint`] paired with the frame and grip point it is read against.
///
/// All quantities are recomputed on every call; a bound view is cheap and
/// should be rebuilt whenever the frame or grip moves.
pub struct BoundCylinder<'a, F: ?Sized> {
    constraint: &'a CylinderConstraint,
    frame: &'a F,
    grip: Point3,
}

impl<'a, F: SpatialFrame + ?Sized> BoundCylinder<'a, F> {
    /// The underlying constraint.
    pub fn constraint(&self) -> &'a CylinderConstraint {
        self.constraint
    }

    /// Grip reference point the radius is measured from.
    pub fn grip(&self) -> Point3 {
        self.grip
    }

    /// Axis start in world space.
    pub fn start_point(&self) -> Point3 {
        self.constraint.start_point(self.frame)
    }

    /// Axis end in world space.
    pub fn end_point(&self) -> Point3 {
        self.constraint.end_point(self.frame)
    }

    /// Sweep angle in degrees.
    pub fn angle(&self) -> f64 {
        self.constraint.angle
    }

    /// Unit axis direction from start to end.
    ///
    /// Falls back to the frame's up axis when start and end coincide.
    pub fn direction(&self) -> Dir3 {
        let axis = self.end_point() - self.start_point();
        Dir3::try_new(axis, Tolerance::DEFAULT.linear).unwrap_or_else(|| {
            trace!("zero-length cylinder axis, using frame up");
            self.frame.up_axis()
        })
    }

    /// World-space distance between start and end.
    pub fn height(&self) -> f64 {
        (self.end_point() - self.start_point()).norm()
    }

    /// Distance from the grip point to the axis line.
    pub fn radius(&self) -> f64 {
        let start = self.start_point();
        let dir = self.direction();
        let projected = start + project_on_axis(&(self.grip - start), &dir);
        (self.grip - projected).norm()
    }

    /// Angular origin of the sweep: perpendicular to the axis.
    pub fn start_angle_dir(&self) -> Dir3 {
        start_angle_dir_about(&self.direction())
    }

    /// Far boundary of the sweep: the start direction rotated by the sweep angle.
    pub fn end_angle_dir(&self) -> Dir3 {
        let dir = self.direction();
        turn_about(&dir, &start_angle_dir_about(&dir), self.constraint.angle)
    }

    /// Whether `angle_degrees` (wrapped) lies inside the closed sweep.
    pub fn contains_angle(&self, angle_degrees: f64) -> bool {
        repeat_degrees(angle_degrees) <= self.constraint.angle
    }

    /// Surface point at `angle_degrees` around the axis and `axial` along it.
    ///
    /// No clamping is applied; see [`BoundCylinder::nearest_point_in_surface`].
    pub fn point_at(&self, angle_degrees: f64, axial: f64) -> Point3 {
        let dir = self.direction();
        let radial = turn_about(&dir, &start_angle_dir_about(&dir), angle_degrees);
        self.start_point() + dir.as_ref() * axial + radial.as_ref() * self.radius()
    }

    /// Nearest point to `target` on the bounded, angularly clamped lateral surface.
    pub fn nearest_point_in_surface(&self, target: &Point3) -> Point3 {
        let start = self.start_point();
        let dir = self.direction();
        let height = self.height();

        let mut axial = project_on_axis(&(target - start), &dir);
        if axial.norm() > height {
            axial = axial.normalize() * height;
        }
        if axial.dot(dir.as_ref()) < 0.0 {
            axial = Vec3::zeros();
        }
        let projected = start + axial;

        let start_dir = start_angle_dir_about(&dir);
        let radial = project_on_plane(&(target - projected), &dir);
        let mut target_dir = Dir3::try_new(radial, Tolerance::DEFAULT.linear).unwrap_or_else(|| {
            trace!("target on cylinder axis, using start angle direction");
            start_dir
        });

        let angle = self.constraint.angle;
        let desired = repeat_degrees(signed_angle_degrees(
            start_dir.as_ref(),
            target_dir.as_ref(),
            dir.as_ref(),
        ));
        if desired > angle {
            let to_start = snaps_to_start(desired, angle);
            target_dir = if to_start {
                start_dir
            } else {
                turn_about(&dir, &start_dir, angle)
            };
            debug!(desired, angle, to_start, "angular clamp");
        }

        projected + target_dir.as_ref() * self.radius()
    }

    /// World rotation for `pose` once its surface entry is moved to `at_surface_point`.
    ///
    /// The pose's grip is projected onto the surface; the rotation that takes
    /// that entry's radial direction onto the radial direction of
    /// `at_surface_point` is applied to the pose's world rotation.
    pub fn transform_rotation<R: SpatialFrame + ?Sized>(
        &self,
        pose: &HandSnapPose,
        relative_to: &R,
        at_surface_point: &Point3,
    ) -> Rotation {
        let world_position = pose.world_position(relative_to);
        let world_rotation = pose.world_rotation(relative_to);

        let start = self.start_point();
        let dir = self.direction();
        let entry = self.nearest_point_in_surface(&world_position);
        let entry_dir = project_on_plane(&(entry - start), &dir);
        let desired_dir = project_on_plane(&(at_surface_point - start), &dir);

        // radial directions are both perpendicular to the axis, so the axis
        // is the one stable choice when they are anti-parallel
        let offset = from_to_rotation(&entry_dir, &desired_dir, &dir);
        trace!(correction_deg = offset.angle().to_degrees(), "grip entry realigned");
        offset * world_rotation
    }

    /// Snap `pose` to the surface point nearest `target`.
    pub fn snap<R: SpatialFrame + ?Sized>(
        &self,
        pose: &HandSnapPose,
        relative_to: &R,
        target: &Point3,
    ) -> GripSnap {
        let position = self.nearest_point_in_surface(target);
        let rotation = self.transform_rotation(pose, relative_to, &position);
        GripSnap { position, rotation }
    }
}

/// Nearest sweep boundary on the circle for an angle outside `[0, angle]`; ties go to the start.
fn snaps_to_start(desired: f64, angle: f64) -> bool {
    (desired - angle).abs() >= (360.0 - desired).abs()
}

fn start_angle_dir_about(dir: &Dir3) -> Dir3 {
    Dir3::try_new(dir.cross(forward().as_ref()), Tolerance::DEFAULT.angular).unwrap_or_else(|| {
        trace!("cylinder axis parallel to forward, using right as reference");
        Dir3::new_normalize(dir.cross(right().as_ref()))
    })
}

fn turn_about(dir: &Dir3, start_dir: &Dir3, angle_degrees: f64) -> Dir3 {
    Rotation::from_axis_angle(dir, angle_degrees.to_radians()) * *start_dir
}
