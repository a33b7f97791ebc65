#![warn(missing_docs)]

//! Grip surface constraints for hand-pose snapping.
//!
//! A grip surface describes where a hand may hold an object. This crate
//! provides the cylindrical grip region used for handles and controller
//! grips: given a spatial frame and a grip reference point it answers
//!
//! - where the nearest valid grip point to an arbitrary position lies, and
//! - how a candidate hand rotation must turn when its entry point on the
//!   surface is moved to a different surface point.
//!
//! # Example
//!
//! ```
//! use gripsnap_math::{Point3, Rotation};
//! use gripsnap_surface::{CylinderConstraint, Frame, HandSnapPose};
//!
//! let handle = CylinderConstraint::new(Point3::origin(), Point3::new(0.0, 1.0, 0.0), 270.0);
//! let frame = Frame::identity();
//! let surface = handle.bind(&frame, Point3::new(0.05, 0.5, 0.0));
//!
//! let snapped = surface.nearest_point_in_surface(&Point3::new(1.0, 0.5, 0.0));
//! assert!((snapped - Point3::new(0.05, 0.5, 0.0)).norm() < 1e-12);
//!
//! let pose = HandSnapPose::new(Point3::new(0.05, 0.5, 0.0), Rotation::identity());
//! let rotation = surface.transform_rotation(&pose, &frame, &snapped);
//! assert!(rotation.angle() < 1e-12);
//! ```

mod cylinder;
mod error;
mod frame;
mod pose;

pub use cylinder::{BoundCylinder, CylinderConstraint};
pub use error::{Result, SurfaceError};
pub use frame::{Frame, SpatialFrame};
pub use pose::{GripSnap, HandSnapPose};
