//! Behavioural properties of the cylindrical grip surface, checked on
//! rotated, translated and non-uniformly scaled frames.

use approx::assert_relative_eq;
use gripsnap_math::{repeat_degrees, signed_angle_degrees, Point3, Rotation, Vec3};
use gripsnap_surface::{BoundCylinder, CylinderConstraint, Frame, HandSnapPose, SpatialFrame};

fn frames() -> Vec<Frame> {
    vec![
        Frame::identity(),
        Frame::at(Point3::new(3.0, -1.0, 0.5)).unwrap(),
        Frame::new(
            Point3::new(-0.4, 2.0, 1.0),
            Rotation::from_euler_angles(0.3, -1.1, 0.7),
            Vec3::new(1.5, 0.8, 2.0),
        )
        .unwrap(),
    ]
}

fn handle(angle: f64) -> CylinderConstraint {
    CylinderConstraint::new(Point3::new(0.1, 0.0, 0.0), Point3::new(0.1, 1.0, 0.2), angle)
}

fn grip_for(frame: &Frame) -> Point3 {
    frame.to_world(&Point3::new(0.6, 0.4, -0.1))
}

/// Axial distance from start, and angle from the start boundary, of a world point.
fn cylindrical_coords<F: SpatialFrame>(surface: &BoundCylinder<'_, F>, p: &Point3) -> (f64, f64) {
    let dir = surface.direction();
    let offset = p - surface.start_point();
    let axial = offset.dot(dir.as_ref());
    let radial = offset - dir.as_ref() * axial;
    let angle = repeat_degrees(signed_angle_degrees(
        surface.start_angle_dir().as_ref(),
        &radial,
        dir.as_ref(),
    ));
    (axial, angle)
}

#[test]
fn angle_setter_wraps_into_range() {
    let mut c = handle(0.0);
    let cases = [
        (370.0, 10.0),
        (-30.0, 330.0),
        (720.5, 0.5),
        (359.0, 359.0),
        (0.0, 0.0),
    ];
    for (input, expected) in cases {
        c.set_angle(input);
        assert_relative_eq!(c.angle(), expected, epsilon = 1e-9);
        assert!((0.0..360.0).contains(&c.angle()));
    }
}

#[test]
fn points_on_surface_are_fixed() {
    let c = handle(359.9);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let height = surface.height();
        let mut a = 0.0;
        while a < 359.9 {
            for t in [0.0, 0.25, 0.5, 1.0] {
                let p = surface.point_at(a, t * height);
                let q = surface.nearest_point_in_surface(&p);
                assert!((p - q).norm() < 1e-9, "angle {a}, fraction {t}: {p} -> {q}");
            }
            a += 7.3;
        }
    }
}

#[test]
fn axial_offset_is_clamped_to_the_segment() {
    let c = handle(359.9);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let dir = surface.direction();
        let below = surface.point_at(40.0, 0.0) - dir.as_ref() * 5.0;
        let above = surface.point_at(40.0, surface.height()) + dir.as_ref() * 5.0;

        let (axial_below, _) =
            cylindrical_coords(&surface, &surface.nearest_point_in_surface(&below));
        let (axial_above, _) =
            cylindrical_coords(&surface, &surface.nearest_point_in_surface(&above));
        assert_relative_eq!(axial_below, 0.0, epsilon = 1e-9);
        assert_relative_eq!(axial_above, surface.height(), epsilon = 1e-9);
    }
}

#[test]
fn results_stay_on_the_shell() {
    let c = handle(200.0);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let radius = surface.radius();
        for i in 0..50 {
            let f = i as f64;
            let target = Point3::new((f * 0.7).sin() * 3.0, (f * 0.3).cos() * 2.0, f * 0.1 - 2.5);
            let p = surface.nearest_point_in_surface(&target);
            let dir = surface.direction();
            let offset = p - surface.start_point();
            let axial = offset.dot(dir.as_ref());
            let radial = (offset - dir.as_ref() * axial).norm();
            assert!(axial >= -1e-9 && axial <= surface.height() + 1e-9);
            assert_relative_eq!(radial, radius, epsilon = 1e-9);
            let (_, angle) = cylindrical_coords(&surface, &p);
            assert!(angle <= 200.0 + 1e-6 || angle >= 360.0 - 1e-6, "angle {angle}");
        }
    }
}

#[test]
fn outside_sweep_snaps_to_nearest_boundary() {
    let sweep = 120.0;
    let c = handle(sweep);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let start_dir = surface.start_angle_dir();
        let end_dir = surface.end_angle_dir();
        for outside in [125.0, 180.0, 239.0, 241.0, 300.0, 355.0] {
            let target = surface.point_at(outside, 0.3 * surface.height());
            let p = surface.nearest_point_in_surface(&target);
            let dir = surface.direction();
            let offset = p - surface.start_point();
            let radial = offset - dir.as_ref() * offset.dot(dir.as_ref());
            let radial = radial.normalize();

            let expected = if outside - sweep >= 360.0 - outside { start_dir } else { end_dir };
            assert!(
                (radial - expected.as_ref()).norm() < 1e-9,
                "angle {outside} snapped to the wrong boundary"
            );
        }
    }
}

#[test]
fn degenerate_axis_falls_back_to_up() {
    let c = CylinderConstraint::new(Point3::new(0.2, 0.2, 0.2), Point3::new(0.2, 0.2, 0.2), 90.0);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let dir = surface.direction();
        assert!((dir.as_ref() - frame.up_axis().as_ref()).norm() < 1e-12);
        assert!(dir.iter().all(|v| v.is_finite()));
        let p = surface.nearest_point_in_surface(&Point3::new(9.0, -9.0, 1.0));
        assert!(p.coords.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn single_point_projects_onto_its_ring() {
    let mut c = handle(180.0);
    c.make_single_point();
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        assert_relative_eq!(surface.height(), 0.0);
        for target in [Point3::new(1.0, 2.0, 3.0), frame.position(), Point3::new(-5.0, 0.0, 0.1)] {
            let p = surface.nearest_point_in_surface(&target);
            assert!(p.coords.iter().all(|v| v.is_finite()));
            let distance = (p - surface.start_point()).norm();
            assert_relative_eq!(distance, surface.radius(), epsilon = 1e-9);
        }
    }
}

#[test]
fn rotation_is_unchanged_at_own_entry_point() {
    let c = handle(300.0);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let reference = Frame::at(Point3::new(0.3, 0.0, -0.2))
            .and_then(|f| f.with_rotation(Rotation::from_euler_angles(-0.2, 0.9, 0.4)))
            .unwrap();
        let pose = HandSnapPose::new(
            Point3::new(0.8, 0.5, 0.3),
            Rotation::from_euler_angles(1.0, 0.2, -0.5),
        );
        let entry = surface.nearest_point_in_surface(&pose.world_position(&reference));
        let rotation = surface.transform_rotation(&pose, &reference, &entry);
        assert!(rotation.angle_to(&pose.world_rotation(&reference)) < 1e-9);
    }
}

#[test]
fn rotation_correction_preserves_the_axis() {
    let c = handle(300.0);
    for frame in frames() {
        let surface = c.bind(&frame, grip_for(&frame));
        let reference = Frame::identity();
        let entry = surface.point_at(10.0, 0.2);
        let pose = HandSnapPose::from_world(&reference, &entry, &Rotation::identity());
        for target_angle in [20.0, 90.0, 190.0, 250.0] {
            let target = surface.point_at(target_angle, 0.2);
            let rotation = surface.transform_rotation(&pose, &reference, &target);
            let axis = surface.direction();
            assert!((rotation * axis.as_ref() - axis.as_ref()).norm() < 1e-9);
            assert_relative_eq!(
                rotation.angle().to_degrees(),
                (target_angle - 10.0_f64).min(360.0 - (target_angle - 10.0)),
                epsilon = 1e-6
            );
        }
    }
}
