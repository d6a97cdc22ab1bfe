use nalgebra::{Isometry3, Point3, UnitQuaternion, Vector3};

use crate::consts;
use crate::model::tree::{NodeId, TransformTree};

/// The fixed ratios and offsets that define the system. One place for the
/// numbers instead of literals sprinkled through the frame loop.
#[derive(Debug, Clone, Copy)]
pub struct SystemConfig {
    pub earth_orbit_radius: f64,
    pub moon_orbit_radius: f64,
    pub earth_tilt_degrees: f64,
    pub lunar_plane_degrees: f64,
    pub revolution_days: f64,
    pub lunar_days: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        SystemConfig {
            earth_orbit_radius: consts::EARTH_ORBIT_RADIUS,
            moon_orbit_radius: consts::MOON_ORBIT_RADIUS,
            earth_tilt_degrees: consts::EARTH_TILT_DEGREES,
            lunar_plane_degrees: consts::LUNAR_PLANE_DEGREES,
            revolution_days: consts::REVOLUTION_DAYS,
            lunar_days: consts::LUNAR_DAYS,
        }
    }
}

/// The sun-earth-moon transform hierarchy and its per-frame kinematics.
///
/// Layout, from the root down:
/// - sun: fixed at the origin
/// - earth orbit: rotates `+delta`, sweeps the earth around the sun
/// - earth distance: radial offset, counter-rotates `-delta` so that
///   everything below it keeps a fixed world orientation across the orbit
///   - earth tilt: static axial tilt, spins at the day rate
///   - moon plane: static inclination of the lunar orbit
///     - moon orbit: rotates at the lunar rate
///       - moon distance: radial offset to the moon itself
pub struct OrbitalSystem {
    config: SystemConfig,
    tree: TransformTree,
    sun: NodeId,
    earth_orbit: NodeId,
    earth_distance: NodeId,
    earth_tilt: NodeId,
    moon_orbit: NodeId,
    moon_distance: NodeId,
    moon_plane: NodeId,
}

impl OrbitalSystem {
    pub fn new(config: SystemConfig) -> Self {
        let mut tree = TransformTree::new();
        let root = tree.root();

        let sun = tree.attach(root);

        let earth_orbit = tree.attach(root);
        let earth_distance = tree.attach(earth_orbit);
        tree.set_translation(
            earth_distance,
            Vector3::new(config.earth_orbit_radius, 0.0, 0.0),
        );

        let earth_tilt = tree.attach(earth_distance);
        tree.set_rotation(earth_tilt, tilt_about_z(config.earth_tilt_degrees));

        let moon_plane = tree.attach(earth_distance);
        tree.set_rotation(moon_plane, tilt_about_z(config.lunar_plane_degrees));
        let moon_orbit = tree.attach(moon_plane);
        let moon_distance = tree.attach(moon_orbit);
        tree.set_translation(
            moon_distance,
            Vector3::new(config.moon_orbit_radius, 0.0, 0.0),
        );

        OrbitalSystem {
            config,
            tree,
            sun,
            earth_orbit,
            earth_distance,
            earth_tilt,
            moon_orbit,
            moon_distance,
            moon_plane,
        }
    }

    /// Advances every moving node by one frame's worth of rotation.
    ///
    /// `delta = speed * dt` is the earth's orbital step in radians. The
    /// distance node counter-rotates so the tilt axis stays pointed at the
    /// same piece of sky all year; the spin and lunar nodes run at their
    /// period ratios. Zero and negative deltas are fine, as are arbitrarily
    /// large ones (a huge frame hitch just means a huge step).
    pub fn advance(&mut self, speed: f64, dt: f64) {
        let delta = speed * dt;
        let y = Vector3::y_axis();

        self.tree.append_rotation(self.earth_orbit, &y, delta);
        self.tree.append_rotation(self.earth_distance, &y, -delta);
        self.tree
            .append_rotation(self.earth_tilt, &y, delta * self.config.revolution_days);
        self.tree.append_rotation(
            self.moon_orbit,
            &y,
            delta * self.config.revolution_days / self.config.lunar_days,
        );
    }

    /// The (x, y) rotation readout of the earth-distance node, the pair the
    /// calendar reconstruction runs on.
    pub fn orbit_rotation(&self) -> (f64, f64) {
        let angles = self.tree.rotation_angles(self.earth_distance);
        (angles.x, angles.y)
    }

    /// The moon-orbit node's current y rotation angle.
    pub fn moon_orbit_angle(&self) -> f64 {
        self.tree.rotation_angles(self.moon_orbit).y
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn sun_transform(&self) -> Isometry3<f64> {
        self.tree.world_transform(self.sun)
    }

    /// World transform of the earth's tilted, spinning globe.
    pub fn earth_transform(&self) -> Isometry3<f64> {
        self.tree.world_transform(self.earth_tilt)
    }

    pub fn moon_transform(&self) -> Isometry3<f64> {
        self.tree.world_transform(self.moon_distance)
    }

    /// World transform of the lunar orbital plane; the moon's display path
    /// circle lives in this frame.
    pub fn moon_plane_transform(&self) -> Isometry3<f64> {
        self.tree.world_transform(self.moon_plane)
    }

    /// Points of a display circle of `radius` in the local xz plane.
    /// Display-only; the simulation never touches these.
    pub fn path_points(radius: f64, num_segments: usize) -> Vec<Point3<f64>> {
        use std::f64::consts::PI;
        (0..=num_segments)
            .map(|i| 2.0 * PI * i as f64 / num_segments as f64)
            .map(|t| Point3::new(radius * t.cos(), 0.0, radius * t.sin()))
            .collect()
    }
}

fn tilt_about_z(degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::consts::{LUNAR_DAYS, REVOLUTION_DAYS};

    #[test]
    fn test_advance_moves_earth_around_the_sun() {
        let mut system = OrbitalSystem::new(SystemConfig::default());
        let start = system.earth_transform() * Point3::origin();
        approx::assert_relative_eq!(start, Point3::new(10.0, 0.0, 0.0));

        system.advance(1.0, PI / 2.0);
        let quarter = system.earth_transform() * Point3::origin();
        approx::assert_relative_eq!(
            quarter,
            Point3::new(0.0, 0.0, -10.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_tilt_axis_stays_fixed_across_the_orbit() {
        let mut system = OrbitalSystem::new(SystemConfig::default());
        let axis_at = |s: &OrbitalSystem| {
            // Strip the day-rate spin by looking at where the tilted pole
            // points; spin is about the pole itself so it doesn't move it.
            s.earth_transform().rotation * Vector3::y()
        };

        let initial = axis_at(&system);
        for _ in 0..7 {
            system.advance(1.0, 0.31);
            approx::assert_relative_eq!(axis_at(&system), initial, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_moon_orbit_angle_follows_period_ratio() {
        let mut system = OrbitalSystem::new(SystemConfig::default());
        let delta = 0.01;
        system.advance(1.0, delta);
        approx::assert_relative_eq!(
            system.moon_orbit_angle(),
            delta * REVOLUTION_DAYS / LUNAR_DAYS,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_speed_is_inert() {
        let mut system = OrbitalSystem::new(SystemConfig::default());
        system.advance(0.7, 0.2);
        let before = system.orbit_rotation();

        for _ in 0..100 {
            system.advance(0.0, 0.016);
        }
        let after = system.orbit_rotation();
        assert_eq!(before, after);

        // Zero dt is just as inert as zero speed.
        system.advance(0.7, 0.0);
        assert_eq!(system.orbit_rotation(), after);
    }

    #[test]
    fn test_moon_stays_near_its_inclined_plane() {
        let mut system = OrbitalSystem::new(SystemConfig::default());
        let max_height = 1.5 * (5.14f64).to_radians().sin();

        for _ in 0..50 {
            system.advance(1.0, 0.1);
            let moon = system.moon_transform() * Point3::origin();
            let earth = system.earth_transform() * Point3::origin();
            let local = moon - earth;
            approx::assert_relative_eq!(local.norm(), 1.5, max_relative = 1e-9);
            assert!(local.y.abs() <= max_height + 1e-9);
        }
    }
}
