use chrono::{TimeZone, Utc};
use kiss3d::camera::Camera;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::window::Window;
use nalgebra::{Isometry3, Point2, Point3};

use super::camera::OrbitCamera;
use super::controller::Controller;
use crate::consts;
use crate::model::{rev_to_seconds, OrbitalSystem, SimulationClock};

const PATH_SEGMENTS: usize = 256;
const CAMERA_START_DISTANCE: f32 = 25.0;

pub struct View {
    // Object state
    system: OrbitalSystem,
    clock: SimulationClock,
    epoch_unix: i64,
    displayed_seconds: f64,
    // Scene objects
    sun_node: SceneNode,
    earth_node: SceneNode,
    moon_node: SceneNode,
    earth_path: Vec<Point3<f64>>,
    moon_path: Vec<Point3<f64>>,
    // Camera
    camera: OrbitCamera,
}

impl View {
    pub fn new(system: OrbitalSystem, epoch_unix: i64, window: &mut Window) -> Self {
        let mut sun_node = window.add_sphere(consts::SUN_RADIUS);
        sun_node.set_color(1.0, 0.8, 0.5);

        let mut earth_node = window.add_sphere(consts::EARTH_RADIUS);
        earth_node.set_color(0.2, 0.4, 1.0);

        let mut moon_node = window.add_sphere(consts::MOON_RADIUS);
        moon_node.set_color(0.7, 0.7, 0.7);

        let config = system.config();
        let earth_path = OrbitalSystem::path_points(config.earth_orbit_radius, PATH_SEGMENTS);
        let moon_path = OrbitalSystem::path_points(config.moon_orbit_radius, PATH_SEGMENTS);

        let (rot_x, rot_y) = system.orbit_rotation();
        let clock = SimulationClock::new(rev_to_seconds(rot_x, rot_y));

        let mut view = View {
            system,
            clock,
            epoch_unix,
            displayed_seconds: 0.0,
            sun_node,
            earth_node,
            moon_node,
            earth_path,
            moon_path,
            camera: OrbitCamera::new(CAMERA_START_DISTANCE),
        };
        view.update_scene_objects();

        view
    }

    pub fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }

    /// One simulation step: advance the tree, reconstruct calendar time from
    /// the new orientation, run the wraparound tracker, move scene objects.
    pub fn update_state_by(&mut self, speed: f64, dt: f64) {
        self.system.advance(speed, dt);

        let (rot_x, rot_y) = self.system.orbit_rotation();
        let elapsed = rev_to_seconds(rot_x, rot_y);
        self.displayed_seconds = self.clock.tick(elapsed);

        self.update_scene_objects();
    }

    fn update_scene_objects(&mut self) {
        // does some nice conversions
        fn set_transform_helper(obj: &mut SceneNode, transform: Isometry3<f64>) {
            let transform: Isometry3<f32> = nalgebra::convert(transform);
            obj.set_local_translation(transform.translation);
            obj.set_local_rotation(transform.rotation);
        }

        set_transform_helper(&mut self.sun_node, self.system.sun_transform());
        set_transform_helper(&mut self.earth_node, self.system.earth_transform());
        set_transform_helper(&mut self.moon_node, self.system.moon_transform());
    }

    pub fn prerender_scene(&mut self, window: &mut Window, controller: &Controller) {
        let path_color = Point3::new(0.4, 0.4, 0.4);

        // The earth's orbit is fixed in the root frame; the moon's rides
        // along in its inclined plane.
        draw_path(
            window,
            self.earth_path.iter().map(|p| nalgebra::convert(*p)),
            &path_color,
        );
        let moon_frame = self.system.moon_plane_transform();
        draw_path(
            window,
            self.moon_path.iter().map(|p| nalgebra::convert(moon_frame * p)),
            &path_color,
        );

        self.draw_earth_axis(window);

        // Draw text
        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.calendar_text(),
            &Point2::origin(),
            60.0,
            &default_font,
            &text_color,
        );
        window.draw_text(
            &self.status_text(controller),
            // no idea why i have to multiply by 2.0, but there it is
            &Point2::new(window.width() as f32 * 2.0 - 600.0, 0.0),
            60.0,
            &default_font,
            &text_color,
        );
    }

    fn draw_earth_axis(&self, window: &mut Window) {
        // A pole sticking out of both ends of the globe, classroom-model
        // style.
        let earth = self.system.earth_transform();
        let top: Point3<f32> = nalgebra::convert(earth * Point3::new(0.0, 1.0, 0.0));
        let bottom: Point3<f32> = nalgebra::convert(earth * Point3::new(0.0, -1.0, 0.0));
        window.draw_line(&top, &bottom, &Point3::new(1.0, 1.0, 1.0));
    }

    fn calendar_text(&self) -> String {
        let unix = self.epoch_unix + self.displayed_seconds as i64;
        let date = match Utc.timestamp_opt(unix, 0).single() {
            Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => format!("{} s", unix),
        };

        format!(
            "{}\nYear offset: {:+.0} s",
            date,
            self.clock.year_offset()
        )
    }

    fn status_text(&self, controller: &Controller) -> String {
        format!(
            "Speed: {} rad/s{}\nFPS: {:.0}",
            controller.speed(),
            if controller.is_paused() { " (paused)" } else { "" },
            controller.fps(),
        )
    }
}

fn draw_path<I: Iterator<Item = Point3<f32>>>(
    window: &mut Window,
    points: I,
    color: &Point3<f32>,
) {
    let mut prev_pt = None;
    for pt in points {
        if let Some(prev_pt) = prev_pt {
            window.draw_line(&prev_pt, &pt, color);
        }
        prev_pt = Some(pt);
    }
}
