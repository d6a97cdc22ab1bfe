use kiss3d::camera::Camera;
use kiss3d::event::EventManager;
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::window::{State, Window};

use self::controller::Controller;
use self::view::View;
use crate::model::OrbitalSystem;

mod camera;
mod controller;
mod view;

pub struct Simulation {
    view: View,
    controller: Controller,
}

impl Simulation {
    pub fn new(
        system: OrbitalSystem,
        epoch_unix: i64,
        initial_speed: f64,
        window: &mut Window,
    ) -> Self {
        Simulation {
            view: View::new(system, epoch_unix, window),
            controller: Controller::new(initial_speed),
        }
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        for event in events.iter() {
            self.controller.process_event(event);
        }
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        self.view.cameras_and_effect_and_renderer()
    }

    fn step(&mut self, window: &mut Window) {
        // Measure the frame gap even while paused, so unpausing doesn't
        // deliver one giant accumulated step.
        let dt = self.controller.frame_dt();
        self.process_user_input(window.events());

        if !self.controller.is_paused() {
            self.view.update_state_by(self.controller.speed(), dt);
        }
        self.view.prerender_scene(window, &self.controller);
        self.controller.increment_frame_counter();
    }
}
