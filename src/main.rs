extern crate kiss3d;

use chrono::DateTime;
use clap::Parser;
use kiss3d::light::Light;
use kiss3d::window::Window;

use sol_orrery::consts;
use sol_orrery::gui::Simulation;
use sol_orrery::model::{OrbitalSystem, SystemConfig};

/// Sun-earth-moon orrery with a running calendar readout.
///
/// Space pauses, '.' and ',' double and halve the speed, 'r' reverses time.
/// Drag to orbit the camera, scroll to zoom.
#[derive(Debug, Parser)]
struct Args {
    /// Initial speed, in radians of orbital phase per wall-clock second
    #[arg(long, default_value_t = 0.1)]
    speed: f64,

    /// RFC 3339 timestamp to use as the phase-zero reference, instead of the
    /// 2020 December solstice
    #[arg(long)]
    epoch: Option<String>,
}

fn main() {
    let args = Args::parse();
    let epoch_unix = match &args.epoch {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .expect("Could not parse --epoch as an RFC 3339 timestamp")
            .timestamp(),
        None => consts::SOLSTICE_EPOCH_UNIX,
    };

    let mut window = Window::new("Sun-Earth-Moon Orrery");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let system = OrbitalSystem::new(SystemConfig::default());
    let simulation = Simulation::new(system, epoch_unix, args.speed, &mut window);
    window.render_loop(simulation);
}
