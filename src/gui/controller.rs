use std::time::Instant;

use kiss3d::event::{Action, Event, Key, WindowEvent};

// Key config, all in one place
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_REVERSE: Key = Key::R;
const KEY_TOGGLE_PAUSE: Key = Key::Space;

pub struct Controller {
    // Orbital radians per wall-clock second; negative runs the year backward.
    speed: f64,
    paused: bool,
    last_frame: Instant,
    fps_counter: FpsCounter,
}

pub struct FpsCounter {
    instant: Instant,
    counter: usize,
    window_size_millis: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new(window_size_millis: usize) -> Self {
        FpsCounter {
            instant: Instant::now(),
            counter: 0,
            previous_fps: 0.0,
            window_size_millis,
        }
    }

    pub fn reset(&mut self) {
        self.instant = Instant::now();
        self.counter = 0;
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.counter += 1;

        let elapsed = self.instant.elapsed();
        if elapsed.as_millis() > self.window_size_millis as u128 {
            self.previous_fps = (1000 * self.counter) as f64 / elapsed.as_millis() as f64;
            self.reset();
        }
    }
}

impl Controller {
    pub fn new(initial_speed: f64) -> Self {
        Controller {
            speed: initial_speed,
            paused: false,
            last_frame: Instant::now(),
            fps_counter: FpsCounter::new(1000),
        }
    }

    /// Wall-clock seconds since the previous call. Call exactly once per
    /// frame; this is the `dt` fed into the simulation step.
    pub fn frame_dt(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        dt
    }

    pub fn process_event(&mut self, event: Event) {
        match event.value {
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.speed *= 2.0;
                println!("Speed is {} rad / s", self.speed);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.speed /= 2.0;
                println!("Speed is {} rad / s", self.speed);
            }
            WindowEvent::Key(KEY_REVERSE, Action::Press, _) => {
                self.speed *= -1.0;
                self.paused = false;
                println!("Speed is {} rad / s", self.speed);
            }
            WindowEvent::Key(KEY_TOGGLE_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
            }
            _ => {}
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn fps(&self) -> f64 {
        self.fps_counter.value()
    }

    pub fn increment_frame_counter(&mut self) {
        self.fps_counter.increment()
    }
}
