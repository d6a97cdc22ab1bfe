use std::f64::consts::PI;

use crate::consts::{Q1_SECONDS, Q2_SECONDS, Q3_SECONDS, YEAR_SECONDS};

/// Maps the earth-distance node's rotation readout back to elapsed seconds
/// since the solstice reference, in [0, YEAR_SECONDS).
///
/// The orbit node only ever rotates about y, but the Euler readout folds at
/// +-pi/2: for half of every orbit, `rot_y` comes back reflected and `rot_x`
/// jumps from zero to +-pi. The four-way split below uses the sign of that
/// jump to decide which half-turn the orbit is in, then unfolds everything
/// into one phase ramp from 0 to 2*pi.
///
/// Note the exact `== 0.0` comparisons. They work only because a pure-y
/// quaternion composition keeps the readout's x component an exact signed
/// zero or an exact +-pi (see `math::euler`); the signed zero's sign feeds
/// the `rot_x < 0.0` arm. Rewriting this as a single atan2 over both
/// components would be more robust, but would change the observable values
/// near the fold, so the branch structure is kept as-is.
pub fn rev_to_seconds(rot_x: f64, rot_y: f64) -> f64 {
    let seconds_per_radian = Q2_SECONDS / PI;

    if rot_y <= 0.0 && rot_x == 0.0 {
        -rot_y * seconds_per_radian
    } else if rot_y <= 0.0 && rot_x != 0.0 {
        (PI + rot_y) * seconds_per_radian
    } else if rot_y >= 0.0 && rot_x < 0.0 {
        (PI + rot_y) * seconds_per_radian
    } else if rot_y >= 0.0 && rot_x == 0.0 {
        (2.0 * PI - rot_y) * seconds_per_radian
    } else {
        // rot_y > 0 with rot_x > 0 never comes out of the readout.
        0.0
    }
}

/// Tracks whole-year wraparounds of the reconstructed phase so the displayed
/// calendar time keeps running past a single orbit.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    year_offset: f64,
    last_elapsed: f64,
}

impl SimulationClock {
    pub fn new(initial_elapsed: f64) -> Self {
        SimulationClock {
            year_offset: 0.0,
            last_elapsed: initial_elapsed,
        }
    }

    /// Feeds one frame's reconstructed elapsed-seconds value and returns the
    /// continuous calendar time (without the epoch offset).
    ///
    /// A forward crossing (phase wrapping from just under a year back to just
    /// above zero) adds exactly one year to the running offset; a backward
    /// crossing subtracts one. The correction lands on the same frame as the
    /// wrap, so the returned value stays continuous through the boundary.
    /// At most one crossing is detected per frame; a single step covering
    /// more than a full orbit slips past this check.
    pub fn tick(&mut self, elapsed: f64) -> f64 {
        if self.last_elapsed > Q3_SECONDS && elapsed < Q1_SECONDS {
            self.year_offset += YEAR_SECONDS;
        } else if self.last_elapsed < Q1_SECONDS && elapsed > Q3_SECONDS {
            self.year_offset -= YEAR_SECONDS;
        }
        self.last_elapsed = elapsed;
        elapsed + self.year_offset
    }

    pub fn year_offset(&self) -> f64 {
        self.year_offset
    }

    pub fn last_elapsed(&self) -> f64 {
        self.last_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_zero_is_solstice() {
        assert_eq!(rev_to_seconds(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_half_orbit_is_half_year() {
        approx::assert_relative_eq!(
            rev_to_seconds(0.0, -PI),
            Q2_SECONDS,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fold_boundary_swallows_small_angles() {
        // Any nonzero x, however tiny and of either sign, is taken as "past
        // the fold" and pins the readout to the half-year mark. This is the
        // known precision hazard of the equality check.
        approx::assert_relative_eq!(rev_to_seconds(0.01, 0.0), Q2_SECONDS, max_relative = 1e-12);
        approx::assert_relative_eq!(rev_to_seconds(-0.01, 0.0), Q2_SECONDS, max_relative = 1e-12);
    }

    #[test]
    fn test_quarter_points() {
        let quarter = Q2_SECONDS / 2.0;
        approx::assert_relative_eq!(
            rev_to_seconds(0.0, -PI / 2.0),
            quarter,
            max_relative = 1e-12
        );
        approx::assert_relative_eq!(
            rev_to_seconds(-PI, PI / 2.0),
            3.0 * quarter,
            max_relative = 1e-12
        );
        // Negative zero compares equal to zero, so a "just before wrap"
        // readout still lands in the final quarter.
        approx::assert_relative_eq!(
            rev_to_seconds(-0.0, 0.1),
            (2.0 * PI - 0.1) * (Q2_SECONDS / PI)
        );
    }

    #[test]
    fn test_forward_wraparound_adds_exactly_one_year() {
        let mut clock = SimulationClock::new(Q3_SECONDS + 1.0);
        let displayed = clock.tick(Q1_SECONDS - 1.0);

        assert_eq!(clock.year_offset(), YEAR_SECONDS);
        approx::assert_relative_eq!(displayed, Q1_SECONDS - 1.0 + YEAR_SECONDS);
    }

    #[test]
    fn test_backward_wraparound_subtracts_exactly_one_year() {
        let mut clock = SimulationClock::new(Q1_SECONDS - 1.0);
        let displayed = clock.tick(Q3_SECONDS + 1.0);

        assert_eq!(clock.year_offset(), -YEAR_SECONDS);
        approx::assert_relative_eq!(displayed, Q3_SECONDS + 1.0 - YEAR_SECONDS);
    }

    #[test]
    fn test_ordinary_frames_leave_offset_alone() {
        let mut clock = SimulationClock::new(0.0);
        for step in 1..100 {
            clock.tick(step as f64 * 1000.0);
        }
        assert_eq!(clock.year_offset(), 0.0);
    }

    #[test]
    fn test_offsets_accumulate_over_many_years() {
        let mut clock = SimulationClock::new(0.0);
        for _ in 0..3 {
            clock.tick(Q2_SECONDS);
            clock.tick(Q3_SECONDS + 10.0);
            clock.tick(Q1_SECONDS - 10.0);
        }
        assert_eq!(clock.year_offset(), 3.0 * YEAR_SECONDS);
    }
}
