//! Domain-given constants for the Sun-Earth-Moon system.

/// Seconds from the solstice reference to the end of the first quarter-year.
pub const Q1_SECONDS: f64 = 7_889_538.24;
/// Seconds in half a year; one half-turn of the orbit.
pub const Q2_SECONDS: f64 = 15_779_076.48;
/// Seconds from the solstice reference to the end of the third quarter-year.
pub const Q3_SECONDS: f64 = 23_668_614.72;
/// Seconds in one sidereal year.
pub const YEAR_SECONDS: f64 = 31_558_152.96;

/// Days per revolution around the sun; also the spin-to-orbit rate ratio.
pub const REVOLUTION_DAYS: f64 = 365.2564;
/// Days per lunar orbit around the earth.
pub const LUNAR_DAYS: f64 = 27.3;
/// Inclination of the lunar orbital plane against the ecliptic.
pub const LUNAR_PLANE_DEGREES: f64 = 5.14;
/// Axial tilt of the earth.
pub const EARTH_TILT_DEGREES: f64 = 23.4;

/// Unix timestamp of the 2020 December solstice (2020-12-21T10:02:00Z).
/// The default real-world instant corresponding to orbital phase zero.
pub const SOLSTICE_EPOCH_UNIX: i64 = 1_608_544_920;

// Display geometry, in scene units. Wildly out of scale; a true-scale
// earth would be invisible next to its orbit.
pub const SUN_RADIUS: f32 = 2.0;
pub const EARTH_RADIUS: f32 = 0.5;
pub const MOON_RADIUS: f32 = 0.15;
pub const EARTH_ORBIT_RADIUS: f64 = 10.0;
pub const MOON_ORBIT_RADIUS: f64 = 1.5;
