mod clock;
mod system;
mod tree;

pub use clock::{rev_to_seconds, SimulationClock};
pub use system::{OrbitalSystem, SystemConfig};
pub use tree::{NodeId, TransformTree};
