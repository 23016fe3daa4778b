mod encoder;
mod observation;
mod raycast;

pub use encoder::encode;
pub use observation::{Observation, ProbeReading};
pub use raycast::{sphere_cast, ProbeClass, ProbeHit, ProbeTarget};
