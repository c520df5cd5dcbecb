//! Decorative animation state.
//!
//! Nothing here affects page content. The types model the hero typewriter,
//! background particles and counters so their timing can be tested, and
//! [`ScheduledTask`] drives periodic work such as the file watcher.

mod effects;
mod particles;
mod task;

pub use effects::{Counter, OnceTrigger, Typewriter, ease_out_cubic};
pub use particles::{Link, Particle, ParticleField};
pub use task::{ScheduledTask, StopHandle};
