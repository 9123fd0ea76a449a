pub mod body;
pub mod collisions;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod integrator;
pub mod params;
pub mod presets;
pub mod sampler;
pub mod simulation;
pub mod store;

pub use body::{Body, BodyId, BodySnapshot, BodySpec};
pub use collisions::{resolve_collisions, MergeEvent};
pub use diagnostics::EnergyReport;
pub use error::SimError;
pub use field::compute_accelerations;
pub use integrator::{leapfrog_step, FrameClock};
pub use params::{Parameter, SimParams};
pub use presets::Preset;
pub use sampler::CurvatureGrid;
pub use simulation::{Simulation, StepReport};
pub use store::BodyStore;

pub use glam::DVec3;
