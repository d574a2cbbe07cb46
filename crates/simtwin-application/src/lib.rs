//! Use-case layer: coordinates the session store, the backend gateway,
//! and the step retry executor on behalf of the front end.

pub mod params;
pub mod simulation_service;

pub use simulation_service::{SimulationService, StepOutcome};
