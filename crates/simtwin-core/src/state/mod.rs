//! Persisted front-end session state.
//!
//! Holds the two pieces of state shared across the UI: which model is
//! displayed and which backend session is active.

pub mod model;
pub mod repository;

pub use model::SessionState;
pub use repository::StateRepository;
