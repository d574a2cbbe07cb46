//! Simulation backend gateway trait.

use crate::error::Result;
use crate::snapshot::StateSnapshot;
use async_trait::async_trait;

/// Model parameters passed through to the backend as an opaque JSON object.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// Typed surface of the remote simulation service, one method per backend
/// operation.
///
/// Implementations perform exactly one HTTP call per method and surface
/// failures as [`crate::TwinError`] values carrying the operation name.
/// No retry, caching, or batching lives at this layer; retry is applied
/// around the step operation by its caller.
#[async_trait]
pub trait SimulationGateway: Send + Sync {
    /// Initializes a new simulation session and returns its id.
    async fn init_simulation(&self, model_name: &str, params: Option<Params>) -> Result<String>;

    /// Advances the simulation by one step with the given control input.
    async fn step_simulation(
        &self,
        session_id: &str,
        control_input: f64,
        delta_time: Option<f64>,
    ) -> Result<StateSnapshot>;

    /// Fetches the current state of a session.
    async fn get_state(&self, session_id: &str) -> Result<StateSnapshot>;

    /// Fetches the ordered history of state snapshots for a session.
    async fn get_history(&self, session_id: &str) -> Result<Vec<StateSnapshot>>;

    /// Fetches backend log lines for a session.
    async fn get_logs(&self, session_id: &str) -> Result<Vec<String>>;

    /// Resets a session, optionally with new parameters. The session id
    /// stays valid and unchanged.
    async fn reset_simulation(
        &self,
        session_id: &str,
        params: Option<Params>,
    ) -> Result<StateSnapshot>;

    /// Patches model parameters on a running session.
    async fn update_params(&self, session_id: &str, params: Params) -> Result<StateSnapshot>;
}
