//! Simulation use case implementation.
//!
//! `SimulationService` is the single entry point the front end talks to.
//! It owns the wiring between the persisted session store, the backend
//! gateway, and the step retry executor, and it enforces the session
//! invariants: a session id only ever comes from a successful initialize
//! call, and selecting a model never discards an active session.

use simtwin_client::RetryPolicy;
use simtwin_core::catalog;
use simtwin_core::fields::StateFields;
use simtwin_core::gateway::{Params, SimulationGateway};
use simtwin_core::history::HistorySeries;
use simtwin_core::state::{SessionState, StateRepository};
use simtwin_core::{Result, StateSnapshot, TwinError};
use std::sync::Arc;

/// Result of a successful step: the snapshot the step returned, plus the
/// step/time fields projected from the freshest state available.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub snapshot: StateSnapshot,
    pub fields: StateFields,
}

/// Use case for driving a simulation session.
pub struct SimulationService {
    gateway: Arc<dyn SimulationGateway>,
    store: Arc<dyn StateRepository>,
    retry: RetryPolicy,
}

impl SimulationService {
    pub fn new(gateway: Arc<dyn SimulationGateway>, store: Arc<dyn StateRepository>) -> Self {
        Self {
            gateway,
            store,
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the step retry schedule.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Returns the persisted session state.
    pub async fn session_state(&self) -> SessionState {
        self.store.state().await
    }

    /// Persists a new model selection.
    ///
    /// Deliberately leaves the session id alone: which model is displayed
    /// and which backend session is active are independent concerns.
    pub async fn select_model(&self, model: &str) {
        self.store.set_selected_model(model.to_string()).await;
    }

    /// Kicks off a detached initialize for the currently selected model.
    ///
    /// The task's failure is logged and cannot block or fail the selection
    /// that triggered it. There is no cancellation; letting the task
    /// finish is safe because a late session id simply replaces the
    /// stored one.
    pub fn spawn_auto_init(self: &Arc<Self>) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            match service.initialize(None).await {
                Ok(session_id) => {
                    tracing::info!(%session_id, "auto-initialized session after model selection");
                }
                Err(err) => {
                    tracing::warn!("auto-init after model selection failed: {err}");
                }
            }
        });
    }

    /// Initializes a session for the selected model and stores the
    /// returned session id.
    pub async fn initialize(&self, params: Option<Params>) -> Result<String> {
        let model = self.store.selected_model().await;
        let session_id = self.gateway.init_simulation(&model, params).await?;
        self.store.set_session_id(Some(session_id.clone())).await;
        Ok(session_id)
    }

    /// Steps the simulation with the given control input.
    ///
    /// The control value is clamped into the selected model's bounds, the
    /// step call runs under the retry executor, and on success a single
    /// best-effort state fetch refreshes the step/time display fields.
    /// The refresh failing never fails the step.
    pub async fn step(&self, control_input: f64, delta_time: Option<f64>) -> Result<StepOutcome> {
        let session_id = self.require_session().await?;
        let model = self.store.selected_model().await;

        let bounds = catalog::control_bounds(&model);
        let control = bounds.clamp(control_input);
        if control != control_input {
            tracing::debug!(
                requested = control_input,
                clamped = control,
                %model,
                "control input clamped into model bounds"
            );
        }

        let snapshot = {
            let gateway = Arc::clone(&self.gateway);
            let session_id = session_id.clone();
            self.retry
                .run(move || {
                    let gateway = Arc::clone(&gateway);
                    let session_id = session_id.clone();
                    async move {
                        gateway
                            .step_simulation(&session_id, control, delta_time)
                            .await
                    }
                })
                .await?
        };

        let fields = match self.gateway.get_state(&session_id).await {
            Ok(fresh) => StateFields::extract(Some(&fresh)),
            Err(err) => {
                tracing::debug!("post-step state refresh failed: {err}");
                StateFields::extract(Some(&snapshot))
            }
        };

        Ok(StepOutcome { snapshot, fields })
    }

    /// Fetches the current state of the active session.
    pub async fn current_state(&self) -> Result<StateSnapshot> {
        let session_id = self.require_session().await?;
        self.gateway.get_state(&session_id).await
    }

    /// Fetches the session history prepared for rendering.
    pub async fn history(&self) -> Result<HistorySeries> {
        let session_id = self.require_session().await?;
        let records = self.gateway.get_history(&session_id).await?;
        Ok(HistorySeries::build(records))
    }

    /// Fetches backend log lines for the active session.
    pub async fn logs(&self) -> Result<Vec<String>> {
        let session_id = self.require_session().await?;
        self.gateway.get_logs(&session_id).await
    }

    /// Resets the active session. The stored session id stays as-is; the
    /// backend keeps the same session running from its initial state.
    pub async fn reset(&self, params: Option<Params>) -> Result<StateSnapshot> {
        let session_id = self.require_session().await?;
        self.gateway.reset_simulation(&session_id, params).await
    }

    /// Patches model parameters on the active session.
    pub async fn update_params(&self, params: Params) -> Result<StateSnapshot> {
        let session_id = self.require_session().await?;
        self.gateway.update_params(&session_id, params).await
    }

    async fn require_session(&self) -> Result<String> {
        self.store.session_id().await.ok_or(TwinError::NoSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex as StdMutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// In-memory store for exercising the service without touching disk.
    #[derive(Default)]
    struct MemoryStore {
        state: StdMutex<SessionState>,
    }

    #[async_trait]
    impl StateRepository for MemoryStore {
        async fn state(&self) -> SessionState {
            self.state.lock().unwrap().clone()
        }

        async fn selected_model(&self) -> String {
            self.state.lock().unwrap().selected_model.clone()
        }

        async fn session_id(&self) -> Option<String> {
            self.state.lock().unwrap().session_id.clone()
        }

        async fn set_selected_model(&self, model: String) {
            self.state.lock().unwrap().selected_model = model;
        }

        async fn set_session_id(&self, session_id: Option<String>) {
            self.state.lock().unwrap().session_id = session_id;
        }
    }

    /// Scriptable gateway: fails the step a configured number of times,
    /// then succeeds; counts every call.
    #[derive(Default)]
    struct StubGateway {
        step_failures: u32,
        fail_get_state: bool,
        init_calls: AtomicU32,
        step_calls: AtomicU32,
        get_state_calls: AtomicU32,
        last_init: StdMutex<Option<(String, Option<Params>)>>,
    }

    fn snapshot(value: serde_json::Value) -> StateSnapshot {
        serde_json::from_value(value).unwrap()
    }

    #[async_trait]
    impl SimulationGateway for StubGateway {
        async fn init_simulation(
            &self,
            model_name: &str,
            params: Option<Params>,
        ) -> Result<String> {
            self.init_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_init.lock().unwrap() = Some((model_name.to_string(), params));
            Ok("session-123".to_string())
        }

        async fn step_simulation(
            &self,
            _session_id: &str,
            _control_input: f64,
            _delta_time: Option<f64>,
        ) -> Result<StateSnapshot> {
            let attempt = self.step_calls.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.step_failures {
                Err(TwinError::api(
                    "step simulation",
                    500,
                    format!("backend exploded on attempt {attempt}"),
                ))
            } else {
                Ok(snapshot(json!({"level": 10.0})))
            }
        }

        async fn get_state(&self, _session_id: &str) -> Result<StateSnapshot> {
            self.get_state_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_get_state {
                Err(TwinError::transport("get state", "connection refused"))
            } else {
                Ok(snapshot(json!({"step": 4, "time": 2.0, "level": 10.0})))
            }
        }

        async fn get_history(&self, _session_id: &str) -> Result<Vec<StateSnapshot>> {
            Ok(serde_json::from_value(json!([
                {"time": 0, "value": 1},
                {"time": 1, "value": 2},
            ]))
            .unwrap())
        }

        async fn get_logs(&self, _session_id: &str) -> Result<Vec<String>> {
            Ok(vec!["booted".to_string()])
        }

        async fn reset_simulation(
            &self,
            _session_id: &str,
            _params: Option<Params>,
        ) -> Result<StateSnapshot> {
            Ok(snapshot(json!({"level": 0.0})))
        }

        async fn update_params(
            &self,
            _session_id: &str,
            _params: Params,
        ) -> Result<StateSnapshot> {
            Ok(snapshot(json!({"level": 0.0})))
        }
    }

    fn service_with(gateway: StubGateway) -> (Arc<StubGateway>, Arc<MemoryStore>, SimulationService) {
        let gateway = Arc::new(gateway);
        let store = Arc::new(MemoryStore::default());
        let service = SimulationService::new(
            Arc::clone(&gateway) as Arc<dyn SimulationGateway>,
            Arc::clone(&store) as Arc<dyn StateRepository>,
        )
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(5)));
        (gateway, store, service)
    }

    #[tokio::test]
    async fn initialize_stores_the_returned_session_id() {
        let (gateway, store, service) = service_with(StubGateway::default());
        store.set_selected_model("water_tank".to_string()).await;

        let params = json!({"initial": 10}).as_object().cloned();
        let session_id = service.initialize(params.clone()).await.unwrap();

        assert_eq!(session_id, "session-123");
        assert_eq!(store.session_id().await, Some("session-123".to_string()));
        let recorded = gateway.last_init.lock().unwrap().clone();
        assert_eq!(recorded, Some(("water_tank".to_string(), params)));
    }

    #[tokio::test]
    async fn step_without_session_fails_fast_with_no_http_calls() {
        let (gateway, _store, service) = service_with(StubGateway::default());
        let err = service.step(1.0, None).await.unwrap_err();
        assert!(matches!(err, TwinError::NoSession));
        assert_eq!(gateway.step_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn step_retries_twice_then_succeeds() {
        let (gateway, store, service) = service_with(StubGateway {
            step_failures: 2,
            ..StubGateway::default()
        });
        store.set_session_id(Some("session-123".to_string())).await;

        let outcome = service.step(1.0, None).await.unwrap();

        assert_eq!(gateway.step_calls.load(Ordering::SeqCst), 3);
        // Display fields come from the post-step refresh
        assert_eq!(gateway.get_state_calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome.fields.step, Some(4.0));
        assert_eq!(outcome.fields.time, Some(2.0));
    }

    #[tokio::test]
    async fn step_exhaustion_surfaces_the_last_error_and_skips_refresh() {
        let (gateway, store, service) = service_with(StubGateway {
            step_failures: 5,
            ..StubGateway::default()
        });
        store.set_session_id(Some("session-123".to_string())).await;

        let err = service.step(1.0, None).await.unwrap_err();

        assert_eq!(gateway.step_calls.load(Ordering::SeqCst), 3);
        assert_eq!(gateway.get_state_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            err.to_string(),
            "failed to step simulation: HTTP 500 - backend exploded on attempt 3"
        );
    }

    #[tokio::test]
    async fn refresh_failure_does_not_fail_the_step() {
        let (gateway, store, service) = service_with(StubGateway {
            fail_get_state: true,
            ..StubGateway::default()
        });
        store.set_session_id(Some("session-123".to_string())).await;

        let outcome = service.step(1.0, None).await.unwrap();

        assert_eq!(gateway.get_state_calls.load(Ordering::SeqCst), 1);
        // Fields fall back to the step's own snapshot, which has no aliases
        assert_eq!(outcome.fields.step, None);
        assert_eq!(outcome.snapshot.get("level"), Some(&json!(10.0)));
    }

    #[tokio::test]
    async fn selecting_a_model_keeps_the_active_session() {
        let (_gateway, store, service) = service_with(StubGateway::default());
        store.set_session_id(Some("session-123".to_string())).await;

        service.select_model("room_temperature").await;

        assert_eq!(store.selected_model().await, "room_temperature");
        assert_eq!(store.session_id().await, Some("session-123".to_string()));
    }

    #[tokio::test]
    async fn auto_init_runs_detached_and_stores_the_session() {
        let (_gateway, store, service) = service_with(StubGateway::default());
        let service = Arc::new(service);

        service.spawn_auto_init();

        // The task is detached; poll until it lands.
        for _ in 0..100 {
            if store.session_id().await.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(store.session_id().await, Some("session-123".to_string()));
    }

    #[tokio::test]
    async fn history_is_prepared_for_rendering() {
        let (_gateway, store, service) = service_with(StubGateway::default());
        store.set_session_id(Some("session-1".to_string())).await;

        let series = service.history().await.unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.axis_key, "time");
    }

    #[tokio::test]
    async fn reset_leaves_the_stored_session_id_alone() {
        let (_gateway, store, service) = service_with(StubGateway::default());
        store.set_session_id(Some("session-123".to_string())).await;

        service.reset(None).await.unwrap();

        assert_eq!(store.session_id().await, Some("session-123".to_string()));
    }
}
