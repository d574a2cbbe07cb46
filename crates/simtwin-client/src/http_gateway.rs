//! HttpGateway - reqwest implementation of the simulation backend surface.
//!
//! One HTTP call per operation. A non-success status becomes a typed error
//! carrying the operation name, status, and response body; a transport
//! failure is wrapped with an operation-specific prefix. Retry is the
//! caller's concern (see [`crate::retry`]).

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use simtwin_core::gateway::{Params, SimulationGateway};
use simtwin_core::{Result, StateSnapshot, TwinError};

/// Base URL used when neither config nor environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

const OP_INIT: &str = "initialize simulation";
const OP_STEP: &str = "step simulation";
const OP_GET_STATE: &str = "get state";
const OP_GET_HISTORY: &str = "get history";
const OP_GET_LOGS: &str = "get logs";
const OP_RESET: &str = "reset simulation";
const OP_UPDATE_PARAMS: &str = "update params";

/// Gateway that talks to the simulation backend over HTTP.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway against the given base URL.
    ///
    /// A trailing slash on the base URL is tolerated.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| TwinError::transport(operation, err.to_string()))?;
        Self::parse_response(operation, response).await
    }

    async fn get<T: DeserializeOwned>(&self, operation: &'static str, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| TwinError::transport(operation, err.to_string()))?;
        Self::parse_response(operation, response).await
    }

    async fn parse_response<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TwinError::api(operation, status.as_u16(), body));
        }

        response.json::<T>().await.map_err(|err| {
            TwinError::transport(operation, format!("invalid response body: {err}"))
        })
    }
}

#[async_trait]
impl SimulationGateway for HttpGateway {
    async fn init_simulation(&self, model_name: &str, params: Option<Params>) -> Result<String> {
        let body = InitRequest { model_name, params };
        let parsed: InitResponse = self.post(OP_INIT, "/simulate/init", &body).await?;
        Ok(parsed.session_id)
    }

    async fn step_simulation(
        &self,
        session_id: &str,
        control_input: f64,
        delta_time: Option<f64>,
    ) -> Result<StateSnapshot> {
        let body = StepRequest {
            session_id,
            control_input,
            delta_time,
        };
        let parsed: StateResponse = self.post(OP_STEP, "/simulate/step", &body).await?;
        Ok(parsed.state)
    }

    async fn get_state(&self, session_id: &str) -> Result<StateSnapshot> {
        let path = format!("/simulate/state/{session_id}");
        let parsed: StateResponse = self.get(OP_GET_STATE, &path).await?;
        Ok(parsed.state)
    }

    async fn get_history(&self, session_id: &str) -> Result<Vec<StateSnapshot>> {
        let path = format!("/simulate/history/{session_id}");
        let parsed: HistoryResponse = self.get(OP_GET_HISTORY, &path).await?;
        Ok(parsed.history)
    }

    async fn get_logs(&self, session_id: &str) -> Result<Vec<String>> {
        let path = format!("/simulate/logs/{session_id}");
        let parsed: LogsResponse = self.get(OP_GET_LOGS, &path).await?;
        Ok(parsed.logs)
    }

    async fn reset_simulation(
        &self,
        session_id: &str,
        params: Option<Params>,
    ) -> Result<StateSnapshot> {
        let body = ResetRequest { session_id, params };
        let parsed: StateResponse = self.post(OP_RESET, "/simulate/reset", &body).await?;
        Ok(parsed.state)
    }

    async fn update_params(&self, session_id: &str, params: Params) -> Result<StateSnapshot> {
        let body = UpdateParamsRequest { session_id, params };
        let response = self
            .client
            .patch(self.url("/simulate/params"))
            .json(&body)
            .send()
            .await
            .map_err(|err| TwinError::transport(OP_UPDATE_PARAMS, err.to_string()))?;
        let parsed: StateResponse = Self::parse_response(OP_UPDATE_PARAMS, response).await?;
        Ok(parsed.state)
    }
}

// --- Wire types (canonical snake_case schema) ---

#[derive(Serialize)]
struct InitRequest<'a> {
    model_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Params>,
}

#[derive(serde::Deserialize)]
struct InitResponse {
    session_id: String,
}

#[derive(Serialize)]
struct StepRequest<'a> {
    session_id: &'a str,
    control_input: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    delta_time: Option<f64>,
}

#[derive(serde::Deserialize)]
struct StateResponse {
    state: StateSnapshot,
}

#[derive(serde::Deserialize)]
struct HistoryResponse {
    history: Vec<StateSnapshot>,
}

#[derive(serde::Deserialize)]
struct LogsResponse {
    logs: Vec<String>,
}

#[derive(Serialize)]
struct ResetRequest<'a> {
    session_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Params>,
}

#[derive(Serialize)]
struct UpdateParamsRequest<'a> {
    session_id: &'a str,
    params: Params,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let gateway = HttpGateway::new("http://test-api/");
        assert_eq!(gateway.base_url(), "http://test-api");
        assert_eq!(gateway.url("/simulate/init"), "http://test-api/simulate/init");
    }

    #[test]
    fn init_request_omits_absent_params() {
        let body = InitRequest {
            model_name: "water_tank",
            params: None,
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(encoded, json!({"model_name": "water_tank"}));
    }

    #[test]
    fn init_request_carries_params_when_present() {
        let params = json!({"initial": 10}).as_object().cloned().unwrap();
        let body = InitRequest {
            model_name: "water_tank",
            params: Some(params),
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            json!({"model_name": "water_tank", "params": {"initial": 10}})
        );
    }

    #[test]
    fn step_request_uses_snake_case_wire_schema() {
        let body = StepRequest {
            session_id: "session-1",
            control_input: 2.5,
            delta_time: None,
        };
        let encoded = serde_json::to_value(&body).unwrap();
        assert_eq!(
            encoded,
            json!({"session_id": "session-1", "control_input": 2.5})
        );
    }

    #[test]
    fn state_response_decodes_opaque_state() {
        let parsed: StateResponse =
            serde_json::from_value(json!({"state": {"level": 4.2, "step": 3}})).unwrap();
        assert_eq!(parsed.state.get("level"), Some(&json!(4.2)));
    }

    #[test]
    fn history_response_preserves_record_order() {
        let parsed: HistoryResponse = serde_json::from_value(json!({
            "history": [{"time": 0, "value": 1}, {"time": 1, "value": 2}]
        }))
        .unwrap();
        assert_eq!(parsed.history.len(), 2);
        assert_eq!(parsed.history[1].get("value"), Some(&json!(2)));
    }
}
