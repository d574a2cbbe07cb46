//! Session lifecycle commands: init, step, state, history, logs, reset,
//! params, status.

use super::render;
use colored::Colorize;
use simtwin_application::{SimulationService, params};
use simtwin_core::Result;
use simtwin_core::catalog;
use std::sync::Arc;

/// Initializes a session for the selected model.
pub async fn init(
    service: &Arc<SimulationService>,
    initial: Option<f64>,
    raw_params: Option<&str>,
) -> Result<()> {
    let params = params::resolve_params(initial, raw_params)?;
    let model = service.session_state().await.selected_model;
    let session_id = service.initialize(params).await?;
    println!("Initialized {} session: {}", model.bold(), session_id.green());
    Ok(())
}

/// Steps the simulation once and prints the refreshed display fields.
pub async fn step(
    service: &Arc<SimulationService>,
    control: Option<f64>,
    delta_time: Option<f64>,
) -> Result<()> {
    let model = service.session_state().await.selected_model;
    let bounds = catalog::control_bounds(&model);
    let control = control.unwrap_or(bounds.default);

    let outcome = service.step(control, delta_time).await?;

    let mut parts = Vec::new();
    if let Some(step) = outcome.fields.step {
        parts.push(format!("Step: {step}"));
    }
    if let Some(time) = outcome.fields.time {
        parts.push(format!("Time: {time}"));
    }
    if parts.is_empty() {
        println!("{}", "Stepped.".green());
    } else {
        println!("{} {}", "Stepped.".green(), parts.join("  "));
    }

    render::print_snapshot(&outcome.snapshot);
    Ok(())
}

/// Shows the current state of the active session.
pub async fn state(service: &Arc<SimulationService>) -> Result<()> {
    let snapshot = service.current_state().await?;
    render::print_snapshot(&snapshot);
    Ok(())
}

/// Tabulates the session history.
pub async fn history(service: &Arc<SimulationService>) -> Result<()> {
    let series = service.history().await?;
    render::print_history(&series);
    Ok(())
}

/// Prints backend log lines.
pub async fn logs(service: &Arc<SimulationService>) -> Result<()> {
    let lines = service.logs().await?;
    if lines.is_empty() {
        println!("{}", "No logs.".dimmed());
    }
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

/// Resets the active session, optionally with new parameters.
pub async fn reset(service: &Arc<SimulationService>, raw_params: Option<&str>) -> Result<()> {
    let params = params::resolve_params(None, raw_params)?;
    let snapshot = service.reset(params).await?;
    println!("{}", "Simulation reset.".green());
    render::print_snapshot(&snapshot);
    Ok(())
}

/// Patches model parameters on the active session.
pub async fn update_params(service: &Arc<SimulationService>, raw_params: &str) -> Result<()> {
    let params = params::parse_params(raw_params)?
        .ok_or_else(|| simtwin_core::TwinError::invalid_params("Parameters must be a JSON object"))?;
    let snapshot = service.update_params(params).await?;
    println!("{}", "Parameters updated.".green());
    render::print_snapshot(&snapshot);
    Ok(())
}

/// Shows the persisted session store.
pub async fn status(service: &Arc<SimulationService>) {
    let state = service.session_state().await;
    println!("Selected model: {}", state.selected_model.bold());
    match state.session_id {
        Some(session_id) => println!("Session: {}", session_id.green()),
        None => println!("Session: {}", "none".dimmed()),
    }
    if let Some(updated_at) = state.updated_at {
        println!("Updated: {updated_at}");
    }
}
