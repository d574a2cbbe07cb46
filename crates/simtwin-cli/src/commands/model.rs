//! Model catalog commands.

use colored::Colorize;
use simtwin_application::SimulationService;
use simtwin_core::Result;
use simtwin_core::catalog::{self, control_bounds, is_known_model, model_options};
use std::sync::Arc;

/// Prints the selectable models with their control bounds.
pub fn models() {
    for option in model_options() {
        let bounds = control_bounds(option.value);
        let unit = bounds.unit.map(|u| format!(" {u}")).unwrap_or_default();
        println!("{} ({})", option.label.bold(), option.value);
        println!("  {}", option.description);
        println!(
            "  control: {} to {}{unit}, step {}",
            bounds.min, bounds.max, bounds.step
        );
    }
}

/// Persists a model selection; optionally initializes a session for it.
///
/// The active session is never cleared by selection alone.
pub async fn select(service: &Arc<SimulationService>, model: &str, init: bool) -> Result<()> {
    if !is_known_model(model) {
        eprintln!(
            "{}",
            format!("warning: unknown model '{model}', using fallback control bounds").yellow()
        );
    }

    service.select_model(model).await;
    println!("Selected model: {}", model.bold());

    if init {
        let session_id = service.initialize(None).await?;
        println!("Session: {}", session_id.green());
    } else if let Some(session_id) = service.session_state().await.session_id {
        // Selection does not discard in-progress work
        println!("Active session unchanged: {session_id}");
    }

    let bounds = catalog::control_bounds(model);
    println!(
        "Control bounds: {} to {}, step {}",
        bounds.min, bounds.max, bounds.step
    );

    Ok(())
}
