//! Static catalog of simulation models known to the front end.
//!
//! The backend owns the model numerics; this side only carries display
//! labels and per-model control-input bounds. Unknown models fall back to
//! permissive bounds so the UI stays usable against a newer backend.

/// Model identifier used when nothing has been persisted yet.
pub const DEFAULT_MODEL: &str = "water_tank";

/// Bounds for the scalar control input sent with each step call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub unit: Option<&'static str>,
}

impl ControlBounds {
    /// Clamps a control value into these bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Bounds applied when the selected model has no catalog entry.
pub const FALLBACK_BOUNDS: ControlBounds = ControlBounds {
    min: -100.0,
    max: 100.0,
    step: 1.0,
    default: 0.0,
    unit: None,
};

/// A selectable simulation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const MODEL_OPTIONS: [ModelOption; 2] = [
    ModelOption {
        value: "water_tank",
        label: "Water Tank",
        description: "Simple tank with inflow/outflow dynamics.",
    },
    ModelOption {
        value: "room_temperature",
        label: "Room Temperature",
        description: "Thermal model controlling temperature over time.",
    },
];

/// Returns the selectable models, in display order.
pub fn model_options() -> &'static [ModelOption] {
    &MODEL_OPTIONS
}

/// True when the identifier has a catalog entry.
pub fn is_known_model(model: &str) -> bool {
    MODEL_OPTIONS.iter().any(|option| option.value == model)
}

/// Control bounds for a model, falling back to [`FALLBACK_BOUNDS`] for
/// identifiers the catalog does not know.
pub fn control_bounds(model: &str) -> ControlBounds {
    match model {
        "water_tank" => ControlBounds {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            default: 0.0,
            unit: Some("L/s"),
        },
        "room_temperature" => ControlBounds {
            min: -10.0,
            max: 40.0,
            step: 0.1,
            default: 0.0,
            unit: Some("°C"),
        },
        _ => FALLBACK_BOUNDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_models_have_specific_bounds() {
        let tank = control_bounds("water_tank");
        assert_eq!(tank.min, 0.0);
        assert_eq!(tank.max, 100.0);
        assert_eq!(tank.unit, Some("L/s"));

        let room = control_bounds("room_temperature");
        assert_eq!(room.min, -10.0);
        assert_eq!(room.step, 0.1);
    }

    #[test]
    fn unknown_model_gets_fallback_bounds() {
        assert_eq!(control_bounds("wind_farm"), FALLBACK_BOUNDS);
        assert!(!is_known_model("wind_farm"));
    }

    #[test]
    fn clamp_keeps_control_inside_bounds() {
        let bounds = control_bounds("water_tank");
        assert_eq!(bounds.clamp(-5.0), 0.0);
        assert_eq!(bounds.clamp(250.0), 100.0);
        assert_eq!(bounds.clamp(42.0), 42.0);
    }

    #[test]
    fn default_model_is_listed() {
        assert!(is_known_model(DEFAULT_MODEL));
        assert_eq!(model_options()[0].value, DEFAULT_MODEL);
    }
}
