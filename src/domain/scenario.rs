use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScenarioError {
    #[error("Unknown demo scenario: {0} (expected one of: {1})")]
    Unknown(String, String),
}

/// Named demo presets that force-set telemetry fields, bypassing the tick
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Scenario {
    /// Sudden load surge: 5.2 kW draw, grade drops to C
    EnergySpike,
    /// Savings jump to 25.8 kWh, grade back to A+
    SavingsBoost,
    /// The smart meter reports an error status
    DeviceFailure,
}

impl std::str::FromStr for Scenario {
    type Err = ScenarioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Scenario::iter()
            .find(|sc| sc.as_ref() == wanted)
            .ok_or_else(|| {
                let known: Vec<String> = Scenario::iter().map(|sc| sc.to_string()).collect();
                ScenarioError::Unknown(s.to_string(), known.join(", "))
            })
    }
}
