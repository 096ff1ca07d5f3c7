use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Device type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    SmartMeter,
    Thermostat,
    SmartPlug,
    SolarPanel,
    Battery,
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SmartMeter => "smart_meter",
            Self::Thermostat => "thermostat",
            Self::SmartPlug => "smart_plug",
            Self::SolarPanel => "solar_panel",
            Self::Battery => "battery",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smart_meter" | "smartmeter" | "meter" => Ok(Self::SmartMeter),
            "thermostat" => Ok(Self::Thermostat),
            "smart_plug" | "smartplug" | "plug" => Ok(Self::SmartPlug),
            "solar_panel" | "solarpanel" | "solar" => Ok(Self::SolarPanel),
            "battery" => Ok(Self::Battery),
            _ => Err(format!("Invalid device type: {}", s)),
        }
    }
}

/// Connectivity status reported by a device
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Online,
    Offline,
    Error,
}

impl std::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceStatus::Online => write!(f, "online"),
            DeviceStatus::Offline => write!(f, "offline"),
            DeviceStatus::Error => write!(f, "error"),
        }
    }
}

/// A connected household device
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub device_type: DeviceType,
    pub status: DeviceStatus,
    /// Power in kW; negative values are generation (e.g. solar)
    pub power_consumption_kw: f64,
    pub is_on: bool,
    pub last_updated: DateTime<FixedOffset>,
    pub location: String,
}

impl Device {
    pub fn is_online(&self) -> bool {
        self.status == DeviceStatus::Online
    }

    /// Flip the on/off switch and stamp the update time
    pub fn toggle(&mut self, now: DateTime<FixedOffset>) {
        self.is_on = !self.is_on;
        self.last_updated = now;
    }
}

/// Aggregate power flows across all devices
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct PowerSummary {
    /// Sum of positive readings in kW
    pub total_consumption_kw: f64,
    /// Magnitude of the sum of negative readings in kW
    pub total_generation_kw: f64,
    /// Signed sum of all readings in kW
    pub net_kw: f64,
}

impl PowerSummary {
    pub fn from_devices(devices: &[Device]) -> Self {
        let (consumption, generation) = devices.iter().map(|d| d.power_consumption_kw).fold(
            (0.0, 0.0),
            |(cons, generated), kw| {
                if kw > 0.0 {
                    (cons + kw, generated)
                } else {
                    (cons, generated + kw)
                }
            },
        );

        Self {
            total_consumption_kw: consumption,
            total_generation_kw: generation.abs(),
            net_kw: consumption + generation,
        }
    }

    /// True when the household exports more than it draws
    pub fn is_net_producer(&self) -> bool {
        self.net_kw < 0.0
    }
}
