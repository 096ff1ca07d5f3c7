use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

const MAX_TICK_SECONDS: u64 = 3600;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            enable_cors: false,
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub tick_seconds: u64,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
    pub tick: TickConfig,
    pub latency: LatencyConfig,
    pub demo_auth: DemoAuthConfig,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 3,
            random_seed: None,
            tick: TickConfig::default(),
            latency: LatencyConfig::default(),
            demo_auth: DemoAuthConfig::default(),
        }
    }
}

impl SimulatorConfig {
    /// Tick interval, clamped to 1 s ..= 1 h
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(self.tick_seconds.clamp(1, MAX_TICK_SECONDS))
    }

    /// Zero latency and a fixed seed; what unit tests want
    pub fn instant(seed: u64) -> Self {
        Self {
            random_seed: Some(seed),
            latency: LatencyConfig::disabled(),
            ..Default::default()
        }
    }
}

/// Random-walk parameters applied on every tick
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Center of the household draw random walk (kW)
    pub base_power_kw: f64,
    /// Half-width of the draw jitter (kW)
    pub power_jitter_kw: f64,
    pub power_floor_kw: f64,
    /// Upper bound of the per-tick savings increment (kWh)
    pub savings_step_max_kwh: f64,
    pub co2_kg_per_kwh: f64,
    /// Center of the estimated bill (KRW)
    pub bill_base: f64,
    pub bill_jitter: f64,
    pub device_jitter_kw: f64,
    pub hourly_jitter_kw: f64,
    pub hourly_floor_kw: f64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            base_power_kw: 2.5,
            power_jitter_kw: 0.15,
            power_floor_kw: 0.5,
            savings_step_max_kwh: 0.1,
            co2_kg_per_kwh: 0.424,
            bill_base: 125_000.0,
            bill_jitter: 2_500.0,
            device_jitter_kw: 0.1,
            hourly_jitter_kw: 0.15,
            hourly_floor_kw: 0.5,
        }
    }
}

/// Artificial per-operation delays emulating a remote API (milliseconds)
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub profile_ms: u64,
    pub energy_ms: u64,
    pub devices_ms: u64,
    pub community_ms: u64,
    pub recommendations_ms: u64,
    pub toggle_ms: u64,
    pub apply_ms: u64,
    pub login_ms: u64,
    pub update_profile_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            profile_ms: 500,
            energy_ms: 300,
            devices_ms: 400,
            community_ms: 600,
            recommendations_ms: 500,
            toggle_ms: 200,
            apply_ms: 300,
            login_ms: 1000,
            update_profile_ms: 500,
        }
    }
}

impl LatencyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoAuthConfig {
    pub email: String,
    pub password: String,
    pub token: String,
}

impl Default for DemoAuthConfig {
    fn default() -> Self {
        Self {
            email: "demo@hems.com".to_string(),
            password: "demo123".to_string(),
            token: "demo_token_12345".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("HEMS__").split("__"));
        Ok(figment.extract()?)
    }
}
