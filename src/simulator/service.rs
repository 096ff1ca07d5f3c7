use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Local};
use parking_lot::Mutex;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use super::backend::HemsBackend;
use super::tick::{apply_tick, TickSummary};
use super::ticker::Ticker;
use super::SimulatorState;
use crate::auth::{AuthOutcome, DemoCredentials};
use crate::config::{LatencyConfig, SimulatorConfig, TickConfig};
use crate::domain::{
    AiRecommendation, CommunityData, Device, EnergyData, PowerSummary, ProfileUpdate, Scenario,
    UserProfile,
};

/// In-process mock of a HEMS backend.
///
/// Holds the demo records behind an async lock, perturbs them on a periodic
/// tick once [`start_ticker`](Self::start_ticker) is called, and answers
/// every read with a cloned snapshot after an artificial delay.
pub struct TelemetrySimulator {
    state: Arc<RwLock<SimulatorState>>,
    tick_cfg: TickConfig,
    tick_period: Duration,
    latency: LatencyConfig,
    credentials: DemoCredentials,
    random_seed: Option<u64>,
    ticker: Mutex<Option<Ticker>>,
}

impl std::fmt::Debug for TelemetrySimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetrySimulator")
            .field("tick_period", &self.tick_period)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl TelemetrySimulator {
    /// Seed the demo data without starting the tick
    pub fn new(cfg: &SimulatorConfig) -> Self {
        Self {
            state: Arc::new(RwLock::new(SimulatorState::seeded(
                rng_for(cfg.random_seed),
                now(),
            ))),
            tick_cfg: cfg.tick.clone(),
            tick_period: cfg.tick_period(),
            latency: cfg.latency.clone(),
            credentials: DemoCredentials::from(&cfg.demo_auth),
            random_seed: cfg.random_seed,
            ticker: Mutex::new(None),
        }
    }

    /// Seed the demo data and start ticking. Must be called inside a tokio runtime.
    pub fn start(cfg: &SimulatorConfig) -> Arc<Self> {
        let sim = Arc::new(Self::new(cfg));
        sim.start_ticker();
        sim
    }

    /// Start the periodic tick; returns false if it is already running
    pub fn start_ticker(&self) -> bool {
        let mut ticker = self.ticker.lock();
        if ticker.as_ref().is_some_and(|t| !t.is_finished()) {
            return false;
        }
        *ticker = Some(Ticker::spawn(
            self.state.clone(),
            self.tick_cfg.clone(),
            self.tick_period,
        ));
        info!(period_secs = self.tick_period.as_secs(), "telemetry simulator started");
        true
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .lock()
            .as_ref()
            .is_some_and(|t| !t.is_finished())
    }

    /// Stop the background tick. State stays readable but no longer self-updates.
    pub fn destroy(&self) {
        if let Some(ticker) = self.ticker.lock().take() {
            ticker.stop();
            info!("telemetry simulator stopped");
        }
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Apply one tick immediately, outside the periodic schedule
    pub async fn tick_once(&self) -> TickSummary {
        let mut st = self.state.write().await;
        apply_tick(&mut st, &self.tick_cfg, now())
    }

    pub async fn ticks(&self) -> u64 {
        self.state.read().await.ticks
    }

    async fn simulate_latency(&self, ms: u64) {
        if self.latency.enabled && ms > 0 {
            sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Drop for TelemetrySimulator {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.get_mut().take() {
            ticker.stop();
        }
    }
}

#[async_trait]
impl HemsBackend for TelemetrySimulator {
    async fn user_profile(&self) -> UserProfile {
        self.simulate_latency(self.latency.profile_ms).await;
        self.state.read().await.profile.clone()
    }

    async fn energy_data(&self) -> EnergyData {
        self.simulate_latency(self.latency.energy_ms).await;
        self.state.read().await.energy.clone()
    }

    async fn devices(&self) -> Vec<Device> {
        self.simulate_latency(self.latency.devices_ms).await;
        self.state.read().await.devices.clone()
    }

    async fn community_data(&self) -> CommunityData {
        self.simulate_latency(self.latency.community_ms).await;
        self.state.read().await.community.clone()
    }

    async fn ai_recommendations(&self) -> Vec<AiRecommendation> {
        self.simulate_latency(self.latency.recommendations_ms).await;
        self.state.read().await.recommendations.clone()
    }

    async fn toggle_device(&self, device_id: &str) -> bool {
        self.simulate_latency(self.latency.toggle_ms).await;
        let toggled = self.state.write().await.toggle_device(device_id, now());
        debug!(device_id, toggled, "toggle device");
        toggled
    }

    async fn apply_ai_recommendation(&self, recommendation_id: &str) -> bool {
        self.simulate_latency(self.latency.apply_ms).await;
        let applied = self
            .state
            .write()
            .await
            .apply_recommendation(recommendation_id, self.tick_cfg.co2_kg_per_kwh);
        debug!(recommendation_id, applied, "apply recommendation");
        applied
    }

    async fn authenticate(&self, email: &str, password: &str) -> AuthOutcome {
        self.simulate_latency(self.latency.login_ms).await;
        let outcome = self.credentials.check(email, password);
        if outcome.success {
            info!(email, "demo login accepted");
        } else {
            warn!(email, "demo login rejected");
        }
        outcome
    }

    async fn update_profile(&self, update: ProfileUpdate) -> bool {
        self.simulate_latency(self.latency.update_profile_ms).await;
        self.state.write().await.update_profile(update);
        true
    }

    async fn trigger_scenario(&self, scenario: Scenario) {
        self.state
            .write()
            .await
            .apply_scenario(scenario, self.tick_cfg.co2_kg_per_kwh);
        info!(%scenario, "demo scenario triggered");
    }

    async fn power_summary(&self) -> PowerSummary {
        self.simulate_latency(self.latency.devices_ms).await;
        PowerSummary::from_devices(&self.state.read().await.devices)
    }

    async fn turn_off_all(&self) -> usize {
        self.simulate_latency(self.latency.toggle_ms).await;
        let switched = self.state.write().await.turn_off_all(now());
        debug!(switched, "all devices off");
        switched
    }

    async fn reset(&self) {
        let mut st = self.state.write().await;
        let ticks = st.ticks;
        *st = SimulatorState::seeded(rng_for(self.random_seed), now());
        st.ticks = ticks;
        info!("demo data reset");
    }
}
