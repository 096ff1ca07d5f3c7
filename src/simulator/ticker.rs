use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::tick::apply_tick;
use super::SimulatorState;
use crate::config::TickConfig;

/// Handle to the background tick task; stopping or dropping it ends the loop
#[derive(Debug)]
pub(crate) struct Ticker {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the periodic tick on the current tokio runtime.
    /// The first tick fires one full `period` after spawning.
    pub(crate) fn spawn(
        state: Arc<RwLock<SimulatorState>>,
        cfg: TickConfig,
        period: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {
                        let mut st = state.write().await;
                        if token.is_cancelled() {
                            break;
                        }
                        let summary = apply_tick(&mut st, &cfg, Local::now().fixed_offset());
                        debug!(
                            tick = summary.tick,
                            power_kw = summary.power_kw,
                            today_savings_kwh = summary.today_savings_kwh,
                            devices_updated = summary.devices_updated,
                            "telemetry tick"
                        );
                    }
                }
            }
            debug!("tick loop stopped");
        });

        Self { cancel, task }
    }

    pub(crate) fn stop(&self) {
        self.cancel.cancel();
        self.task.abort();
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}
