use chrono::{DateTime, FixedOffset, Timelike};
use rand::Rng;
use serde::Serialize;

use super::SimulatorState;
use crate::config::TickConfig;

/// What one tick changed, for logging
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct TickSummary {
    pub tick: u64,
    pub power_kw: f64,
    pub today_savings_kwh: f64,
    pub estimated_bill: u64,
    pub devices_updated: usize,
    pub hour: u32,
}

/// Uniform noise in [-amplitude, +amplitude)
fn jitter<R: Rng>(rng: &mut R, amplitude: f64) -> f64 {
    (rng.gen::<f64>() - 0.5) * 2.0 * amplitude
}

/// Advance the simulated telemetry by one step at wall-clock time `now`
pub fn apply_tick(
    state: &mut SimulatorState,
    cfg: &TickConfig,
    now: DateTime<FixedOffset>,
) -> TickSummary {
    let rng = &mut state.rng;
    let energy = &mut state.energy;

    energy.current_power_usage_kw =
        (cfg.base_power_kw + jitter(rng, cfg.power_jitter_kw)).max(cfg.power_floor_kw);

    // savings only ever grow on a tick
    energy.today_savings_kwh += rng.gen::<f64>() * cfg.savings_step_max_kwh.max(0.0);
    energy.recompute_co2(cfg.co2_kg_per_kwh);

    energy.estimated_bill = (cfg.bill_base + jitter(rng, cfg.bill_jitter)).max(0.0).round() as u64;

    let mut devices_updated = 0;
    for device in state.devices.iter_mut().filter(|d| d.is_online()) {
        device.power_consumption_kw =
            (device.power_consumption_kw + jitter(rng, cfg.device_jitter_kw)).max(0.0);
        device.last_updated = now;
        devices_updated += 1;
    }

    let hour = now.hour();
    if let Some(bucket) = energy.usage_at_hour_mut(hour) {
        bucket.usage_kw = (bucket.usage_kw + jitter(rng, cfg.hourly_jitter_kw)).max(cfg.hourly_floor_kw);
    }

    state.ticks += 1;

    TickSummary {
        tick: state.ticks,
        power_kw: energy.current_power_usage_kw,
        today_savings_kwh: energy.today_savings_kwh,
        estimated_bill: energy.estimated_bill,
        devices_updated,
        hour,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DeviceStatus;
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    fn at_hour(hour: u32) -> DateTime<FixedOffset> {
        chrono::Utc
            .with_ymd_and_hms(2024, 6, 15, hour, 30, 0)
            .unwrap()
            .fixed_offset()
    }

    fn state(seed: u64) -> SimulatorState {
        SimulatorState::seeded(StdRng::seed_from_u64(seed), at_hour(0))
    }

    #[test]
    fn test_tick_keeps_derived_co2() {
        let mut st = state(42);
        let cfg = TickConfig::default();
        for _ in 0..50 {
            apply_tick(&mut st, &cfg, at_hour(12));
            assert_eq!(
                st.energy.co2_reduction_kg,
                st.energy.today_savings_kwh * cfg.co2_kg_per_kwh
            );
        }
    }

    #[test]
    fn test_power_stays_near_center() {
        let mut st = state(1);
        let cfg = TickConfig::default();
        for _ in 0..100 {
            let s = apply_tick(&mut st, &cfg, at_hour(9));
            assert!(s.power_kw >= 2.35 - 1e-9 && s.power_kw <= 2.65 + 1e-9);
            assert!((122_500..=127_500).contains(&s.estimated_bill));
        }
    }

    #[test]
    fn test_power_floor_applies() {
        let mut st = state(3);
        let cfg = TickConfig {
            base_power_kw: 0.0,
            ..Default::default()
        };
        apply_tick(&mut st, &cfg, at_hour(9));
        assert_eq!(st.energy.current_power_usage_kw, cfg.power_floor_kw);
    }

    #[test]
    fn test_only_current_hour_changes() {
        let mut st = state(5);
        let before = st.energy.hourly_usage.clone();
        let summary = apply_tick(&mut st, &TickConfig::default(), at_hour(18));
        assert_eq!(summary.hour, 18);
        for (old, new) in before.iter().zip(&st.energy.hourly_usage) {
            if old.hour != 18 {
                assert_eq!(old, new);
            }
        }
        assert_eq!(st.energy.hourly_usage.len(), 24);
    }

    #[test]
    fn test_offline_devices_untouched() {
        let mut st = state(9);
        st.devices[1].status = DeviceStatus::Offline;
        st.devices[2].status = DeviceStatus::Error;
        let frozen = (st.devices[1].clone(), st.devices[2].clone());

        let summary = apply_tick(&mut st, &TickConfig::default(), at_hour(10));

        assert_eq!(summary.devices_updated, 3);
        assert_eq!(st.devices[1], frozen.0);
        assert_eq!(st.devices[2], frozen.1);
        assert_eq!(st.devices[0].last_updated, at_hour(10));
    }

    #[test]
    fn test_generation_clamped_to_zero_on_tick() {
        let mut st = state(11);
        apply_tick(&mut st, &TickConfig::default(), at_hour(10));
        // solar seeds at -0.8 kW; tick floors online devices at 0
        assert!(st.devices.iter().all(|d| d.power_consumption_kw >= 0.0));
    }

    #[test]
    fn test_tick_counter() {
        let mut st = state(2);
        let cfg = TickConfig::default();
        apply_tick(&mut st, &cfg, at_hour(1));
        let s = apply_tick(&mut st, &cfg, at_hour(1));
        assert_eq!(s.tick, 2);
        assert_eq!(st.ticks, 2);
    }
}
