use chrono::{DateTime, FixedOffset};
use rand::rngs::StdRng;

use super::seed;
use crate::domain::{
    AiRecommendation, CommunityData, Device, DeviceStatus, DeviceType, EfficiencyGrade, EnergyData,
    ProfileUpdate, Scenario, UserProfile,
};

const SPIKE_POWER_KW: f64 = 5.2;
const BOOSTED_SAVINGS_KWH: f64 = 25.8;

/// The five record collections owned by the simulator
#[derive(Debug)]
pub struct SimulatorState {
    pub profile: UserProfile,
    pub energy: EnergyData,
    pub devices: Vec<Device>,
    pub community: CommunityData,
    pub recommendations: Vec<AiRecommendation>,
    /// Number of ticks applied since construction
    pub ticks: u64,
    pub(crate) rng: StdRng,
}

impl SimulatorState {
    pub fn seeded(mut rng: StdRng, now: DateTime<FixedOffset>) -> Self {
        Self {
            profile: seed::profile(),
            energy: seed::energy(&mut rng),
            devices: seed::devices(now),
            community: seed::community(),
            recommendations: seed::recommendations(),
            ticks: 0,
            rng,
        }
    }

    pub fn device_mut(&mut self, device_id: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id == device_id)
    }

    /// Flip a device's switch regardless of its status
    pub fn toggle_device(&mut self, device_id: &str, now: DateTime<FixedOffset>) -> bool {
        match self.device_mut(device_id) {
            Some(device) => {
                device.toggle(now);
                true
            }
            None => false,
        }
    }

    /// Switch off every device that is on, except smart meters
    pub fn turn_off_all(&mut self, now: DateTime<FixedOffset>) -> usize {
        let mut switched = 0;
        for device in self
            .devices
            .iter_mut()
            .filter(|d| d.is_on && d.device_type != DeviceType::SmartMeter)
        {
            device.toggle(now);
            switched += 1;
        }
        switched
    }

    /// Mark a recommendation applied and credit its savings.
    /// Every call credits again, even for an already-applied id.
    pub fn apply_recommendation(&mut self, recommendation_id: &str, co2_kg_per_kwh: f64) -> bool {
        let Some(rec) = self
            .recommendations
            .iter_mut()
            .find(|r| r.id == recommendation_id)
        else {
            return false;
        };

        rec.mark_applied();
        self.energy.today_savings_kwh += rec.savings_credit_kwh();
        self.energy.recompute_co2(co2_kg_per_kwh);
        true
    }

    pub fn update_profile(&mut self, update: ProfileUpdate) {
        self.profile.merge(update);
    }

    pub fn apply_scenario(&mut self, scenario: Scenario, co2_kg_per_kwh: f64) {
        match scenario {
            Scenario::EnergySpike => {
                self.energy.current_power_usage_kw = SPIKE_POWER_KW;
                self.energy.efficiency_grade = EfficiencyGrade::C;
            }
            Scenario::SavingsBoost => {
                self.energy.today_savings_kwh = BOOSTED_SAVINGS_KWH;
                self.energy.recompute_co2(co2_kg_per_kwh);
                self.energy.efficiency_grade = EfficiencyGrade::APlus;
            }
            Scenario::DeviceFailure => {
                if let Some(meter) = self
                    .devices
                    .iter_mut()
                    .find(|d| d.device_type == DeviceType::SmartMeter)
                {
                    meter.status = DeviceStatus::Error;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn state() -> SimulatorState {
        SimulatorState::seeded(StdRng::seed_from_u64(42), chrono::Utc::now().fixed_offset())
    }

    #[test]
    fn test_toggle_known_and_unknown() {
        let mut st = state();
        let now = chrono::Utc::now().fixed_offset();
        assert!(st.toggle_device("device_003", now));
        assert!(st.devices[2].is_on);

        let before = st.devices.clone();
        assert!(!st.toggle_device("device_999", now));
        assert_eq!(st.devices, before);
    }

    #[test]
    fn test_toggle_ignores_status() {
        let mut st = state();
        st.devices[1].status = DeviceStatus::Offline;
        assert!(st.toggle_device("device_002", chrono::Utc::now().fixed_offset()));
        assert!(!st.devices[1].is_on);
    }

    #[test]
    fn test_turn_off_all_skips_meter() {
        let mut st = state();
        let switched = st.turn_off_all(chrono::Utc::now().fixed_offset());
        // thermostat, solar, battery; the plug is already off
        assert_eq!(switched, 3);
        assert!(st.devices[0].is_on);
        assert!(st.devices[1..].iter().all(|d| !d.is_on));
    }

    #[test]
    fn test_apply_recommendation_credits_every_call() {
        let mut st = state();
        let start = st.energy.today_savings_kwh;
        assert!(st.apply_recommendation("ai_001", 0.424));
        assert!(st.apply_recommendation("ai_001", 0.424));
        assert!((st.energy.today_savings_kwh - (start + 1.6)).abs() < 1e-9);
        assert!(st.recommendations[0].is_applied);
        assert_eq!(st.energy.co2_reduction_kg, st.energy.today_savings_kwh * 0.424);
        assert!(!st.apply_recommendation("ai_404", 0.424));
    }

    #[test]
    fn test_scenarios() {
        let mut st = state();
        st.apply_scenario(Scenario::EnergySpike, 0.424);
        assert_eq!(st.energy.current_power_usage_kw, 5.2);
        assert_eq!(st.energy.efficiency_grade, EfficiencyGrade::C);

        st.apply_scenario(Scenario::SavingsBoost, 0.424);
        assert_eq!(st.energy.today_savings_kwh, 25.8);
        assert_eq!(st.energy.co2_reduction_kg, 25.8 * 0.424);
        assert_eq!(st.energy.efficiency_grade, EfficiencyGrade::APlus);

        st.apply_scenario(Scenario::DeviceFailure, 0.424);
        assert_eq!(st.devices[0].status, DeviceStatus::Error);
        assert!(st.devices[1..].iter().all(|d| d.is_online()));
    }
}
