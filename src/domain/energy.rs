use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Number of hourly buckets in a day's usage profile
pub const HOURS_PER_DAY: usize = 24;

/// Household energy efficiency grade, best to worst
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter,
)]
pub enum EfficiencyGrade {
    #[serde(rename = "A+")]
    #[strum(serialize = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl EfficiencyGrade {
    /// Score (0-100) shown next to the grade on the dashboard gauge
    pub fn score(&self) -> u8 {
        match self {
            EfficiencyGrade::APlus => 95,
            EfficiencyGrade::A => 85,
            EfficiencyGrade::B => 75,
            EfficiencyGrade::C => 65,
            EfficiencyGrade::D => 55,
            EfficiencyGrade::F => 35,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EfficiencyGrade::APlus => "excellent",
            EfficiencyGrade::A => "very good",
            EfficiencyGrade::B => "good",
            EfficiencyGrade::C => "average",
            EfficiencyGrade::D => "needs improvement",
            EfficiencyGrade::F => "poor",
        }
    }
}

/// Average load for one hour of the day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HourlyUsage {
    /// Hour of day (0-23)
    pub hour: u32,
    /// Average load in kW
    pub usage_kw: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySavings {
    pub month: String,
    pub savings_kwh: f64,
}

/// Household energy summary shown on the dashboard
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyData {
    /// Instantaneous household draw in kW
    pub current_power_usage_kw: f64,
    /// Energy saved since midnight in kWh
    pub today_savings_kwh: f64,
    /// CO2 avoided in kg, always derived from `today_savings_kwh`
    pub co2_reduction_kg: f64,
    pub efficiency_grade: EfficiencyGrade,
    /// Projected monthly bill in KRW
    pub estimated_bill: u64,
    /// Exactly [`HOURS_PER_DAY`] entries ordered by hour
    pub hourly_usage: Vec<HourlyUsage>,
    pub monthly_trend: Vec<MonthlySavings>,
}

impl EnergyData {
    /// Recompute the derived CO2 figure from the current savings
    pub fn recompute_co2(&mut self, kg_per_kwh: f64) {
        self.co2_reduction_kg = self.today_savings_kwh * kg_per_kwh;
    }

    pub fn usage_at_hour_mut(&mut self, hour: u32) -> Option<&mut HourlyUsage> {
        self.hourly_usage.iter_mut().find(|h| h.hour == hour)
    }

    pub fn peak_hour(&self) -> Option<HourlyUsage> {
        self.hourly_usage
            .iter()
            .copied()
            .max_by(|a, b| a.usage_kw.total_cmp(&b.usage_kw))
    }
}
