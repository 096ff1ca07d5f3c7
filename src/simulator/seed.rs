//! Fixed demo values every simulator session starts from.

use chrono::{DateTime, FixedOffset, NaiveDate};
use rand::Rng;

use crate::domain::{
    AiRecommendation, Challenge, ChallengeStatus, CommunityData, Device, DeviceStatus, DeviceType,
    Difficulty, EfficiencyGrade, EnergyData, HouseholdType, HourlyUsage, LeaderboardEntry,
    MonthlySavings, Priority, RecommendationCategory, UserProfile, HOURS_PER_DAY,
};

const TREND_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Half-width of the noise added to each seeded hourly bucket (kW)
const HOURLY_SEED_NOISE_KW: f64 = 0.25;
const HOURLY_SEED_FLOOR_KW: f64 = 0.5;

/// Typical household draw by part of day (kW)
pub fn day_part_base_kw(hour: u32) -> f64 {
    match hour {
        6..=8 => 2.0,   // morning
        18..=22 => 3.5, // evening peak
        23 | 0..=5 => 1.0,
        _ => 1.5,
    }
}

pub fn hourly_usage<R: Rng>(rng: &mut R) -> Vec<HourlyUsage> {
    (0..HOURS_PER_DAY as u32)
        .map(|hour| {
            let noise = (rng.gen::<f64>() - 0.5) * 2.0 * HOURLY_SEED_NOISE_KW;
            HourlyUsage {
                hour,
                usage_kw: (day_part_base_kw(hour) + noise).max(HOURLY_SEED_FLOOR_KW),
            }
        })
        .collect()
}

pub fn monthly_trend<R: Rng>(rng: &mut R) -> Vec<MonthlySavings> {
    TREND_MONTHS
        .iter()
        .map(|month| MonthlySavings {
            month: (*month).to_string(),
            savings_kwh: rng.gen_range(10.0..30.0),
        })
        .collect()
}

pub fn energy<R: Rng>(rng: &mut R) -> EnergyData {
    EnergyData {
        current_power_usage_kw: 2.5,
        today_savings_kwh: 15.2,
        co2_reduction_kg: 6.4,
        efficiency_grade: EfficiencyGrade::APlus,
        estimated_bill: 125_000,
        hourly_usage: hourly_usage(rng),
        monthly_trend: monthly_trend(rng),
    }
}

pub fn profile() -> UserProfile {
    UserProfile {
        id: "user_001".to_string(),
        name: "Kim Energy".to_string(),
        email: "kim.energy@example.com".to_string(),
        household_type: HouseholdType::Apartment,
        address: "123 Teheran-ro, Gangnam-gu, Seoul".to_string(),
        resident_count: 4,
        income_level: "Q3".to_string(),
        avatar: Some("https://via.placeholder.com/100x100/4CAF50/FFFFFF?text=KE".to_string()),
    }
}

pub fn devices(now: DateTime<FixedOffset>) -> Vec<Device> {
    let device = |id: &str, name: &str, device_type: DeviceType, kw: f64, is_on: bool, location: &str| Device {
        id: id.to_string(),
        name: name.to_string(),
        device_type,
        status: DeviceStatus::Online,
        power_consumption_kw: kw,
        is_on,
        last_updated: now,
        location: location.to_string(),
    };

    vec![
        device("device_001", "Smart Meter", DeviceType::SmartMeter, 2.5, true, "Utility Room"),
        device("device_002", "Living Room AC", DeviceType::Thermostat, 1.2, true, "Living Room"),
        device("device_003", "Kitchen Smart Plug", DeviceType::SmartPlug, 0.3, false, "Kitchen"),
        device("device_004", "Rooftop Solar", DeviceType::SolarPanel, -0.8, true, "Rooftop"),
        device("device_005", "Home Battery", DeviceType::Battery, 0.0, true, "Basement"),
    ]
}

pub fn community() -> CommunityData {
    let entry = |rank: u32, name: &str, savings_kwh: f64, color: &str| LeaderboardEntry {
        rank,
        name: name.to_string(),
        savings_kwh,
        avatar: Some(format!(
            "https://via.placeholder.com/50x50/{color}/FFFFFF?text={rank}"
        )),
    };

    CommunityData {
        my_rank: 15,
        total_users: 1250,
        monthly_savings_kwh: 45.2,
        leaderboard: vec![
            entry(1, "Kim Energy", 45.2, "FFD700"),
            entry(2, "Lee Saver", 42.8, "C0C0C0"),
            entry(3, "Park Green", 40.1, "CD7F32"),
            entry(4, "Choi Smart", 38.5, "4CAF50"),
            entry(5, "Jung Eco", 36.2, "4CAF50"),
        ],
        challenges: vec![
            Challenge {
                id: "challenge_001".to_string(),
                title: "Weekend Saving Challenge".to_string(),
                description: "Save at least 20% over the weekend".to_string(),
                participants: 156,
                reward: 5000,
                end_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or(NaiveDate::MIN),
                status: ChallengeStatus::Active,
            },
            Challenge {
                id: "challenge_002".to_string(),
                title: "Winter Heating Efficiency Challenge".to_string(),
                description: "Cut heating costs by 15%".to_string(),
                participants: 89,
                reward: 3000,
                end_date: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap_or(NaiveDate::MIN),
                status: ChallengeStatus::Active,
            },
        ],
    }
}

pub fn recommendations() -> Vec<AiRecommendation> {
    vec![
        AiRecommendation {
            id: "ai_001".to_string(),
            title: "Raise the AC setpoint by 1°C".to_string(),
            description: "A one degree higher cooling setpoint cuts consumption by about 5%".to_string(),
            category: RecommendationCategory::EnergySaving,
            potential_savings: 800,
            difficulty: Difficulty::Easy,
            is_applied: false,
            priority: Priority::High,
        },
        AiRecommendation {
            id: "ai_002".to_string(),
            title: "Use smart plugs".to_string(),
            description: "Cut standby power with smart plugs on idle appliances".to_string(),
            category: RecommendationCategory::EnergySaving,
            potential_savings: 1200,
            difficulty: Difficulty::Medium,
            is_applied: false,
            priority: Priority::Medium,
        },
        AiRecommendation {
            id: "ai_003".to_string(),
            title: "Switch to LED bulbs".to_string(),
            description: "Replacing incandescent bulbs with LEDs saves up to 80% on lighting".to_string(),
            category: RecommendationCategory::EnergySaving,
            potential_savings: 1500,
            difficulty: Difficulty::Easy,
            is_applied: false,
            priority: Priority::High,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_hourly_usage_covers_every_hour() {
        let mut rng = StdRng::seed_from_u64(42);
        let usage = hourly_usage(&mut rng);
        assert_eq!(usage.len(), HOURS_PER_DAY);
        for (i, h) in usage.iter().enumerate() {
            assert_eq!(h.hour as usize, i);
            assert!(h.usage_kw >= HOURLY_SEED_FLOOR_KW);
        }
    }

    #[test]
    fn test_evening_peak_above_night() {
        let mut rng = StdRng::seed_from_u64(7);
        let usage = hourly_usage(&mut rng);
        // noise is ±0.25, peak and night bases are 2.5 apart
        assert!(usage[19].usage_kw > usage[3].usage_kw);
        assert_eq!(day_part_base_kw(22), 3.5);
        assert_eq!(day_part_base_kw(23), 1.0);
        assert_eq!(day_part_base_kw(6), 2.0);
        assert_eq!(day_part_base_kw(12), 1.5);
    }

    #[test]
    fn test_monthly_trend_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let trend = monthly_trend(&mut rng);
        assert_eq!(trend.len(), 6);
        assert_eq!(trend[0].month, "Jan");
        assert!(trend.iter().all(|m| (10.0..30.0).contains(&m.savings_kwh)));
    }

    #[test]
    fn test_device_ids_unique() {
        let devices = devices(chrono::Utc::now().fixed_offset());
        let ids: HashSet<_> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids.len(), devices.len());
        assert!(devices.iter().all(|d| d.is_online()));
    }

    #[test]
    fn test_leaderboard_ordered_by_rank() {
        let c = community();
        let ranks: Vec<u32> = c.leaderboard.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert_eq!(c.challenges[0].end_date.to_string(), "2024-01-15");
    }

    #[test]
    fn test_recommendations_start_unapplied() {
        assert!(recommendations().iter().all(|r| !r.is_applied));
    }
}
