use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub name: String,
    pub savings_kwh: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChallengeStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub participants: u32,
    /// Reward in KRW
    pub reward: u64,
    pub end_date: NaiveDate,
    pub status: ChallengeStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommunityData {
    pub my_rank: u32,
    pub total_users: u32,
    pub monthly_savings_kwh: f64,
    /// Ordered by rank, best first
    pub leaderboard: Vec<LeaderboardEntry>,
    pub challenges: Vec<Challenge>,
}

impl CommunityData {
    pub fn active_challenges(&self) -> impl Iterator<Item = &Challenge> {
        self.challenges
            .iter()
            .filter(|c| c.status == ChallengeStatus::Active)
    }

    /// Percentile of the household in the community (100 = top)
    pub fn percentile(&self) -> f64 {
        if self.total_users == 0 {
            return 0.0;
        }
        let behind = self.total_users.saturating_sub(self.my_rank) as f64;
        (behind / self.total_users as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn community() -> CommunityData {
        CommunityData {
            my_rank: 15,
            total_users: 1250,
            monthly_savings_kwh: 45.2,
            leaderboard: vec![],
            challenges: vec![
                Challenge {
                    id: "c1".to_string(),
                    title: "Weekend".to_string(),
                    description: "Save 20%".to_string(),
                    participants: 156,
                    reward: 5000,
                    end_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                    status: ChallengeStatus::Active,
                },
                Challenge {
                    id: "c2".to_string(),
                    title: "Done".to_string(),
                    description: "Finished".to_string(),
                    participants: 10,
                    reward: 100,
                    end_date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
                    status: ChallengeStatus::Completed,
                },
            ],
        }
    }

    #[test]
    fn test_active_challenges() {
        let c = community();
        let active: Vec<_> = c.active_challenges().map(|c| c.id.as_str()).collect();
        assert_eq!(active, vec!["c1"]);
    }

    #[test]
    fn test_percentile() {
        let c = community();
        assert!((c.percentile() - 98.8).abs() < 1e-9);

        let empty = CommunityData {
            total_users: 0,
            ..community()
        };
        assert_eq!(empty.percentile(), 0.0);
    }

    #[test]
    fn test_end_date_serializes_as_iso_date() {
        let json = serde_json::to_value(&community().challenges[0]).unwrap();
        assert_eq!(json["end_date"], "2024-01-15");
        assert_eq!(json["status"], "active");
    }
}
