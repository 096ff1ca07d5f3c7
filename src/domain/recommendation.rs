use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    EnergySaving,
    CostOptimization,
    Comfort,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// An energy-saving action suggested to the household
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AiRecommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: RecommendationCategory,
    /// Expected monthly savings in KRW
    pub potential_savings: u64,
    pub difficulty: Difficulty,
    /// Once set, never cleared
    pub is_applied: bool,
    pub priority: Priority,
}

impl AiRecommendation {
    /// Energy credited to today's savings each time the recommendation is applied
    pub fn savings_credit_kwh(&self) -> f64 {
        self.potential_savings as f64 / 1000.0
    }

    pub fn mark_applied(&mut self) {
        self.is_applied = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec() -> AiRecommendation {
        AiRecommendation {
            id: "ai_001".to_string(),
            title: "Raise AC setpoint by 1°C".to_string(),
            description: "Cut cooling consumption by 5%".to_string(),
            category: RecommendationCategory::EnergySaving,
            potential_savings: 800,
            difficulty: Difficulty::Easy,
            is_applied: false,
            priority: Priority::High,
        }
    }

    #[test]
    fn test_savings_credit() {
        assert_eq!(rec().savings_credit_kwh(), 0.8);
    }

    #[test]
    fn test_mark_applied_is_sticky() {
        let mut r = rec();
        r.mark_applied();
        r.mark_applied();
        assert!(r.is_applied);
    }

    #[test]
    fn test_priority_ordering() {
        let mut ps = vec![Priority::Low, Priority::High, Priority::Medium];
        ps.sort();
        assert_eq!(ps, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&RecommendationCategory::CostOptimization).unwrap(),
            "\"cost_optimization\""
        );
    }
}
