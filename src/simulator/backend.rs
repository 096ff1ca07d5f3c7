use async_trait::async_trait;

use crate::auth::AuthOutcome;
use crate::domain::{
    AiRecommendation, CommunityData, Device, EnergyData, PowerSummary, ProfileUpdate, Scenario,
    UserProfile,
};

/// Data source consumed by the presentation layer.
///
/// Every getter returns an independent snapshot. Unknown ids are reported
/// as `false`, never as errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HemsBackend: Send + Sync {
    async fn user_profile(&self) -> UserProfile;
    async fn energy_data(&self) -> EnergyData;
    async fn devices(&self) -> Vec<Device>;
    async fn community_data(&self) -> CommunityData;
    async fn ai_recommendations(&self) -> Vec<AiRecommendation>;

    async fn toggle_device(&self, device_id: &str) -> bool;
    async fn apply_ai_recommendation(&self, recommendation_id: &str) -> bool;
    async fn authenticate(&self, email: &str, password: &str) -> AuthOutcome;
    /// Merge the present fields; always succeeds
    async fn update_profile(&self, update: ProfileUpdate) -> bool;
    async fn trigger_scenario(&self, scenario: Scenario);

    async fn power_summary(&self) -> PowerSummary;
    /// Switch off everything except smart meters, returning how many changed
    async fn turn_off_all(&self) -> usize;
    /// Restore the seeded demo data
    async fn reset(&self);
}
