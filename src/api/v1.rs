use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::{
    api::{
        error::ApiError,
        response::{list, ApiResponse},
    },
    auth::{AuthOutcome, LoginRequest},
    domain::{
        AiRecommendation, Challenge, CommunityData, Device, DeviceType, EnergyData, HourlyUsage,
        PowerSummary, ProfileUpdate, Scenario, UserProfile,
    },
    simulator::HemsBackend,
};

type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn HemsBackend>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/profile", get(get_profile).patch(update_profile))
        .route("/energy", get(get_energy))
        .route("/devices", get(list_devices))
        .route("/devices/summary", get(power_summary))
        .route("/devices/all-off", post(turn_off_all))
        .route("/devices/:id/toggle", post(toggle_device))
        .route("/community", get(get_community))
        .route("/recommendations", get(list_recommendations))
        .route("/recommendations/:id/apply", post(apply_recommendation))
        .route("/scenarios/:name", post(trigger_scenario))
        .route("/demo/reset", post(reset_demo))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

/// POST /api/v1/auth/login
pub async fn login(
    State(st): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthOutcome> {
    req.validate()?;
    let outcome = st.backend.authenticate(&req.email, &req.password).await;
    if !outcome.success {
        return Err(ApiError::Unauthorized);
    }
    Ok(ApiResponse::success(outcome))
}

pub async fn get_profile(State(st): State<AppState>) -> ApiResult<UserProfile> {
    Ok(ApiResponse::success(st.backend.user_profile().await))
}

/// PATCH /api/v1/profile - merge the present fields, return the stored profile
pub async fn update_profile(
    State(st): State<AppState>,
    Json(update): Json<ProfileUpdate>,
) -> ApiResult<UserProfile> {
    update.validate()?;
    if !update.is_empty() {
        st.backend.update_profile(update).await;
    }
    Ok(ApiResponse::success(st.backend.user_profile().await))
}

/// Energy snapshot plus the gauge fields derived from its grade
#[derive(Debug, Serialize)]
pub struct EnergyView {
    #[serde(flatten)]
    pub energy: EnergyData,
    pub efficiency_score: u8,
    pub efficiency_label: &'static str,
    pub peak_hour: Option<HourlyUsage>,
}

impl From<EnergyData> for EnergyView {
    fn from(energy: EnergyData) -> Self {
        Self {
            efficiency_score: energy.efficiency_grade.score(),
            efficiency_label: energy.efficiency_grade.description(),
            peak_hour: energy.peak_hour(),
            energy,
        }
    }
}

pub async fn get_energy(State(st): State<AppState>) -> ApiResult<EnergyView> {
    Ok(ApiResponse::success(st.backend.energy_data().await.into()))
}

#[derive(Debug, Default, Deserialize)]
pub struct DeviceFilter {
    #[serde(rename = "type")]
    pub device_type: Option<String>,
}

/// GET /api/v1/devices?type=solar
pub async fn list_devices(
    State(st): State<AppState>,
    Query(filter): Query<DeviceFilter>,
) -> ApiResult<Vec<Device>> {
    let wanted = filter
        .device_type
        .as_deref()
        .map(str::parse::<DeviceType>)
        .transpose()
        .map_err(ApiError::BadRequest)?;

    let mut devices = st.backend.devices().await;
    if let Some(wanted) = wanted {
        devices.retain(|d| d.device_type == wanted);
    }
    Ok(list(devices))
}

#[derive(Debug, Serialize)]
pub struct PowerSummaryView {
    #[serde(flatten)]
    pub summary: PowerSummary,
    pub net_producer: bool,
}

impl From<PowerSummary> for PowerSummaryView {
    fn from(summary: PowerSummary) -> Self {
        Self {
            net_producer: summary.is_net_producer(),
            summary,
        }
    }
}

pub async fn power_summary(State(st): State<AppState>) -> ApiResult<PowerSummaryView> {
    Ok(ApiResponse::success(st.backend.power_summary().await.into()))
}

/// POST /api/v1/devices/:id/toggle - returns the device after the flip
pub async fn toggle_device(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Device> {
    if !st.backend.toggle_device(&id).await {
        return Err(ApiError::NotFound(format!("Device {id}")));
    }
    st.backend
        .devices()
        .await
        .into_iter()
        .find(|d| d.id == id)
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::InternalError(format!("device {id} vanished after toggle")))
}

#[derive(Debug, Serialize)]
pub struct SwitchedOff {
    pub switched: usize,
}

pub async fn turn_off_all(State(st): State<AppState>) -> ApiResult<SwitchedOff> {
    let switched = st.backend.turn_off_all().await;
    Ok(ApiResponse::success(SwitchedOff { switched }))
}

/// Community snapshot plus the household's standing
#[derive(Debug, Serialize)]
pub struct CommunityView {
    #[serde(flatten)]
    pub community: CommunityData,
    pub percentile: f64,
    pub active_challenges: Vec<Challenge>,
}

impl From<CommunityData> for CommunityView {
    fn from(community: CommunityData) -> Self {
        Self {
            percentile: community.percentile(),
            active_challenges: community.active_challenges().cloned().collect(),
            community,
        }
    }
}

pub async fn get_community(State(st): State<AppState>) -> ApiResult<CommunityView> {
    Ok(ApiResponse::success(st.backend.community_data().await.into()))
}

/// GET /api/v1/recommendations - same order as the backend returns them
pub async fn list_recommendations(State(st): State<AppState>) -> ApiResult<Vec<AiRecommendation>> {
    Ok(list(st.backend.ai_recommendations().await))
}

/// POST /api/v1/recommendations/:id/apply - returns the updated energy snapshot
pub async fn apply_recommendation(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EnergyView> {
    if !st.backend.apply_ai_recommendation(&id).await {
        return Err(ApiError::NotFound(format!("Recommendation {id}")));
    }
    Ok(ApiResponse::success(st.backend.energy_data().await.into()))
}

#[derive(Debug, Serialize)]
pub struct ScenarioTriggered {
    pub scenario: Scenario,
}

pub async fn trigger_scenario(
    State(st): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<ScenarioTriggered> {
    let scenario: Scenario = name.parse()?;
    st.backend.trigger_scenario(scenario).await;
    Ok(ApiResponse::success(ScenarioTriggered { scenario }))
}

pub async fn reset_demo(State(st): State<AppState>) -> impl IntoResponse {
    st.backend.reset().await;
    StatusCode::NO_CONTENT
}
