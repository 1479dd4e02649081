use axum::{
  Json,
  extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use super::{ApiError, WithEvents};
use crate::game::{Badge, EventOutcome, Mission, MissionType, StatName, Statistics, XpEventType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRequest {
  pub event_type: XpEventType,
  #[serde(default)]
  pub custom_amount: Option<i64>,
}

pub async fn report_event(
  State(state): State<AppState>,
  Json(request): Json<EventRequest>,
) -> Json<WithEvents<EventOutcome>> {
  let mut store = state.lock_store();
  let outcome = store.report_event(request.event_type, request.custom_amount);
  WithEvents::drain(outcome, &mut store)
}

pub async fn badges(State(state): State<AppState>) -> Json<Vec<Badge>> {
  Json(state.lock_store().all_badges().to_vec())
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
  /// None when the badge was already unlocked
  pub badge: Option<Badge>,
}

pub async fn unlock_badge(
  State(state): State<AppState>,
  Path(id): Path<String>,
) -> Result<Json<WithEvents<UnlockResponse>>, ApiError> {
  let mut store = state.lock_store();
  if !store.all_badges().iter().any(|b| b.id == id) {
    return Err(ApiError::BadRequest(format!("Unknown badge: {}", id)));
  }
  let badge = store.try_unlock(&id);
  Ok(WithEvents::drain(UnlockResponse { badge }, &mut store))
}

pub async fn missions(State(state): State<AppState>) -> Json<Vec<Mission>> {
  Json(state.lock_store().all_missions().to_vec())
}

fn default_amount() -> u32 {
  1
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
  #[serde(rename = "type")]
  pub mission_type: MissionType,
  #[serde(default = "default_amount")]
  pub amount: u32,
}

#[derive(Debug, Serialize)]
pub struct AdvanceResponse {
  pub completed: Vec<Mission>,
  pub missions: Vec<Mission>,
}

pub async fn advance_mission(
  State(state): State<AppState>,
  Json(request): Json<AdvanceRequest>,
) -> Json<WithEvents<AdvanceResponse>> {
  let mut store = state.lock_store();
  let completed = store.advance_mission(request.mission_type, request.amount);
  let missions = store.all_missions().to_vec();
  WithEvents::drain(
    AdvanceResponse {
      completed,
      missions,
    },
    &mut store,
  )
}

#[derive(Debug, Serialize)]
pub struct MissionsResponse {
  pub missions: Vec<Mission>,
}

pub async fn reset_missions(State(state): State<AppState>) -> Json<WithEvents<MissionsResponse>> {
  let mut store = state.lock_store();
  store.reset_missions_for_new_day();
  let missions = store.all_missions().to_vec();
  WithEvents::drain(MissionsResponse { missions }, &mut store)
}

pub async fn statistics(State(state): State<AppState>) -> Json<Statistics> {
  Json(state.lock_store().current_statistics().clone())
}

#[derive(Debug, Serialize)]
pub struct IncrementResponse {
  pub name: &'static str,
  pub value: u32,
}

pub async fn increment_statistic(
  State(state): State<AppState>,
  Path(name): Path<String>,
) -> Result<Json<WithEvents<IncrementResponse>>, ApiError> {
  let stat = StatName::from_str(&name)
    .ok_or_else(|| ApiError::BadRequest(format!("Unknown statistic: {}", name)))?;

  let mut store = state.lock_store();
  let value = store.increment_statistic(stat);
  Ok(WithEvents::drain(
    IncrementResponse {
      name: stat.as_str(),
      value,
    },
    &mut store,
  ))
}
