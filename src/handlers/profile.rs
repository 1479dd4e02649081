use axum::{Json, extract::State};
use serde::Serialize;

use super::WithEvents;
use crate::game::{GameStore, LevelProgress, StreakCheck, UserProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
  pub user: UserProfile,
  pub level: u32,
  pub title: &'static str,
  pub progress: LevelProgress,
  pub streak_multiplier: f64,
}

impl ProfileView {
  fn of(store: &GameStore) -> Self {
    Self {
      user: store.current_user().clone(),
      level: store.level(),
      title: store.level_title(),
      progress: store.level_progress(),
      streak_multiplier: store.streak_multiplier(),
    }
  }
}

pub async fn profile(State(state): State<AppState>) -> Json<ProfileView> {
  let store = state.lock_store();
  Json(ProfileView::of(&store))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
  #[serde(flatten)]
  pub check: StreakCheck,
  pub missions_reset: bool,
}

/// Daily check-in. The first check-in of a day also starts fresh missions.
pub async fn check_in(State(state): State<AppState>) -> Json<WithEvents<CheckInResponse>> {
  let mut store = state.lock_store();
  let check = store.check_in_today();
  let missions_reset = check.is_new_day();
  if missions_reset {
    store.reset_missions_for_new_day();
  }
  WithEvents::drain(
    CheckInResponse {
      check,
      missions_reset,
    },
    &mut store,
  )
}

pub async fn reset(State(state): State<AppState>) -> Json<ProfileView> {
  let mut store = state.lock_store();
  store.reset_all();
  Json(ProfileView::of(&store))
}
