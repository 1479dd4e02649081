//! Local JSON API over the game store.
//!
//! Every mutating route answers with its result plus the notifications
//! the mutation produced, drained from the store.

pub mod activities;
pub mod profile;
pub mod rewards;

use axum::{
  Json, Router,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
};
use serde::Serialize;
use serde_json::json;

use crate::game::{GameEvent, GameStore};
use crate::state::AppState;

/// Errors surfaced to API clients
#[derive(Debug)]
pub enum ApiError {
  /// A path or body value the game does not know
  BadRequest(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::BadRequest(message) => {
        tracing::debug!("Rejected request: {}", message);
        (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
      }
    }
  }
}

/// A mutation result with the notifications it raised
#[derive(Debug, Serialize)]
pub struct WithEvents<T> {
  #[serde(flatten)]
  pub result: T,
  pub events: Vec<GameEvent>,
}

impl<T> WithEvents<T> {
  pub fn drain(result: T, store: &mut GameStore) -> Json<Self> {
    Json(Self {
      result,
      events: store.drain_events(),
    })
  }
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api/profile", get(profile::profile))
    .route("/api/check-in", post(profile::check_in))
    .route("/api/reset", post(profile::reset))
    .route("/api/events", post(rewards::report_event))
    .route("/api/badges", get(rewards::badges))
    .route("/api/badges/{id}/unlock", post(rewards::unlock_badge))
    .route("/api/missions", get(rewards::missions))
    .route("/api/missions/advance", post(rewards::advance_mission))
    .route("/api/missions/reset", post(rewards::reset_missions))
    .route("/api/stats", get(rewards::statistics))
    .route("/api/stats/{name}/increment", post(rewards::increment_statistic))
    .route("/api/cards/rate", post(activities::rate_card))
    .route("/api/quiz/complete", post(activities::complete_quiz))
    .route("/api/flashcards/review", post(activities::review_flashcard))
    .route("/api/doubts/step", post(activities::submit_step))
    .route("/api/study-plans", post(activities::create_study_plan))
    .route("/api/images", post(activities::upload_image))
    .with_state(state)
}
