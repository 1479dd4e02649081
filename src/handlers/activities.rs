use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use super::WithEvents;
use crate::game::activities::{self, QuizResult, ReviewResult, StepResult};
use crate::srs::{self, Flashcard, FlashcardReviewState, Rating};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RateRequest {
  pub card: FlashcardReviewState,
  pub rating: Rating,
}

/// Schedule a card without touching game progress
pub async fn rate_card(
  State(state): State<AppState>,
  Json(request): Json<RateRequest>,
) -> Json<FlashcardReviewState> {
  let today = state.lock_store().today();
  Json(srs::rate_card(&request.card, request.rating, today))
}

#[derive(Debug, Deserialize)]
pub struct QuizRequest {
  pub correct: u32,
  pub total: u32,
}

pub async fn complete_quiz(
  State(state): State<AppState>,
  Json(request): Json<QuizRequest>,
) -> Json<WithEvents<QuizResult>> {
  let mut store = state.lock_store();
  let result = activities::complete_quiz(&mut store, request.correct, request.total);
  WithEvents::drain(result, &mut store)
}

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
  pub card: Flashcard,
  pub rating: Rating,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
  pub card: Flashcard,
  pub xp_earned: u64,
}

/// Rate a card inside a review session: schedules it and earns XP
pub async fn review_flashcard(
  State(state): State<AppState>,
  Json(request): Json<ReviewRequest>,
) -> Json<WithEvents<ReviewResponse>> {
  let ReviewRequest { mut card, rating } = request;
  let mut store = state.lock_store();
  let ReviewResult { xp_earned, .. } = activities::review_flashcard(&mut store, &mut card, rating);
  WithEvents::drain(ReviewResponse { card, xp_earned }, &mut store)
}

#[derive(Debug, Deserialize)]
pub struct StepRequest {
  pub correct: bool,
}

pub async fn submit_step(
  State(state): State<AppState>,
  Json(request): Json<StepRequest>,
) -> Json<WithEvents<StepResult>> {
  let mut store = state.lock_store();
  let result = activities::submit_step(&mut store, request.correct);
  WithEvents::drain(result, &mut store)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpResponse {
  pub xp_earned: u64,
}

pub async fn create_study_plan(State(state): State<AppState>) -> Json<WithEvents<XpResponse>> {
  let mut store = state.lock_store();
  let xp_earned = activities::create_study_plan(&mut store);
  WithEvents::drain(XpResponse { xp_earned }, &mut store)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
  pub images_uploaded: u32,
}

pub async fn upload_image(State(state): State<AppState>) -> Json<WithEvents<UploadResponse>> {
  let mut store = state.lock_store();
  let images_uploaded = activities::upload_image(&mut store);
  WithEvents::drain(UploadResponse { images_uploaded }, &mut store)
}
