//! Learning activities as the feature pages report them.
//!
//! Each function bundles the statistic, mission and XP updates one user
//! action produces, in the order the pages apply them.

use serde::Serialize;

use super::badges;
use super::events::XpEventType;
use super::missions::MissionType;
use super::stats::StatName;
use super::store::GameStore;
use crate::srs::{Flashcard, FlashcardReviewState, Rating};

/// XP base for creating a study plan
pub const STUDY_PLAN_XP: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
  /// Rounded percentage, 0..=100
  pub score: u32,
  pub perfect: bool,
  pub xp_earned: u64,
}

/// Score as a rounded percentage; an empty quiz scores 0
pub fn quiz_score(correct: u32, total: u32) -> u32 {
  if total == 0 {
    return 0;
  }
  let correct = correct.min(total);
  (f64::from(correct) / f64::from(total) * 100.0).round() as u32
}

/// A finished quiz: counts it, advances quiz missions and grants XP.
///
/// A perfect score adds the perfect-quiz bonus and the Perfectionist badge.
pub fn complete_quiz(store: &mut GameStore, correct: u32, total: u32) -> QuizResult {
  let score = quiz_score(correct, total);
  let perfect = score == 100;

  store.increment_statistic(StatName::QuizzesCompleted);
  store.advance_mission(MissionType::Quiz, 1);

  let mut xp_earned = store.report_event(XpEventType::CompleteQuiz, None).xp_gained;
  if perfect {
    xp_earned += store.report_event(XpEventType::PerfectQuiz, None).xp_gained;
    store.try_unlock(badges::PERFECT_SCORE);
  }

  QuizResult {
    score,
    perfect,
    xp_earned,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
  pub review: FlashcardReviewState,
  pub xp_earned: u64,
}

/// One flashcard rated during a review session
pub fn review_flashcard(store: &mut GameStore, card: &mut Flashcard, rating: Rating) -> ReviewResult {
  store.increment_statistic(StatName::FlashcardsReviewed);
  store.advance_mission(MissionType::Flashcard, 1);
  let xp_earned = store.report_event(XpEventType::ReviewFlashcard, None).xp_gained;

  let review = card.rate(rating, store.today());
  ReviewResult { review, xp_earned }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
  pub correct: bool,
  pub xp_earned: u64,
}

/// A solution step sent to the tutor, with the tutor's verdict
pub fn submit_step(store: &mut GameStore, correct: bool) -> StepResult {
  store.increment_statistic(StatName::StepsSubmitted);
  let mut xp_earned = store.report_event(XpEventType::SubmitStep, None).xp_gained;

  if correct {
    store.increment_statistic(StatName::CorrectSteps);
    xp_earned += store.report_event(XpEventType::CorrectStep, None).xp_gained;
  }

  store.increment_statistic(StatName::DoubtsAsked);
  store.advance_mission(MissionType::Doubt, 1);

  StepResult { correct, xp_earned }
}

/// A generated study plan; returns XP earned
pub fn create_study_plan(store: &mut GameStore) -> u64 {
  store.increment_statistic(StatName::StudyPlansCreated);
  store.advance_mission(MissionType::Study, 1);
  store
    .report_event(XpEventType::CompleteQuiz, Some(STUDY_PLAN_XP))
    .xp_gained
}

/// An image uploaded for text extraction; returns the new upload count
pub fn upload_image(store: &mut GameStore) -> u32 {
  store.increment_statistic(StatName::ImagesUploaded)
}
