use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::sm2::{FlashcardReviewState, Rating, rate_card};

/// A flashcard as the flashcard feature stores it.
///
/// Scheduling lives in `review`; the gamification store never holds cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
  pub id: String,
  pub front: String,
  pub back: String,
  #[serde(flatten)]
  pub review: FlashcardReviewState,
}

impl Flashcard {
  pub fn new(id: String, front: String, back: String, today: NaiveDate) -> Self {
    Self {
      id,
      front,
      back,
      review: FlashcardReviewState::new(today),
    }
  }

  /// Apply a rating and return the updated scheduling fields
  pub fn rate(&mut self, rating: Rating, today: NaiveDate) -> FlashcardReviewState {
    self.review = rate_card(&self.review, rating, today);
    self.review
  }

  pub fn is_due(&self, today: NaiveDate) -> bool {
    self.review.is_due(today)
  }
}
