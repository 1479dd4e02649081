use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

const MIN_EASE_FACTOR: f64 = 1.3;
const DEFAULT_EASE_FACTOR: f64 = 2.5;
const HARD_EASE_PENALTY: f64 = 0.2;
const EASY_EASE_BONUS: f64 = 0.1;
const EASY_INTERVAL_BONUS: f64 = 1.3;

/// Three-button recall rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
  Hard,
  Good,
  Easy,
}

impl Rating {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Hard => "hard",
      Self::Good => "good",
      Self::Easy => "easy",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "hard" => Some(Self::Hard),
      "good" => Some(Self::Good),
      "easy" => Some(Self::Easy),
      _ => None,
    }
  }
}

/// Scheduling fields of one flashcard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardReviewState {
  /// Days until the next review, at least 1
  pub interval: u32,
  pub ease_factor: f64,
  /// Consecutive non-hard ratings
  pub repetitions: u32,
  pub next_review_date: NaiveDate,
  #[serde(default)]
  pub last_review_date: Option<NaiveDate>,
}

impl FlashcardReviewState {
  /// A never-reviewed card, due immediately
  pub fn new(today: NaiveDate) -> Self {
    Self {
      interval: 1,
      ease_factor: DEFAULT_EASE_FACTOR,
      repetitions: 0,
      next_review_date: today,
      last_review_date: None,
    }
  }

  pub fn is_due(&self, today: NaiveDate) -> bool {
    self.next_review_date <= today
  }
}

fn round_days(days: f64) -> u32 {
  (days.round() as u32).max(1)
}

/// Reschedule a card after a review.
///
/// * hard: interval back to 1 day, ease drops by 0.2 (floor 1.3), repetitions kept
/// * good: repetitions + 1, interval 1 then 6 then `interval * ease`
/// * easy: repetitions + 1, interval `interval * ease * 1.3`, ease + 0.1
pub fn rate_card(
  state: &FlashcardReviewState,
  rating: Rating,
  today: NaiveDate,
) -> FlashcardReviewState {
  let ease_factor = state.ease_factor.max(MIN_EASE_FACTOR);
  let interval = state.interval.max(1);

  let (interval, ease_factor, repetitions) = match rating {
    Rating::Hard => (
      1,
      (ease_factor - HARD_EASE_PENALTY).max(MIN_EASE_FACTOR),
      state.repetitions,
    ),
    Rating::Good => {
      let repetitions = state.repetitions.saturating_add(1);
      let interval = match repetitions {
        1 => 1,
        2 => 6,
        _ => round_days(f64::from(interval) * ease_factor),
      };
      (interval, ease_factor, repetitions)
    }
    Rating::Easy => (
      round_days(f64::from(interval) * ease_factor * EASY_INTERVAL_BONUS),
      ease_factor + EASY_EASE_BONUS,
      state.repetitions.saturating_add(1),
    ),
  };

  let next_review_date = today
    .checked_add_days(Days::new(u64::from(interval)))
    .unwrap_or(NaiveDate::MAX);

  FlashcardReviewState {
    interval,
    ease_factor,
    repetitions,
    next_review_date,
    last_review_date: Some(today),
  }
}
