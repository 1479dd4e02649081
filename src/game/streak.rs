//! Day-over-day activity streaks and the XP multiplier they earn.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Streak length that unlocks the `week_streak` badge
pub const WEEK_STREAK_DAYS: u32 = 7;

/// Multiplier steps, checked from the longest streak down
const MULTIPLIER_STEPS: [(u32, f64); 4] = [(30, 2.0), (14, 1.75), (7, 1.5), (3, 1.25)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakOutcome {
  /// Already checked in today
  SameDay,
  /// Last activity was yesterday
  Continued,
  /// First check-in ever, or at least one missed day
  Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakCheck {
  pub streak: u32,
  pub last_active_date: NaiveDate,
  pub outcome: StreakOutcome,
}

impl StreakCheck {
  /// True when this check-in opened a new calendar day
  pub fn is_new_day(&self) -> bool {
    self.outcome != StreakOutcome::SameDay
  }
}

pub fn check_in(last_active: Option<NaiveDate>, streak: u32, today: NaiveDate) -> StreakCheck {
  let yesterday = today.checked_sub_days(Days::new(1));

  let (streak, outcome) = match last_active {
    Some(last) if last == today => (streak, StreakOutcome::SameDay),
    Some(last) if Some(last) == yesterday => (streak.saturating_add(1), StreakOutcome::Continued),
    _ => (1, StreakOutcome::Reset),
  };

  StreakCheck {
    streak,
    last_active_date: today,
    outcome,
  }
}

pub fn streak_multiplier(streak: u32) -> f64 {
  MULTIPLIER_STEPS
    .iter()
    .find(|(min, _)| streak >= *min)
    .map(|(_, factor)| *factor)
    .unwrap_or(1.0)
}
