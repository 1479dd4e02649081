use serde::{Deserialize, Serialize};

use super::missions::MissionType;
use super::streak::StreakOutcome;

/// Kinds of activity that grant XP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XpEventType {
  CorrectStep,
  SubmitStep,
  CompleteQuiz,
  PerfectQuiz,
  ReviewFlashcard,
  /// Amount always supplied by the caller (mission reward)
  CompleteMission,
  /// Amount always supplied by the caller
  StreakBonus,
}

impl XpEventType {
  pub fn base_reward(&self) -> u64 {
    match self {
      Self::CorrectStep => 10,
      Self::SubmitStep => 2,
      Self::CompleteQuiz => 50,
      Self::PerfectQuiz => 25,
      Self::ReviewFlashcard => 3,
      Self::CompleteMission => 0,
      Self::StreakBonus => 0,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::CorrectStep => "correct_step",
      Self::SubmitStep => "submit_step",
      Self::CompleteQuiz => "complete_quiz",
      Self::PerfectQuiz => "perfect_quiz",
      Self::ReviewFlashcard => "review_flashcard",
      Self::CompleteMission => "complete_mission",
      Self::StreakBonus => "streak_bonus",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "correct_step" => Some(Self::CorrectStep),
      "submit_step" => Some(Self::SubmitStep),
      "complete_quiz" => Some(Self::CompleteQuiz),
      "perfect_quiz" => Some(Self::PerfectQuiz),
      "review_flashcard" => Some(Self::ReviewFlashcard),
      "complete_mission" => Some(Self::CompleteMission),
      "streak_bonus" => Some(Self::StreakBonus),
      _ => None,
    }
  }
}

/// Change notification emitted by the store.
///
/// The store queues these while mutating; callers drain them to drive toasts,
/// confetti and similar feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum GameEvent {
  XpGained {
    amount: u64,
    total: u64,
  },
  LeveledUp {
    level: u32,
    title: &'static str,
  },
  BadgeUnlocked {
    badge_id: String,
    name: String,
    xp_reward: u64,
  },
  MissionCompleted {
    mission_id: String,
    mission_type: MissionType,
    xp_reward: u64,
  },
  StreakUpdated {
    streak: u32,
    outcome: StreakOutcome,
  },
  MissionsReset,
}
