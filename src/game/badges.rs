//! Badge catalogue and the one-way unlock engine.
//!
//! Every badge exists from startup in the locked state. Unlocking is
//! irreversible and succeeds at most once per badge, so callers are free to
//! attempt unlocks speculatively after any change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::stats::StatName;

pub const FIRST_STEP: &str = "first_step";
pub const CORRECT_STEP: &str = "correct_step";
pub const QUIZ_MASTER: &str = "quiz_master";
pub const PERFECT_SCORE: &str = "perfect_score";
pub const FLASHCARD_FAN: &str = "flashcard_fan";
pub const WEEK_STREAK: &str = "week_streak";
pub const STUDY_PLANNER: &str = "study_planner";
pub const DOUBT_SOLVER: &str = "doubt_solver";
pub const LEVEL_10: &str = "level_10";
pub const OCR_EXPLORER: &str = "ocr_explorer";

/// Static catalogue entry
pub struct BadgeDefinition {
  pub id: &'static str,
  pub name: &'static str,
  pub description: &'static str,
  pub icon: &'static str,
  pub requirement: &'static str,
  pub xp_reward: u64,
}

pub static BADGES: [BadgeDefinition; 10] = [
  BadgeDefinition {
    id: FIRST_STEP,
    name: "First Steps",
    description: "Submit your first solution step",
    icon: "🎯",
    requirement: "Submit 1 step",
    xp_reward: 25,
  },
  BadgeDefinition {
    id: CORRECT_STEP,
    name: "Sharp Mind",
    description: "Get your first correct step",
    icon: "✅",
    requirement: "Get 1 correct step",
    xp_reward: 50,
  },
  BadgeDefinition {
    id: QUIZ_MASTER,
    name: "Quiz Master",
    description: "Complete 5 quizzes",
    icon: "📝",
    requirement: "Complete 5 quizzes",
    xp_reward: 100,
  },
  BadgeDefinition {
    id: PERFECT_SCORE,
    name: "Perfectionist",
    description: "Get a perfect quiz score",
    icon: "💯",
    requirement: "Score 100% on a quiz",
    xp_reward: 150,
  },
  BadgeDefinition {
    id: FLASHCARD_FAN,
    name: "Memory Master",
    description: "Review 50 flashcards",
    icon: "🧠",
    requirement: "Review 50 flashcards",
    xp_reward: 75,
  },
  BadgeDefinition {
    id: WEEK_STREAK,
    name: "On Fire",
    description: "Maintain a 7-day streak",
    icon: "🔥",
    requirement: "7-day streak",
    xp_reward: 200,
  },
  BadgeDefinition {
    id: STUDY_PLANNER,
    name: "Organized Learner",
    description: "Create your first study plan",
    icon: "📅",
    requirement: "Create 1 study plan",
    xp_reward: 50,
  },
  BadgeDefinition {
    id: DOUBT_SOLVER,
    name: "Problem Solver",
    description: "Solve 10 doubts with AI tutor",
    icon: "💡",
    requirement: "Solve 10 doubts",
    xp_reward: 100,
  },
  BadgeDefinition {
    id: LEVEL_10,
    name: "Rising Star",
    description: "Reach level 10",
    icon: "⭐",
    requirement: "Reach level 10",
    xp_reward: 250,
  },
  BadgeDefinition {
    id: OCR_EXPLORER,
    name: "OCR Explorer",
    description: "Upload 5 images for text extraction",
    icon: "📸",
    requirement: "Upload 5 images",
    xp_reward: 50,
  },
];

/// How a counter is compared against a rule threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
  /// Fires on the exact count (first-occurrence badges)
  Exactly,
  /// Fires at or past the count, so batch increments cannot skip it
  AtLeast,
}

impl Comparison {
  pub fn matches(&self, value: u32, threshold: u32) -> bool {
    match self {
      Self::Exactly => value == threshold,
      Self::AtLeast => value >= threshold,
    }
  }
}

pub struct UnlockRule {
  pub stat: StatName,
  pub threshold: u32,
  pub comparison: Comparison,
  pub badge_id: &'static str,
}

/// Counter-driven unlocks, evaluated after every statistic increment
pub static STAT_UNLOCK_RULES: [UnlockRule; 7] = [
  UnlockRule {
    stat: StatName::StepsSubmitted,
    threshold: 1,
    comparison: Comparison::Exactly,
    badge_id: FIRST_STEP,
  },
  UnlockRule {
    stat: StatName::CorrectSteps,
    threshold: 1,
    comparison: Comparison::Exactly,
    badge_id: CORRECT_STEP,
  },
  UnlockRule {
    stat: StatName::QuizzesCompleted,
    threshold: 5,
    comparison: Comparison::AtLeast,
    badge_id: QUIZ_MASTER,
  },
  UnlockRule {
    stat: StatName::FlashcardsReviewed,
    threshold: 50,
    comparison: Comparison::AtLeast,
    badge_id: FLASHCARD_FAN,
  },
  UnlockRule {
    stat: StatName::StudyPlansCreated,
    threshold: 1,
    comparison: Comparison::Exactly,
    badge_id: STUDY_PLANNER,
  },
  UnlockRule {
    stat: StatName::DoubtsAsked,
    threshold: 10,
    comparison: Comparison::AtLeast,
    badge_id: DOUBT_SOLVER,
  },
  UnlockRule {
    stat: StatName::ImagesUploaded,
    threshold: 5,
    comparison: Comparison::AtLeast,
    badge_id: OCR_EXPLORER,
  },
];

/// Badge ids whose rule for `stat` is satisfied by `value`
pub fn badges_triggered_by(stat: StatName, value: u32) -> impl Iterator<Item = &'static str> {
  STAT_UNLOCK_RULES
    .iter()
    .filter(move |rule| rule.stat == stat && rule.comparison.matches(value, rule.threshold))
    .map(|rule| rule.badge_id)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
  pub id: String,
  pub name: String,
  pub description: String,
  pub icon: String,
  pub requirement: String,
  pub xp_reward: u64,
  #[serde(default)]
  pub unlocked: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<&BadgeDefinition> for Badge {
  fn from(def: &BadgeDefinition) -> Self {
    Self {
      id: def.id.to_string(),
      name: def.name.to_string(),
      description: def.description.to_string(),
      icon: def.icon.to_string(),
      requirement: def.requirement.to_string(),
      xp_reward: def.xp_reward,
      unlocked: false,
      unlocked_at: None,
    }
  }
}

/// All badges, in catalogue order
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeRegistry {
  badges: Vec<Badge>,
}

impl Default for BadgeRegistry {
  fn default() -> Self {
    Self {
      badges: BADGES.iter().map(Badge::from).collect(),
    }
  }
}

impl BadgeRegistry {
  /// Rebuild the registry from persisted badges.
  ///
  /// Catalogue text and rewards always come from code; only the unlock state
  /// is taken from storage. Persisted ids no longer in the catalogue are
  /// dropped.
  pub fn merge_persisted(persisted: &[Badge]) -> Self {
    let mut registry = Self::default();
    for badge in registry.badges.iter_mut() {
      if let Some(saved) = persisted.iter().find(|p| p.id == badge.id && p.unlocked) {
        badge.unlocked = true;
        badge.unlocked_at = saved.unlocked_at;
      }
    }
    registry
  }

  pub fn all(&self) -> &[Badge] {
    &self.badges
  }

  pub fn get(&self, id: &str) -> Option<&Badge> {
    self.badges.iter().find(|b| b.id == id)
  }

  pub fn is_unlocked(&self, id: &str) -> bool {
    self.get(id).is_some_and(|b| b.unlocked)
  }

  pub fn unlocked_count(&self) -> usize {
    self.badges.iter().filter(|b| b.unlocked).count()
  }

  /// Unlock `id`, returning the unlocked badge.
  ///
  /// Returns `None` without touching anything when the id is unknown or the
  /// badge is already unlocked.
  pub fn unlock(&mut self, id: &str, now: DateTime<Utc>) -> Option<Badge> {
    let badge = self.badges.iter_mut().find(|b| b.id == id)?;
    if badge.unlocked {
      return None;
    }
    badge.unlocked = true;
    badge.unlocked_at = Some(now);
    Some(badge.clone())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_registry_starts_locked() {
    let registry = BadgeRegistry::default();
    assert_eq!(registry.all().len(), BADGES.len());
    assert!(registry.all().iter().all(|b| !b.unlocked && b.unlocked_at.is_none()));
    assert_eq!(registry.unlocked_count(), 0);
  }

  #[test]
  fn test_catalogue_ids_are_unique() {
    for (i, a) in BADGES.iter().enumerate() {
      for b in BADGES.iter().skip(i + 1) {
        assert_ne!(a.id, b.id);
      }
    }
  }

  #[test]
  fn test_rules_reference_known_badges() {
    for rule in STAT_UNLOCK_RULES.iter() {
      assert!(BADGES.iter().any(|b| b.id == rule.badge_id), "{}", rule.badge_id);
    }
  }

  #[test]
  fn test_unlock_once() {
    let mut registry = BadgeRegistry::default();
    let now = Utc::now();

    let badge = registry.unlock(CORRECT_STEP, now).expect("first unlock succeeds");
    assert!(badge.unlocked);
    assert_eq!(badge.unlocked_at, Some(now));
    assert_eq!(badge.xp_reward, 50);

    assert!(registry.unlock(CORRECT_STEP, now).is_none());
    assert!(registry.is_unlocked(CORRECT_STEP));
    assert_eq!(registry.unlocked_count(), 1);
  }

  #[test]
  fn test_unlock_unknown_is_noop() {
    let mut registry = BadgeRegistry::default();
    let before = registry.clone();
    assert!(registry.unlock("no_such_badge", Utc::now()).is_none());
    assert_eq!(registry, before);
  }

  #[test]
  fn test_at_least_rules_fire_past_threshold() {
    let hits: Vec<_> = badges_triggered_by(StatName::QuizzesCompleted, 4).collect();
    assert!(hits.is_empty());
    let hits: Vec<_> = badges_triggered_by(StatName::QuizzesCompleted, 5).collect();
    assert_eq!(hits, vec![QUIZ_MASTER]);
    let hits: Vec<_> = badges_triggered_by(StatName::QuizzesCompleted, 9).collect();
    assert_eq!(hits, vec![QUIZ_MASTER]);
  }

  #[test]
  fn test_exactly_rules_fire_on_first_occurrence_only() {
    let hits: Vec<_> = badges_triggered_by(StatName::StepsSubmitted, 1).collect();
    assert_eq!(hits, vec![FIRST_STEP]);
    assert_eq!(badges_triggered_by(StatName::StepsSubmitted, 2).count(), 0);
  }

  #[test]
  fn test_each_threshold_badge() {
    assert_eq!(badges_triggered_by(StatName::FlashcardsReviewed, 50).next(), Some(FLASHCARD_FAN));
    assert_eq!(badges_triggered_by(StatName::DoubtsAsked, 10).next(), Some(DOUBT_SOLVER));
    assert_eq!(badges_triggered_by(StatName::ImagesUploaded, 5).next(), Some(OCR_EXPLORER));
    assert_eq!(badges_triggered_by(StatName::StudyPlansCreated, 1).next(), Some(STUDY_PLANNER));
    assert_eq!(badges_triggered_by(StatName::CorrectSteps, 1).next(), Some(CORRECT_STEP));
  }

  #[test]
  fn test_merge_persisted_keeps_unlock_state_only() {
    let when = Utc::now();
    let mut saved = Badge::from(&BADGES[2]);
    saved.name = "Stale Name".to_string();
    saved.xp_reward = 1;
    saved.unlocked = true;
    saved.unlocked_at = Some(when);

    let mut ghost = Badge::from(&BADGES[0]);
    ghost.id = "retired_badge".to_string();
    ghost.unlocked = true;

    let registry = BadgeRegistry::merge_persisted(&[saved, ghost]);
    let badge = registry.get(QUIZ_MASTER).unwrap();
    assert!(badge.unlocked);
    assert_eq!(badge.unlocked_at, Some(when));
    assert_eq!(badge.name, "Quiz Master");
    assert_eq!(badge.xp_reward, 100);
    assert!(registry.get("retired_badge").is_none());
    assert_eq!(registry.unlocked_count(), 1);
  }
}
