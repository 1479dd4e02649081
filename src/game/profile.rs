use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::leveling::level_from_xp;

pub const DEFAULT_USER_ID: &str = "user-1";
pub const DEFAULT_USER_NAME: &str = "Learner";

/// The learner's progress record.
///
/// Level is not stored; it is always derived from `xp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub xp: u64,
  #[serde(default)]
  pub streak: u32,
  /// None until the first check-in
  #[serde(default)]
  pub last_active_date: Option<NaiveDate>,
  /// Unlocked badge ids, in unlock order
  #[serde(default)]
  pub badges: Vec<String>,
  pub created_at: DateTime<Utc>,
}

impl UserProfile {
  pub fn new(created_at: DateTime<Utc>) -> Self {
    Self {
      id: DEFAULT_USER_ID.to_string(),
      name: DEFAULT_USER_NAME.to_string(),
      xp: 0,
      streak: 0,
      last_active_date: None,
      badges: Vec::new(),
      created_at,
    }
  }

  pub fn level(&self) -> u32 {
    level_from_xp(self.xp)
  }

  pub fn has_badge(&self, id: &str) -> bool {
    self.badges.iter().any(|b| b == id)
  }

  /// Record an unlock; duplicates are ignored
  pub fn push_badge(&mut self, id: &str) {
    if !self.has_badge(id) {
      self.badges.push(id.to_string());
    }
  }

  /// Drop duplicate badge ids, keeping the first occurrence
  pub fn dedup_badges(&mut self) {
    let mut seen: Vec<String> = Vec::with_capacity(self.badges.len());
    self.badges.retain(|id| {
      if seen.contains(id) {
        false
      } else {
        seen.push(id.clone());
        true
      }
    });
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_profile_defaults() {
    let profile = UserProfile::new(Utc::now());
    assert_eq!(profile.id, "user-1");
    assert_eq!(profile.xp, 0);
    assert_eq!(profile.level(), 1);
    assert_eq!(profile.streak, 0);
    assert!(profile.last_active_date.is_none());
    assert!(profile.badges.is_empty());
  }

  #[test]
  fn test_level_tracks_xp() {
    let mut profile = UserProfile::new(Utc::now());
    profile.xp = 8_100;
    assert_eq!(profile.level(), 10);
  }

  #[test]
  fn test_push_badge_ignores_duplicates() {
    let mut profile = UserProfile::new(Utc::now());
    profile.push_badge("first_step");
    profile.push_badge("quiz_master");
    profile.push_badge("first_step");
    assert_eq!(profile.badges, vec!["first_step", "quiz_master"]);
  }

  #[test]
  fn test_dedup_badges_keeps_order() {
    let mut profile = UserProfile::new(Utc::now());
    profile.badges = vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()];
    profile.dedup_badges();
    assert_eq!(profile.badges, vec!["b", "a", "c"]);
  }

  #[test]
  fn test_stale_level_field_is_ignored() {
    let json = r#"{
      "id": "user-1",
      "name": "Learner",
      "xp": 450,
      "level": 42,
      "streak": 2,
      "lastActiveDate": "2025-03-09",
      "badges": ["first_step"],
      "createdAt": "2025-01-01T00:00:00Z"
    }"#;
    let profile: UserProfile = serde_json::from_str(json).unwrap();
    assert_eq!(profile.level(), 3);
    assert_eq!(profile.last_active_date, NaiveDate::from_ymd_opt(2025, 3, 9));
  }
}
