//! Daily missions: per-category goals that pay out once when completed.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionType {
  Quiz,
  Flashcard,
  Doubt,
  Study,
  Streak,
}

impl MissionType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Quiz => "quiz",
      Self::Flashcard => "flashcard",
      Self::Doubt => "doubt",
      Self::Study => "study",
      Self::Streak => "streak",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "quiz" => Some(Self::Quiz),
      "flashcard" => Some(Self::Flashcard),
      "doubt" => Some(Self::Doubt),
      "study" => Some(Self::Study),
      "streak" => Some(Self::Streak),
      _ => None,
    }
  }
}

pub struct MissionDefinition {
  pub id: &'static str,
  pub title: &'static str,
  pub description: &'static str,
  pub mission_type: MissionType,
  pub target: u32,
  pub xp_reward: u64,
}

pub static DAILY_MISSIONS: [MissionDefinition; 4] = [
  MissionDefinition {
    id: "mission_quiz",
    title: "Quiz Champion",
    description: "Complete 2 quizzes today",
    mission_type: MissionType::Quiz,
    target: 2,
    xp_reward: 75,
  },
  MissionDefinition {
    id: "mission_flashcard",
    title: "Flash Review",
    description: "Review 15 flashcards",
    mission_type: MissionType::Flashcard,
    target: 15,
    xp_reward: 50,
  },
  MissionDefinition {
    id: "mission_doubt",
    title: "Curious Mind",
    description: "Ask 3 questions to the AI tutor",
    mission_type: MissionType::Doubt,
    target: 3,
    xp_reward: 60,
  },
  MissionDefinition {
    id: "mission_study",
    title: "Focused Learner",
    description: "Complete 1 study session",
    mission_type: MissionType::Study,
    target: 1,
    xp_reward: 40,
  },
];

/// A mission with today's progress.
///
/// `completed` is written out for clients but never read back; it is always
/// derived from progress.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
  pub id: String,
  pub title: String,
  pub description: String,
  #[serde(rename = "type")]
  pub mission_type: MissionType,
  pub target: u32,
  #[serde(default)]
  pub progress: u32,
  pub xp_reward: u64,
}

impl From<&MissionDefinition> for Mission {
  fn from(def: &MissionDefinition) -> Self {
    Self {
      id: def.id.to_string(),
      title: def.title.to_string(),
      description: def.description.to_string(),
      mission_type: def.mission_type,
      target: def.target.max(1),
      progress: 0,
      xp_reward: def.xp_reward,
    }
  }
}

impl Mission {
  pub fn is_completed(&self) -> bool {
    self.progress >= self.target
  }
}

impl Serialize for Mission {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut state = serializer.serialize_struct("Mission", 8)?;
    state.serialize_field("id", &self.id)?;
    state.serialize_field("title", &self.title)?;
    state.serialize_field("description", &self.description)?;
    state.serialize_field("type", &self.mission_type)?;
    state.serialize_field("target", &self.target)?;
    state.serialize_field("progress", &self.progress)?;
    state.serialize_field("xpReward", &self.xp_reward)?;
    state.serialize_field("completed", &self.is_completed())?;
    state.end()
  }
}

/// Today's missions
#[derive(Debug, Clone, PartialEq)]
pub struct MissionBoard {
  missions: Vec<Mission>,
}

impl Default for MissionBoard {
  fn default() -> Self {
    Self {
      missions: DAILY_MISSIONS.iter().map(Mission::from).collect(),
    }
  }
}

impl MissionBoard {
  /// Rebuild today's board from persisted missions, keeping only progress
  pub fn merge_persisted(persisted: &[Mission]) -> Self {
    let mut board = Self::default();
    for mission in board.missions.iter_mut() {
      if let Some(saved) = persisted.iter().find(|p| p.id == mission.id) {
        mission.progress = saved.progress.min(mission.target);
      }
    }
    board
  }

  pub fn all(&self) -> &[Mission] {
    &self.missions
  }

  /// Add `amount` progress to every open mission of `mission_type`.
  ///
  /// Returns the missions that became completed on this call. Already
  /// completed missions are left untouched.
  pub fn advance(&mut self, mission_type: MissionType, amount: u32) -> Vec<Mission> {
    let mut completed = Vec::new();
    if amount == 0 {
      return completed;
    }

    for mission in self
      .missions
      .iter_mut()
      .filter(|m| m.mission_type == mission_type && !m.is_completed())
    {
      mission.progress = mission.progress.saturating_add(amount).min(mission.target);
      if mission.is_completed() {
        completed.push(mission.clone());
      }
    }

    completed
  }

  /// Start a new day: every mission back to zero progress
  pub fn reset_daily(&mut self) {
    for mission in self.missions.iter_mut() {
      mission.progress = 0;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn progress_of(board: &MissionBoard, id: &str) -> u32 {
    board.all().iter().find(|m| m.id == id).unwrap().progress
  }

  #[test]
  fn test_board_starts_empty() {
    let board = MissionBoard::default();
    assert_eq!(board.all().len(), DAILY_MISSIONS.len());
    assert!(board.all().iter().all(|m| m.progress == 0 && !m.is_completed()));
  }

  #[test]
  fn test_advance_only_matching_type() {
    let mut board = MissionBoard::default();
    let done = board.advance(MissionType::Flashcard, 3);
    assert!(done.is_empty());
    assert_eq!(progress_of(&board, "mission_flashcard"), 3);
    assert_eq!(progress_of(&board, "mission_quiz"), 0);
    assert_eq!(progress_of(&board, "mission_doubt"), 0);
  }

  #[test]
  fn test_completion_reported_once() {
    let mut board = MissionBoard::default();
    assert!(board.advance(MissionType::Quiz, 1).is_empty());

    let done = board.advance(MissionType::Quiz, 1);
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, "mission_quiz");
    assert!(done[0].is_completed());

    // Further progress on a completed mission is ignored
    assert!(board.advance(MissionType::Quiz, 1).is_empty());
    assert_eq!(progress_of(&board, "mission_quiz"), 2);
  }

  #[test]
  fn test_progress_clamped_to_target() {
    let mut board = MissionBoard::default();
    let done = board.advance(MissionType::Doubt, 50);
    assert_eq!(done.len(), 1);
    assert_eq!(progress_of(&board, "mission_doubt"), 3);
  }

  #[test]
  fn test_unmatched_type_is_noop() {
    let mut board = MissionBoard::default();
    let before = board.clone();
    assert!(board.advance(MissionType::Streak, 1).is_empty());
    assert_eq!(board, before);
  }

  #[test]
  fn test_zero_amount_is_noop() {
    let mut board = MissionBoard::default();
    let before = board.clone();
    assert!(board.advance(MissionType::Study, 0).is_empty());
    assert_eq!(board, before);
  }

  #[test]
  fn test_reset_daily() {
    let mut board = MissionBoard::default();
    board.advance(MissionType::Study, 1);
    board.advance(MissionType::Flashcard, 4);
    board.reset_daily();
    assert!(board.all().iter().all(|m| m.progress == 0 && !m.is_completed()));

    // Missions can complete again after a reset
    assert_eq!(board.advance(MissionType::Study, 1).len(), 1);
  }

  #[test]
  fn test_merge_persisted_clamps_progress() {
    let mut saved = Mission::from(&DAILY_MISSIONS[1]);
    saved.progress = 99;
    let board = MissionBoard::merge_persisted(&[saved]);
    assert_eq!(progress_of(&board, "mission_flashcard"), 15);
    assert_eq!(progress_of(&board, "mission_quiz"), 0);
  }

  #[test]
  fn test_mission_serializes_type_field() {
    let mission = Mission::from(&DAILY_MISSIONS[0]);
    let json = serde_json::to_value(&mission).unwrap();
    assert_eq!(json["type"], "quiz");
    assert_eq!(json["xpReward"], 75);
    assert_eq!(json["completed"], false);

    let mut done = mission.clone();
    done.progress = done.target;
    assert_eq!(serde_json::to_value(&done).unwrap()["completed"], true);
  }

  #[test]
  fn test_stored_completed_flag_is_ignored() {
    let json = r#"{"id": "mission_quiz", "title": "Quiz Champion", "description": "",
      "type": "quiz", "target": 2, "progress": 0, "xpReward": 75, "completed": true}"#;
    let mission: Mission = serde_json::from_str(json).unwrap();
    assert!(!mission.is_completed());

    let roundtrip: Mission = serde_json::from_value(serde_json::to_value(&mission).unwrap()).unwrap();
    assert_eq!(roundtrip, mission);
  }

  #[test]
  fn test_mission_type_from_str() {
    assert_eq!(MissionType::from_str("doubt"), Some(MissionType::Doubt));
    assert_eq!(MissionType::from_str("Doubt"), None);
    assert_eq!(MissionType::Streak.as_str(), "streak");
  }
}
