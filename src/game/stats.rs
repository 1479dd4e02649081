//! Running activity counters

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatName {
  QuizzesCompleted,
  FlashcardsReviewed,
  DoubtsAsked,
  StepsSubmitted,
  CorrectSteps,
  StudyPlansCreated,
  ImagesUploaded,
}

impl StatName {
  pub const ALL: [StatName; 7] = [
    Self::QuizzesCompleted,
    Self::FlashcardsReviewed,
    Self::DoubtsAsked,
    Self::StepsSubmitted,
    Self::CorrectSteps,
    Self::StudyPlansCreated,
    Self::ImagesUploaded,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::QuizzesCompleted => "quizzesCompleted",
      Self::FlashcardsReviewed => "flashcardsReviewed",
      Self::DoubtsAsked => "doubtsAsked",
      Self::StepsSubmitted => "stepsSubmitted",
      Self::CorrectSteps => "correctSteps",
      Self::StudyPlansCreated => "studyPlansCreated",
      Self::ImagesUploaded => "imagesUploaded",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|stat| stat.as_str() == s)
  }
}

/// Counters only ever grow, one per reported event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Statistics {
  pub quizzes_completed: u32,
  pub flashcards_reviewed: u32,
  pub doubts_asked: u32,
  pub steps_submitted: u32,
  pub correct_steps: u32,
  pub study_plans_created: u32,
  pub images_uploaded: u32,
}

impl Statistics {
  pub fn get(&self, stat: StatName) -> u32 {
    match stat {
      StatName::QuizzesCompleted => self.quizzes_completed,
      StatName::FlashcardsReviewed => self.flashcards_reviewed,
      StatName::DoubtsAsked => self.doubts_asked,
      StatName::StepsSubmitted => self.steps_submitted,
      StatName::CorrectSteps => self.correct_steps,
      StatName::StudyPlansCreated => self.study_plans_created,
      StatName::ImagesUploaded => self.images_uploaded,
    }
  }

  fn counter_mut(&mut self, stat: StatName) -> &mut u32 {
    match stat {
      StatName::QuizzesCompleted => &mut self.quizzes_completed,
      StatName::FlashcardsReviewed => &mut self.flashcards_reviewed,
      StatName::DoubtsAsked => &mut self.doubts_asked,
      StatName::StepsSubmitted => &mut self.steps_submitted,
      StatName::CorrectSteps => &mut self.correct_steps,
      StatName::StudyPlansCreated => &mut self.study_plans_created,
      StatName::ImagesUploaded => &mut self.images_uploaded,
    }
  }

  /// Add one to `stat` and return the new value
  pub fn increment(&mut self, stat: StatName) -> u32 {
    let counter = self.counter_mut(stat);
    *counter = counter.saturating_add(1);
    *counter
  }
}
