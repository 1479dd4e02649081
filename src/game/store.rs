//! The gamification state store.
//!
//! Owns the learner profile, badge registry, daily missions and statistics,
//! and is the only place they change. Every public mutating operation runs
//! to completion, then writes a full snapshot through to storage. Storage
//! failures are logged and never affect the in-memory state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::badges::{self, Badge, BadgeRegistry, badges_triggered_by};
use super::events::{GameEvent, XpEventType};
use super::leveling::{self, BADGE_LEVEL, LevelProgress, XpGain, apply_flat_xp, apply_xp};
use super::missions::{Mission, MissionBoard, MissionType};
use super::profile::UserProfile;
use super::stats::{StatName, Statistics};
use super::streak::{self, StreakCheck, WEEK_STREAK_DAYS};
use crate::clock::Clock;
use crate::db::{LogOnError, SnapshotStorage, StorageError};

/// Persisted form of the whole game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
  pub user: UserProfile,
  #[serde(default)]
  pub badges: Vec<Badge>,
  #[serde(default)]
  pub missions: Vec<Mission>,
  #[serde(default)]
  pub statistics: Statistics,
}

/// Result of reporting an XP event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutcome {
  pub xp_gained: u64,
  pub leveled_up: bool,
  /// Level right after the event's own XP was applied
  pub new_level: u32,
}

pub struct GameStore {
  user: UserProfile,
  badges: BadgeRegistry,
  missions: MissionBoard,
  statistics: Statistics,
  events: Vec<GameEvent>,
  clock: Box<dyn Clock>,
  storage: Option<Box<dyn SnapshotStorage>>,
}

/// Read attempts before giving up on the stored record
const LOAD_ATTEMPTS: u32 = 3;

fn load_with_retry(storage: &dyn SnapshotStorage) -> Result<Option<String>, StorageError> {
  let mut attempt = 1;
  loop {
    match storage.load() {
      Err(e) if attempt < LOAD_ATTEMPTS => {
        tracing::debug!("Reading game state failed (attempt {}): {}", attempt, e);
        attempt += 1;
      }
      result => return result,
    }
  }
}

impl GameStore {
  /// Fresh state that is never persisted
  pub fn in_memory(clock: Box<dyn Clock>) -> Self {
    let user = UserProfile::new(clock.now());
    Self {
      user,
      badges: BadgeRegistry::default(),
      missions: MissionBoard::default(),
      statistics: Statistics::default(),
      events: Vec::new(),
      clock,
      storage: None,
    }
  }

  /// Rehydrate from storage, falling back to fresh state when nothing usable
  /// is stored.
  ///
  /// If the stored record cannot be read at all, the store runs detached for
  /// this session so the unread record is never overwritten.
  pub fn open(storage: Box<dyn SnapshotStorage>, clock: Box<dyn Clock>) -> Self {
    let mut store = Self::in_memory(clock);

    match load_with_retry(storage.as_ref()) {
      Ok(Some(json)) => match serde_json::from_str::<GameSnapshot>(&json) {
        Ok(snapshot) => {
          store.restore(snapshot);
          tracing::info!(
            "Restored game state: {} XP, level {}, {} badges",
            store.user.xp,
            store.user.level(),
            store.badges.unlocked_count()
          );
        }
        Err(e) => tracing::warn!("Saved game state is malformed, starting fresh: {}", e),
      },
      Ok(None) => tracing::info!("No saved game state, starting fresh"),
      Err(e) => {
        tracing::warn!(
          "Could not read saved game state, progress will not be saved this session: {}",
          e
        );
        return store;
      }
    }

    store.storage = Some(storage);
    store
  }

  fn restore(&mut self, snapshot: GameSnapshot) {
    self.badges = BadgeRegistry::merge_persisted(&snapshot.badges);
    self.missions = MissionBoard::merge_persisted(&snapshot.missions);
    self.statistics = snapshot.statistics;
    self.user = snapshot.user;

    // Profile badge list must mirror the registry
    self.user.dedup_badges();
    let registry = &self.badges;
    self.user.badges.retain(|id| registry.is_unlocked(id));
    for badge in self.badges.all().iter().filter(|b| b.unlocked) {
      self.user.push_badge(&badge.id);
    }
  }

  pub fn snapshot(&self) -> GameSnapshot {
    GameSnapshot {
      user: self.user.clone(),
      badges: self.badges.all().to_vec(),
      missions: self.missions.all().to_vec(),
      statistics: self.statistics.clone(),
    }
  }

  fn persist(&self) {
    let Some(storage) = &self.storage else {
      return;
    };
    let _ = serde_json::to_string(&self.snapshot())
      .map_err(StorageError::from)
      .and_then(|json| storage.save(&json))
      .log_warn("Failed to persist game state");
  }

  // ==================== Event API ====================

  /// Grant XP for an activity, scaled by the current streak multiplier
  pub fn report_event(&mut self, event: XpEventType, custom_amount: Option<i64>) -> EventOutcome {
    let gain = apply_xp(self.user.xp, event, self.streak_multiplier(), custom_amount);
    tracing::debug!("{} -> +{} XP", event.as_str(), gain.gained);
    self.record_gain(gain);
    self.persist();

    EventOutcome {
      xp_gained: gain.gained,
      leveled_up: gain.leveled_up,
      new_level: gain.new_level,
    }
  }

  /// Run the daily streak check. Call once per session start.
  pub fn check_in_today(&mut self) -> StreakCheck {
    let check = streak::check_in(self.user.last_active_date, self.user.streak, self.today());
    self.user.streak = check.streak;
    self.user.last_active_date = Some(check.last_active_date);

    if check.is_new_day() {
      tracing::info!("Check-in: streak {} ({:?})", check.streak, check.outcome);
      self.events.push(GameEvent::StreakUpdated {
        streak: check.streak,
        outcome: check.outcome,
      });
    }
    if check.streak >= WEEK_STREAK_DAYS {
      self.unlock_badge(badges::WEEK_STREAK);
    }

    self.persist();
    check
  }

  /// Unlock a badge if it exists and is still locked
  pub fn try_unlock(&mut self, badge_id: &str) -> Option<Badge> {
    let badge = self.unlock_badge(badge_id)?;
    self.persist();
    Some(badge)
  }

  /// Add progress to today's missions of `mission_type`.
  ///
  /// Returns the missions completed by this call; each pays its reward once.
  pub fn advance_mission(&mut self, mission_type: MissionType, amount: u32) -> Vec<Mission> {
    let completed = self.missions.advance(mission_type, amount);
    for mission in &completed {
      tracing::info!("Mission completed: {}", mission.id);
      self.events.push(GameEvent::MissionCompleted {
        mission_id: mission.id.clone(),
        mission_type: mission.mission_type,
        xp_reward: mission.xp_reward,
      });
      let reward = i64::try_from(mission.xp_reward).unwrap_or(i64::MAX);
      let gain = apply_xp(self.user.xp, XpEventType::CompleteMission, 1.0, Some(reward));
      self.record_gain(gain);
    }
    self.persist();
    completed
  }

  /// Start a new day of missions. Earned XP is kept.
  pub fn reset_missions_for_new_day(&mut self) {
    self.missions.reset_daily();
    self.events.push(GameEvent::MissionsReset);
    tracing::debug!("Daily missions reset");
    self.persist();
  }

  /// Count one occurrence of `stat` and unlock any badge it now satisfies
  pub fn increment_statistic(&mut self, stat: StatName) -> u32 {
    let value = self.statistics.increment(stat);
    for badge_id in badges_triggered_by(stat, value) {
      self.unlock_badge(badge_id);
    }
    self.persist();
    value
  }

  /// Wipe all progress back to a brand-new profile
  pub fn reset_all(&mut self) {
    tracing::warn!("Resetting all game progress");
    self.user = UserProfile::new(self.clock.now());
    self.badges = BadgeRegistry::default();
    self.missions = MissionBoard::default();
    self.statistics = Statistics::default();
    self.events.clear();
    self.persist();
  }

  // ==================== Internal transitions ====================

  fn unlock_badge(&mut self, badge_id: &str) -> Option<Badge> {
    let badge = self.badges.unlock(badge_id, self.clock.now())?;
    tracing::info!("Badge unlocked: {} (+{} XP)", badge.id, badge.xp_reward);
    self.user.push_badge(&badge.id);
    self.events.push(GameEvent::BadgeUnlocked {
      badge_id: badge.id.clone(),
      name: badge.name.clone(),
      xp_reward: badge.xp_reward,
    });

    // Badge rewards are flat: no streak multiplier
    let gain = apply_flat_xp(self.user.xp, badge.xp_reward);
    self.record_gain(gain);
    Some(badge)
  }

  fn record_gain(&mut self, gain: XpGain) {
    self.user.xp = gain.new_xp;
    if gain.gained > 0 {
      self.events.push(GameEvent::XpGained {
        amount: gain.gained,
        total: gain.new_xp,
      });
    }
    if gain.leveled_up {
      tracing::info!("Level up: {}", gain.new_level);
      self.events.push(GameEvent::LeveledUp {
        level: gain.new_level,
        title: leveling::level_title(gain.new_level),
      });
    }
    if self.user.level() >= BADGE_LEVEL {
      self.unlock_badge(badges::LEVEL_10);
    }
  }

  // ==================== Accessors ====================

  pub fn current_user(&self) -> &UserProfile {
    &self.user
  }

  pub fn all_badges(&self) -> &[Badge] {
    self.badges.all()
  }

  pub fn all_missions(&self) -> &[Mission] {
    self.missions.all()
  }

  pub fn current_statistics(&self) -> &Statistics {
    &self.statistics
  }

  pub fn level(&self) -> u32 {
    self.user.level()
  }

  pub fn level_progress(&self) -> LevelProgress {
    leveling::level_progress(self.user.xp, self.user.level())
  }

  pub fn level_title(&self) -> &'static str {
    leveling::level_title(self.user.level())
  }

  pub fn streak_multiplier(&self) -> f64 {
    streak::streak_multiplier(self.user.streak)
  }

  pub fn today(&self) -> NaiveDate {
    self.clock.today()
  }

  /// Take all change notifications queued since the last drain
  pub fn drain_events(&mut self) -> Vec<GameEvent> {
    std::mem::take(&mut self.events)
  }
}
