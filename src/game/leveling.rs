//! XP and level arithmetic.
//!
//! Level is a pure function of accumulated XP: `floor(sqrt(xp / 100)) + 1`.
//! Level `n` therefore starts at `(n - 1)^2 * 100` XP.

use serde::Serialize;

use super::events::XpEventType;

const XP_PER_LEVEL_UNIT: u64 = 100;

/// Level that first unlocks the `level_10` badge
pub const BADGE_LEVEL: u32 = 10;

/// Level title thresholds, checked in order (inclusive upper bound)
const LEVEL_TITLES: [(u32, &str); 6] = [
  (5, "Novice Learner"),
  (10, "Curious Student"),
  (20, "Knowledge Seeker"),
  (35, "Wisdom Gatherer"),
  (50, "Expert Scholar"),
  (75, "Master Mind"),
];

const TOP_TITLE: &str = "Knowledge Legend";

pub fn level_from_xp(xp: u64) -> u32 {
  // floor(sqrt(xp / 100)) == isqrt(floor(xp / 100)), and stays exact on boundaries
  let root = (xp / XP_PER_LEVEL_UNIT).isqrt();
  u32::try_from(root).unwrap_or(u32::MAX - 1) + 1
}

pub fn level_title(level: u32) -> &'static str {
  LEVEL_TITLES
    .iter()
    .find(|(max, _)| level <= *max)
    .map(|(_, title)| *title)
    .unwrap_or(TOP_TITLE)
}

/// XP needed to reach the start of `level`
pub fn level_floor(level: u32) -> u64 {
  let below = u64::from(level.max(1) - 1);
  below.saturating_mul(below).saturating_mul(XP_PER_LEVEL_UNIT)
}

/// Progress through the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
  /// XP earned since the level started
  pub current_in_level: u64,
  /// Width of the level in XP
  pub needed_for_level: u64,
  /// 0.0..100.0
  pub percent: f64,
}

pub fn level_progress(xp: u64, level: u32) -> LevelProgress {
  let level = level.max(1);
  let floor = level_floor(level);
  let next = level_floor(level.saturating_add(1));
  let needed = next.saturating_sub(floor).max(1);
  let current = xp.saturating_sub(floor);

  LevelProgress {
    current_in_level: current,
    needed_for_level: needed,
    percent: current as f64 / needed as f64 * 100.0,
  }
}

/// Result of granting XP for one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
  pub gained: u64,
  pub new_xp: u64,
  pub new_level: u32,
  pub leveled_up: bool,
}

/// Apply one XP event on top of `current_xp`.
///
/// `custom_amount` replaces the table amount for the event (mission and streak
/// bonuses always carry one). Negative amounts clamp to zero so XP never
/// decreases.
pub fn apply_xp(
  current_xp: u64,
  event: XpEventType,
  multiplier: f64,
  custom_amount: Option<i64>,
) -> XpGain {
  let base = match custom_amount {
    Some(amount) => amount.max(0) as u64,
    None => event.base_reward(),
  };
  let gained = (base as f64 * multiplier.max(0.0)).floor() as u64;
  apply_flat_xp(current_xp, gained)
}

/// Add `amount` XP as-is, with no multiplier (badge rewards)
pub fn apply_flat_xp(current_xp: u64, amount: u64) -> XpGain {
  let gained = amount;
  let new_xp = current_xp.saturating_add(gained);
  let new_level = level_from_xp(new_xp);

  XpGain {
    gained,
    new_xp,
    new_level,
    leveled_up: new_level > level_from_xp(current_xp),
  }
}
