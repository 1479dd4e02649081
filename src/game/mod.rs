//! Gamification engine: XP and levels, streaks, badges, daily missions and
//! the store that ties them together.

pub mod activities;
pub mod badges;
pub mod events;
pub mod leveling;
pub mod missions;
pub mod profile;
pub mod stats;
pub mod store;
pub mod streak;

pub use badges::{Badge, BadgeRegistry};
pub use events::{GameEvent, XpEventType};
pub use leveling::{LevelProgress, apply_xp, level_from_xp, level_progress, level_title};
pub use missions::{Mission, MissionBoard, MissionType};
pub use profile::UserProfile;
pub use stats::{StatName, Statistics};
pub use store::{EventOutcome, GameSnapshot, GameStore};
pub use streak::{StreakCheck, StreakOutcome, check_in, streak_multiplier};
