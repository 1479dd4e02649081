//! Test utilities: a controllable clock and an on-disk game database.
//!
//! Reuses the real schema initialization so tests exercise the same storage
//! path as the application.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};
use tempfile::TempDir;

use crate::clock::Clock;
use crate::db::{self, DbPool, SqliteSnapshots};
use crate::game::GameStore;

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
  now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
  pub fn at(now: DateTime<Utc>) -> Self {
    Self {
      now: Arc::new(Mutex::new(now)),
    }
  }

  /// Noon UTC on the given day
  pub fn on(year: i32, month: u32, day: u32) -> Self {
    let noon = NaiveDate::from_ymd_opt(year, month, day)
      .and_then(|date| date.and_hms_opt(12, 0, 0))
      .expect("test clock needs a valid calendar date")
      .and_utc();
    Self::at(noon)
  }

  pub fn advance_days(&self, days: u64) {
    let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(next) = now.checked_add_days(Days::new(days)) {
      *now = next;
    }
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

/// Temporary database plus a shared manual clock.
///
/// Opening several stores from one environment simulates application
/// restarts against the same durable state.
pub struct TestEnv {
  /// Temporary directory (kept alive for database file persistence)
  pub temp: TempDir,
  pub pool: DbPool,
  pub clock: ManualClock,
}

impl TestEnv {
  pub fn new() -> rusqlite::Result<Self> {
    let temp =
      TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let pool = db::init_db(&temp.path().join("game.db"))?;

    Ok(Self {
      temp,
      pool,
      clock: ManualClock::on(2025, 3, 10),
    })
  }

  /// Open a store over this environment's database
  pub fn open_store(&self) -> GameStore {
    GameStore::open(
      Box::new(SqliteSnapshots::new(self.pool.clone(), crate::config::STORAGE_KEY)),
      Box::new(self.clock.clone()),
    )
  }

  pub fn path(&self) -> &Path {
    self.temp.path()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_manual_clock_shared_between_clones() {
    let clock = ManualClock::on(2025, 1, 31);
    let other = clock.clone();
    clock.advance_days(1);
    assert_eq!(other.today(), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
  }

  #[test]
  fn test_env_database_lives_in_temp_dir() {
    let env = TestEnv::new().unwrap();
    assert!(env.path().join("game.db").exists());
  }
}
