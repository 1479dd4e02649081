//! Date source for everything that depends on "today".
//!
//! Streaks, badge timestamps and flashcard due dates all read the current
//! calendar day through [`Clock`], so tests can pin or advance time.

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock: Send {
  /// Current instant, used for unlock timestamps
  fn now(&self) -> DateTime<Utc>;

  /// Current calendar day (UTC, no time component)
  fn today(&self) -> NaiveDate {
    self.now().date_naive()
  }
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_system_clock_today_matches_now() {
    let clock = SystemClock;
    let today = clock.today();
    let now = clock.now().date_naive();
    // Could straddle midnight, but never by more than a day
    assert!((now - today).num_days().abs() <= 1);
  }
}
