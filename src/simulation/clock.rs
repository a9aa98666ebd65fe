//! Simulation clock with a fixed tick interval and a speed multiplier

use chrono::{Duration, NaiveDateTime};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationClock {
    pub current_time: NaiveDateTime,
    /// 1.0 is one tick interval per tick, 2.0 twice as fast
    pub time_scale: f64,
    tick_interval: Duration,
    ticks: u64,
}

impl SimulationClock {
    pub const DEFAULT_TICK_MINUTES: i64 = 15;

    pub fn new(current_time: NaiveDateTime) -> Self {
        Self::with_interval(current_time, Duration::minutes(Self::DEFAULT_TICK_MINUTES))
    }

    pub fn with_interval(current_time: NaiveDateTime, tick_interval: Duration) -> Self {
        Self {
            current_time,
            time_scale: 1.0,
            tick_interval,
            ticks: 0,
        }
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Advance by `tick_interval * time_scale` and return the new time
    ///
    /// Saturates at `NaiveDateTime::MAX` instead of overflowing.
    pub fn tick(&mut self) -> NaiveDateTime {
        self.current_time = self
            .current_time
            .checked_add_signed(self.scaled_interval())
            .unwrap_or(NaiveDateTime::MAX);
        self.ticks += 1;
        self.current_time
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Wall-clock advance of one tick, rounded to the millisecond and capped
    /// at `Duration::MAX`
    pub fn scaled_interval(&self) -> Duration {
        let millis = self.tick_interval.num_milliseconds() as f64 * self.time_scale;
        Duration::try_milliseconds(millis.round() as i64).unwrap_or(Duration::MAX)
    }

    /// Unscaled tick interval in hours
    pub fn tick_interval_hours(&self) -> f64 {
        self.tick_interval.num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }
}
