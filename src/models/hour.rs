//! Night-watch hours.
//!
//! A night is split into four one-hour watches starting at 00:00, 01:00,
//! 02:00 and 03:00. Any other start time is not a night watch and does not
//! take part in rotation tracking.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// One of the four night-watch hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NightHour {
    /// 00:00–01:00.
    H00,
    /// 01:00–02:00.
    H01,
    /// 02:00–03:00.
    H02,
    /// 03:00–04:00.
    H03,
}

impl NightHour {
    /// All hours, in evaluation order.
    pub const ALL: [NightHour; 4] = [Self::H00, Self::H01, Self::H02, Self::H03];

    /// Number of distinct hours in a full rotation cycle.
    pub const CYCLE_LEN: usize = 4;

    /// Maps a clock hour (0..=3) to a night hour.
    pub fn from_hour(hour: u32) -> Option<Self> {
        match hour {
            0 => Some(Self::H00),
            1 => Some(Self::H01),
            2 => Some(Self::H02),
            3 => Some(Self::H03),
            _ => None,
        }
    }

    /// Maps a duty start time to a night hour.
    ///
    /// Only exact hour starts are recognised; `00:30` is not a night watch.
    pub fn from_time(time: NaiveTime) -> Option<Self> {
        if time.minute() != 0 || time.second() != 0 {
            return None;
        }
        Self::from_hour(time.hour())
    }

    /// Clock hour of the watch start.
    #[inline]
    pub fn hour(self) -> u32 {
        match self {
            Self::H00 => 0,
            Self::H01 => 1,
            Self::H02 => 2,
            Self::H03 => 3,
        }
    }

    /// Start time of the watch.
    pub fn start_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), 0, 0).unwrap_or_default()
    }
}

impl fmt::Display for NightHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.hour())
    }
}
