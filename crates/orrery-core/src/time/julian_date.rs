// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines `JulianDate`, the time point every property is sampled at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The number of seconds in one Julian day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

const UNIX_EPOCH_DAY_NUMBER: i64 = 2_440_587;
const UNIX_EPOCH_SECONDS_OF_DAY: f64 = 43_200.0;

/// A point in time expressed as a whole Julian day number and the seconds elapsed
/// into that day.
///
/// The representation is always normalized so that `0 <= seconds_of_day < 86400`,
/// which lets the derived `PartialOrd` compare dates chronologically.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate {
    day_number: i64,
    seconds_of_day: f64,
}

impl JulianDate {
    /// The earliest representable date, 0000-01-01T00:00:00Z.
    pub const MINIMUM: Self = Self {
        day_number: 1_721_059,
        seconds_of_day: 43_200.0,
    };

    /// The latest representable date, 9999-12-31T24:00:00Z.
    pub const MAXIMUM: Self = Self {
        day_number: 5_373_484,
        seconds_of_day: 43_200.0,
    };

    /// Creates a new date, carrying any excess or negative seconds into the day number.
    pub fn new(day_number: i64, seconds_of_day: f64) -> Self {
        let carried_days = (seconds_of_day / SECONDS_PER_DAY).floor();
        let mut day_number = day_number + carried_days as i64;
        let mut seconds_of_day = seconds_of_day - carried_days * SECONDS_PER_DAY;
        // Floating point rounding can leave the remainder sitting exactly on the boundary.
        if seconds_of_day >= SECONDS_PER_DAY {
            day_number += 1;
            seconds_of_day -= SECONDS_PER_DAY;
        }
        Self {
            day_number,
            seconds_of_day: seconds_of_day.max(0.0),
        }
    }

    /// Creates a date from a fractional Julian day count.
    pub fn from_total_days(total_days: f64) -> Self {
        let day_number = total_days.floor();
        Self::new(
            day_number as i64,
            (total_days - day_number) * SECONDS_PER_DAY,
        )
    }

    /// Converts a UTC timestamp into a `JulianDate`.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let unix_seconds =
            datetime.timestamp() as f64 + f64::from(datetime.timestamp_subsec_nanos()) * 1e-9;
        Self::new(
            UNIX_EPOCH_DAY_NUMBER,
            UNIX_EPOCH_SECONDS_OF_DAY + unix_seconds,
        )
    }

    /// Returns the current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Converts the date back into a UTC timestamp, if chrono can represent it.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let unix_seconds = (self.day_number - UNIX_EPOCH_DAY_NUMBER) as f64 * SECONDS_PER_DAY
            + (self.seconds_of_day - UNIX_EPOCH_SECONDS_OF_DAY);
        let whole = unix_seconds.floor();
        let nanos = ((unix_seconds - whole) * 1e9) as u32;
        DateTime::from_timestamp(whole as i64, nanos)
    }

    /// The whole Julian day number.
    #[inline]
    pub fn day_number(&self) -> i64 {
        self.day_number
    }

    /// The seconds elapsed into the current day.
    #[inline]
    pub fn seconds_of_day(&self) -> f64 {
        self.seconds_of_day
    }

    /// The date as a fractional Julian day count.
    #[inline]
    pub fn total_days(&self) -> f64 {
        self.day_number as f64 + self.seconds_of_day / SECONDS_PER_DAY
    }

    /// Returns a new date offset by `seconds` (which may be negative).
    #[inline]
    pub fn add_seconds(&self, seconds: f64) -> Self {
        Self::new(self.day_number, self.seconds_of_day + seconds)
    }

    /// Returns `self - other` in seconds.
    #[inline]
    pub fn seconds_difference(&self, other: &Self) -> f64 {
        (self.day_number - other.day_number) as f64 * SECONDS_PER_DAY
            + (self.seconds_of_day - other.seconds_of_day)
    }
}
