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

//! Time intervals and ordered, non-overlapping collections of them.

use super::JulianDate;
use serde::{Deserialize, Serialize};

/// A span of time between two dates, optionally carrying a piece of data.
///
/// Both ends are included by default. Availability windows use `TimeInterval<()>`,
/// while interval-valued properties attach their value as `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval<T = ()> {
    /// The first date of the interval.
    pub start: JulianDate,
    /// The last date of the interval.
    pub stop: JulianDate,
    /// Whether `start` itself belongs to the interval.
    pub is_start_included: bool,
    /// Whether `stop` itself belongs to the interval.
    pub is_stop_included: bool,
    /// The data associated with the interval.
    pub data: T,
}

impl TimeInterval<()> {
    /// Creates a closed interval without data.
    pub fn new(start: JulianDate, stop: JulianDate) -> Self {
        Self::with_data(start, stop, ())
    }

    /// The interval covering every representable date.
    pub fn all_time() -> Self {
        Self::new(JulianDate::MINIMUM, JulianDate::MAXIMUM)
    }
}

impl<T> TimeInterval<T> {
    /// Creates a closed interval carrying `data`.
    pub fn with_data(start: JulianDate, stop: JulianDate, data: T) -> Self {
        Self {
            start,
            stop,
            is_start_included: true,
            is_stop_included: true,
            data,
        }
    }

    /// Returns the interval with its start date excluded.
    pub fn excluding_start(mut self) -> Self {
        self.is_start_included = false;
        self
    }

    /// Returns the interval with its stop date excluded.
    pub fn excluding_stop(mut self) -> Self {
        self.is_stop_included = false;
        self
    }

    /// Returns `true` if the interval contains no dates at all.
    pub fn is_empty(&self) -> bool {
        if self.stop < self.start {
            return true;
        }
        self.stop == self.start && !(self.is_start_included && self.is_stop_included)
    }

    /// Returns `true` if `time` falls inside the interval.
    pub fn contains(&self, time: JulianDate) -> bool {
        if self.is_empty() {
            return false;
        }
        let after_start = if self.is_start_included {
            time >= self.start
        } else {
            time > self.start
        };
        let before_stop = if self.is_stop_included {
            time <= self.stop
        } else {
            time < self.stop
        };
        after_start && before_stop
    }

    /// Returns `true` if the two intervals share at least one date.
    pub fn overlaps<U>(&self, other: &TimeInterval<U>) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let starts_before_other_stops = self.start < other.stop
            || (self.start == other.stop && self.is_start_included && other.is_stop_included);
        let other_starts_before_self_stops = other.start < self.stop
            || (other.start == self.stop && other.is_start_included && self.is_stop_included);
        starts_before_other_stops && other_starts_before_self_stops
    }

    /// Returns `true` if both intervals cover exactly the same dates, ignoring data.
    pub fn same_span<U>(&self, other: &TimeInterval<U>) -> bool {
        self.start == other.start
            && self.stop == other.stop
            && self.is_start_included == other.is_start_included
            && self.is_stop_included == other.is_stop_included
    }
}

/// An ordered collection of non-overlapping [`TimeInterval`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeIntervalCollection<T = ()> {
    intervals: Vec<TimeInterval<T>>,
}

impl<T> Default for TimeIntervalCollection<T> {
    fn default() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }
}

impl<T> TimeIntervalCollection<T> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of intervals in the collection.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the collection holds no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates the intervals in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &TimeInterval<T>> {
        self.intervals.iter()
    }

    /// The start of the earliest interval.
    pub fn start(&self) -> Option<JulianDate> {
        self.intervals.first().map(|interval| interval.start)
    }

    /// The stop of the latest interval.
    pub fn stop(&self) -> Option<JulianDate> {
        self.intervals.last().map(|interval| interval.stop)
    }

    /// Returns `true` if the collection is exactly one interval spanning all time.
    pub fn is_all_time(&self) -> bool {
        self.intervals.len() == 1 && self.intervals[0].same_span(&TimeInterval::all_time())
    }

    /// Finds the interval containing `time`.
    pub fn find_interval_containing(&self, time: JulianDate) -> Option<&TimeInterval<T>> {
        self.intervals.iter().find(|interval| interval.contains(time))
    }

    /// Finds the data of the interval containing `time`.
    pub fn find_data(&self, time: JulianDate) -> Option<&T> {
        self.find_interval_containing(time)
            .map(|interval| &interval.data)
    }

    /// Returns `true` if any interval contains `time`.
    pub fn contains(&self, time: JulianDate) -> bool {
        self.find_interval_containing(time).is_some()
    }

    /// Removes every interval.
    pub fn clear(&mut self) {
        self.intervals.clear();
    }
}

impl<T: Clone> TimeIntervalCollection<T> {
    /// Adds an interval, giving it priority over whatever it overlaps.
    ///
    /// Overlapped portions of existing intervals are cut away; the parts of an
    /// existing interval before and after the new one are kept with their data.
    /// Empty intervals are ignored.
    pub fn add_interval(&mut self, interval: TimeInterval<T>) {
        if interval.is_empty() {
            return;
        }

        let mut kept = Vec::with_capacity(self.intervals.len() + 2);
        for existing in self.intervals.drain(..) {
            if !existing.overlaps(&interval) {
                kept.push(existing);
                continue;
            }

            let left = TimeInterval {
                start: existing.start,
                stop: interval.start,
                is_start_included: existing.is_start_included,
                is_stop_included: !interval.is_start_included,
                data: existing.data.clone(),
            };
            if !left.is_empty() {
                kept.push(left);
            }

            let right = TimeInterval {
                start: interval.stop,
                stop: existing.stop,
                is_start_included: !interval.is_stop_included,
                is_stop_included: existing.is_stop_included,
                data: existing.data,
            };
            if !right.is_empty() {
                kept.push(right);
            }
        }

        kept.push(interval);
        kept.sort_by(|a, b| {
            a.start
                .partial_cmp(&b.start)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.is_start_included.cmp(&a.is_start_included))
        });
        self.intervals = kept;
    }
}

impl<T: Clone> FromIterator<TimeInterval<T>> for TimeIntervalCollection<T> {
    fn from_iter<I: IntoIterator<Item = TimeInterval<T>>>(iter: I) -> Self {
        let mut collection = Self::new();
        for interval in iter {
            collection.add_interval(interval);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: i64) -> JulianDate {
        JulianDate::new(n, 0.0)
    }

    #[test]
    fn test_contains_respects_inclusivity() {
        let interval = TimeInterval::new(day(0), day(10)).excluding_start();
        assert!(!interval.contains(day(0)));
        assert!(interval.contains(day(5)));
        assert!(interval.contains(day(10)));
        assert!(!interval.contains(day(11)));
    }

    #[test]
    fn test_empty_intervals() {
        assert!(TimeInterval::new(day(2), day(1)).is_empty());
        assert!(TimeInterval::new(day(1), day(1)).excluding_stop().is_empty());
        assert!(!TimeInterval::new(day(1), day(1)).is_empty());
    }

    #[test]
    fn test_touching_intervals_do_not_overlap_when_one_end_excluded() {
        let first = TimeInterval::with_data(day(0), day(10), false);
        let second = TimeInterval::with_data(day(10), day(20), true).excluding_start();
        assert!(!first.overlaps(&second));

        let mut collection = TimeIntervalCollection::new();
        collection.add_interval(first);
        collection.add_interval(second);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.find_data(day(10)), Some(&false));
        assert_eq!(collection.find_data(day(15)), Some(&true));
        assert_eq!(collection.find_data(day(25)), None);
    }

    #[test]
    fn test_add_interval_splits_overlapped_interval() {
        let mut collection = TimeIntervalCollection::new();
        collection.add_interval(TimeInterval::with_data(day(0), day(30), 'a'));
        collection.add_interval(TimeInterval::with_data(day(10), day(20), 'b'));

        assert_eq!(collection.len(), 3);
        assert_eq!(collection.find_data(day(5)), Some(&'a'));
        assert_eq!(collection.find_data(day(10)), Some(&'b'));
        assert_eq!(collection.find_data(day(20)), Some(&'b'));
        assert_eq!(collection.find_data(day(25)), Some(&'a'));
        assert_eq!(collection.start(), Some(day(0)));
        assert_eq!(collection.stop(), Some(day(30)));
    }

    #[test]
    fn test_all_time_detection() {
        let mut collection = TimeIntervalCollection::new();
        assert!(!collection.is_all_time());
        collection.add_interval(TimeInterval::all_time());
        assert!(collection.is_all_time());
        collection.add_interval(TimeInterval::new(day(0), day(1)));
        assert!(!collection.is_all_time());
    }
}
