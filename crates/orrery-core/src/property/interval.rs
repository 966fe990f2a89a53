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

use super::Property;
use crate::event::Event;
use crate::time::{JulianDate, TimeInterval, TimeIntervalCollection};
use std::cell::{Ref, RefCell};

/// A property whose value is the data of the interval containing the sample time.
pub struct TimeIntervalCollectionProperty<T> {
    intervals: RefCell<TimeIntervalCollection<T>>,
    definition_changed: Event<()>,
}

impl<T: Clone + 'static> TimeIntervalCollectionProperty<T> {
    /// Creates a property with no intervals.
    pub fn new() -> Self {
        Self {
            intervals: RefCell::new(TimeIntervalCollection::new()),
            definition_changed: Event::new(),
        }
    }

    /// Adds an interval and raises `definition_changed`.
    pub fn add_interval(&self, interval: TimeInterval<T>) {
        self.intervals.borrow_mut().add_interval(interval);
        self.definition_changed.raise(&());
    }

    /// Borrows the underlying intervals.
    pub fn intervals(&self) -> Ref<'_, TimeIntervalCollection<T>> {
        self.intervals.borrow()
    }
}

impl<T: Clone + 'static> Default for TimeIntervalCollectionProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> for TimeIntervalCollectionProperty<T> {
    fn value(&self, time: JulianDate) -> Option<T> {
        self.intervals.borrow().find_data(time).cloned()
    }

    fn is_constant(&self) -> bool {
        self.intervals.borrow().is_empty()
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }

    fn equals(&self, other: &dyn Property<T>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| *other.intervals.borrow() == *self.intervals.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_follows_intervals() {
        let time1 = JulianDate::new(0, 0.0);
        let time2 = JulianDate::new(10, 0.0);
        let time3 = JulianDate::new(20, 0.0);

        let fill = TimeIntervalCollectionProperty::new();
        assert!(fill.is_constant());
        fill.add_interval(TimeInterval::with_data(time1, time2, false));
        fill.add_interval(TimeInterval::with_data(time2, time3, true).excluding_start());

        assert!(!fill.is_constant());
        assert_eq!(fill.intervals().len(), 2);
        assert_eq!(fill.value(time1), Some(false));
        assert_eq!(fill.value(time2), Some(false));
        assert_eq!(fill.value(time2.add_seconds(1.0)), Some(true));
        assert_eq!(fill.value(time3.add_seconds(1.0)), None);
    }
}
