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
use crate::math::{LinearRgba, Vec3};
use crate::time::JulianDate;
use std::cell::RefCell;

/// Values that can be linearly interpolated between two samples.
pub trait Interpolate: Clone {
    /// Returns the value a fraction `t` (in `[0, 1]`) of the way from `start` to `end`.
    fn interpolate(start: &Self, end: &Self, t: f64) -> Self;
}

impl Interpolate for f64 {
    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        start + (end - start) * t
    }
}

impl Interpolate for f32 {
    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        start + (end - start) * t as f32
    }
}

impl Interpolate for Vec3 {
    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        Vec3::lerp(*start, *end, t as f32)
    }
}

impl Interpolate for LinearRgba {
    fn interpolate(start: &Self, end: &Self, t: f64) -> Self {
        LinearRgba::lerp(*start, *end, t as f32)
    }
}

/// A property defined by samples at discrete times.
///
/// Sampling exactly at a sample time returns that sample; between two samples the
/// value is linearly interpolated. Outside the sampled range the value is undefined.
pub struct SampledProperty<T> {
    samples: RefCell<Vec<(JulianDate, T)>>,
    definition_changed: Event<()>,
}

impl<T: Interpolate + 'static> SampledProperty<T> {
    /// Creates a property with no samples.
    pub fn new() -> Self {
        Self {
            samples: RefCell::new(Vec::new()),
            definition_changed: Event::new(),
        }
    }

    /// Adds a sample, replacing any sample already recorded at the same time.
    pub fn add_sample(&self, time: JulianDate, value: T) {
        {
            let mut samples = self.samples.borrow_mut();
            let index = samples.partition_point(|(sample_time, _)| *sample_time < time);
            match samples.get_mut(index) {
                Some(existing) if existing.0 == time => existing.1 = value,
                _ => samples.insert(index, (time, value)),
            }
        }
        self.definition_changed.raise(&());
    }

    /// The number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.borrow().len()
    }
}

impl<T: Interpolate + 'static> Default for SampledProperty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Interpolate + PartialEq + 'static> Property<T> for SampledProperty<T> {
    fn value(&self, time: JulianDate) -> Option<T> {
        let samples = self.samples.borrow();
        let index = samples.partition_point(|(sample_time, _)| *sample_time < time);
        if let Some((sample_time, value)) = samples.get(index) {
            if *sample_time == time {
                return Some(value.clone());
            }
        }
        if index == 0 || index >= samples.len() {
            return None;
        }

        let (start_time, start) = &samples[index - 1];
        let (stop_time, stop) = &samples[index];
        let span = stop_time.seconds_difference(start_time);
        let t = time.seconds_difference(start_time) / span;
        Some(T::interpolate(start, stop, t))
    }

    fn is_constant(&self) -> bool {
        self.samples.borrow().is_empty()
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }

    fn equals(&self, other: &dyn Property<T>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| *other.samples.borrow() == *self.samples.borrow())
    }
}
