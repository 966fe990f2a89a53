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
use crate::math::Vec3;
use crate::time::JulianDate;
use std::cell::RefCell;
use std::fmt;

/// A property whose value is the same at every time.
///
/// The value itself can still be replaced with [`ConstantProperty::set_value`],
/// which raises `definition_changed`.
pub struct ConstantProperty<T> {
    value: RefCell<Option<T>>,
    definition_changed: Event<()>,
}

/// A constant position, used for box corners and other positions.
pub type ConstantPositionProperty = ConstantProperty<Vec3>;

impl<T: Clone + PartialEq + 'static> ConstantProperty<T> {
    /// Creates a property holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(Some(value)),
            definition_changed: Event::new(),
        }
    }

    /// Creates a property whose value is undefined at every time.
    pub fn undefined() -> Self {
        Self {
            value: RefCell::new(None),
            definition_changed: Event::new(),
        }
    }

    /// Replaces the value, raising `definition_changed` if it differs from the current one.
    pub fn set_value(&self, value: Option<T>) {
        let changed = {
            let mut current = self.value.borrow_mut();
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        };
        if changed {
            self.definition_changed.raise(&());
        }
    }
}

impl<T: Clone + PartialEq + 'static> Property<T> for ConstantProperty<T> {
    fn value(&self, _time: JulianDate) -> Option<T> {
        self.value.borrow().clone()
    }

    fn is_constant(&self) -> bool {
        true
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }

    fn equals(&self, other: &dyn Property<T>) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| *other.value.borrow() == *self.value.borrow())
    }
}

impl<T: fmt::Debug> fmt::Debug for ConstantProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstantProperty")
            .field("value", &self.value.borrow())
            .finish()
    }
}
