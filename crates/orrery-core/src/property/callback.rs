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
use crate::time::JulianDate;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback<T> = Rc<dyn Fn(JulianDate) -> Option<T>>;

/// A property whose value is computed by a closure on every sample.
///
/// The caller declares whether the closure is constant; a non-constant callback
/// property makes any geometry that depends on it dynamic.
pub struct CallbackProperty<T> {
    callback: RefCell<Callback<T>>,
    is_constant: Cell<bool>,
    definition_changed: Event<()>,
}

impl<T: 'static> CallbackProperty<T> {
    /// Creates a property backed by `callback`.
    pub fn new<F>(callback: F, is_constant: bool) -> Self
    where
        F: Fn(JulianDate) -> Option<T> + 'static,
    {
        Self {
            callback: RefCell::new(Rc::new(callback)),
            is_constant: Cell::new(is_constant),
            definition_changed: Event::new(),
        }
    }

    /// Replaces the callback and its constancy, raising `definition_changed`.
    pub fn set_callback<F>(&self, callback: F, is_constant: bool)
    where
        F: Fn(JulianDate) -> Option<T> + 'static,
    {
        *self.callback.borrow_mut() = Rc::new(callback);
        self.is_constant.set(is_constant);
        self.definition_changed.raise(&());
    }
}

impl<T: 'static> Property<T> for CallbackProperty<T> {
    fn value(&self, time: JulianDate) -> Option<T> {
        // The callback may read other properties, so release the borrow before calling it.
        let callback = self.callback.borrow().clone();
        callback(time)
    }

    fn is_constant(&self) -> bool {
        self.is_constant.get()
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }
}
