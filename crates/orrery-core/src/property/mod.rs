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

//! Defines the time-sampled property contract and its standard implementations.
//!
//! A property answers "what is this attribute's value at time `t`?" and whether
//! that answer can ever change with `t`. Shape descriptions are bags of
//! properties; geometry updaters only ever read them through this trait.

mod callback;
mod constant;
mod interval;
mod sampled;

pub use callback::CallbackProperty;
pub use constant::{ConstantPositionProperty, ConstantProperty};
pub use interval::TimeIntervalCollectionProperty;
pub use sampled::{Interpolate, SampledProperty};

use crate::event::{Event, Subscription};
use crate::time::JulianDate;
use std::any::Any;
use std::rc::Rc;

/// Helper trait to allow downcasting `dyn Property` trait objects to their concrete types.
pub trait AsAny {
    /// Returns a reference to the inner value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A value of type `T` that may vary over time.
pub trait Property<T>: AsAny {
    /// Samples the property. `None` means the value is undefined at `time`.
    fn value(&self, time: JulianDate) -> Option<T>;

    /// Returns `true` if the value can never differ between two times.
    fn is_constant(&self) -> bool;

    /// Raised whenever the definition of the property changes.
    fn definition_changed(&self) -> &Event<()>;

    /// Compares two properties for equivalent definitions.
    ///
    /// The default implementation only considers a property equal to itself.
    fn equals(&self, other: &dyn Property<T>) -> bool {
        std::ptr::addr_eq(self.as_any(), other.as_any())
    }
}

/// A shared, type-erased property handle.
pub type PropertyRef<T> = Rc<dyn Property<T>>;

/// Samples `property` at `time`, returning `None` if the property is absent or undefined.
pub fn value_or_undefined<T>(property: Option<&PropertyRef<T>>, time: JulianDate) -> Option<T> {
    property.and_then(|property| property.value(time))
}

/// Samples `property` at `time`, falling back to `default` if it is absent or undefined.
pub fn value_or_default<T>(property: Option<&PropertyRef<T>>, time: JulianDate, default: T) -> T {
    value_or_undefined(property, time).unwrap_or(default)
}

/// Returns `true` if the property is absent or constant.
pub fn is_constant<T>(property: Option<&PropertyRef<T>>) -> bool {
    property.map_or(true, |property| property.is_constant())
}

/// Registers `listener` on the property's `definition_changed` event.
///
/// The returned [`Subscription`] removes the listener when dropped.
pub fn subscribe<T, F>(property: &PropertyRef<T>, listener: F) -> Subscription
where
    T: 'static,
    F: Fn() + 'static,
{
    let id = property.definition_changed().add_listener(move |_| listener());
    let source = Rc::downgrade(property);
    Subscription::new(move || {
        if let Some(property) = source.upgrade() {
            property.definition_changed().remove_listener(id);
        }
    })
}

/// Compares two optional properties, treating two absent properties as equal.
pub fn equals<T>(left: Option<&PropertyRef<T>>, right: Option<&PropertyRef<T>>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => Rc::ptr_eq(left, right) || left.equals(right.as_ref()),
        _ => false,
    }
}
