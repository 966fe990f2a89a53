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

//! Declarative shape descriptions, each a bag of optional time-sampled properties.

mod box_graphics;

pub use box_graphics::{BoxGraphics, BoxGraphicsChange, BoxProperty};

use orrery_core::event::Subscription;
use orrery_core::material::{self, MaterialPropertyRef};
use orrery_core::property::{self, PropertyRef};
use std::cell::RefCell;
use std::rc::Rc;

/// A shared property handle that can be watched for definition changes.
pub(crate) trait Watched: Clone {
    /// Calls `listener` whenever the handle's definition changes.
    fn watch<F: Fn() + 'static>(&self, listener: F) -> Subscription;

    /// Returns `true` if both handles point at the same property.
    fn same(&self, other: &Self) -> bool;
}

impl<T: 'static> Watched for PropertyRef<T> {
    fn watch<F: Fn() + 'static>(&self, listener: F) -> Subscription {
        property::subscribe(self, listener)
    }

    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl Watched for MaterialPropertyRef {
    fn watch<F: Fn() + 'static>(&self, listener: F) -> Subscription {
        material::subscribe(self, listener)
    }

    fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

/// One optional property of a shape description and its change subscription.
pub(crate) struct Slot<H> {
    handle: RefCell<Option<H>>,
    subscription: RefCell<Option<Subscription>>,
}

impl<H: Watched> Slot<H> {
    pub(crate) fn new() -> Self {
        Self {
            handle: RefCell::new(None),
            subscription: RefCell::new(None),
        }
    }

    pub(crate) fn get(&self) -> Option<H> {
        self.handle.borrow().clone()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.handle.borrow().is_some()
    }

    /// Stores `handle` and watches it with `listener`.
    ///
    /// Returns `false` without touching anything if `handle` is the property
    /// already stored.
    pub(crate) fn replace<F: Fn() + 'static>(&self, handle: Option<H>, listener: F) -> bool {
        let unchanged = match (self.handle.borrow().as_ref(), handle.as_ref()) {
            (None, None) => true,
            (Some(current), Some(next)) => current.same(next),
            _ => false,
        };
        if unchanged {
            return false;
        }
        let subscription = handle.as_ref().map(|handle| handle.watch(listener));
        // Release the previous subscription before storing the new handle.
        drop(self.subscription.replace(subscription));
        *self.handle.borrow_mut() = handle;
        true
    }
}
