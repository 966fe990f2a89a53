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

//! Scene objects that carry shape descriptions over an availability window.

use crate::graphics::BoxGraphics;
use orrery_core::event::{Event, Subscription};
use orrery_core::math::Vec3;
use orrery_core::property::PropertyRef;
use orrery_core::time::{JulianDate, TimeIntervalCollection};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Names one member of an [`Entity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityProperty {
    /// The display name.
    Name,
    /// The entity-level show flag.
    Show,
    /// The availability window.
    Availability,
    /// The box shape description, or any property inside it.
    Box,
    /// The suggested camera offset.
    ViewFrom,
}

/// Payload of [`Entity::definition_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityChange {
    /// The member that changed.
    pub property: EntityProperty,
}

/// An object in the scene.
///
/// An entity without an availability window exists at every time.
pub struct Entity {
    id: Uuid,
    name: RefCell<Option<String>>,
    show: Cell<bool>,
    availability: RefCell<Option<TimeIntervalCollection>>,
    box_graphics: RefCell<Option<Rc<BoxGraphics>>>,
    box_subscription: RefCell<Option<Subscription>>,
    view_from: RefCell<Option<PropertyRef<Vec3>>>,
    definition_changed: Rc<Event<EntityChange>>,
}

impl Entity {
    /// Creates a shown, always-available entity with a random id.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates an entity with the given id.
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            name: RefCell::new(None),
            show: Cell::new(true),
            availability: RefCell::new(None),
            box_graphics: RefCell::new(None),
            box_subscription: RefCell::new(None),
            view_from: RefCell::new(None),
            definition_changed: Rc::new(Event::new()),
        }
    }

    /// The unique id of the entity.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Raised once per actual change of any member.
    pub fn definition_changed(&self) -> &Event<EntityChange> {
        &self.definition_changed
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<String> {
        self.name.borrow().clone()
    }

    /// Replaces the display name.
    pub fn set_name(&self, name: impl Into<Option<String>>) {
        let name = name.into();
        if *self.name.borrow() == name {
            return;
        }
        *self.name.borrow_mut() = name;
        self.raise(EntityProperty::Name);
    }

    /// Replaces the show flag.
    pub fn set_show(&self, show: bool) {
        if self.show.replace(show) != show {
            self.raise(EntityProperty::Show);
        }
    }

    /// Whether the entity is currently being displayed.
    pub fn is_showing(&self) -> bool {
        self.show.get()
    }

    /// A copy of the availability window, if any.
    pub fn availability(&self) -> Option<TimeIntervalCollection> {
        self.availability.borrow().clone()
    }

    /// Replaces the availability window. `None` makes the entity always available.
    pub fn set_availability(&self, availability: impl Into<Option<TimeIntervalCollection>>) {
        let availability = availability.into();
        if *self.availability.borrow() == availability {
            return;
        }
        *self.availability.borrow_mut() = availability;
        self.raise(EntityProperty::Availability);
    }

    /// Returns `true` if the entity exists at `time`.
    pub fn is_available(&self, time: JulianDate) -> bool {
        self.availability
            .borrow()
            .as_ref()
            .map_or(true, |availability| availability.contains(time))
    }

    /// Returns `true` if the availability window is absent or covers all time.
    pub fn is_always_available(&self) -> bool {
        self.availability
            .borrow()
            .as_ref()
            .map_or(true, TimeIntervalCollection::is_all_time)
    }

    /// The box shape description, if any.
    pub fn box_graphics(&self) -> Option<Rc<BoxGraphics>> {
        self.box_graphics.borrow().clone()
    }

    /// Replaces the box shape description.
    ///
    /// Later changes inside the description are raised as [`EntityProperty::Box`].
    pub fn set_box_graphics(&self, box_graphics: impl Into<Option<Rc<BoxGraphics>>>) {
        let box_graphics = box_graphics.into();
        let unchanged = match (self.box_graphics.borrow().as_ref(), box_graphics.as_ref()) {
            (None, None) => true,
            (Some(current), Some(next)) => Rc::ptr_eq(current, next),
            _ => false,
        };
        if unchanged {
            return;
        }

        let subscription = box_graphics.as_ref().map(|graphics| self.watch_box(graphics));
        drop(self.box_subscription.replace(subscription));
        *self.box_graphics.borrow_mut() = box_graphics;
        self.raise(EntityProperty::Box);
    }

    /// The suggested camera offset.
    pub fn view_from(&self) -> Option<PropertyRef<Vec3>> {
        self.view_from.borrow().clone()
    }

    /// Replaces the suggested camera offset.
    pub fn set_view_from(&self, view_from: impl Into<Option<PropertyRef<Vec3>>>) {
        let view_from = view_from.into();
        let unchanged = match (self.view_from.borrow().as_ref(), view_from.as_ref()) {
            (None, None) => true,
            (Some(current), Some(next)) => Rc::ptr_eq(current, next),
            _ => false,
        };
        if unchanged {
            return;
        }
        *self.view_from.borrow_mut() = view_from;
        self.raise(EntityProperty::ViewFrom);
    }

    fn watch_box(&self, graphics: &Rc<BoxGraphics>) -> Subscription {
        let target = Rc::downgrade(&self.definition_changed);
        let id = graphics.definition_changed().add_listener(move |_| {
            if let Some(event) = target.upgrade() {
                event.raise(&EntityChange {
                    property: EntityProperty::Box,
                });
            }
        });
        let source = Rc::downgrade(graphics);
        Subscription::new(move || {
            if let Some(graphics) = source.upgrade() {
                graphics.definition_changed().remove_listener(id);
            }
        })
    }

    fn raise(&self, property: EntityProperty) {
        log::trace!("Entity {} changed {property:?}.", self.id);
        self.definition_changed.raise(&EntityChange { property });
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name.borrow())
            .field("show", &self.show.get())
            .field("availability", &self.availability.borrow())
            .field("box_graphics", &self.box_graphics.borrow())
            .finish()
    }
}
