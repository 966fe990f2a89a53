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

//! Shared fixtures for the geometry lane integration tests.

#![allow(dead_code)]

use orrery_core::event::Event;
use orrery_core::math::Vec3;
use orrery_core::property::{ConstantPositionProperty, ConstantProperty, Property, PropertyRef};
use orrery_core::time::JulianDate;
use orrery_data::{BoxGraphics, Entity};
use orrery_lanes::Scene;
use std::cell::RefCell;
use std::rc::Rc;

pub const MINIMUM_CORNER: Vec3 = Vec3::new(-1.0, -2.0, -3.0);
pub const MAXIMUM_CORNER: Vec3 = Vec3::new(4.0, 5.0, 6.0);

/// A property that reports itself as time-varying and whose value the test sets directly.
///
/// Setting the value does not raise `definition_changed`, like a sampled source
/// whose value simply differs from one frame to the next.
pub struct DynamicProperty<T> {
    value: RefCell<Option<T>>,
    definition_changed: Event<()>,
}

impl<T: Clone + 'static> DynamicProperty<T> {
    pub fn new(value: impl Into<Option<T>>) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value.into()),
            definition_changed: Event::new(),
        })
    }

    pub fn set_value(&self, value: impl Into<Option<T>>) {
        *self.value.borrow_mut() = value.into();
    }
}

impl<T: Clone + 'static> Property<T> for DynamicProperty<T> {
    fn value(&self, _time: JulianDate) -> Option<T> {
        self.value.borrow().clone()
    }

    fn is_constant(&self) -> bool {
        false
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn scene() -> Rc<Scene> {
    Rc::new(Scene::default())
}

pub fn constant<T: Clone + PartialEq + 'static>(value: T) -> PropertyRef<T> {
    Rc::new(ConstantProperty::new(value))
}

pub fn position(value: Vec3) -> PropertyRef<Vec3> {
    Rc::new(ConstantPositionProperty::new(value))
}

pub fn dynamic<T: Clone + 'static>(property: &Rc<DynamicProperty<T>>) -> PropertyRef<T> {
    property.clone()
}

/// An entity whose box only has its two corners set.
pub fn create_basic_box() -> Rc<Entity> {
    let entity = Rc::new(Entity::new());
    entity.set_box_graphics(Rc::new(BoxGraphics::from_corners(
        position(MINIMUM_CORNER),
        position(MAXIMUM_CORNER),
    )));
    entity
}

/// The box of an entity created by [`create_basic_box`].
pub fn graphics(entity: &Entity) -> Rc<BoxGraphics> {
    entity
        .box_graphics()
        .expect("the entity should carry a box")
}
