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

use super::{forward_changes, Material, MaterialProperty};
use crate::event::{Event, Subscription};
use crate::math::LinearRgba;
use crate::property::{self, ConstantProperty, PropertyRef};
use crate::time::JulianDate;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A solid color material whose color is itself a property.
///
/// An absent or undefined color samples as white.
pub struct ColorMaterialProperty {
    color: RefCell<Option<PropertyRef<LinearRgba>>>,
    color_subscription: RefCell<Option<Subscription>>,
    definition_changed: Rc<Event<()>>,
}

impl ColorMaterialProperty {
    /// Creates a material driven by the given color property.
    pub fn new(color: impl Into<Option<PropertyRef<LinearRgba>>>) -> Self {
        let material = Self {
            color: RefCell::new(None),
            color_subscription: RefCell::new(None),
            definition_changed: Rc::new(Event::new()),
        };
        material.replace_color(color.into());
        material
    }

    /// Creates a material with a constant color.
    pub fn from_color(color: LinearRgba) -> Self {
        Self::new(Rc::new(ConstantProperty::new(color)) as PropertyRef<LinearRgba>)
    }

    /// The color property, if any.
    pub fn color(&self) -> Option<PropertyRef<LinearRgba>> {
        self.color.borrow().clone()
    }

    /// Replaces the color property and raises `definition_changed` if it is a different one.
    pub fn set_color(&self, color: impl Into<Option<PropertyRef<LinearRgba>>>) {
        let color = color.into();
        let unchanged = match (self.color.borrow().as_ref(), color.as_ref()) {
            (None, None) => true,
            (Some(current), Some(next)) => Rc::ptr_eq(current, next),
            _ => false,
        };
        if unchanged {
            return;
        }
        self.replace_color(color);
        self.definition_changed.raise(&());
    }

    fn replace_color(&self, color: Option<PropertyRef<LinearRgba>>) {
        let subscription = forward_changes(&self.definition_changed, color.as_ref());
        *self.color_subscription.borrow_mut() = subscription;
        *self.color.borrow_mut() = color;
    }
}

impl MaterialProperty for ColorMaterialProperty {
    fn material_type(&self) -> &'static str {
        "Color"
    }

    fn value(&self, time: JulianDate) -> Option<Material> {
        let color = property::value_or_default(self.color.borrow().as_ref(), time, LinearRgba::WHITE);
        Some(Material::Color { color })
    }

    fn is_constant(&self) -> bool {
        property::is_constant(self.color.borrow().as_ref())
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }

    fn equals(&self, other: &dyn MaterialProperty) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| {
                property::equals(self.color.borrow().as_ref(), other.color.borrow().as_ref())
            })
    }
}

impl fmt::Debug for ColorMaterialProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorMaterialProperty")
            .field("has_color", &self.color.borrow().is_some())
            .field("is_constant", &self.is_constant())
            .finish()
    }
}
