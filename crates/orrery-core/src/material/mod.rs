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

//! Defines time-varying material properties and the material values they produce.

mod color;
mod grid;

pub use color::ColorMaterialProperty;
pub use grid::GridMaterialProperty;

use crate::event::{Event, Subscription};
use crate::math::LinearRgba;
use crate::property::{AsAny, PropertyRef};
use crate::time::JulianDate;
use std::rc::Rc;

/// A material sampled at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// A single solid color.
    Color {
        /// The surface color.
        color: LinearRgba,
    },
    /// A grid of lines over a translucent fill.
    Grid {
        /// The line color.
        color: LinearRgba,
        /// The alpha applied to the cells between lines.
        cell_alpha: f32,
        /// The number of lines along each axis.
        line_count: f32,
        /// The width of the lines, in pixels.
        line_thickness: f32,
    },
}

impl Material {
    /// The type name of the material, as used to select a shader.
    pub fn material_type(&self) -> &'static str {
        match self {
            Material::Color { .. } => "Color",
            Material::Grid { .. } => "Grid",
        }
    }

    /// Returns `true` if the material needs blending when drawn.
    pub fn is_translucent(&self) -> bool {
        match self {
            Material::Color { color } => !color.is_opaque(),
            Material::Grid {
                color, cell_alpha, ..
            } => !color.is_opaque() || *cell_alpha < 1.0,
        }
    }
}

/// A material that may vary over time.
///
/// Mirrors [`crate::property::Property`] for values of type [`Material`], with a
/// type name that stays stable for the lifetime of the property.
pub trait MaterialProperty: AsAny {
    /// The type name of the materials this property produces.
    fn material_type(&self) -> &'static str;

    /// Samples the material at `time`.
    fn value(&self, time: JulianDate) -> Option<Material>;

    /// Returns `true` if the material can never differ between two times.
    fn is_constant(&self) -> bool;

    /// Raised whenever the definition of the material changes.
    fn definition_changed(&self) -> &Event<()>;

    /// Compares two material properties for equivalent definitions.
    fn equals(&self, other: &dyn MaterialProperty) -> bool {
        std::ptr::addr_eq(self.as_any(), other.as_any())
    }
}

/// A shared, type-erased material property handle.
pub type MaterialPropertyRef = Rc<dyn MaterialProperty>;

/// Samples `property` at `time`, keeping the `previous` material when it is undefined.
pub fn value_or_previous(
    property: Option<&MaterialPropertyRef>,
    time: JulianDate,
    previous: Option<&Material>,
) -> Option<Material> {
    property
        .and_then(|property| property.value(time))
        .or_else(|| previous.cloned())
}

/// Registers `listener` on the material's `definition_changed` event.
pub fn subscribe<F>(material: &MaterialPropertyRef, listener: F) -> Subscription
where
    F: Fn() + 'static,
{
    let id = material.definition_changed().add_listener(move |_| listener());
    let source = Rc::downgrade(material);
    Subscription::new(move || {
        if let Some(material) = source.upgrade() {
            material.definition_changed().remove_listener(id);
        }
    })
}

/// Re-raises changes of a material's sub-property on the material's own event.
fn forward_changes<T: 'static>(
    event: &Rc<Event<()>>,
    property: Option<&PropertyRef<T>>,
) -> Option<Subscription> {
    let property = property?;
    let target = Rc::downgrade(event);
    Some(crate::property::subscribe(property, move || {
        if let Some(event) = target.upgrade() {
            event.raise(&());
        }
    }))
}
