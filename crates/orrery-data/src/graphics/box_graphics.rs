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

use super::{Slot, Watched};
use orrery_core::event::Event;
use orrery_core::material::MaterialPropertyRef;
use orrery_core::math::{LinearRgba, Vec3};
use orrery_core::property::PropertyRef;
use std::fmt;
use std::rc::Rc;

/// Names one property of a [`BoxGraphics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxProperty {
    /// The `show` flag.
    Show,
    /// The `fill` flag.
    Fill,
    /// The fill material.
    Material,
    /// The `outline` flag.
    Outline,
    /// The outline color.
    OutlineColor,
    /// The outline width.
    OutlineWidth,
    /// The minimum corner position.
    MinimumCorner,
    /// The maximum corner position.
    MaximumCorner,
}

/// Payload of [`BoxGraphics::definition_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGraphicsChange {
    /// The property that was replaced or whose definition changed.
    pub property: BoxProperty,
}

/// Describes an axis-aligned box through optional time-sampled properties.
///
/// Every property starts out absent. Replacing a property with a different one
/// raises `definition_changed` once, and so does any later change to the stored
/// property's own definition.
pub struct BoxGraphics {
    show: Slot<PropertyRef<bool>>,
    fill: Slot<PropertyRef<bool>>,
    material: Slot<MaterialPropertyRef>,
    outline: Slot<PropertyRef<bool>>,
    outline_color: Slot<PropertyRef<LinearRgba>>,
    outline_width: Slot<PropertyRef<f32>>,
    minimum_corner: Slot<PropertyRef<Vec3>>,
    maximum_corner: Slot<PropertyRef<Vec3>>,
    definition_changed: Rc<Event<BoxGraphicsChange>>,
}

impl BoxGraphics {
    /// Creates a description with every property absent.
    pub fn new() -> Self {
        Self {
            show: Slot::new(),
            fill: Slot::new(),
            material: Slot::new(),
            outline: Slot::new(),
            outline_color: Slot::new(),
            outline_width: Slot::new(),
            minimum_corner: Slot::new(),
            maximum_corner: Slot::new(),
            definition_changed: Rc::new(Event::new()),
        }
    }

    /// Creates a description with only its two corners set.
    pub fn from_corners(minimum_corner: PropertyRef<Vec3>, maximum_corner: PropertyRef<Vec3>) -> Self {
        let graphics = Self::new();
        graphics.set_minimum_corner(minimum_corner);
        graphics.set_maximum_corner(maximum_corner);
        graphics
    }

    /// Raised whenever any property is replaced or changes its definition.
    pub fn definition_changed(&self) -> &Event<BoxGraphicsChange> {
        &self.definition_changed
    }

    /// Returns `true` if both corner properties are set.
    pub fn has_corners(&self) -> bool {
        self.minimum_corner.is_set() && self.maximum_corner.is_set()
    }

    /// Whether the box is shown.
    pub fn show(&self) -> Option<PropertyRef<bool>> {
        self.show.get()
    }

    /// Replaces the `show` property.
    pub fn set_show(&self, show: impl Into<Option<PropertyRef<bool>>>) {
        self.assign(&self.show, show.into(), BoxProperty::Show);
    }

    /// Whether the box is filled.
    pub fn fill(&self) -> Option<PropertyRef<bool>> {
        self.fill.get()
    }

    /// Replaces the `fill` property.
    pub fn set_fill(&self, fill: impl Into<Option<PropertyRef<bool>>>) {
        self.assign(&self.fill, fill.into(), BoxProperty::Fill);
    }

    /// The material used to fill the box.
    pub fn material(&self) -> Option<MaterialPropertyRef> {
        self.material.get()
    }

    /// Replaces the fill material.
    pub fn set_material(&self, material: impl Into<Option<MaterialPropertyRef>>) {
        self.assign(&self.material, material.into(), BoxProperty::Material);
    }

    /// Whether the box is outlined.
    pub fn outline(&self) -> Option<PropertyRef<bool>> {
        self.outline.get()
    }

    /// Replaces the `outline` property.
    pub fn set_outline(&self, outline: impl Into<Option<PropertyRef<bool>>>) {
        self.assign(&self.outline, outline.into(), BoxProperty::Outline);
    }

    /// The color of the outline.
    pub fn outline_color(&self) -> Option<PropertyRef<LinearRgba>> {
        self.outline_color.get()
    }

    /// Replaces the outline color.
    pub fn set_outline_color(&self, outline_color: impl Into<Option<PropertyRef<LinearRgba>>>) {
        self.assign(&self.outline_color, outline_color.into(), BoxProperty::OutlineColor);
    }

    /// The width of the outline, in pixels.
    pub fn outline_width(&self) -> Option<PropertyRef<f32>> {
        self.outline_width.get()
    }

    /// Replaces the outline width.
    pub fn set_outline_width(&self, outline_width: impl Into<Option<PropertyRef<f32>>>) {
        self.assign(&self.outline_width, outline_width.into(), BoxProperty::OutlineWidth);
    }

    /// The corner with the smallest coordinates.
    pub fn minimum_corner(&self) -> Option<PropertyRef<Vec3>> {
        self.minimum_corner.get()
    }

    /// Replaces the minimum corner.
    pub fn set_minimum_corner(&self, minimum_corner: impl Into<Option<PropertyRef<Vec3>>>) {
        self.assign(&self.minimum_corner, minimum_corner.into(), BoxProperty::MinimumCorner);
    }

    /// The corner with the largest coordinates.
    pub fn maximum_corner(&self) -> Option<PropertyRef<Vec3>> {
        self.maximum_corner.get()
    }

    /// Replaces the maximum corner.
    pub fn set_maximum_corner(&self, maximum_corner: impl Into<Option<PropertyRef<Vec3>>>) {
        self.assign(&self.maximum_corner, maximum_corner.into(), BoxProperty::MaximumCorner);
    }

    fn assign<H: Watched>(&self, slot: &Slot<H>, handle: Option<H>, property: BoxProperty) {
        let change = BoxGraphicsChange { property };
        let target = Rc::downgrade(&self.definition_changed);
        let replaced = slot.replace(handle, move || {
            if let Some(event) = target.upgrade() {
                event.raise(&change);
            }
        });
        if replaced {
            log::trace!("Box property {property:?} replaced.");
            self.definition_changed.raise(&change);
        }
    }
}

impl Default for BoxGraphics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BoxGraphics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxGraphics")
            .field("show", &self.show.is_set())
            .field("fill", &self.fill.is_set())
            .field("material", &self.material.is_set())
            .field("outline", &self.outline.is_set())
            .field("outline_color", &self.outline_color.is_set())
            .field("outline_width", &self.outline_width.is_set())
            .field("minimum_corner", &self.minimum_corner.is_set())
            .field("maximum_corner", &self.maximum_corner.is_set())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::material::ColorMaterialProperty;
    use orrery_core::property::{ConstantPositionProperty, ConstantProperty};
    use std::cell::RefCell;

    fn record(graphics: &BoxGraphics) -> Rc<RefCell<Vec<BoxProperty>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = changes.clone();
        graphics
            .definition_changed()
            .add_listener(move |change: &BoxGraphicsChange| sink.borrow_mut().push(change.property));
        changes
    }

    #[test]
    fn test_setters_raise_once_per_replacement() {
        let graphics = BoxGraphics::new();
        let changes = record(&graphics);
        let fill: PropertyRef<bool> = Rc::new(ConstantProperty::new(true));

        graphics.set_fill(fill.clone());
        graphics.set_fill(fill);
        graphics.set_fill(None);
        graphics.set_fill(None);

        assert_eq!(*changes.borrow(), vec![BoxProperty::Fill, BoxProperty::Fill]);
    }

    #[test]
    fn test_property_mutation_is_forwarded() {
        let graphics = BoxGraphics::new();
        let corner = Rc::new(ConstantPositionProperty::new(Vec3::ZERO));
        graphics.set_minimum_corner(corner.clone() as PropertyRef<Vec3>);
        let changes = record(&graphics);

        corner.set_value(Some(Vec3::ONE));

        assert_eq!(*changes.borrow(), vec![BoxProperty::MinimumCorner]);
    }

    #[test]
    fn test_replaced_property_is_no_longer_watched() {
        let graphics = BoxGraphics::new();
        let color = Rc::new(ConstantProperty::new(LinearRgba::RED));
        let material: MaterialPropertyRef =
            Rc::new(ColorMaterialProperty::new(color.clone() as PropertyRef<LinearRgba>));
        graphics.set_material(material);
        graphics.set_material(None);
        let changes = record(&graphics);

        color.set_value(Some(LinearRgba::BLUE));

        assert!(changes.borrow().is_empty());
        assert!(graphics.material().is_none());
    }

    #[test]
    fn test_from_corners() {
        let graphics = BoxGraphics::from_corners(
            Rc::new(ConstantPositionProperty::new(Vec3::ZERO)),
            Rc::new(ConstantPositionProperty::new(Vec3::ONE)),
        );
        assert!(graphics.has_corners());
        assert!(graphics.fill().is_none());
        graphics.set_maximum_corner(None);
        assert!(!graphics.has_corners());
    }
}
