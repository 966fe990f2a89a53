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
use crate::property::{self, PropertyRef};
use crate::time::JulianDate;
use std::rc::Rc;

const DEFAULT_CELL_ALPHA: f32 = 0.1;
const DEFAULT_LINE_COUNT: f32 = 8.0;
const DEFAULT_LINE_THICKNESS: f32 = 1.0;

/// A grid material. Any absent sub-property samples as its default.
///
/// Grid surfaces cannot be expressed through a per-instance color, so geometry
/// using this material is always drawn with a textured vertex layout.
pub struct GridMaterialProperty {
    color: Option<PropertyRef<LinearRgba>>,
    cell_alpha: Option<PropertyRef<f32>>,
    line_count: Option<PropertyRef<f32>>,
    line_thickness: Option<PropertyRef<f32>>,
    _subscriptions: Vec<Subscription>,
    definition_changed: Rc<Event<()>>,
}

impl GridMaterialProperty {
    /// Creates a grid material from its sub-properties.
    pub fn new(
        color: impl Into<Option<PropertyRef<LinearRgba>>>,
        cell_alpha: impl Into<Option<PropertyRef<f32>>>,
        line_count: impl Into<Option<PropertyRef<f32>>>,
        line_thickness: impl Into<Option<PropertyRef<f32>>>,
    ) -> Self {
        let color = color.into();
        let cell_alpha = cell_alpha.into();
        let line_count = line_count.into();
        let line_thickness = line_thickness.into();

        let definition_changed = Rc::new(Event::new());
        let subscriptions = [
            forward_changes(&definition_changed, color.as_ref()),
            forward_changes(&definition_changed, cell_alpha.as_ref()),
            forward_changes(&definition_changed, line_count.as_ref()),
            forward_changes(&definition_changed, line_thickness.as_ref()),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self {
            color,
            cell_alpha,
            line_count,
            line_thickness,
            _subscriptions: subscriptions,
            definition_changed,
        }
    }

    /// The line color property, if any.
    pub fn color(&self) -> Option<&PropertyRef<LinearRgba>> {
        self.color.as_ref()
    }
}

impl Default for GridMaterialProperty {
    fn default() -> Self {
        Self::new(None, None, None, None)
    }
}

impl MaterialProperty for GridMaterialProperty {
    fn material_type(&self) -> &'static str {
        "Grid"
    }

    fn value(&self, time: JulianDate) -> Option<Material> {
        Some(Material::Grid {
            color: property::value_or_default(self.color.as_ref(), time, LinearRgba::WHITE),
            cell_alpha: property::value_or_default(self.cell_alpha.as_ref(), time, DEFAULT_CELL_ALPHA),
            line_count: property::value_or_default(self.line_count.as_ref(), time, DEFAULT_LINE_COUNT),
            line_thickness: property::value_or_default(
                self.line_thickness.as_ref(),
                time,
                DEFAULT_LINE_THICKNESS,
            ),
        })
    }

    fn is_constant(&self) -> bool {
        property::is_constant(self.color.as_ref())
            && property::is_constant(self.cell_alpha.as_ref())
            && property::is_constant(self.line_count.as_ref())
            && property::is_constant(self.line_thickness.as_ref())
    }

    fn definition_changed(&self) -> &Event<()> {
        &self.definition_changed
    }

    fn equals(&self, other: &dyn MaterialProperty) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| {
            property::equals(self.color.as_ref(), other.color.as_ref())
                && property::equals(self.cell_alpha.as_ref(), other.cell_alpha.as_ref())
                && property::equals(self.line_count.as_ref(), other.line_count.as_ref())
                && property::equals(self.line_thickness.as_ref(), other.line_thickness.as_ref())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{CallbackProperty, ConstantProperty};
    use std::cell::Cell;

    #[test]
    fn test_defaults() {
        let grid = GridMaterialProperty::default();
        assert!(grid.is_constant());
        assert_eq!(grid.material_type(), "Grid");
        assert_eq!(
            grid.value(JulianDate::now()),
            Some(Material::Grid {
                color: LinearRgba::WHITE,
                cell_alpha: 0.1,
                line_count: 8.0,
                line_thickness: 1.0,
            })
        );
    }

    #[test]
    fn test_time_varying_line_count() {
        let count = CallbackProperty::new(|time: JulianDate| Some(time.seconds_of_day() as f32), false);
        let grid = GridMaterialProperty::new(None, None, Rc::new(count) as PropertyRef<f32>, None);
        assert!(!grid.is_constant());
    }

    #[test]
    fn test_sub_property_changes_are_forwarded() {
        let alpha = Rc::new(ConstantProperty::new(0.5_f32));
        let grid = GridMaterialProperty::new(None, alpha.clone() as PropertyRef<f32>, None, None);
        let raised = Rc::new(Cell::new(0));
        let counter = raised.clone();
        grid.definition_changed()
            .add_listener(move |_| counter.set(counter.get() + 1));

        alpha.set_value(Some(0.25));
        assert_eq!(raised.get(), 1);
    }
}
