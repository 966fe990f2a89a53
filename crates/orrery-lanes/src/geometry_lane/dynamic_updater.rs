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

use super::box_updater::Shared;
use super::instance::{
    BoxGeometry, BoxOutlineGeometry, ColorGeometryInstanceAttribute, Geometry, GeometryAttributes,
    GeometryInstance, ShowGeometryInstanceAttribute, VertexFormat,
};
use super::DynamicUpdater;
use crate::error::{GeometryError, GeometryResult};
use crate::primitive::{Appearance, Primitive, PrimitiveId, SharedPrimitives};
use orrery_core::material::{self, Material};
use orrery_core::math::{LinearRgba, Vec3};
use orrery_core::property;
use orrery_core::time::JulianDate;
use std::rc::Rc;
use uuid::Uuid;

const DEFAULT_OUTLINE_WIDTH: f32 = 1.0;

/// The values a [`DynamicBoxUpdater`] resolved during its last update.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicBoxOptions {
    /// The id of the entity being drawn.
    pub id: Uuid,
    /// The minimum corner at the last update, if defined.
    pub minimum_corner: Option<Vec3>,
    /// The maximum corner at the last update, if defined.
    pub maximum_corner: Option<Vec3>,
    /// Whether a fill primitive was built.
    pub fill: bool,
    /// Whether an outline primitive was built.
    pub outline: bool,
    /// The fill material of the last fill primitive.
    pub material: Option<Material>,
    /// The outline color of the last outline primitive.
    pub outline_color: Option<LinearRgba>,
    /// The unclamped outline width of the last outline primitive.
    pub outline_width: f32,
}

impl DynamicBoxOptions {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            minimum_corner: None,
            maximum_corner: None,
            fill: false,
            outline: false,
            material: None,
            outline_color: None,
            outline_width: DEFAULT_OUTLINE_WIDTH,
        }
    }
}

/// Rebuilds the primitives of one dynamic box every frame.
///
/// The updater only ever removes the primitives it added itself, so any number
/// of updaters can share one collection. Dropping it removes its primitives.
pub struct DynamicBoxUpdater {
    owner: Rc<Shared>,
    primitives: SharedPrimitives,
    owned: Vec<PrimitiveId>,
    material: Option<Material>,
    options: DynamicBoxOptions,
    destroyed: bool,
}

impl DynamicBoxUpdater {
    pub(crate) fn new(owner: Rc<Shared>, primitives: SharedPrimitives) -> Self {
        let options = DynamicBoxOptions::new(owner.entity().id());
        Self {
            owner,
            primitives,
            owned: Vec::new(),
            material: None,
            options,
            destroyed: false,
        }
    }

    /// The values resolved during the last update.
    pub fn options(&self) -> &DynamicBoxOptions {
        &self.options
    }

    /// The collection this updater draws into.
    pub fn primitives(&self) -> &SharedPrimitives {
        &self.primitives
    }

    /// Replaces this updater's primitives with the ones for `time`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidArgument`] if `time` is absent and
    /// [`GeometryError::ObjectDisposed`] after [`DynamicBoxUpdater::destroy`].
    pub fn update(&mut self, time: impl Into<Option<JulianDate>>) -> GeometryResult<()> {
        self.ensure_not_destroyed()?;
        let time = time
            .into()
            .ok_or(GeometryError::InvalidArgument("time is required"))?;

        self.remove_primitives();

        let entity = self.owner.entity().clone();
        let Some(graphics) = entity.box_graphics() else {
            return Ok(());
        };
        if !entity.is_showing()
            || !entity.is_available(time)
            || !property::value_or_default(graphics.show().as_ref(), time, true)
        {
            return Ok(());
        }

        let minimum_corner = property::value_or_undefined(graphics.minimum_corner().as_ref(), time);
        let maximum_corner = property::value_or_undefined(graphics.maximum_corner().as_ref(), time);
        self.options.minimum_corner = minimum_corner;
        self.options.maximum_corner = maximum_corner;
        let (Some(minimum_corner), Some(maximum_corner)) = (minimum_corner, maximum_corner) else {
            log::trace!("Box of entity {} has undefined corners at this frame.", entity.id());
            return Ok(());
        };

        let fill = property::value_or_default(graphics.fill().as_ref(), time, true);
        let outline = property::value_or_default(graphics.outline().as_ref(), time, false);
        self.options.fill = fill;
        self.options.outline = outline;

        let mut added = Vec::with_capacity(2);
        if fill {
            let material = material::value_or_previous(
                self.owner.fill_material().as_ref(),
                time,
                self.material.as_ref(),
            )
            .unwrap_or(Material::Color {
                color: LinearRgba::WHITE,
            });
            self.material = Some(material.clone());
            self.options.material = Some(material.clone());

            added.push(Primitive {
                geometry_instance: GeometryInstance {
                    id: entity.id(),
                    geometry: Geometry::Box(BoxGeometry::new(
                        minimum_corner,
                        maximum_corner,
                        VertexFormat::Textured,
                    )),
                    attributes: GeometryAttributes {
                        show: ShowGeometryInstanceAttribute::new(true),
                        color: None,
                    },
                },
                appearance: Appearance::Material {
                    translucent: material.is_translucent(),
                    closed: true,
                    material,
                },
                line_width: None,
            });
        }

        if outline {
            let outline_color =
                property::value_or_default(graphics.outline_color().as_ref(), time, LinearRgba::BLACK);
            let outline_width = property::value_or_default(
                graphics.outline_width().as_ref(),
                time,
                DEFAULT_OUTLINE_WIDTH,
            );
            self.options.outline_color = Some(outline_color);
            self.options.outline_width = outline_width;

            added.push(Primitive {
                geometry_instance: GeometryInstance {
                    id: entity.id(),
                    geometry: Geometry::BoxOutline(BoxOutlineGeometry::new(
                        minimum_corner,
                        maximum_corner,
                    )),
                    attributes: GeometryAttributes {
                        show: ShowGeometryInstanceAttribute::new(true),
                        color: Some(ColorGeometryInstanceAttribute::new(outline_color)),
                    },
                },
                appearance: Appearance::PerInstanceColor {
                    flat: true,
                    translucent: outline_color.a != 1.0,
                },
                line_width: Some(self.owner.scene().clamp_line_width(outline_width)),
            });
        }

        let mut primitives = self.primitives.borrow_mut();
        self.owned
            .extend(added.into_iter().map(|primitive| primitives.add(primitive)));
        log::trace!(
            "Box of entity {} rebuilt with {} primitive(s).",
            entity.id(),
            self.owned.len()
        );
        Ok(())
    }

    /// Returns `true` once [`DynamicBoxUpdater::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Removes every primitive this updater added.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ObjectDisposed`] if the updater was already destroyed.
    pub fn destroy(&mut self) -> GeometryResult<()> {
        self.ensure_not_destroyed()?;
        self.remove_primitives();
        self.destroyed = true;
        Ok(())
    }

    fn remove_primitives(&mut self) {
        if self.owned.is_empty() {
            return;
        }
        let mut primitives = self.primitives.borrow_mut();
        for id in self.owned.drain(..) {
            primitives.remove(id);
        }
    }

    fn ensure_not_destroyed(&self) -> GeometryResult<()> {
        if self.destroyed {
            Err(GeometryError::ObjectDisposed("the dynamic box updater was destroyed"))
        } else {
            Ok(())
        }
    }
}

impl DynamicUpdater for DynamicBoxUpdater {
    fn update(&mut self, time: Option<JulianDate>) -> GeometryResult<()> {
        DynamicBoxUpdater::update(self, time)
    }

    fn is_destroyed(&self) -> bool {
        DynamicBoxUpdater::is_destroyed(self)
    }

    fn destroy(&mut self) -> GeometryResult<()> {
        DynamicBoxUpdater::destroy(self)
    }
}

impl Drop for DynamicBoxUpdater {
    fn drop(&mut self) {
        if self.destroyed || self.owned.is_empty() {
            return;
        }
        match self.primitives.try_borrow_mut() {
            Ok(mut primitives) => {
                for id in self.owned.drain(..) {
                    primitives.remove(id);
                }
            }
            Err(_) => log::warn!(
                "Dynamic box updater of entity {} dropped while its primitives were borrowed; {} primitive(s) leaked.",
                self.options.id,
                self.owned.len()
            ),
        }
    }
}
