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

use super::dynamic_updater::DynamicBoxUpdater;
use super::instance::{
    BoxGeometry, BoxOutlineGeometry, ColorGeometryInstanceAttribute, Geometry, GeometryAttributes,
    GeometryInstance, ShowGeometryInstanceAttribute, VertexFormat,
};
use super::{GeometryStrategy, StaticGeometryProvider};
use crate::error::{GeometryError, GeometryResult};
use crate::primitive::SharedPrimitives;
use crate::scene::Scene;
use orrery_core::event::{Event, Subscription};
use orrery_core::material::{ColorMaterialProperty, MaterialProperty, MaterialPropertyRef};
use orrery_core::math::{LinearRgba, Vec3};
use orrery_core::property::{self, ConstantProperty, PropertyRef};
use orrery_core::time::JulianDate;
use orrery_data::{BoxGraphics, Entity, EntityChange, EntityProperty};
use std::cell::RefCell;
use std::rc::Rc;
use uuid::Uuid;

/// The time at which constant flags and corners are resolved for derived state.
pub const REFERENCE_TIME: JulianDate = JulianDate::MINIMUM;

const DEFAULT_OUTLINE_WIDTH: f32 = 1.0;

/// Payload of [`BoxGeometryUpdater::geometry_changed`], describing the new derived state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometryChange {
    /// The entity whose geometry changed.
    pub entity: Uuid,
    /// Whether the box now has a fill.
    pub fill_enabled: bool,
    /// Whether the box now has an outline.
    pub outline_enabled: bool,
    /// Whether the box now needs per-frame updates.
    pub is_dynamic: bool,
}

/// Everything the updater resolved from the entity's box description.
///
/// The default value is the state of an entity with no usable box.
#[derive(Clone)]
struct DerivedState {
    fill_enabled: bool,
    outline_enabled: bool,
    has_constant_fill: bool,
    has_constant_outline: bool,
    is_dynamic: bool,
    fill_material: Option<MaterialPropertyRef>,
    outline_color: Option<PropertyRef<LinearRgba>>,
    outline_width: f32,
    show: Option<PropertyRef<bool>>,
    fill: Option<PropertyRef<bool>>,
    outline: Option<PropertyRef<bool>>,
    minimum_corner: Option<PropertyRef<Vec3>>,
    maximum_corner: Option<PropertyRef<Vec3>>,
    resolved_minimum: Option<Vec3>,
    resolved_maximum: Option<Vec3>,
}

impl Default for DerivedState {
    fn default() -> Self {
        Self {
            fill_enabled: false,
            outline_enabled: false,
            has_constant_fill: true,
            has_constant_outline: true,
            is_dynamic: false,
            fill_material: None,
            outline_color: None,
            outline_width: DEFAULT_OUTLINE_WIDTH,
            show: None,
            fill: None,
            outline: None,
            minimum_corner: None,
            maximum_corner: None,
            resolved_minimum: None,
            resolved_maximum: None,
        }
    }
}

fn constant<T: Clone + PartialEq + 'static>(value: T) -> PropertyRef<T> {
    Rc::new(ConstantProperty::new(value))
}

/// A flag that is time-varying counts as enabled; a constant one is read at the reference time.
fn enabled_at_reference(flag: &PropertyRef<bool>, default: bool) -> bool {
    !flag.is_constant() || flag.value(REFERENCE_TIME).unwrap_or(default)
}

impl DerivedState {
    /// Returns `None` when the description yields no geometry at all.
    fn resolve(entity: &Entity, graphics: &BoxGraphics) -> Option<Self> {
        let minimum_corner = graphics.minimum_corner()?;
        let maximum_corner = graphics.maximum_corner()?;
        let show = graphics.show().unwrap_or_else(|| constant(true));
        if show.is_constant() && !show.value(REFERENCE_TIME).unwrap_or(true) {
            return None;
        }

        let fill = graphics.fill().unwrap_or_else(|| constant(true));
        let outline = graphics.outline().unwrap_or_else(|| constant(false));
        let fill_enabled = enabled_at_reference(&fill, true);
        let outline_enabled = enabled_at_reference(&outline, false);
        if !fill_enabled && !outline_enabled {
            return None;
        }

        let fill_material = match graphics.material() {
            Some(material) => Some(material),
            None if fill_enabled => Some(default_fill_material()),
            None => None,
        };
        let outline_color = outline_enabled
            .then(|| graphics.outline_color().unwrap_or_else(|| constant(LinearRgba::BLACK)));
        let outline_width_property = graphics.outline_width();
        let outline_width = property::value_or_default(
            outline_width_property.as_ref(),
            REFERENCE_TIME,
            DEFAULT_OUTLINE_WIDTH,
        );

        let always_available = entity.is_always_available();
        let material_is_constant = fill_material
            .as_ref()
            .map_or(true, |material| material.is_constant());
        let is_time_varying = !show.is_constant()
            || !fill.is_constant()
            || !outline.is_constant()
            || !material_is_constant
            || !property::is_constant(graphics.outline_color().as_ref())
            || !property::is_constant(outline_width_property.as_ref())
            || !minimum_corner.is_constant()
            || !maximum_corner.is_constant();

        Some(Self {
            fill_enabled,
            outline_enabled,
            has_constant_fill: !fill_enabled
                || (always_available
                    && show.is_constant()
                    && fill.is_constant()
                    && material_is_constant),
            has_constant_outline: !outline_enabled
                || (always_available && show.is_constant() && outline.is_constant()),
            is_dynamic: is_time_varying || !always_available,
            fill_material,
            outline_color,
            outline_width,
            resolved_minimum: minimum_corner.value(REFERENCE_TIME),
            resolved_maximum: maximum_corner.value(REFERENCE_TIME),
            show: Some(show),
            fill: Some(fill),
            outline: Some(outline),
            minimum_corner: Some(minimum_corner),
            maximum_corner: Some(maximum_corner),
        })
    }

    fn is_valid(&self) -> bool {
        self.fill_enabled || self.outline_enabled
    }

    fn show_at(&self, time: JulianDate) -> bool {
        property::value_or_default(self.show.as_ref(), time, true)
    }

    fn fill_at(&self, time: JulianDate) -> bool {
        property::value_or_default(self.fill.as_ref(), time, true)
    }

    fn outline_at(&self, time: JulianDate) -> bool {
        property::value_or_default(self.outline.as_ref(), time, false)
    }

    /// Samples both corners, falling back to the values resolved at the reference time.
    fn corners_at(&self, time: JulianDate) -> GeometryResult<(Vec3, Vec3)> {
        let minimum = property::value_or_undefined(self.minimum_corner.as_ref(), time)
            .or(self.resolved_minimum);
        let maximum = property::value_or_undefined(self.maximum_corner.as_ref(), time)
            .or(self.resolved_maximum);
        minimum
            .zip(maximum)
            .ok_or(GeometryError::InvalidOperation("box corners are undefined"))
    }
}

/// The material used when a filled box has none.
pub fn default_fill_material() -> MaterialPropertyRef {
    Rc::new(ColorMaterialProperty::from_color(LinearRgba::WHITE))
}

/// State shared between a [`BoxGeometryUpdater`], its entity listener and its dynamic updaters.
pub(crate) struct Shared {
    entity: Rc<Entity>,
    scene: Rc<Scene>,
    state: RefCell<DerivedState>,
    geometry_changed: Event<GeometryChange>,
}

impl Shared {
    fn on_entity_changed(&self, change: &EntityChange) {
        if matches!(
            change.property,
            EntityProperty::Box | EntityProperty::Availability
        ) {
            self.recompute();
        }
    }

    fn recompute(&self) {
        let was_valid = self.state.borrow().is_valid();
        let next = self
            .entity
            .box_graphics()
            .and_then(|graphics| DerivedState::resolve(&self.entity, &graphics))
            .unwrap_or_default();
        let is_valid = next.is_valid();
        let change = GeometryChange {
            entity: self.entity.id(),
            fill_enabled: next.fill_enabled,
            outline_enabled: next.outline_enabled,
            is_dynamic: next.is_dynamic,
        };
        log::debug!(
            "Box geometry of entity {} recomputed: fill={}, outline={}, dynamic={}.",
            change.entity,
            change.fill_enabled,
            change.outline_enabled,
            change.is_dynamic
        );
        *self.state.borrow_mut() = next;

        // A change is only relevant while there is, or just was, geometry to rebuild.
        if was_valid || is_valid {
            self.geometry_changed.raise(&change);
        }
    }

    pub(crate) fn entity(&self) -> &Rc<Entity> {
        &self.entity
    }

    pub(crate) fn scene(&self) -> &Scene {
        &self.scene
    }

    pub(crate) fn fill_material(&self) -> Option<MaterialPropertyRef> {
        self.state.borrow().fill_material.clone()
    }

    fn snapshot(&self) -> DerivedState {
        self.state.borrow().clone()
    }
}

/// Resolves an entity's box description into derived state and geometry instances.
///
/// The updater listens to its entity and recomputes whenever the box description,
/// any property inside it, or the availability window changes. Call
/// [`BoxGeometryUpdater::destroy`] (or drop the updater) to stop listening.
pub struct BoxGeometryUpdater {
    shared: Rc<Shared>,
    entity_subscription: Option<Subscription>,
    destroyed: bool,
}

impl BoxGeometryUpdater {
    /// Creates an updater bound to `entity`, producing geometry for `scene`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidArgument`] if either argument is absent.
    pub fn new(
        entity: impl Into<Option<Rc<Entity>>>,
        scene: impl Into<Option<Rc<Scene>>>,
    ) -> GeometryResult<Self> {
        let entity = entity
            .into()
            .ok_or(GeometryError::InvalidArgument("entity is required"))?;
        let scene = scene
            .into()
            .ok_or(GeometryError::InvalidArgument("scene is required"))?;

        let shared = Rc::new(Shared {
            entity: entity.clone(),
            scene,
            state: RefCell::new(DerivedState::default()),
            geometry_changed: Event::new(),
        });
        shared.recompute();

        let listener = Rc::downgrade(&shared);
        let id = entity
            .definition_changed()
            .add_listener(move |change: &EntityChange| {
                if let Some(shared) = listener.upgrade() {
                    shared.on_entity_changed(change);
                }
            });
        let source = Rc::downgrade(&entity);
        let entity_subscription = Subscription::new(move || {
            if let Some(entity) = source.upgrade() {
                entity.definition_changed().remove_listener(id);
            }
        });

        Ok(Self {
            shared,
            entity_subscription: Some(entity_subscription),
            destroyed: false,
        })
    }

    /// The entity this updater is bound to.
    pub fn entity(&self) -> &Rc<Entity> {
        &self.shared.entity
    }

    /// Raised whenever the geometry or its attributes may have to be rebuilt.
    pub fn geometry_changed(&self) -> &Event<GeometryChange> {
        &self.shared.geometry_changed
    }

    /// Boxes are always closed volumes.
    pub fn is_closed(&self) -> bool {
        true
    }

    /// Returns `true` if the box has a fill.
    pub fn fill_enabled(&self) -> bool {
        self.shared.state.borrow().fill_enabled
    }

    /// Returns `true` if the box has an outline.
    pub fn outline_enabled(&self) -> bool {
        self.shared.state.borrow().outline_enabled
    }

    /// Returns `true` if fill visibility and material never change over time.
    ///
    /// Any bounded availability counts as time-varying, which also makes the box dynamic.
    pub fn has_constant_fill(&self) -> bool {
        self.shared.state.borrow().has_constant_fill
    }

    /// Returns `true` if outline visibility never changes over time.
    ///
    /// Any bounded availability counts as time-varying, which also makes the box dynamic.
    pub fn has_constant_outline(&self) -> bool {
        self.shared.state.borrow().has_constant_outline
    }

    /// The fill material, defaulting to solid white for a filled box without one.
    pub fn fill_material_property(&self) -> Option<MaterialPropertyRef> {
        self.shared.fill_material()
    }

    /// The outline color, present only while the outline is enabled.
    pub fn outline_color_property(&self) -> Option<PropertyRef<LinearRgba>> {
        self.shared.state.borrow().outline_color.clone()
    }

    /// The outline width resolved at the reference time, `1.0` by default.
    pub fn outline_width(&self) -> f32 {
        self.shared.state.borrow().outline_width
    }

    /// Returns `true` if the box must be drawn through a dynamic updater.
    pub fn is_dynamic(&self) -> bool {
        self.shared.state.borrow().is_dynamic
    }

    /// Returns `true` if the fill is visible at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ObjectDisposed`] after [`BoxGeometryUpdater::destroy`].
    pub fn is_filled(&self, time: JulianDate) -> GeometryResult<bool> {
        self.ensure_not_destroyed()?;
        let state = self.shared.snapshot();
        Ok(state.fill_enabled
            && self.shared.entity.is_available(time)
            && state.show_at(time)
            && state.fill_at(time))
    }

    /// Returns `true` if the outline is visible at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ObjectDisposed`] after [`BoxGeometryUpdater::destroy`].
    pub fn is_outline_visible(&self, time: JulianDate) -> GeometryResult<bool> {
        self.ensure_not_destroyed()?;
        let state = self.shared.snapshot();
        Ok(state.outline_enabled
            && self.shared.entity.is_available(time)
            && state.show_at(time)
            && state.outline_at(time))
    }

    /// Builds the fill instance for `time`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidOperation`] if `time` is absent, the box is not
    /// filled, or no corner value exists; [`GeometryError::ObjectDisposed`] after
    /// [`BoxGeometryUpdater::destroy`].
    pub fn create_fill_geometry_instance(
        &self,
        time: impl Into<Option<JulianDate>>,
    ) -> GeometryResult<GeometryInstance> {
        self.ensure_not_destroyed()?;
        let time = time
            .into()
            .ok_or(GeometryError::InvalidOperation("time is required"))?;
        let state = self.shared.snapshot();
        if !state.fill_enabled {
            return Err(GeometryError::InvalidOperation("the box is not filled"));
        }

        let entity = &self.shared.entity;
        let is_available = entity.is_available(time);
        let show = is_available && entity.is_showing() && state.show_at(time) && state.fill_at(time);
        let (minimum_corner, maximum_corner) = state.corners_at(time)?;

        let color_material = state.fill_material.as_ref().and_then(|material| {
            let material: &dyn MaterialProperty = &**material;
            material.as_any().downcast_ref::<ColorMaterialProperty>()
        });
        let (color, vertex_format) = match color_material {
            Some(material) => {
                let color = material.color();
                let value = if is_available || property::is_constant(color.as_ref()) {
                    property::value_or_default(color.as_ref(), time, LinearRgba::WHITE)
                } else {
                    LinearRgba::WHITE
                };
                (
                    Some(ColorGeometryInstanceAttribute::new(value)),
                    VertexFormat::PerInstanceColor,
                )
            }
            None => (None, VertexFormat::Textured),
        };

        Ok(GeometryInstance {
            id: entity.id(),
            geometry: Geometry::Box(BoxGeometry::new(minimum_corner, maximum_corner, vertex_format)),
            attributes: GeometryAttributes {
                show: ShowGeometryInstanceAttribute::new(show),
                color,
            },
        })
    }

    /// Builds the outline instance for `time`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidOperation`] if `time` is absent, the box is not
    /// outlined, or no corner value exists; [`GeometryError::ObjectDisposed`] after
    /// [`BoxGeometryUpdater::destroy`].
    pub fn create_outline_geometry_instance(
        &self,
        time: impl Into<Option<JulianDate>>,
    ) -> GeometryResult<GeometryInstance> {
        self.ensure_not_destroyed()?;
        let time = time
            .into()
            .ok_or(GeometryError::InvalidOperation("time is required"))?;
        let state = self.shared.snapshot();
        if !state.outline_enabled {
            return Err(GeometryError::InvalidOperation("the box is not outlined"));
        }

        let entity = &self.shared.entity;
        let show = entity.is_available(time)
            && entity.is_showing()
            && state.show_at(time)
            && state.outline_at(time);
        let (minimum_corner, maximum_corner) = state.corners_at(time)?;
        let color = property::value_or_default(state.outline_color.as_ref(), time, LinearRgba::BLACK);

        Ok(GeometryInstance {
            id: entity.id(),
            geometry: Geometry::BoxOutline(BoxOutlineGeometry::new(minimum_corner, maximum_corner)),
            attributes: GeometryAttributes {
                show: ShowGeometryInstanceAttribute::new(show),
                color: Some(ColorGeometryInstanceAttribute::new(color)),
            },
        })
    }

    /// Creates the per-frame updater for a dynamic box, drawing into `primitives`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidOperation`] if the box is not dynamic,
    /// [`GeometryError::InvalidArgument`] if `primitives` is absent and
    /// [`GeometryError::ObjectDisposed`] after [`BoxGeometryUpdater::destroy`].
    pub fn create_dynamic_updater(
        &self,
        primitives: impl Into<Option<SharedPrimitives>>,
    ) -> GeometryResult<DynamicBoxUpdater> {
        self.ensure_not_destroyed()?;
        if !self.is_dynamic() {
            return Err(GeometryError::InvalidOperation("the box is not dynamic"));
        }
        let primitives = primitives
            .into()
            .ok_or(GeometryError::InvalidArgument("primitives are required"))?;
        Ok(DynamicBoxUpdater::new(self.shared.clone(), primitives))
    }

    /// Picks the update model for the box in its current state.
    pub fn strategy(
        &self,
        primitives: impl Into<Option<SharedPrimitives>>,
    ) -> GeometryResult<GeometryStrategy<'_>> {
        self.ensure_not_destroyed()?;
        if self.is_dynamic() {
            let updater = self.create_dynamic_updater(primitives)?;
            Ok(GeometryStrategy::Dynamic(Box::new(updater)))
        } else {
            Ok(GeometryStrategy::Static(self))
        }
    }

    /// Returns `true` once [`BoxGeometryUpdater::destroy`] has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Stops listening to the entity.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ObjectDisposed`] if the updater was already destroyed.
    pub fn destroy(&mut self) -> GeometryResult<()> {
        self.ensure_not_destroyed()?;
        if let Some(subscription) = self.entity_subscription.take() {
            subscription.release();
        }
        self.destroyed = true;
        log::debug!("Box geometry updater of entity {} destroyed.", self.shared.entity.id());
        Ok(())
    }

    fn ensure_not_destroyed(&self) -> GeometryResult<()> {
        if self.destroyed {
            Err(GeometryError::ObjectDisposed("the box geometry updater was destroyed"))
        } else {
            Ok(())
        }
    }
}

impl StaticGeometryProvider for BoxGeometryUpdater {
    fn fill_enabled(&self) -> bool {
        BoxGeometryUpdater::fill_enabled(self)
    }

    fn outline_enabled(&self) -> bool {
        BoxGeometryUpdater::outline_enabled(self)
    }

    fn has_constant_fill(&self) -> bool {
        BoxGeometryUpdater::has_constant_fill(self)
    }

    fn has_constant_outline(&self) -> bool {
        BoxGeometryUpdater::has_constant_outline(self)
    }

    fn is_filled(&self, time: JulianDate) -> GeometryResult<bool> {
        BoxGeometryUpdater::is_filled(self, time)
    }

    fn is_outline_visible(&self, time: JulianDate) -> GeometryResult<bool> {
        BoxGeometryUpdater::is_outline_visible(self, time)
    }

    fn create_fill_geometry_instance(&self, time: JulianDate) -> GeometryResult<GeometryInstance> {
        BoxGeometryUpdater::create_fill_geometry_instance(self, time)
    }

    fn create_outline_geometry_instance(&self, time: JulianDate) -> GeometryResult<GeometryInstance> {
        BoxGeometryUpdater::create_outline_geometry_instance(self, time)
    }
}
