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

mod common;

use approx::assert_relative_eq;
use common::{
    constant, create_basic_box, dynamic, graphics, init_logger, scene, DynamicProperty,
    MAXIMUM_CORNER, MINIMUM_CORNER,
};
use orrery_core::material::{GridMaterialProperty, Material, MaterialPropertyRef};
use orrery_core::math::{LinearRgba, Vec3};
use orrery_core::time::{JulianDate, TimeInterval, TimeIntervalCollection};
use orrery_data::{BoxGraphics, Entity};
use orrery_lanes::geometry_lane::{Geometry, VertexFormat};
use orrery_lanes::primitive::{Appearance, Primitive};
use orrery_lanes::{
    BoxGeometryUpdater, DynamicBoxUpdater, DynamicUpdater, GeometryError, PrimitiveCollection,
    Scene, SceneSettings, SharedPrimitives,
};
use std::rc::Rc;

/// A dynamic box with both a fill and an outline, plus handles on its time-varying flags.
struct DynamicBox {
    entity: Rc<Entity>,
    show: Rc<DynamicProperty<bool>>,
    fill: Rc<DynamicProperty<bool>>,
    outline: Rc<DynamicProperty<bool>>,
    minimum_corner: Rc<DynamicProperty<Vec3>>,
    maximum_corner: Rc<DynamicProperty<Vec3>>,
}

fn dynamic_box() -> DynamicBox {
    let show = DynamicProperty::<bool>::new(true);
    let fill = DynamicProperty::<bool>::new(true);
    let outline = DynamicProperty::<bool>::new(true);
    let minimum_corner = DynamicProperty::<Vec3>::new(MINIMUM_CORNER);
    let maximum_corner = DynamicProperty::<Vec3>::new(MAXIMUM_CORNER);

    let graphics = BoxGraphics::new();
    graphics.set_show(dynamic(&show));
    graphics.set_fill(dynamic(&fill));
    graphics.set_outline(dynamic(&outline));
    graphics.set_minimum_corner(dynamic(&minimum_corner));
    graphics.set_maximum_corner(dynamic(&maximum_corner));
    graphics.set_outline_color(constant(LinearRgba::BLUE));

    let entity = Rc::new(Entity::new());
    entity.set_box_graphics(Rc::new(graphics));

    DynamicBox {
        entity,
        show,
        fill,
        outline,
        minimum_corner,
        maximum_corner,
    }
}

fn dynamic_updater_for(
    entity: Rc<Entity>,
    scene: Rc<Scene>,
    primitives: &SharedPrimitives,
) -> (BoxGeometryUpdater, DynamicBoxUpdater) {
    let updater = BoxGeometryUpdater::new(entity, scene).unwrap();
    assert!(updater.is_dynamic());
    let dynamic_updater = updater.create_dynamic_updater(primitives.clone()).unwrap();
    (updater, dynamic_updater)
}

fn find_outline(primitives: &SharedPrimitives) -> Option<Primitive> {
    primitives
        .borrow()
        .iter()
        .map(|(_, primitive)| primitive.clone())
        .find(|primitive| matches!(primitive.geometry_instance.geometry, Geometry::BoxOutline(_)))
}

fn find_fill(primitives: &SharedPrimitives) -> Option<Primitive> {
    primitives
        .borrow()
        .iter()
        .map(|(_, primitive)| primitive.clone())
        .find(|primitive| matches!(primitive.geometry_instance.geometry, Geometry::Box(_)))
}

#[test]
fn test_dynamic_updater_sets_properties() {
    // --- 1. ARRANGE ---
    init_logger();
    let time = JulianDate::now();
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);
    assert_eq!(primitives.borrow().len(), 0);

    // --- 2. ACT ---
    dynamic_updater.update(time).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(primitives.borrow().len(), 2);
    assert!(!dynamic_updater.is_destroyed());

    let options = dynamic_updater.options();
    assert_eq!(options.id, subject.entity.id());
    assert_eq!(options.minimum_corner, Some(MINIMUM_CORNER));
    assert_eq!(options.maximum_corner, Some(MAXIMUM_CORNER));
    assert!(options.fill);
    assert!(options.outline);
    assert_eq!(options.outline_color, Some(LinearRgba::BLUE));
    assert_eq!(
        options.material,
        Some(Material::Color {
            color: LinearRgba::WHITE
        })
    );

    // A hidden entity draws nothing.
    subject.entity.set_show(false);
    dynamic_updater.update(time).unwrap();
    assert_eq!(primitives.borrow().len(), 0);

    // Outline only.
    subject.entity.set_show(true);
    subject.fill.set_value(false);
    dynamic_updater.update(time).unwrap();
    assert_eq!(primitives.borrow().len(), 1);
    assert!(find_outline(&primitives).is_some());

    // Fill only.
    subject.fill.set_value(true);
    subject.outline.set_value(false);
    dynamic_updater.update(time).unwrap();
    assert_eq!(primitives.borrow().len(), 1);
    assert!(find_fill(&primitives).is_some());

    dynamic_updater.destroy().unwrap();
    assert!(dynamic_updater.is_destroyed());
    assert_eq!(primitives.borrow().len(), 0);
}

#[test]
fn test_dynamic_updater_honours_the_box_show_flag() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    subject.show.set_value(false);
    dynamic_updater.update(JulianDate::now()).unwrap();
    assert!(primitives.borrow().is_empty());

    subject.show.set_value(true);
    dynamic_updater.update(JulianDate::now()).unwrap();
    assert_eq!(primitives.borrow().len(), 2);
}

#[test]
fn test_dynamic_updater_skips_undefined_corners() {
    let time = JulianDate::now();
    let subject = dynamic_box();
    subject.minimum_corner.set_value(None);
    subject.maximum_corner.set_value(None);
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    dynamic_updater.update(time).unwrap();
    assert_eq!(primitives.borrow().len(), 0);
    assert_eq!(dynamic_updater.options().minimum_corner, None);

    subject.minimum_corner.set_value(MINIMUM_CORNER);
    dynamic_updater.update(time).unwrap();
    assert_eq!(primitives.borrow().len(), 0);

    subject.maximum_corner.set_value(MAXIMUM_CORNER);
    dynamic_updater.update(time).unwrap();
    assert_eq!(primitives.borrow().len(), 2);
}

#[test]
fn test_dynamic_updater_follows_the_sampled_corners() {
    let time = JulianDate::now();
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    subject.maximum_corner.set_value(Vec3::new(10.0, 10.0, 10.0));
    dynamic_updater.update(time).unwrap();

    let fill = find_fill(&primitives).unwrap();
    assert_eq!(
        fill.geometry_instance.geometry.corners(),
        (MINIMUM_CORNER, Vec3::new(10.0, 10.0, 10.0))
    );
    let outline = find_outline(&primitives).unwrap();
    assert_eq!(
        outline.geometry_instance.geometry.corners(),
        (MINIMUM_CORNER, Vec3::new(10.0, 10.0, 10.0))
    );
}

#[test]
fn test_dynamic_updater_builds_material_and_outline_appearances() {
    // --- 1. ARRANGE ---
    let subject = dynamic_box();
    let graphics = graphics(&subject.entity);
    graphics.set_material(Rc::new(GridMaterialProperty::default()) as MaterialPropertyRef);
    graphics.set_outline_color(constant(LinearRgba::RED.with_alpha(0.5)));
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    // --- 2. ACT ---
    dynamic_updater.update(JulianDate::now()).unwrap();

    // --- 3. ASSERT ---
    let fill = find_fill(&primitives).unwrap();
    assert!(matches!(
        fill.geometry_instance.geometry,
        Geometry::Box(geometry) if geometry.vertex_format == VertexFormat::Textured
    ));
    match fill.appearance {
        Appearance::Material {
            material,
            translucent,
            closed,
        } => {
            assert_eq!(material.material_type(), "Grid");
            assert!(translucent);
            assert!(closed);
        }
        other => panic!("unexpected fill appearance {other:?}"),
    }
    assert!(fill.line_width.is_none());

    let outline = find_outline(&primitives).unwrap();
    assert_eq!(
        outline.appearance,
        Appearance::PerInstanceColor {
            flat: true,
            translucent: true,
        }
    );
}

#[test]
fn test_dynamic_updater_clamps_the_outline_width() {
    let subject = dynamic_box();
    graphics(&subject.entity).set_outline_width(constant(32.0_f32));
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    dynamic_updater.update(JulianDate::now()).unwrap();

    let outline = find_outline(&primitives).unwrap();
    assert_relative_eq!(outline.line_width.unwrap(), 10.0);
    assert_relative_eq!(dynamic_updater.options().outline_width, 32.0);
}

#[test]
fn test_dynamic_updater_uses_the_scene_line_width_range() {
    let subject = dynamic_box();
    graphics(&subject.entity).set_outline_width(constant(0.25_f32));
    let settings = SceneSettings {
        minimum_line_width: 2.0,
        maximum_line_width: 4.0,
    };
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) = dynamic_updater_for(
        subject.entity.clone(),
        Rc::new(Scene::new(settings)),
        &primitives,
    );

    dynamic_updater.update(JulianDate::now()).unwrap();

    let outline = find_outline(&primitives).unwrap();
    assert_relative_eq!(outline.line_width.unwrap(), 2.0);
}

#[test]
fn test_dynamic_updater_respects_availability() {
    let start = JulianDate::new(2_451_545, 0.0);
    let entity = create_basic_box();
    entity.set_availability(TimeIntervalCollection::from_iter([TimeInterval::new(
        start,
        start.add_seconds(60.0),
    )]));
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) = dynamic_updater_for(entity, scene(), &primitives);

    dynamic_updater.update(start.add_seconds(30.0)).unwrap();
    assert_eq!(primitives.borrow().len(), 1);

    dynamic_updater.update(start.add_seconds(120.0)).unwrap();
    assert_eq!(primitives.borrow().len(), 0);
}

#[test]
fn test_dynamic_updater_draws_nothing_once_the_box_is_removed() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);
    dynamic_updater.update(JulianDate::now()).unwrap();
    assert_eq!(primitives.borrow().len(), 2);

    subject.entity.set_box_graphics(None);
    dynamic_updater.update(JulianDate::now()).unwrap();

    assert_eq!(primitives.borrow().len(), 0);
}

#[test]
fn test_dynamic_updaters_only_remove_their_own_primitives() {
    // --- 1. ARRANGE ---
    let time = JulianDate::now();
    let first = dynamic_box();
    let second = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_first_updater, mut first_dynamic) =
        dynamic_updater_for(first.entity.clone(), scene(), &primitives);
    let (_second_updater, mut second_dynamic) =
        dynamic_updater_for(second.entity.clone(), scene(), &primitives);

    // --- 2. ACT ---
    first_dynamic.update(time).unwrap();
    second_dynamic.update(time).unwrap();
    first.outline.set_value(false);
    first_dynamic.update(time).unwrap();

    // --- 3. ASSERT ---
    assert_eq!(primitives.borrow().len(), 3);
    let owners: Vec<_> = primitives
        .borrow()
        .iter()
        .map(|(_, primitive)| primitive.geometry_instance.id)
        .collect();
    assert_eq!(owners.iter().filter(|id| **id == first.entity.id()).count(), 1);
    assert_eq!(owners.iter().filter(|id| **id == second.entity.id()).count(), 2);

    first_dynamic.destroy().unwrap();
    assert_eq!(primitives.borrow().len(), 2);
}

#[test]
fn test_dropping_a_dynamic_updater_removes_its_primitives() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);
    dynamic_updater.update(JulianDate::now()).unwrap();
    assert_eq!(primitives.borrow().len(), 2);

    drop(dynamic_updater);

    assert!(primitives.borrow().is_empty());
}

#[test]
fn test_dynamic_updater_outlives_its_box_updater() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (mut updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    updater.destroy().unwrap();
    drop(updater);

    dynamic_updater.update(JulianDate::now()).unwrap();
    assert_eq!(primitives.borrow().len(), 2);
}

#[test]
fn test_dynamic_updater_rejects_missing_time() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    assert!(matches!(
        dynamic_updater.update(None),
        Err(GeometryError::InvalidArgument(_))
    ));
}

#[test]
fn test_dynamic_updater_destroy_twice_is_disposed() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let (_updater, mut dynamic_updater) =
        dynamic_updater_for(subject.entity.clone(), scene(), &primitives);

    dynamic_updater.destroy().unwrap();

    assert!(matches!(
        dynamic_updater.destroy(),
        Err(GeometryError::ObjectDisposed(_))
    ));
    assert!(matches!(
        dynamic_updater.update(JulianDate::now()),
        Err(GeometryError::ObjectDisposed(_))
    ));
}

#[test]
fn test_dynamic_updater_through_the_trait_object() {
    let subject = dynamic_box();
    let primitives = PrimitiveCollection::shared();
    let updater = BoxGeometryUpdater::new(subject.entity.clone(), scene()).unwrap();
    let mut dynamic_updater: Box<dyn DynamicUpdater> =
        Box::new(updater.create_dynamic_updater(primitives.clone()).unwrap());

    dynamic_updater.update(Some(JulianDate::now())).unwrap();
    assert_eq!(primitives.borrow().len(), 2);

    dynamic_updater.destroy().unwrap();
    assert!(dynamic_updater.is_destroyed());
    assert!(primitives.borrow().is_empty());
}
