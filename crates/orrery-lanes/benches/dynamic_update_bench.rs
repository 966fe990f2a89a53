use criterion::{criterion_group, criterion_main, Criterion};
use orrery_core::math::Vec3;
use orrery_core::property::{CallbackProperty, ConstantProperty, PropertyRef};
use orrery_core::time::JulianDate;
use orrery_data::{BoxGraphics, Entity};
use orrery_lanes::{BoxGeometryUpdater, PrimitiveCollection, Scene};
use std::hint::black_box;
use std::rc::Rc;

fn moving_box(offset: f32) -> Rc<Entity> {
    let minimum: PropertyRef<Vec3> = Rc::new(CallbackProperty::new(
        move |time: JulianDate| Some(Vec3::new(offset - time.seconds_of_day() as f32, 0.0, 0.0)),
        false,
    ));
    let maximum: PropertyRef<Vec3> = Rc::new(ConstantProperty::new(Vec3::new(offset, 1.0, 1.0)));

    let graphics = BoxGraphics::from_corners(minimum, maximum);
    graphics.set_outline(Rc::new(ConstantProperty::new(true)) as PropertyRef<bool>);

    let entity = Rc::new(Entity::new());
    entity.set_box_graphics(Rc::new(graphics));
    entity
}

fn bench_dynamic_update(c: &mut Criterion) {
    let scene = Rc::new(Scene::default());
    let primitives = PrimitiveCollection::shared();

    // Setup 1,000 moving boxes sharing one collection
    let updaters: Vec<_> = (0..1_000)
        .map(|i| BoxGeometryUpdater::new(moving_box(i as f32), scene.clone()).unwrap())
        .collect();
    let mut dynamic_updaters: Vec<_> = updaters
        .iter()
        .map(|updater| updater.create_dynamic_updater(primitives.clone()).unwrap())
        .collect();

    let mut group = c.benchmark_group("Dynamic Box Updates");

    group.bench_function("Single box", |b| {
        let mut time = JulianDate::new(2_451_545, 0.0);
        b.iter(|| {
            time = time.add_seconds(1.0);
            dynamic_updaters[0].update(black_box(time)).unwrap();
        });
    });

    group.bench_function("1000 boxes", |b| {
        let mut time = JulianDate::new(2_451_545, 0.0);
        b.iter(|| {
            time = time.add_seconds(1.0);
            for updater in dynamic_updaters.iter_mut() {
                updater.update(black_box(time)).unwrap();
            }
            black_box(primitives.borrow().len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_dynamic_update);
criterion_main!(benches);
