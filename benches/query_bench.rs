use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{DVec2, DVec3};
use sim_world::core::{
    Dimension, LaneKey, LaneMarkingColor, LaneMarkingSide, LaneMarkingType, LaneType,
    LinkedObject, MarkingWeight, RoadMarking,
};
use sim_world::{RouteElement, WorldData, WorldDataQuery};
use std::hint::black_box;

const SECTION_LENGTH: f64 = 100.0;

fn marking(marking_type: LaneMarkingType) -> RoadMarking {
    RoadMarking {
        s_offset: 0.0,
        s_end: SECTION_LENGTH,
        marking_type,
        color: LaneMarkingColor::White,
        weight: MarkingWeight::Standard,
    }
}

/// Kette aus `road_count` Straßen mit je zwei Abschnitten und zwei Spuren pro Richtung.
fn build_synthetic_world(road_count: usize) -> WorldData {
    let mut world = WorldData::new();
    let mut previous: Option<LaneKey> = None;

    for road_index in 0..road_count {
        let road = format!("R{road_index}");
        world.add_road(&road, true).expect("Straße");
        let road_origin = road_index as f64 * 2.0 * SECTION_LENGTH;

        for section_index in 0..2 {
            let s_start = section_index as f64 * SECTION_LENGTH;
            let key = world.add_section(&road, s_start).expect("Abschnitt");
            let center = world.add_lane_boundary(
                marking(LaneMarkingType::Solid),
                s_start,
                LaneMarkingSide::Single,
            );
            world.set_center_lane_boundaries(&key, vec![center]).expect("Abschnitt");

            for od in [-1, -2, 1, 2] {
                let outer = world.add_lane_boundary(
                    marking(LaneMarkingType::Broken),
                    s_start,
                    LaneMarkingSide::Single,
                );
                world.add_lane(&key, od, LaneType::Driving, od < 0, &[outer]).expect("Spur");
                let t = (od as f64).signum() * ((od.abs() as f64) - 0.5) * 3.5;
                for step in 0..=10 {
                    let s = s_start + step as f64 * 10.0;
                    let center = DVec2::new(road_origin + s, t);
                    world
                        .add_lane_geometry_point(
                            &key.lane(od),
                            center + DVec2::Y * 1.75,
                            center,
                            center - DVec2::Y * 1.75,
                            s,
                            0.0,
                            0.0,
                        )
                        .expect("Stützpunkt");
                }
            }

            let current = key.lane(-1);
            if let Some(previous) = previous.replace(current.clone()) {
                world.add_lane_successor(&previous, &current).expect("Nachfolger");
                world.add_lane_predecessor(&current, &previous).expect("Vorgänger");
            }
        }
    }
    world
}

fn populate_moving_objects(world: &mut WorldData, count: usize, extent: f64) {
    for index in 0..count {
        let id = world.add_moving_object(LinkedObject(index as i64));
        let object = world.moving_object_mut(id).expect("gerade angelegt");
        let x = (index as f64 * 37.0) % extent;
        let y = ((index * 7) % 4) as f64 * 3.5 - 5.25;
        object.set_dimension(Dimension {
            length: 4.5,
            width: 1.8,
            height: 1.5,
        });
        object.set_reference_point_position(DVec3::new(x, y, 0.0));
    }
}

fn full_route(road_count: usize) -> Vec<RouteElement> {
    (0..road_count)
        .map(|index| RouteElement::new(format!("R{index}"), true))
        .collect()
}

fn bench_lane_lookup(c: &mut Criterion) {
    let world = build_synthetic_world(100);
    let query = WorldDataQuery::new(&world);

    c.bench_function("lane_by_od_id", |b| {
        b.iter(|| {
            let mut found = 0usize;
            for index in 0..100 {
                let road = format!("R{index}");
                if query.lane_by_od_id(black_box(&road), -1, black_box(150.0)).exists() {
                    found += 1;
                }
            }
            black_box(found)
        })
    });
}

fn bench_lane_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("lane_stream");

    for &road_count in &[10usize, 100usize] {
        let world = build_synthetic_world(road_count);
        let route = full_route(road_count);
        let last_road = format!("R{}", road_count - 1);

        group.bench_with_input(BenchmarkId::new("create", road_count), &world, |b, world| {
            let query = WorldDataQuery::new(world);
            b.iter(|| {
                let stream = query.create_lane_stream(black_box(&route), &last_road, -1, 50.0);
                black_box(stream.len())
            })
        });
    }

    group.finish();
}

fn bench_sector_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("sector_filter");

    for &object_count in &[1_000usize, 10_000usize] {
        let mut world = build_synthetic_world(10);
        populate_moving_objects(&mut world, object_count, 2000.0);

        let id = BenchmarkId::new("moving_objects", object_count);
        group.bench_with_input(id, &world, |b, world| {
            b.iter(|| {
                let objects = world.moving_objects_in_sector(
                    black_box(DVec2::new(1000.0, 0.0)),
                    black_box(150.0),
                    -std::f64::consts::FRAC_PI_4,
                    std::f64::consts::FRAC_PI_4,
                );
                black_box(objects.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lane_lookup, bench_lane_stream, bench_sector_filter);
criterion_main!(benches);
