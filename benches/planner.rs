use criterion::{criterion_group, criterion_main, Criterion};
use env_logger::Env;
use glam::Vec3;
use incremental_pathfinding::prelude::*;
use nanorand::{Rng, WyRand};

struct Map {
    blocked: Vec<bool>,
    width: usize,
    height: usize,
}

impl Map {
    pub fn open(width: usize, height: usize) -> Self {
        Map {
            blocked: vec![false; width * height],
            width,
            height,
        }
    }

    pub fn random(width: usize, height: usize, seed: u64) -> Self {
        let mut rng = WyRand::new_seed(seed);
        let mut blocked = Vec::with_capacity(width * height);
        for _ in 0..width * height {
            blocked.push(rng.generate_range(0..100_u32) < 15);
        }
        let mut map = Map {
            blocked,
            width,
            height,
        };
        // keep the corners anchorable
        map.set_blocked(0, 0, false);
        map.set_blocked(width - 1, height - 1, false);
        map
    }

    pub fn set_blocked(&mut self, x: usize, y: usize, blocked: bool) {
        self.blocked[x + y * self.width] = blocked;
    }

    fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.blocked[x + y * self.width]
    }
}

#[allow(unused)]
// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "debug")
        .write_style_or("MY_LOG_STYLE", "always");

    env_logger::init_from_env(env);
    let _ = env_logger::builder().is_test(true).try_init();
}

fn navigator_for(map: &Map) -> GridNavigator {
    let bounds = SearchBounds::new(
        Vec3::ZERO,
        Vec3::new((map.width - 1) as f32, 0.0, (map.height - 1) as f32),
    );
    let config = NavigatorConfig {
        detect_obstacles: true,
        ..Default::default()
    };
    GridNavigator::with_probe(bounds, config, |pos| {
        map.is_blocked(pos.x as usize, pos.z as usize)
    })
    .unwrap()
}

fn bench_full_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("full search");

    for (name, map) in [
        ("open map", Map::open(64, 64)),
        ("random map", Map::random(64, 64, 4)),
    ] {
        let mut nav = navigator_for(&map);
        let goal = Vec3::new((map.width - 1) as f32, 0.0, (map.height - 1) as f32);
        let budget = map.width * map.height * 4;

        let id = format!(
            "Search Corner to Corner, {}, Map Size: ({}, {})",
            name, map.width, map.height
        );
        group.bench_function(&id, |b| {
            b.iter(|| {
                nav.start_search_between(Vec3::ZERO, goal);
                nav.run_to_completion(Vec3::ZERO, budget)
            })
        });
    }

    group.finish();
}

fn bench_sensor_sweeps(c: &mut Criterion) {
    let map = Map::open(64, 64);
    let mut nav = navigator_for(&map);

    let id = "Sweep Rays Across the Lattice, Map Size: (64, 64)";
    c.bench_function(id, |b| {
        b.iter(|| {
            for z in 0..64 {
                nav.proximity_sensor(
                    Vec3::new(0.0, 0.0, z as f32),
                    Vec3::new(63.0, 0.0, z as f32),
                    z % 8 == 0,
                );
            }
        })
    });
}

criterion_group!(benches, bench_full_search, bench_sensor_sweeps);
criterion_main!(benches);
