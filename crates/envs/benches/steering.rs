use criterion::{black_box, criterion_group, criterion_main, Criterion};
use envs::skills::{next_hallway, steer_toward, wrap_angle, Rotation};
use envs::VaultEnv;
use world::WorldConfig;

fn bench_skills(c: &mut Criterion) {
    let env = VaultEnv::new(WorldConfig::default()).expect("vault layout should build");
    let target = env.world.rooms[0].mid();

    c.bench_function("wrap_angle", |b| {
        b.iter(|| wrap_angle(black_box(17.3)));
    });
    c.bench_function("steer_toward", |b| {
        b.iter(|| steer_toward(black_box(target), &env.world.agent));
    });
    c.bench_function("next_hallway_cw", |b| {
        b.iter(|| next_hallway(&env.world, Rotation::Clockwise));
    });
}

criterion_group!(benches, bench_skills);
criterion_main!(benches);
