use criterion::{criterion_group, criterion_main, Criterion};

use hypersweeper::{Button, GameConfig, Round};

fn place_and_flood(c: &mut Criterion) {
    let config = GameConfig::new(16, 40, 300, 1).unwrap();

    c.bench_function("first_reveal_16x16", |b| {
        b.iter(|| {
            let mut round = Round::seeded(config, (), 7);
            round.handle((8, 8), Button::Primary).unwrap();
            round.neutral_remaining()
        })
    });

    c.bench_function("full_clear_16x16", |b| {
        b.iter(|| {
            let mut round = Round::seeded(config, (), 7);
            round.handle((8, 8), Button::Primary).unwrap();
            for y in 0..16 {
                for x in 0..16 {
                    if !round.kind_at((x, y)).is_mine() {
                        round.handle((x, y), Button::Primary).unwrap();
                    }
                }
            }
            round.outcome()
        })
    });
}

criterion_group!(benches, place_and_flood);
criterion_main!(benches);
