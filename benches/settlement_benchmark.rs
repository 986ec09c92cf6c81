use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tripsplit_engine::core::currency::{Currency, RateTable};
use tripsplit_engine::engine::settlement::SettlementReport;
use tripsplit_engine::simulation::group_gen::{generate_random_group, GroupConfig};

fn bench_settle_10_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 10,
        transaction_count: 50,
        currencies: vec![Currency::Usd, Currency::Eur, Currency::Krw],
        ..Default::default()
    };
    let group = generate_random_group(&config);
    let rates = RateTable::default();

    c.bench_function("settle_10_members", |b| {
        b.iter(|| {
            SettlementReport::compute(
                black_box(&group.members),
                black_box(&group.transactions),
                Currency::Eur,
                &rates,
            )
        })
    });
}

fn bench_settle_100_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 100,
        transaction_count: 1_000,
        currencies: vec![Currency::Usd, Currency::Eur, Currency::Krw],
        ..Default::default()
    };
    let group = generate_random_group(&config);
    let rates = RateTable::default();

    c.bench_function("settle_100_members", |b| {
        b.iter(|| {
            SettlementReport::compute(
                black_box(&group.members),
                black_box(&group.transactions),
                Currency::Usd,
                &rates,
            )
        })
    });
}

fn bench_settle_1000_members(c: &mut Criterion) {
    let config = GroupConfig {
        member_count: 1_000,
        transaction_count: 10_000,
        currencies: vec![Currency::Eur],
        ..Default::default()
    };
    let group = generate_random_group(&config);
    let rates = RateTable::default();

    c.bench_function("settle_1000_members", |b| {
        b.iter(|| {
            SettlementReport::compute(
                black_box(&group.members),
                black_box(&group.transactions),
                Currency::Eur,
                &rates,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_settle_10_members,
    bench_settle_100_members,
    bench_settle_1000_members
);
criterion_main!(benches);
