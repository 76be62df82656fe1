use biblio_core::{Client, ClientCategory, ClientId, Material, MaterialId};
use biblio_engine::{circulation, reservation};
use biblio_store::{EntityStore, MemoryStore};
use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day(d: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap() + chrono::Duration::days(d)
}

fn library(clients: u64, materials: u64) -> MemoryStore {
    let mut store = MemoryStore::new();
    for i in 1..=clients {
        store
            .insert_client(Client::new(
                ClientId(i),
                format!("client-{i}"),
                ClientCategory::Student,
            ))
            .unwrap();
    }
    for i in 1..=materials {
        store
            .insert_material(Material::new(
                MaterialId(i),
                format!("title-{i}"),
                format!("author-{i}"),
                "bench",
            ))
            .unwrap();
    }
    store
}

// ---------------------------------------------------------------------------
// Benchmark: loan/return cycle
// ---------------------------------------------------------------------------

fn bench_loan_return_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("loan_return_cycle");
    for size in [100u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let base = library(size, size);
            b.iter(|| {
                let mut store = base.clone();
                for i in 1..=size {
                    circulation::create_loan(
                        &mut store,
                        ClientId(i),
                        MaterialId(i),
                        day(0),
                    )
                    .unwrap();
                    circulation::return_material(
                        &mut store,
                        ClientId(i),
                        MaterialId(i),
                        day(3),
                    )
                    .unwrap();
                }
                black_box(store.loans().len())
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: reservation round trip
// ---------------------------------------------------------------------------

fn bench_reservation_round_trip(c: &mut Criterion) {
    let base = library(1_000, 1_000);
    c.bench_function("reservation_round_trip_1000", |b| {
        b.iter(|| {
            let mut store = base.clone();
            for i in 1..=1_000u64 {
                reservation::create_reservation(&mut store, ClientId(i), MaterialId(i), day(0))
                    .unwrap();
                reservation::cancel_reservation(&mut store, ClientId(i), MaterialId(i)).unwrap();
            }
            black_box(store.reservations().len())
        });
    });
}

criterion_group!(benches, bench_loan_return_cycle, bench_reservation_round_trip);
criterion_main!(benches);
