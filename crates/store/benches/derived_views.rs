use std::num::NonZeroU32;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use chrono::Utc;
use stockroom_core::WarehouseId;
use stockroom_inventory::{NewItem, NewMovement};
use stockroom_store::InventoryStore;

fn units(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

fn populated_store(items: usize) -> InventoryStore {
    let mut store = InventoryStore::empty();
    let warehouse = WarehouseId::from_u128(1);
    for n in 0..items {
        let id = store.add_item(
            NewItem::new(format!("Item {n}"), format!("SKU-{n}"), warehouse)
                .with_category(format!("Category {}", n % 12))
                .with_pricing(1_000 + n as u64, 600 + n as u64)
                .with_stock((n % 50) as i64, 10),
        );
        store.add_movement(NewMovement::inbound(id, units(5)));
    }
    store
}

fn bench_derived_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived_views");

    for size in [100usize, 1_000, 5_000] {
        let store = populated_store(size);
        let snapshot = store.snapshot();
        let now = Utc::now();

        group.bench_with_input(BenchmarkId::new("low_stock_items", size), &size, |b, _| {
            b.iter(|| black_box(snapshot.low_stock_items().len()));
        });

        group.bench_with_input(BenchmarkId::new("expiring_items", size), &size, |b, _| {
            b.iter(|| black_box(snapshot.expiring_items(now, 30).len()));
        });

        group.bench_with_input(BenchmarkId::new("dashboard_metrics", size), &size, |b, _| {
            b.iter(|| black_box(snapshot.dashboard_metrics()));
        });

        group.bench_with_input(BenchmarkId::new("category_breakdown", size), &size, |b, _| {
            b.iter(|| black_box(snapshot.category_breakdown()));
        });
    }

    group.finish();
}

fn bench_mutation_with_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_on_write");

    group.bench_function("inbound_movement_no_reader", |b| {
        let mut store = populated_store(1_000);
        let id = store.items()[0].id;
        b.iter(|| store.add_movement(NewMovement::inbound(id, units(1))));
    });

    group.bench_function("inbound_movement_with_held_snapshot", |b| {
        let mut store = populated_store(1_000);
        let id = store.items()[0].id;
        b.iter(|| {
            let _held = store.snapshot();
            store.add_movement(NewMovement::inbound(id, units(1)))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_derived_views, bench_mutation_with_reader);
criterion_main!(benches);
