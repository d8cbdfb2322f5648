use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

use tally::domain::{Transaction, TransactionKind};
use tally::query::{DateOp, TransactionFilter};
use tally::storage::TransactionStore;

fn build_sample_set(txn_count: usize) -> Vec<Transaction> {
    let start_date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let categories = ["groceries", "rent", "utilities", "transport"];

    (0..txn_count)
        .map(|idx| {
            let date = start_date + Duration::days((idx % 365) as i64);
            if idx % 5 == 0 {
                Transaction::new(date, TransactionKind::Income, 1000.0, "salary", "pay")
            } else {
                Transaction::new(
                    date,
                    TransactionKind::Expense,
                    5.0 + (idx % 100) as f64,
                    categories[idx % categories.len()],
                    "",
                )
            }
        })
        .collect()
}

fn bench_store_io(c: &mut Criterion) {
    let transactions = build_sample_set(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let store = TransactionStore::new(dir.path().join("transactions.json"));

    c.bench_function("store_save_10k", |b| {
        b.iter(|| {
            store.save(&transactions).expect("save transactions");
        })
    });

    store.save(&transactions).expect("seed");

    c.bench_function("store_load_10k", |b| {
        b.iter(|| {
            let loaded = store.load().expect("load transactions");
            black_box(loaded);
        })
    });
}

fn bench_filter_select(c: &mut Criterion) {
    let transactions = build_sample_set(black_box(10_000));
    let cutoff = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    c.bench_function("filter_date_after_10k", |b| {
        let filter = TransactionFilter::Date {
            op: DateOp::After,
            date: cutoff,
        };
        b.iter(|| {
            let selected = filter.select(&transactions);
            black_box(selected);
        })
    });

    c.bench_function("filter_category_10k", |b| {
        let filter = TransactionFilter::Category("groceries".into());
        b.iter(|| {
            let selected = filter.select(&transactions);
            black_box(selected);
        })
    });
}

criterion_group!(benches, bench_store_io, bench_filter_select);
criterion_main!(benches);
