use super::*;
use chrono::{Duration, Local, TimeZone};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

fn at(second: i64) -> chrono::DateTime<Local> {
    Local.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(second)
}

#[test]
fn test_fresh_store_is_empty() {
    let store = SeriesStore::new();
    let snapshot = store.snapshot();

    assert!(store.is_empty());
    assert_eq!(snapshot, SeriesSnapshot::default());
    assert_eq!(snapshot.current_concentration, 0.0);
}

#[test]
fn test_append_grows_both_histories() {
    let store = SeriesStore::new();
    for i in 0..5 {
        store.append(i as f64 * 1.5, at(i), vec![i as f64], vec![-(i as f64)]);
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.concentration_history, vec![0.0, 1.5, 3.0, 4.5, 6.0]);
    assert_eq!(snapshot.time_history.len(), 5);
    assert_eq!(snapshot.time_history[4], at(4));
    assert_eq!(
        snapshot.current_concentration,
        *snapshot.concentration_history.last().unwrap()
    );
    assert_eq!(store.current_concentration(), 6.0);
}

#[test]
fn test_latest_traces_are_replaced_not_merged() {
    let store = SeriesStore::new();
    store.append(1.0, at(0), vec![1.0, 2.0, 3.0], vec![0.1, 0.2, 0.3]);
    store.append(2.0, at(1), vec![9.0], vec![0.9]);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.latest_current, vec![9.0]);
    assert_eq!(snapshot.latest_voltage, vec![0.9]);
}

#[test]
fn test_snapshot_is_independent_copy() {
    let store = SeriesStore::new();
    store.append(1.0, at(0), vec![1.0], vec![0.1]);
    let before = store.snapshot();

    store.append(2.0, at(1), vec![2.0], vec![0.2]);
    assert_eq!(before.concentration_history, vec![1.0]);
    assert_eq!(store.snapshot().concentration_history, vec![1.0, 2.0]);
}

#[test]
fn test_retention_evicts_oldest() {
    let store = SeriesStore::with_retention(NonZeroUsize::new(3).unwrap());
    for i in 0..5 {
        store.append(i as f64, at(i), vec![], vec![]);
    }

    let snapshot = store.snapshot();
    assert_eq!(snapshot.concentration_history, vec![2.0, 3.0, 4.0]);
    assert_eq!(snapshot.time_history, vec![at(2), at(3), at(4)]);
    assert_eq!(snapshot.current_concentration, 4.0);
    assert_eq!(store.len(), 3);
}

#[test]
fn test_snapshot_serializes_with_polling_field_names() {
    let store = SeriesStore::new();
    store.append(2.0, at(0), vec![1.0, 5.0], vec![0.5, 0.6]);

    let json = serde_json::to_value(store.snapshot()).unwrap();
    assert_eq!(json["current_concentration"], 2.0);
    assert_eq!(json["concentration_history"][0], 2.0);
    assert!(json["time_history"][0].is_string());
    assert_eq!(json["latest_current"][1], 5.0);
    assert_eq!(json["latest_voltage"][0], 0.5);
}

#[test]
fn test_concurrent_appends_keep_histories_aligned() {
    let store = Arc::new(SeriesStore::new());
    let writers = 8;
    let appends_per_writer = 200;

    thread::scope(|scope| {
        for w in 0..writers {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for i in 0..appends_per_writer {
                    let value = (w * appends_per_writer + i) as f64;
                    store.append(value, Local::now(), vec![value; 4], vec![value; 4]);
                }
            });
        }

        for _ in 0..2 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for _ in 0..500 {
                    let snapshot = store.snapshot();
                    assert_eq!(
                        snapshot.concentration_history.len(),
                        snapshot.time_history.len()
                    );
                    if let Some(last) = snapshot.concentration_history.last() {
                        assert_eq!(*last, snapshot.current_concentration);
                        assert_eq!(snapshot.latest_current, vec![*last; 4]);
                    }
                }
            });
        }
    });

    let snapshot = store.snapshot();
    assert_eq!(snapshot.concentration_history.len(), writers * appends_per_writer);
    assert_eq!(snapshot.time_history.len(), writers * appends_per_writer);
}
