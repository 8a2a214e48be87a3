//! Tests for the request-monitor decorator.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::{fixture, rstest};

use super::support::{FixedClock, note_fields};
use crate::record::{
    adapters::{
        InstrumentedRecordStore, RequestMonitor, RequestOutcome, memory::InMemoryRecordStore,
    },
    domain::{RecordId, RecordQuery, TableName},
    ports::{RecordStore, StoreOperation},
};

type MonitoredStore = InstrumentedRecordStore<InMemoryRecordStore<FixedClock>, FixedClock>;

#[fixture]
fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::at("2026-03-02T09:00:00Z"))
}

/// Clock that moves forward by a fixed step on every reading.
struct SteppingClock {
    origin: DateTime<Utc>,
    step: TimeDelta,
    readings: AtomicI64,
}

impl SteppingClock {
    fn new(origin: &str, step: TimeDelta) -> Self {
        Self {
            origin: FixedClock::at(origin).0,
            step,
            readings: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        Local.from_utc_datetime(&self.utc().naive_utc())
    }

    fn utc(&self) -> DateTime<Utc> {
        let reading = self.readings.fetch_add(1, Ordering::SeqCst);
        self.origin + self.step * i32::try_from(reading).expect("few readings")
    }
}

#[fixture]
fn notes() -> TableName {
    TableName::new("notes").expect("valid table name")
}

fn monitored(clock: &Arc<FixedClock>, capacity: usize) -> MonitoredStore {
    InstrumentedRecordStore::new(
        InMemoryRecordStore::with_clock(Arc::clone(clock)),
        RequestMonitor::new(capacity),
        Arc::clone(clock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn captures_successful_requests(clock: Arc<FixedClock>, notes: TableName) {
    let store = monitored(&clock, 10);

    store
        .insert(&notes, note_fields("one"))
        .await
        .expect("insert should succeed");
    store
        .list(&notes, &RecordQuery::all())
        .await
        .expect("list should succeed");

    let entries = store.monitor().entries();
    let operations: Vec<_> = entries.iter().map(|entry| entry.operation).collect();
    assert_eq!(operations, vec![StoreOperation::Insert, StoreOperation::List]);
    assert!(entries.iter().all(|entry| entry.table == notes));
    assert!(entries.iter().all(|entry| entry.started_at == clock.0));
    assert_eq!(
        entries.last().map(|entry| entry.outcome.clone()),
        Some(RequestOutcome::Succeeded { records: 1 })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn captures_failures_and_passes_them_through(clock: Arc<FixedClock>, notes: TableName) {
    let store = monitored(&clock, 10);

    let result = store.delete(&notes, RecordId::new()).await;

    assert!(result.is_err());
    let failures = store.monitor().failures();
    assert_eq!(failures.len(), 1);
    assert!(failures.iter().all(|entry| entry.is_failure()));
    assert!(matches!(
        failures.first().map(|entry| &entry.outcome),
        Some(RequestOutcome::Failed { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn monitor_keeps_only_the_most_recent_entries(clock: Arc<FixedClock>, notes: TableName) {
    let store = monitored(&clock, 2);

    store
        .insert(&notes, note_fields("one"))
        .await
        .expect("insert should succeed");
    for _ in 0..2 {
        store
            .list(&notes, &RecordQuery::all())
            .await
            .expect("list should succeed");
    }

    let operations: Vec<_> = store
        .monitor()
        .entries()
        .iter()
        .map(|entry| entry.operation)
        .collect();
    assert_eq!(operations, vec![StoreOperation::List, StoreOperation::List]);
}

#[rstest]
fn zero_capacity_keeps_one_entry() {
    let monitor = RequestMonitor::new(0);

    assert_eq!(monitor.capacity(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn monitor_clones_share_entries(clock: Arc<FixedClock>, notes: TableName) {
    let monitor = RequestMonitor::new(5);
    let store = InstrumentedRecordStore::new(
        InMemoryRecordStore::with_clock(Arc::clone(&clock)),
        monitor.clone(),
        Arc::clone(&clock),
    );

    store
        .list(&notes, &RecordQuery::all())
        .await
        .expect("list should succeed");
    assert_eq!(monitor.entries().len(), 1);

    monitor.clear();
    assert!(store.monitor().entries().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn elapsed_time_is_read_from_the_injected_clock(notes: TableName) {
    let clock = Arc::new(SteppingClock::new(
        "2026-03-02T09:00:00Z",
        TimeDelta::milliseconds(250),
    ));
    let store = InstrumentedRecordStore::new(
        InMemoryRecordStore::with_clock(Arc::new(FixedClock::at("2026-03-02T09:00:00Z"))),
        RequestMonitor::new(4),
        Arc::clone(&clock),
    );

    store
        .list(&notes, &RecordQuery::all())
        .await
        .expect("list should succeed");
    store
        .list(&notes, &RecordQuery::all())
        .await
        .expect("list should succeed");

    let entries = store.monitor().entries();
    assert!(
        entries
            .iter()
            .all(|entry| entry.elapsed == Duration::from_millis(250))
    );
    assert_eq!(
        entries
            .iter()
            .map(|entry| entry.started_at.to_rfc3339())
            .collect::<Vec<_>>(),
        vec!["2026-03-02T09:00:00+00:00", "2026-03-02T09:00:00.500+00:00"]
    );
}
