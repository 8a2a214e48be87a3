//! Shared fixtures for record tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::sync::Notify;

use crate::record::{
    adapters::memory::InMemoryRecordStore,
    domain::{
        Entity, Record, RecordFields, RecordId, RecordQuery, RecordSchemaError, TableName,
        decode_row,
    },
    ports::{RecordStore, RecordStoreResult},
};

mock! {
    pub Store {}

    #[async_trait]
    impl RecordStore for Store {
        async fn list(&self, table: &TableName, query: &RecordQuery) -> RecordStoreResult<Vec<Record>>;
        async fn insert(&self, table: &TableName, fields: RecordFields) -> RecordStoreResult<Record>;
        async fn update(&self, table: &TableName, id: RecordId, patch: RecordFields) -> RecordStoreResult<Record>;
        async fn delete(&self, table: &TableName, id: RecordId) -> RecordStoreResult<()>;
    }
}

/// In-memory store whose first listing pauses until released.
///
/// The listing is taken before the pause, so the paused load carries the
/// data as it stood when the load began.
pub struct GatedStore {
    pub inner: InMemoryRecordStore<FixedClock>,
    pub listed: Notify,
    pub release: Notify,
    armed: AtomicBool,
}

impl GatedStore {
    pub fn new(inner: InMemoryRecordStore<FixedClock>) -> Self {
        Self {
            inner,
            listed: Notify::new(),
            release: Notify::new(),
            armed: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl RecordStore for GatedStore {
    async fn list(&self, table: &TableName, query: &RecordQuery) -> RecordStoreResult<Vec<Record>> {
        let records = self.inner.list(table, query).await?;
        if self.armed.swap(false, Ordering::SeqCst) {
            self.listed.notify_one();
            self.release.notified().await;
        }
        Ok(records)
    }

    async fn insert(&self, table: &TableName, fields: RecordFields) -> RecordStoreResult<Record> {
        self.inner.insert(table, fields).await
    }

    async fn update(
        &self,
        table: &TableName,
        id: RecordId,
        patch: RecordFields,
    ) -> RecordStoreResult<Record> {
        self.inner.update(table, id, patch).await
    }

    async fn delete(&self, table: &TableName, id: RecordId) -> RecordStoreResult<()> {
        self.inner.delete(table, id).await
    }
}

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(rfc3339: &str) -> Self {
        let instant = DateTime::parse_from_rfc3339(rfc3339)
            .expect("valid timestamp")
            .with_timezone(&Utc);
        Self(instant)
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        Local.from_utc_datetime(&self.0.naive_utc())
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Minimal entity used to exercise the generic collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: RecordId,
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNote {
    pub body: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotePatch {
    pub body: String,
}

#[derive(Deserialize)]
struct NoteRow {
    id: String,
    body: Option<String>,
}

impl Entity for Note {
    type Draft = NewNote;
    type Patch = NotePatch;

    const TABLE: &'static str = "notes";
    const LABEL: &'static str = "note";

    fn from_record(record: &Record) -> Result<Self, RecordSchemaError> {
        let row: NoteRow = decode_row(record)?;
        Ok(Self {
            id: row.id.parse()?,
            body: row.body.ok_or(RecordSchemaError::MissingField("body"))?,
        })
    }

    fn record_id(&self) -> RecordId {
        self.id
    }
}

pub fn fields(value: Value) -> RecordFields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

pub fn note(body: &str) -> NewNote {
    NewNote {
        body: body.to_owned(),
    }
}

pub fn note_fields(body: &str) -> RecordFields {
    fields(json!({ "body": body }))
}
