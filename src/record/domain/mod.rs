//! Domain model for records exchanged with the record store.
//!
//! Records are loosely typed field maps. The [`Entity`] contract is the
//! single place where they are validated into typed values, so layers
//! above the store boundary never inspect raw fields.

mod entity;
mod error;
mod ids;
mod query;
mod record;

pub use entity::{Entity, decode_row, encode_fields};
pub use error::RecordSchemaError;
pub use ids::{RecordId, TableName};
pub use query::RecordQuery;
pub use record::{Record, RecordFields};

pub(crate) use record::is_reserved;
