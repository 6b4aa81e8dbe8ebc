mod sqlite_warehouse_store;

pub use sqlite_warehouse_store::SqliteWarehouseStore;

use crate::models::{ArtistRecord, SongMatch, SongRecord, SongplayRecord, TimeRecord, UserRecord};
use crate::schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    /// Engine errors (constraint violations, coercion, I/O) as sqlite reported them.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Statement {statement} takes {expected} parameters, got {actual}")]
    ArityMismatch {
        statement: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown warehouse table: {0}")]
    UnknownTable(String),

    #[error("Warehouse connection lock poisoned")]
    ConnectionPoisoned,
}

impl WarehouseError {
    /// True for foreign key violations raised by the engine.
    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            WarehouseError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, WarehouseError>;

pub trait WarehouseStore: Send + Sync {
    // Schema lifecycle
    /// Runs `create_table_queries` in order.
    fn create_tables(&self) -> Result<()>;
    /// Runs `drop_table_queries` in order.
    fn drop_tables(&self) -> Result<()>;
    /// Drops and re-creates every table, leaving an empty schema.
    fn reset(&self) -> Result<()>;
    /// Compares the live schema with the table definitions.
    fn validate(&self) -> Result<()>;

    // Dimension upserts. Return false when the natural key already existed
    // and the row was left untouched.
    fn upsert_user(&self, user: &UserRecord) -> Result<bool>;
    fn upsert_song(&self, song: &SongRecord) -> Result<bool>;
    fn upsert_artist(&self, artist: &ArtistRecord) -> Result<bool>;
    fn upsert_time(&self, time: &TimeRecord) -> Result<bool>;

    // Facts
    /// Appends a play and returns its surrogate id.
    fn insert_songplay(&self, songplay: &SongplayRecord) -> Result<i64>;

    /// Resolves a play to its song and artist keys. An empty result means
    /// no match and is not an error.
    fn find_song(&self, title: &str, artist_name: &str, duration: f64) -> Result<Vec<SongMatch>>;

    fn table_row_count(&self, table: &str) -> Result<i64>;
}
