use super::{Result, WarehouseError, WarehouseStore};
use crate::models::{
    ArtistRecord, InsertRecord, SongMatch, SongRecord, SongplayRecord, TimeRecord, UserRecord,
};
use crate::schema::{table_by_name, validate_schema, CREATE_ORDER};
use crate::statements::{Statement, StatementCatalog, StatementKind};
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

pub struct SqliteWarehouseStore {
    conn: Arc<Mutex<Connection>>,
    catalog: &'static StatementCatalog,
}

impl SqliteWarehouseStore {
    /// Opens (or creates) a warehouse file. Tables are not created here.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        info!("Opening warehouse database at {:?}", path);
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON;", [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            catalog: StatementCatalog::sqlite(),
        })
    }

    pub fn catalog(&self) -> &'static StatementCatalog {
        self.catalog
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| WarehouseError::ConnectionPoisoned)
    }

    fn insert(
        conn: &Connection,
        statement: &Statement,
        record: &dyn InsertRecord,
    ) -> Result<usize> {
        let params = record.params();
        if params.len() != statement.arity {
            return Err(WarehouseError::ArityMismatch {
                statement: statement.name.clone(),
                expected: statement.arity,
                actual: params.len(),
            });
        }
        let mut stmt = conn.prepare_cached(&statement.sql)?;
        Ok(stmt.execute(params_from_iter(params))?)
    }
}

/// Runs DDL statements in the given order.
///
/// Creates fail with a schema error when a referenced table does not exist yet.
fn execute_ddl<'a>(
    conn: &Connection,
    statements: impl IntoIterator<Item = &'a Statement>,
) -> Result<()> {
    for statement in statements {
        if let (StatementKind::Create, Some(table)) = (statement.kind, statement.table) {
            table.ensure_references_exist(conn)?;
        }
        conn.execute(&statement.sql, [])?;
        debug!("Executed {}", statement.name);
    }
    Ok(())
}

impl WarehouseStore for SqliteWarehouseStore {
    fn create_tables(&self) -> Result<()> {
        let conn = self.conn()?;
        execute_ddl(&conn, self.catalog.create_table_queries())?;
        info!(
            "Created {} warehouse tables",
            self.catalog.create_table_queries().len()
        );
        Ok(())
    }

    fn drop_tables(&self) -> Result<()> {
        let conn = self.conn()?;
        execute_ddl(&conn, self.catalog.drop_table_queries())?;
        info!(
            "Dropped {} warehouse tables",
            self.catalog.drop_table_queries().len()
        );
        Ok(())
    }

    fn reset(&self) -> Result<()> {
        self.drop_tables()?;
        self.create_tables()
    }

    fn validate(&self) -> Result<()> {
        let conn = self.conn()?;
        validate_schema(&conn, &CREATE_ORDER)?;
        info!("Warehouse schema is valid");
        Ok(())
    }

    fn upsert_user(&self, user: &UserRecord) -> Result<bool> {
        let conn = self.conn()?;
        Ok(Self::insert(&conn, self.catalog.user_table_insert(), user)? > 0)
    }

    fn upsert_song(&self, song: &SongRecord) -> Result<bool> {
        let conn = self.conn()?;
        Ok(Self::insert(&conn, self.catalog.song_table_insert(), song)? > 0)
    }

    fn upsert_artist(&self, artist: &ArtistRecord) -> Result<bool> {
        let conn = self.conn()?;
        Ok(Self::insert(&conn, self.catalog.artist_table_insert(), artist)? > 0)
    }

    fn upsert_time(&self, time: &TimeRecord) -> Result<bool> {
        let conn = self.conn()?;
        Ok(Self::insert(&conn, self.catalog.time_table_insert(), time)? > 0)
    }

    fn insert_songplay(&self, songplay: &SongplayRecord) -> Result<i64> {
        let conn = self.conn()?;
        Self::insert(&conn, self.catalog.songplay_table_insert(), songplay)?;
        Ok(conn.last_insert_rowid())
    }

    fn find_song(&self, title: &str, artist_name: &str, duration: f64) -> Result<Vec<SongMatch>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(&self.catalog.song_select().sql)?;
        let matches = stmt
            .query_map(params![title, artist_name, duration], |row| {
                Ok(SongMatch {
                    song_id: row.get(0)?,
                    artist_id: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if matches.is_empty() {
            debug!(
                "No song matches title {:?} by {:?} ({}s)",
                title, artist_name, duration
            );
        }
        Ok(matches)
    }

    fn table_row_count(&self, table: &str) -> Result<i64> {
        let table =
            table_by_name(table).ok_or_else(|| WarehouseError::UnknownTable(table.to_string()))?;
        let conn = self.conn()?;
        let count = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.name),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
