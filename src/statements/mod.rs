//! The statement catalog: every DDL and DML statement of the warehouse,
//! rendered once per dialect and shared process-wide.
//!
//! `drop_table_queries` and `create_table_queries` are the two ordered
//! lists a runner iterates to tear down or provision the schema. Inserts
//! bind positionally, in the column order of their `INSERT INTO` clause.

mod builder;

use crate::dialect::Dialect;
use crate::schema::{
    Table, ARTISTS_TABLE, CREATE_ORDER, DROP_ORDER, SONGPLAYS_TABLE, SONGS_TABLE, TIME_TABLE,
    USERS_TABLE,
};
use lazy_static::lazy_static;
use serde::Serialize;

pub use builder::{create_statement, drop_statement, insert_statement, song_select_statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Drop,
    Create,
    Insert,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Logical name, e.g. `user_table_insert` or `song_select`.
    pub name: String,
    pub kind: StatementKind,
    /// Table the statement is about; `None` for joins.
    #[serde(skip)]
    pub table: Option<&'static Table>,
    pub sql: String,
    /// Number of positional parameters.
    pub arity: usize,
}

#[derive(Debug)]
pub struct StatementCatalog {
    dialect: Dialect,
    drop_table_queries: Vec<Statement>,
    create_table_queries: Vec<Statement>,
    songplay_table_insert: Statement,
    user_table_insert: Statement,
    song_table_insert: Statement,
    artist_table_insert: Statement,
    time_table_insert: Statement,
    song_select: Statement,
}

lazy_static! {
    static ref POSTGRES_CATALOG: StatementCatalog =
        StatementCatalog::for_dialect(Dialect::Postgres);
    static ref SQLITE_CATALOG: StatementCatalog = StatementCatalog::for_dialect(Dialect::Sqlite);
}

impl StatementCatalog {
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            dialect,
            drop_table_queries: DROP_ORDER.iter().copied().map(drop_statement).collect(),
            create_table_queries: CREATE_ORDER
                .iter()
                .copied()
                .map(|t| create_statement(t, dialect))
                .collect(),
            songplay_table_insert: insert_statement(&SONGPLAYS_TABLE, dialect),
            user_table_insert: insert_statement(&USERS_TABLE, dialect),
            song_table_insert: insert_statement(&SONGS_TABLE, dialect),
            artist_table_insert: insert_statement(&ARTISTS_TABLE, dialect),
            time_table_insert: insert_statement(&TIME_TABLE, dialect),
            song_select: song_select_statement(dialect),
        }
    }

    /// The shared catalog for `dialect`.
    pub fn of(dialect: Dialect) -> &'static StatementCatalog {
        match dialect {
            Dialect::Postgres => &*POSTGRES_CATALOG,
            Dialect::Sqlite => &*SQLITE_CATALOG,
        }
    }

    pub fn postgres() -> &'static StatementCatalog {
        Self::of(Dialect::Postgres)
    }

    pub fn sqlite() -> &'static StatementCatalog {
        Self::of(Dialect::Sqlite)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Idempotent drops, fact table first.
    pub fn drop_table_queries(&self) -> &[Statement] {
        &self.drop_table_queries
    }

    /// Idempotent creates, dimensions before the fact table.
    pub fn create_table_queries(&self) -> &[Statement] {
        &self.create_table_queries
    }

    pub fn songplay_table_insert(&self) -> &Statement {
        &self.songplay_table_insert
    }

    pub fn user_table_insert(&self) -> &Statement {
        &self.user_table_insert
    }

    pub fn song_table_insert(&self) -> &Statement {
        &self.song_table_insert
    }

    pub fn artist_table_insert(&self) -> &Statement {
        &self.artist_table_insert
    }

    pub fn time_table_insert(&self) -> &Statement {
        &self.time_table_insert
    }

    pub fn song_select(&self) -> &Statement {
        &self.song_select
    }

    /// Inserts and upserts, fact table first.
    pub fn insert_queries(&self) -> [&Statement; 5] {
        [
            &self.songplay_table_insert,
            &self.user_table_insert,
            &self.song_table_insert,
            &self.artist_table_insert,
            &self.time_table_insert,
        ]
    }

    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.drop_table_queries
            .iter()
            .chain(self.create_table_queries.iter())
            .chain(self.insert_queries())
            .chain(std::iter::once(&self.song_select))
    }

    pub fn get(&self, name: &str) -> Option<&Statement> {
        self.statements().find(|s| s.name == name)
    }
}
