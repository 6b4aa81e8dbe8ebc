use super::{Statement, StatementKind};
use crate::dialect::Dialect;
use crate::schema::{Table, ARTISTS_TABLE, SONGS_TABLE};

pub fn drop_statement(table: &'static Table) -> Statement {
    Statement {
        name: format!("{}_table_drop", table.entity),
        kind: StatementKind::Drop,
        table: Some(table),
        sql: table.drop_sql(),
        arity: 0,
    }
}

pub fn create_statement(table: &'static Table, dialect: Dialect) -> Statement {
    Statement {
        name: format!("{}_table_create", table.entity),
        kind: StatementKind::Create,
        table: Some(table),
        sql: table.create_sql(dialect),
        arity: 0,
    }
}

/// Binds every non-generated column. Tables with a natural key get
/// `ON CONFLICT (<key>) DO NOTHING`, so the first write wins.
pub fn insert_statement(table: &'static Table, dialect: Dialect) -> Statement {
    let columns: Vec<&str> = table.insertable_columns().map(|c| c.name).collect();
    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table.name,
        columns.join(", "),
        dialect.placeholders(columns.len())
    );
    if let Some(natural_key) = table.natural_key() {
        sql.push_str(&format!(" ON CONFLICT ({}) DO NOTHING", natural_key));
    }
    sql.push(';');

    Statement {
        name: format!("{}_table_insert", table.entity),
        kind: StatementKind::Insert,
        table: Some(table),
        sql,
        arity: columns.len(),
    }
}

/// Resolves (title, artist name, duration) to `(song_id, artist_id)` rows.
pub fn song_select_statement(dialect: Dialect) -> Statement {
    let sql = format!(
        "SELECT s.song_id, s.artist_id FROM {songs} s \
         JOIN {artists} a ON s.artist_id = a.artist_id \
         WHERE s.title = {} AND a.name = {} AND s.duration = {};",
        dialect.placeholder(1),
        dialect.placeholder(2),
        dialect.placeholder(3),
        songs = SONGS_TABLE.name,
        artists = ARTISTS_TABLE.name,
    );
    Statement {
        name: "song_select".to_string(),
        kind: StatementKind::Select,
        table: None,
        sql,
        arity: 3,
    }
}
