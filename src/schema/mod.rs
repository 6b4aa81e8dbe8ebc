//! Typed table definitions for the songplays star schema.
//!
//! DDL for every dialect is rendered from these definitions, and a live
//! sqlite database can be validated against them.

mod table;
mod warehouse;

pub use table::{check_creation_order, validate_schema, Column, ForeignKey, SqlType, Table};
pub use warehouse::{
    table_by_name, ARTISTS_TABLE, CREATE_ORDER, DROP_ORDER, SONGPLAYS_TABLE, SONGS_TABLE,
    TIME_TABLE, USERS_TABLE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Table {0} does not exist")]
    MissingTable(&'static str),

    #[error("Table {table} references {referenced}, which has not been created yet")]
    MissingReferencedTable {
        table: &'static str,
        referenced: &'static str,
    },

    #[error("Table {table} has {actual} columns, expected {expected}. Found column names: {found}")]
    ColumnCountMismatch {
        table: &'static str,
        expected: usize,
        actual: usize,
        found: String,
    },

    #[error("Table {table} column name mismatch: expected {expected}, got {actual}")]
    ColumnNameMismatch {
        table: &'static str,
        expected: &'static str,
        actual: String,
    },

    #[error("Table {table} column {column} type mismatch: expected {expected}, got {actual}")]
    ColumnTypeMismatch {
        table: &'static str,
        column: &'static str,
        expected: String,
        actual: String,
    },

    #[error("Table {table} column {column} primary key mismatch: expected {expected}, got {actual}")]
    PrimaryKeyMismatch {
        table: &'static str,
        column: &'static str,
        expected: bool,
        actual: bool,
    },

    #[error("Table {table} is missing unique constraint on columns ({columns})")]
    MissingUniqueConstraint {
        table: &'static str,
        columns: String,
    },

    #[error("Table {table} column {column} is missing foreign key: expected {expected}")]
    MissingForeignKey {
        table: &'static str,
        column: &'static str,
        expected: String,
    },

    #[error("Table {table} column {column} has foreign key mismatch: expected {expected}, got {actual}")]
    ForeignKeyMismatch {
        table: &'static str,
        column: &'static str,
        expected: String,
        actual: String,
    },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}
