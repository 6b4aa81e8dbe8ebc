use super::SchemaError;
use crate::dialect::Dialect;
use rusqlite::{params, Connection};
use std::collections::HashSet;

#[macro_export]
macro_rules! table_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Only mutated when optional field assignments are passed
            #[allow(unused_mut)]
            let mut column = $crate::schema::Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                foreign_key: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    /// Auto-generated integer identity.
    Serial,
    SmallInt,
    Integer,
    BigInt,
    Varchar,
    Char(u8),
    Numeric,
    Real,
}

impl SqlType {
    pub fn render(&self, dialect: Dialect) -> String {
        match (self, dialect) {
            (SqlType::Serial, Dialect::Postgres) => "SERIAL".to_string(),
            // INTEGER PRIMARY KEY aliases the rowid, which sqlite assigns on insert
            (SqlType::Serial, Dialect::Sqlite) => "INTEGER".to_string(),
            (SqlType::SmallInt, _) => "SMALLINT".to_string(),
            (SqlType::Integer, _) => "INTEGER".to_string(),
            (SqlType::BigInt, _) => "BIGINT".to_string(),
            (SqlType::Varchar, _) => "VARCHAR".to_string(),
            (SqlType::Char(len), _) => format!("CHAR({})", len),
            (SqlType::Numeric, _) => "NUMERIC".to_string(),
            (SqlType::Real, _) => "REAL".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
}

impl ForeignKey {
    fn render(&self) -> String {
        format!("REFERENCES {} ({})", self.foreign_table, self.foreign_column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: SqlType,
    pub is_primary_key: bool,
    pub foreign_key: Option<ForeignKey>,
}

impl Column {
    /// Surrogate columns are filled in by the engine and never bound by inserts.
    pub fn is_generated(&self) -> bool {
        self.sql_type == SqlType::Serial
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    /// Singular entity name used to derive statement names (`user_table_insert`).
    pub entity: &'static str,
    pub columns: &'static [Column],
    pub unique_constraints: &'static [&'static [&'static str]],
}

impl Table {
    pub fn create_sql(&self, dialect: Dialect) -> String {
        let mut create_sql = format!("CREATE TABLE IF NOT EXISTS {} (", self.name);
        for (column_index, column) in self.columns.iter().enumerate() {
            if column_index > 0 {
                create_sql.push_str(", ");
            }
            create_sql.push_str(&format!(
                "{} {}",
                column.name,
                column.sql_type.render(dialect)
            ));
            if column.is_primary_key {
                create_sql.push_str(" PRIMARY KEY");
            }
            if let Some(foreign_key) = &column.foreign_key {
                create_sql.push(' ');
                create_sql.push_str(&foreign_key.render());
            }
        }
        for unique_constraint in self.unique_constraints {
            create_sql.push_str(&format!(", UNIQUE ({})", unique_constraint.join(", ")));
        }
        create_sql.push_str(");");
        create_sql
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP TABLE IF EXISTS {};", self.name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns an insert binds, in declaration order.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| !c.is_generated())
    }

    /// The business key: the first single-column unique constraint.
    pub fn natural_key(&self) -> Option<&'static str> {
        self.unique_constraints
            .iter()
            .find(|constraint| constraint.len() == 1)
            .map(|constraint| constraint[0])
    }

    pub fn referenced_tables(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.foreign_key.map(|fk| fk.foreign_table))
            .filter(move |foreign_table| *foreign_table != self.name)
    }

    pub fn exists(conn: &Connection, name: &str) -> Result<bool, SchemaError> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Fails if any table this one references is not there yet.
    ///
    /// PostgreSQL rejects such a CREATE TABLE outright, sqlite only notices
    /// on the first write, so the check is done up front.
    pub fn ensure_references_exist(&self, conn: &Connection) -> Result<(), SchemaError> {
        for referenced in self.referenced_tables() {
            if !Table::exists(conn, referenced)? {
                return Err(SchemaError::MissingReferencedTable {
                    table: self.name,
                    referenced,
                });
            }
        }
        Ok(())
    }
}

/// Checks that every foreign key target precedes its referrer in `tables`.
pub fn check_creation_order(tables: &[&Table]) -> Result<(), SchemaError> {
    let mut created: HashSet<&str> = HashSet::new();
    for table in tables {
        if let Some(referenced) = table
            .referenced_tables()
            .find(|referenced| !created.contains(referenced))
        {
            return Err(SchemaError::MissingReferencedTable {
                table: table.name,
                referenced,
            });
        }
        created.insert(table.name);
    }
    Ok(())
}

/// Compares the live sqlite schema with the given definitions.
pub fn validate_schema(conn: &Connection, tables: &[&Table]) -> Result<(), SchemaError> {
    for table in tables {
        validate_table(conn, table)?;
    }
    Ok(())
}

struct ActualColumn {
    name: String,
    declared_type: String,
    is_primary_key: bool,
}

struct ActualForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

fn validate_table(conn: &Connection, table: &Table) -> Result<(), SchemaError> {
    if !Table::exists(conn, table.name)? {
        return Err(SchemaError::MissingTable(table.name));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({});", table.name))?;
    let actual_columns = stmt
        .query_map([], |row| {
            Ok(ActualColumn {
                name: row.get(1)?,
                declared_type: row.get(2)?,
                is_primary_key: row.get::<_, i32>(5)? > 0,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    if actual_columns.len() != table.columns.len() {
        return Err(SchemaError::ColumnCountMismatch {
            table: table.name,
            expected: table.columns.len(),
            actual: actual_columns.len(),
            found: actual_columns
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    for (actual, expected) in actual_columns.iter().zip(table.columns.iter()) {
        if actual.name != expected.name {
            return Err(SchemaError::ColumnNameMismatch {
                table: table.name,
                expected: expected.name,
                actual: actual.name.clone(),
            });
        }
        let expected_type = expected.sql_type.render(Dialect::Sqlite);
        if !actual.declared_type.eq_ignore_ascii_case(&expected_type) {
            return Err(SchemaError::ColumnTypeMismatch {
                table: table.name,
                column: expected.name,
                expected: expected_type,
                actual: actual.declared_type.clone(),
            });
        }
        if actual.is_primary_key != expected.is_primary_key {
            return Err(SchemaError::PrimaryKeyMismatch {
                table: table.name,
                column: expected.name,
                expected: expected.is_primary_key,
                actual: actual.is_primary_key,
            });
        }
    }

    // sqlite keeps UNIQUE constraints as unique indices
    if !table.unique_constraints.is_empty() {
        let mut stmt = conn.prepare(&format!("PRAGMA index_list({})", table.name))?;
        let unique_indices: Vec<String> = stmt
            .query_map([], |row| {
                let name: String = row.get(1)?;
                let is_unique: i32 = row.get(2)?;
                Ok((name, is_unique))
            })?
            .filter_map(|r| r.ok())
            .filter(|(_, is_unique)| *is_unique == 1)
            .map(|(name, _)| name)
            .collect();

        let mut unique_index_columns: Vec<Vec<String>> = Vec::new();
        for index_name in &unique_indices {
            let mut idx_stmt = conn.prepare(&format!("PRAGMA index_info({})", index_name))?;
            let mut cols: Vec<String> = idx_stmt
                .query_map([], |row| row.get::<_, String>(2))?
                .filter_map(|r| r.ok())
                .collect();
            cols.sort();
            unique_index_columns.push(cols);
        }

        for expected_columns in table.unique_constraints {
            let mut expected_sorted: Vec<&str> = expected_columns.to_vec();
            expected_sorted.sort();
            let found = unique_index_columns.iter().any(|actual_cols| {
                actual_cols.iter().map(|s| s.as_str()).eq(expected_sorted.iter().copied())
            });
            if !found {
                return Err(SchemaError::MissingUniqueConstraint {
                    table: table.name,
                    columns: expected_columns.join(", "),
                });
            }
        }
    }

    // PRAGMA foreign_key_list returns: id, seq, table, from, to, on_update, on_delete, match
    let mut fk_stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", table.name))?;
    let actual_fks: Vec<ActualForeignKey> = fk_stmt
        .query_map([], |row| {
            Ok(ActualForeignKey {
                from_column: row.get(3)?,
                to_table: row.get(2)?,
                to_column: row.get(4)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    for column in table.columns {
        let Some(expected_fk) = &column.foreign_key else {
            continue;
        };
        let found = actual_fks.iter().any(|actual| {
            actual.from_column == column.name
                && actual.to_table == expected_fk.foreign_table
                && actual.to_column == expected_fk.foreign_column
        });
        if found {
            continue;
        }
        let expected = expected_fk.render();
        return match actual_fks.iter().find(|a| a.from_column == column.name) {
            Some(actual) => Err(SchemaError::ForeignKeyMismatch {
                table: table.name,
                column: column.name,
                expected,
                actual: format!("REFERENCES {} ({})", actual.to_table, actual.to_column),
            }),
            None => Err(SchemaError::MissingForeignKey {
                table: table.name,
                column: column.name,
                expected,
            }),
        };
    }

    Ok(())
}
