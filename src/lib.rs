//! Songplay Warehouse
//!
//! Schema and statement catalog for the songplays star schema: one fact
//! table (`songplays`) and four dimensions (`users`, `songs`, `artists`,
//! `time`). A thin sqlite store provisions the schema and runs the catalog
//! statements.

pub mod config;
pub mod dialect;
pub mod models;
pub mod schema;
pub mod statements;
pub mod warehouse_store;

// Re-export commonly used types for convenience
pub use dialect::Dialect;
pub use statements::{Statement, StatementCatalog, StatementKind};
pub use warehouse_store::{SqliteWarehouseStore, WarehouseError, WarehouseStore};
