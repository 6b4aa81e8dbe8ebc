//! The songplays fact table and its four dimension tables.

use super::{ForeignKey, SqlType, Table};
use crate::table_column;

// =============================================================================
// Dimension tables
// =============================================================================

/// Users of the streaming app, keyed by the app's user id.
pub static USERS_TABLE: Table = Table {
    name: "users",
    entity: "user",
    columns: &[
        table_column!("id", SqlType::Serial, is_primary_key = true),
        table_column!("user_id", SqlType::Integer),
        table_column!("first_name", SqlType::Varchar),
        table_column!("last_name", SqlType::Varchar),
        table_column!("gender", SqlType::Char(1)),
        table_column!("level", SqlType::Varchar), // "free" or "paid"
    ],
    unique_constraints: &[&["user_id"]],
};

pub static SONGS_TABLE: Table = Table {
    name: "songs",
    entity: "song",
    columns: &[
        table_column!("id", SqlType::Serial, is_primary_key = true),
        table_column!("song_id", SqlType::Varchar),
        table_column!("title", SqlType::Varchar),
        table_column!("artist_id", SqlType::Varchar),
        table_column!("year", SqlType::Integer),
        table_column!("duration", SqlType::Numeric), // seconds
    ],
    unique_constraints: &[&["song_id"]],
};

pub static ARTISTS_TABLE: Table = Table {
    name: "artists",
    entity: "artist",
    columns: &[
        table_column!("id", SqlType::Serial, is_primary_key = true),
        table_column!("artist_id", SqlType::Varchar),
        table_column!("name", SqlType::Varchar),
        table_column!("location", SqlType::Varchar),
        table_column!("latitude", SqlType::Real),
        table_column!("longitude", SqlType::Real),
    ],
    unique_constraints: &[&["artist_id"]],
};

/// One row per distinct play timestamp, broken down into calendar units.
pub static TIME_TABLE: Table = Table {
    name: "time",
    entity: "time",
    columns: &[
        table_column!("id", SqlType::Serial, is_primary_key = true),
        table_column!("start_time", SqlType::BigInt), // epoch millis
        table_column!("hour", SqlType::SmallInt),
        table_column!("day", SqlType::SmallInt),
        table_column!("week", SqlType::SmallInt),
        table_column!("month", SqlType::SmallInt),
        table_column!("year", SqlType::SmallInt),
        table_column!("weekday", SqlType::SmallInt),
    ],
    unique_constraints: &[&["start_time"]],
};

// =============================================================================
// Fact table
// =============================================================================

/// Append-only play events. There is no dedup key, replaying an event adds a row.
pub static SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    entity: "songplay",
    columns: &[
        table_column!("songplay_id", SqlType::Serial, is_primary_key = true),
        table_column!("start_time", SqlType::BigInt),
        table_column!(
            "user_id",
            SqlType::Integer,
            foreign_key = Some(ForeignKey {
                foreign_table: "users",
                foreign_column: "user_id",
            })
        ),
        table_column!("level", SqlType::Varchar),
        table_column!(
            "song_id",
            SqlType::Varchar,
            foreign_key = Some(ForeignKey {
                foreign_table: "songs",
                foreign_column: "song_id",
            })
        ),
        table_column!(
            "artist_id",
            SqlType::Varchar,
            foreign_key = Some(ForeignKey {
                foreign_table: "artists",
                foreign_column: "artist_id",
            })
        ),
        table_column!("session_id", SqlType::Integer),
        table_column!("location", SqlType::Varchar),
        table_column!("user_agent", SqlType::Varchar),
    ],
    unique_constraints: &[],
};

/// Dimensions first: songplays references users, songs and artists.
pub static CREATE_ORDER: [&Table; 5] = [
    &USERS_TABLE,
    &SONGS_TABLE,
    &ARTISTS_TABLE,
    &TIME_TABLE,
    &SONGPLAYS_TABLE,
];

pub static DROP_ORDER: [&Table; 5] = [
    &SONGPLAYS_TABLE,
    &USERS_TABLE,
    &SONGS_TABLE,
    &ARTISTS_TABLE,
    &TIME_TABLE,
];

pub fn table_by_name(name: &str) -> Option<&'static Table> {
    CREATE_ORDER.iter().copied().find(|t| t.name == name)
}
