//! Row records for the warehouse tables.
//!
//! Field order of each record is the positional parameter order of the
//! matching insert statement.

use rusqlite::{params, ToSql};
use serde::{Deserialize, Serialize};

/// Values bound to an insert, in the column order of its `INSERT INTO` clause.
pub trait InsertRecord {
    fn params(&self) -> Vec<&dyn ToSql>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Single character, e.g. "F" or "M".
    pub gender: Option<String>,
    pub level: Option<String>,
}

impl InsertRecord for UserRecord {
    fn params(&self) -> Vec<&dyn ToSql> {
        params![
            self.user_id,
            self.first_name,
            self.last_name,
            self.gender,
            self.level,
        ]
        .to_vec()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

impl InsertRecord for SongRecord {
    fn params(&self) -> Vec<&dyn ToSql> {
        params![
            self.song_id,
            self.title,
            self.artist_id,
            self.year,
            self.duration,
        ]
        .to_vec()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl InsertRecord for ArtistRecord {
    fn params(&self) -> Vec<&dyn ToSql> {
        params![
            self.artist_id,
            self.name,
            self.location,
            self.latitude,
            self.longitude,
        ]
        .to_vec()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub start_time: i64,
    pub hour: i16,
    pub day: i16,
    pub week: i16,
    pub month: i16,
    pub year: i16,
    pub weekday: i16,
}

impl InsertRecord for TimeRecord {
    fn params(&self) -> Vec<&dyn ToSql> {
        params![
            self.start_time,
            self.hour,
            self.day,
            self.week,
            self.month,
            self.year,
            self.weekday,
        ]
        .to_vec()
    }
}

/// A single play event. `song_id` and `artist_id` stay `None` when the
/// song lookup found no match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongplayRecord {
    pub start_time: i64,
    pub user_id: i64,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl InsertRecord for SongplayRecord {
    fn params(&self) -> Vec<&dyn ToSql> {
        params![
            self.start_time,
            self.user_id,
            self.level,
            self.song_id,
            self.artist_id,
            self.session_id,
            self.location,
            self.user_agent,
        ]
        .to_vec()
    }
}

/// A row returned by the song lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongMatch {
    pub song_id: String,
    pub artist_id: String,
}
