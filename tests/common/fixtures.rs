//! Record fixtures and store setup

use super::constants::*;
use songplay_warehouse::models::{
    ArtistRecord, SongRecord, SongplayRecord, TimeRecord, UserRecord,
};
use songplay_warehouse::{SqliteWarehouseStore, WarehouseStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// A warehouse file with every table created.
/// The temp dir must outlive the store.
pub fn create_test_warehouse() -> (TempDir, PathBuf, SqliteWarehouseStore) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("warehouse.db");
    let store = SqliteWarehouseStore::open(&db_path).unwrap();
    store.create_tables().unwrap();
    (dir, db_path, store)
}

pub fn user(user_id: i64, first_name: &str) -> UserRecord {
    UserRecord {
        user_id,
        first_name: Some(first_name.to_string()),
        last_name: Some("Williams".to_string()),
        gender: Some("F".to_string()),
        level: Some("free".to_string()),
    }
}

pub fn artist(artist_id: &str, name: &str) -> ArtistRecord {
    ArtistRecord {
        artist_id: artist_id.to_string(),
        name: name.to_string(),
        location: Some("Liverpool, England".to_string()),
        latitude: Some(53.41),
        longitude: Some(-2.99),
    }
}

pub fn song(song_id: &str, title: &str, artist_id: &str, duration: f64) -> SongRecord {
    SongRecord {
        song_id: song_id.to_string(),
        title: title.to_string(),
        artist_id: artist_id.to_string(),
        year: 1968,
        duration,
    }
}

pub fn time(start_time: i64) -> TimeRecord {
    TimeRecord {
        start_time,
        hour: 1,
        day: 2,
        week: 44,
        month: 11,
        year: 2018,
        weekday: 4,
    }
}

pub fn songplay(user_id: i64, song_id: Option<&str>, artist_id: Option<&str>) -> SongplayRecord {
    SongplayRecord {
        start_time: PLAY_1_START_TIME,
        user_id,
        level: Some("free".to_string()),
        song_id: song_id.map(str::to_string),
        artist_id: artist_id.map(str::to_string),
        session_id: 139,
        location: Some("Phoenix-Mesa-Scottsdale, AZ".to_string()),
        user_agent: Some("Mozilla/5.0 (Windows NT 6.1; WOW64)".to_string()),
    }
}

/// Loads two users, two artists, two songs and one timestamp.
pub fn seed_dimensions(store: &SqliteWarehouseStore) {
    store.upsert_user(&user(USER_1_ID, "Ann")).unwrap();
    store.upsert_user(&user(USER_2_ID, "Kaylee")).unwrap();
    store.upsert_artist(&artist(ARTIST_1_ID, ARTIST_1_NAME)).unwrap();
    store.upsert_artist(&artist(ARTIST_2_ID, ARTIST_2_NAME)).unwrap();
    store
        .upsert_song(&song(SONG_1_ID, SONG_1_TITLE, ARTIST_1_ID, SONG_1_DURATION))
        .unwrap();
    store
        .upsert_song(&song(SONG_2_ID, SONG_2_TITLE, ARTIST_2_ID, SONG_2_DURATION))
        .unwrap();
    store.upsert_time(&time(PLAY_1_START_TIME)).unwrap();
}
