//! Shared constants for end-to-end tests

// ============================================================================
// Test Catalog IDs
// ============================================================================

/// Artist ID for "The Beatles"
pub const ARTIST_1_ID: &str = "AR5KOSW1187FB35FF4";
pub const ARTIST_1_NAME: &str = "The Beatles";

/// Artist ID for "Elena"
pub const ARTIST_2_ID: &str = "ARD7TVE1187B99BFB1";
pub const ARTIST_2_NAME: &str = "Elena";

/// "Hey Jude" by The Beatles
pub const SONG_1_ID: &str = "SOUYDPQ12A6D4F9B7B";
pub const SONG_1_TITLE: &str = "Hey Jude";
pub const SONG_1_DURATION: f64 = 183.5;

/// "Setanta matins" by Elena
pub const SONG_2_ID: &str = "SOZCTXZ12AB0182364";
pub const SONG_2_TITLE: &str = "Setanta matins";
pub const SONG_2_DURATION: f64 = 269.58322;

// ============================================================================
// Test Users
// ============================================================================

pub const USER_1_ID: i64 = 7;
pub const USER_2_ID: i64 = 8;

/// 2018-11-02T01:25:34.796Z
pub const PLAY_1_START_TIME: i64 = 1541121934796;
