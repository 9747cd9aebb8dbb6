//! Test utilities for Fyyur
//!
//! Provides helpers for creating isolated test environments with:
//! - In-memory SQLite databases (one per test)
//! - AppState factories
//! - Test data generators

use chrono::{Duration, Utc};
use migration::MigratorTrait;
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveModelTrait, Database, DatabaseConnection, Set};

use crate::{
    config::{Config, LogFormat},
    db::{
        entities::{artist, encode_genres, show, venue},
        enums::Catalog,
    },
    state::AppState,
};

/// Setup an in-memory SQLite database with all migrations applied
///
/// Each call creates a fresh, isolated database perfect for parallel testing
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Create a test configuration with sensible defaults
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 5000,
        log_format: LogFormat::Pretty,
        static_dir: "static".to_string(),
    }
}

/// Create a complete test AppState with an isolated database
pub async fn setup_test_app_state() -> AppState {
    let db = setup_test_db().await;
    AppState::new(db, test_config(), Catalog::standard())
}

/// A point in time `days` from now; negative for the past.
pub fn days_from_now(days: i64) -> DateTimeWithTimeZone {
    (Utc::now() + Duration::days(days)).into()
}

// ============================================================================
// Test Data Factories
// ============================================================================

/// Create a test venue in the database
pub async fn create_test_venue(
    db: &DatabaseConnection,
    name: &str,
    city: &str,
    state: &str,
) -> venue::Model {
    let now = Utc::now().into();
    let venue = venue::ActiveModel {
        name: Set(name.to_string()),
        city: Set(city.to_string()),
        state: Set(state.to_string()),
        address: Set("1015 Folsom Street".to_string()),
        phone: Set("123-123-1234".to_string()),
        image_link: Set(None),
        facebook_link: Set(None),
        website_link: Set(None),
        genres: Set(encode_genres(&["Jazz".to_string()])),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    venue.insert(db).await.expect("Failed to insert test venue")
}

/// Create a test artist in the database
pub async fn create_test_artist(db: &DatabaseConnection, name: &str) -> artist::Model {
    let now = Utc::now().into();
    let artist = artist::ActiveModel {
        name: Set(name.to_string()),
        city: Set("San Francisco".to_string()),
        state: Set("CA".to_string()),
        phone: Set("326-123-5000".to_string()),
        image_link: Set(None),
        facebook_link: Set(None),
        website_link: Set(None),
        genres: Set(encode_genres(&["Rock n Roll".to_string()])),
        seeking_venue: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    artist.insert(db).await.expect("Failed to insert test artist")
}

/// Create a test show in the database
pub async fn create_test_show(
    db: &DatabaseConnection,
    venue_id: i32,
    artist_id: i32,
    start_time: DateTimeWithTimeZone,
) -> show::Model {
    let show = show::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };

    show.insert(db).await.expect("Failed to insert test show")
}
