//! Database integration tests
//!
//! Exercises the repositories against a migrated in-memory database:
//! - Venues, artists and shows can be created and read back
//! - Foreign keys reject shows that reference missing rows
//! - Deleting a venue takes its shows with it
//! - Name search is case-insensitive

use chrono::Utc;
use fyyur::db::entities::{show, venue};
use fyyur::db::repositories::{ArtistRepository, ShowRepository, VenueRepository};
use fyyur::error::AppError;
use fyyur::forms::{ArtistForm, ShowForm, VenueForm};
use fyyur::test_utils::*;
use pretty_assertions::assert_eq;
use sea_orm::{prelude::DateTimeWithTimeZone, ActiveModelTrait, EntityTrait, Set};

fn musical_hop() -> VenueForm {
    VenueForm {
        name: "The Musical Hop".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: "123-123-1234".to_string(),
        image_link: None,
        facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
        website_link: Some("https://www.themusicalhop.com".to_string()),
        genres: vec!["Jazz".to_string(), "Reggae".to_string()],
        seeking_talent: true,
        seeking_description: Some("We are on the lookout for a local artist".to_string()),
    }
}

fn guns_n_petals() -> ArtistForm {
    ArtistForm {
        name: "Guns N Petals".to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: "326-123-5000".to_string(),
        image_link: None,
        facebook_link: None,
        website_link: None,
        genres: vec!["Rock n Roll".to_string()],
        seeking_venue: true,
        seeking_description: None,
    }
}

#[tokio::test]
async fn test_create_venue() {
    let db = setup_test_db().await;
    let repo = VenueRepository::new(db.clone());

    let venue = repo.create(musical_hop()).await.unwrap();

    assert!(venue.id > 0);
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.genre_list(), vec!["Jazz".to_string(), "Reggae".to_string()]);
    assert!(venue.seeking_talent);
    assert!(venue.created_at.timestamp() > 0);

    let fetched = repo.get(venue.id).await.unwrap();
    assert_eq!(fetched, venue);
}

#[tokio::test]
async fn test_get_missing_venue_is_not_found() {
    let db = setup_test_db().await;

    let result = VenueRepository::new(db).get(42).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_update_venue_overwrites_fields() {
    let db = setup_test_db().await;
    let repo = VenueRepository::new(db.clone());
    let venue = repo.create(musical_hop()).await.unwrap();

    let mut changed = musical_hop();
    changed.name = "The Dueling Pianos Bar".to_string();
    changed.city = "New York".to_string();
    changed.state = "NY".to_string();
    changed.genres = vec!["Classical".to_string()];
    changed.seeking_talent = false;
    changed.seeking_description = None;

    let updated = repo.update(venue.id, changed).await.unwrap();

    assert_eq!(updated.id, venue.id);
    assert_eq!(updated.name, "The Dueling Pianos Bar");
    assert_eq!(updated.state, "NY");
    assert_eq!(updated.genre_list(), vec!["Classical".to_string()]);
    assert!(!updated.seeking_talent);
    assert_eq!(updated.seeking_description, None);
    assert_eq!(updated.created_at, venue.created_at);
}

#[tokio::test]
async fn test_update_missing_artist_is_not_found() {
    let db = setup_test_db().await;

    let result = ArtistRepository::new(db).update(7, guns_n_petals()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_show_requires_existing_venue() {
    let db = setup_test_db().await;
    let artist = create_test_artist(&db, "Guns N Petals").await;

    let result = ShowRepository::new(db.clone())
        .create(ShowForm {
            artist_id: artist.id,
            venue_id: 99999,
            start_time: days_from_now(1),
        })
        .await;

    assert!(result.is_err(), "Show with a missing venue should be rejected");
    let shows = show::Entity::find().all(&db).await.unwrap();
    assert!(shows.is_empty());
}

#[tokio::test]
async fn test_delete_venue_removes_its_shows() {
    let db = setup_test_db().await;
    let hop = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let park = create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    create_test_show(&db, hop.id, artist.id, days_from_now(-10)).await;
    create_test_show(&db, hop.id, artist.id, days_from_now(10)).await;
    let kept = create_test_show(&db, park.id, artist.id, days_from_now(5)).await;

    VenueRepository::new(db.clone()).delete(hop.id).await.unwrap();

    assert!(venue::Entity::find_by_id(hop.id).one(&db).await.unwrap().is_none());
    let shows = show::Entity::find().all(&db).await.unwrap();
    assert_eq!(shows, vec![kept]);
}

#[tokio::test]
async fn test_delete_missing_venue_is_not_found() {
    let db = setup_test_db().await;

    let result = VenueRepository::new(db).delete(3).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let db = setup_test_db().await;
    create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    create_test_venue(&db, "The Dueling Pianos Bar", "New York", "NY").await;
    create_test_venue(&db, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

    let found = VenueRepository::new(db.clone()).search_by_name("Music").await.unwrap();
    let names: Vec<&str> = found.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["Park Square Live Music & Coffee", "The Musical Hop"]);

    let found = VenueRepository::new(db.clone()).search_by_name("hop").await.unwrap();
    assert_eq!(found.len(), 1);

    create_test_artist(&db, "Guns N Petals").await;
    create_test_artist(&db, "Matt Quevedo").await;
    create_test_artist(&db, "The Wild Sax Band").await;
    let found = ArtistRepository::new(db).search_by_name("A").await.unwrap();
    assert_eq!(found.len(), 3);
}

#[tokio::test]
async fn test_show_listing_carries_names() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;
    let when = days_from_now(2);
    create_test_show(&db, venue.id, artist.id, when).await;

    let rows = ShowRepository::new(db).list_with_names().await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].venue_name, "The Musical Hop");
    assert_eq!(rows[0].artist_name, "Guns N Petals");
    assert_eq!(rows[0].start_time.timestamp(), when.timestamp());
}

#[tokio::test]
async fn test_choices_list_existing_rows() {
    let db = setup_test_db().await;
    let venue = create_test_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
    let artist = create_test_artist(&db, "Guns N Petals").await;

    let choices = ShowRepository::new(db).choices().await.unwrap();

    assert_eq!(choices.artists, vec![(artist.id, "Guns N Petals".to_string())]);
    assert_eq!(choices.venues, vec![(venue.id, "The Musical Hop".to_string())]);
}

#[tokio::test]
async fn test_timestamps_are_set() {
    let db = setup_test_db().await;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let venue = venue::ActiveModel {
        name: Set("The Dueling Pianos Bar".to_string()),
        city: Set("New York".to_string()),
        state: Set("NY".to_string()),
        address: Set("335 Delancey Street".to_string()),
        phone: Set("914-003-1132".to_string()),
        image_link: Set(None),
        facebook_link: Set(None),
        website_link: Set(None),
        genres: Set("[]".to_string()),
        seeking_talent: Set(false),
        seeking_description: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    assert_eq!(venue.created_at.timestamp(), now.timestamp());
    assert!(venue.genre_list().is_empty());
}
