//! Assembles the data each listing page shows.

use sea_orm::{prelude::DateTimeWithTimeZone, DatabaseConnection};
use serde::Serialize;

use crate::db::entities::{artist, show, venue};
use crate::db::repositories::{ArtistRepository, ShowListingRow, ShowRepository, VenueRepository};
use crate::error::Result;
use crate::grouping::{group_by, group_by_composite, group_by_map, GroupRecord, Groups};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueSummary {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues sharing a city and state.
pub type Area = GroupRecord<String, VenueSummary>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    pub venue: venue::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub artist: artist::Model,
    pub genres: Vec<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
}

/// Shows starting after `now`, grouped by `key`.
fn upcoming_by<F>(shows: Vec<show::Model>, now: DateTimeWithTimeZone, key: F) -> Groups<i32, show::Model>
where
    F: FnMut(&show::Model) -> i32,
{
    group_by(shows.into_iter().filter(|s| s.start_time > now), key)
}

fn count_in(groups: &Groups<i32, show::Model>, id: i32) -> usize {
    groups.get(&id).map_or(0, |shows| shows.len())
}

/// Venues bucketed by `(city, state)`, in state then city order.
pub async fn venue_areas(db: &DatabaseConnection, now: DateTimeWithTimeZone) -> Result<Vec<Area>> {
    let venues = VenueRepository::new(db.clone()).list_by_location().await?;
    let shows = ShowRepository::new(db.clone()).list().await?;
    let upcoming = upcoming_by(shows, now, |s| s.venue_id);

    let areas = group_by_composite(
        venues,
        |v| vec![v.city.clone(), v.state.clone()],
        |v| VenueSummary {
            num_upcoming_shows: count_in(&upcoming, v.id),
            id: v.id,
            name: v.name,
        },
        &["city", "state"],
        "venues",
    )?;

    Ok(areas)
}

pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
    now: DateTimeWithTimeZone,
) -> Result<SearchResults> {
    let venues = VenueRepository::new(db.clone()).search_by_name(term).await?;
    let shows = ShowRepository::new(db.clone()).list().await?;
    let upcoming = upcoming_by(shows, now, |s| s.venue_id);

    let data: Vec<SearchResult> = venues
        .into_iter()
        .map(|v| SearchResult {
            num_upcoming_shows: count_in(&upcoming, v.id),
            id: v.id,
            name: v.name,
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
    now: DateTimeWithTimeZone,
) -> Result<SearchResults> {
    let artists = ArtistRepository::new(db.clone()).search_by_name(term).await?;
    let shows = ShowRepository::new(db.clone()).list().await?;
    let upcoming = upcoming_by(shows, now, |s| s.artist_id);

    let data: Vec<SearchResult> = artists
        .into_iter()
        .map(|a| SearchResult {
            num_upcoming_shows: count_in(&upcoming, a.id),
            id: a.id,
            name: a.name,
        })
        .collect();

    Ok(SearchResults {
        count: data.len(),
        data,
    })
}

pub async fn venue_detail(
    db: &DatabaseConnection,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<VenueDetail> {
    let venue = VenueRepository::new(db.clone()).get(id).await?;
    let shows = ShowRepository::new(db.clone()).for_venue(id).await?;

    let mut split = group_by_map(
        shows,
        |(show, _)| show.start_time < now,
        |(show, artist)| VenueShow {
            artist_id: artist.id,
            artist_name: artist.name,
            artist_image_link: artist.image_link,
            start_time: show.start_time,
        },
    );

    Ok(VenueDetail {
        genres: venue.genre_list(),
        venue,
        past_shows: split.take(&true),
        upcoming_shows: split.take(&false),
    })
}

pub async fn artist_detail(
    db: &DatabaseConnection,
    id: i32,
    now: DateTimeWithTimeZone,
) -> Result<ArtistDetail> {
    let artist = ArtistRepository::new(db.clone()).get(id).await?;
    let shows = ShowRepository::new(db.clone()).for_artist(id).await?;

    let mut split = group_by_map(
        shows,
        |(show, _)| show.start_time < now,
        |(show, venue)| ArtistShow {
            venue_id: venue.id,
            venue_name: venue.name,
            venue_image_link: venue.image_link,
            start_time: show.start_time,
        },
    );

    Ok(ArtistDetail {
        genres: artist.genre_list(),
        artist,
        past_shows: split.take(&true),
        upcoming_shows: split.take(&false),
    })
}

pub async fn show_listing(db: &DatabaseConnection) -> Result<Vec<ShowListingRow>> {
    ShowRepository::new(db.clone()).list_with_names().await
}
