//! Storage access for venues, artists and shows.
//!
//! Every write runs inside its own transaction: it is committed only after
//! the whole write succeeded, and dropping the transaction on an early
//! return rolls it back.

use sea_orm::{
    prelude::DateTimeWithTimeZone,
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};

use crate::db::entities::{artist, show, venue};
use crate::error::{AppError, Result};
use crate::forms::{ArtistForm, ShowChoices, ShowForm, VenueForm};

fn name_pattern(term: &str) -> String {
    format!("%{}%", term.trim().to_lowercase())
}

pub struct VenueRepository {
    db: DatabaseConnection,
}

impl VenueRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<venue::Model>> {
        Ok(venue::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<venue::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Venue"))
    }

    /// All venues ordered by state, then city, then name.
    pub async fn list_by_location(&self) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .order_by_asc(venue::Column::State)
            .order_by_asc(venue::Column::City)
            .order_by_asc(venue::Column::Name)
            .all(&self.db)
            .await?)
    }

    /// Case-insensitive substring match on the venue name.
    pub async fn search_by_name(&self, term: &str) -> Result<Vec<venue::Model>> {
        Ok(venue::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((venue::Entity, venue::Column::Name))))
                    .like(name_pattern(term)),
            )
            .order_by_asc(venue::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, form: VenueForm) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let venue = form.into_active_model().insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(venue_id = venue.id, "Venue created");
        Ok(venue)
    }

    /// Overwrite every editable field of an existing venue.
    pub async fn update(&self, id: i32, form: VenueForm) -> Result<venue::Model> {
        let txn = self.db.begin().await?;
        let existing = venue::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Venue"))?;

        let mut active: venue::ActiveModel = existing.into();
        form.apply_to(&mut active);
        let venue = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(venue_id = venue.id, "Venue updated");
        Ok(venue)
    }

    /// Delete a venue together with its shows.
    pub async fn delete(&self, id: i32) -> Result<()> {
        let txn = self.db.begin().await?;
        let existing = venue::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Venue"))?;

        let removed_shows = show::Entity::delete_many()
            .filter(show::Column::VenueId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;
        existing.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(venue_id = id, removed_shows, "Venue deleted");
        Ok(())
    }
}

pub struct ArtistRepository {
    db: DatabaseConnection,
}

impl ArtistRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<artist::Model>> {
        Ok(artist::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> Result<artist::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Artist"))
    }

    pub async fn list(&self) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .order_by_asc(artist::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn search_by_name(&self, term: &str) -> Result<Vec<artist::Model>> {
        Ok(artist::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col((artist::Entity, artist::Column::Name))))
                    .like(name_pattern(term)),
            )
            .order_by_asc(artist::Column::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn create(&self, form: ArtistForm) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let artist = form.into_active_model().insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(artist_id = artist.id, "Artist created");
        Ok(artist)
    }

    pub async fn update(&self, id: i32, form: ArtistForm) -> Result<artist::Model> {
        let txn = self.db.begin().await?;
        let existing = artist::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::not_found("Artist"))?;

        let mut active: artist::ActiveModel = existing.into();
        form.apply_to(&mut active);
        let artist = active.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(artist_id = artist.id, "Artist updated");
        Ok(artist)
    }
}

/// A show joined with the names needed to list it.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct ShowListingRow {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTimeWithTimeZone,
}

pub struct ShowRepository {
    db: DatabaseConnection,
}

impl ShowRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<show::Model>> {
        Ok(show::Entity::find()
            .order_by_asc(show::Column::StartTime)
            .all(&self.db)
            .await?)
    }

    pub async fn list_with_names(&self) -> Result<Vec<ShowListingRow>> {
        Ok(show::Entity::find()
            .select_only()
            .column(show::Column::VenueId)
            .column_as(venue::Column::Name, "venue_name")
            .column(show::Column::ArtistId)
            .column_as(artist::Column::Name, "artist_name")
            .column_as(artist::Column::ImageLink, "artist_image_link")
            .column(show::Column::StartTime)
            .join(JoinType::InnerJoin, show::Relation::Venue.def())
            .join(JoinType::InnerJoin, show::Relation::Artist.def())
            .order_by_asc(show::Column::StartTime)
            .into_model::<ShowListingRow>()
            .all(&self.db)
            .await?)
    }

    pub async fn for_venue(&self, venue_id: i32) -> Result<Vec<(show::Model, artist::Model)>> {
        let rows = show::Entity::find()
            .filter(show::Column::VenueId.eq(venue_id))
            .order_by_asc(show::Column::StartTime)
            .find_also_related(artist::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(show, artist)| artist.map(|a| (show, a)))
            .collect())
    }

    pub async fn for_artist(&self, artist_id: i32) -> Result<Vec<(show::Model, venue::Model)>> {
        let rows = show::Entity::find()
            .filter(show::Column::ArtistId.eq(artist_id))
            .order_by_asc(show::Column::StartTime)
            .find_also_related(venue::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(show, venue)| venue.map(|v| (show, v)))
            .collect())
    }

    /// Every artist and venue a new show may reference.
    pub async fn choices(&self) -> Result<ShowChoices> {
        let artists: Vec<(i32, String)> = artist::Entity::find()
            .select_only()
            .column(artist::Column::Id)
            .column(artist::Column::Name)
            .order_by_asc(artist::Column::Name)
            .into_tuple()
            .all(&self.db)
            .await?;

        let venues: Vec<(i32, String)> = venue::Entity::find()
            .select_only()
            .column(venue::Column::Id)
            .column(venue::Column::Name)
            .order_by_asc(venue::Column::Name)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(ShowChoices::new(artists, venues))
    }

    pub async fn create(&self, form: ShowForm) -> Result<show::Model> {
        let txn = self.db.begin().await?;
        let show = form.into_active_model().insert(&txn).await?;
        txn.commit().await?;

        tracing::info!(
            show_id = show.id,
            venue_id = show.venue_id,
            artist_id = show.artist_id,
            "Show created"
        );
        Ok(show)
    }
}
