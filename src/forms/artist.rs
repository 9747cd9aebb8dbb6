use chrono::Utc;
use sea_orm::{NotSet, Set};

use super::{FieldCheck, FormData, FormErrors, Rule, SubmissionForm};
use crate::db::{
    entities::{artist, encode_genres},
    enums::Catalog,
};

/// An artist submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl SubmissionForm for ArtistForm {
    type Context = Catalog;

    fn checks(catalog: &Catalog) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::new("name", vec![Rule::Required]),
            FieldCheck::new("city", vec![Rule::Required]),
            FieldCheck::new("state", vec![Rule::Required, Rule::State(&catalog.states)]),
            FieldCheck::new("phone", vec![Rule::Phone]),
            FieldCheck::new("genres", vec![Rule::Required, Rule::Genres(&catalog.genres)]),
            FieldCheck::new("facebook_link", vec![Rule::Url]),
        ]
    }

    fn build(form: &FormData, _catalog: &Catalog) -> Result<Self, FormErrors> {
        Ok(Self {
            name: form.text("name").trim().to_string(),
            city: form.text("city").trim().to_string(),
            state: form.text("state").trim().to_string(),
            phone: form.text("phone").trim().to_string(),
            image_link: form.optional_text("image_link"),
            facebook_link: form.optional_text("facebook_link"),
            website_link: form.optional_text("website_link"),
            genres: form.all("genres").into_iter().map(String::from).collect(),
            seeking_venue: form.flag("seeking_venue"),
            seeking_description: form.optional_text("seeking_description"),
        })
    }
}

impl ArtistForm {
    pub fn apply_to(self, model: &mut artist::ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.phone = Set(self.phone);
        model.image_link = Set(self.image_link);
        model.facebook_link = Set(self.facebook_link);
        model.website_link = Set(self.website_link);
        model.genres = Set(encode_genres(&self.genres));
        model.seeking_venue = Set(self.seeking_venue);
        model.seeking_description = Set(self.seeking_description);
        model.updated_at = Set(Utc::now().into());
    }

    pub fn into_active_model(self) -> artist::ActiveModel {
        let mut model = artist::ActiveModel {
            id: NotSet,
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };
        self.apply_to(&mut model);
        model
    }
}

pub fn form_data_from(artist: &artist::Model) -> FormData {
    let mut form = FormData::from_pairs([
        ("name", artist.name.as_str()),
        ("city", artist.city.as_str()),
        ("state", artist.state.as_str()),
        ("phone", artist.phone.as_str()),
        ("image_link", artist.image_link.as_deref().unwrap_or("")),
        ("facebook_link", artist.facebook_link.as_deref().unwrap_or("")),
        ("website_link", artist.website_link.as_deref().unwrap_or("")),
        (
            "seeking_description",
            artist.seeking_description.as_deref().unwrap_or(""),
        ),
    ]);
    for genre in artist.genre_list() {
        form.push("genres", genre);
    }
    if artist.seeking_venue {
        form.push("seeking_venue", "y");
    }
    form
}
