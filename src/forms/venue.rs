use chrono::Utc;
use sea_orm::{NotSet, Set};

use super::{FieldCheck, FormData, FormErrors, Rule, SubmissionForm};
use crate::db::{
    entities::{encode_genres, venue},
    enums::Catalog,
};

/// A venue submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl SubmissionForm for VenueForm {
    type Context = Catalog;

    fn checks(catalog: &Catalog) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::new("name", vec![Rule::Required]),
            FieldCheck::new("city", vec![Rule::Required]),
            FieldCheck::new("state", vec![Rule::Required, Rule::State(&catalog.states)]),
            FieldCheck::new("address", vec![Rule::Required]),
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
            address: form.text("address").trim().to_string(),
            phone: form.text("phone").trim().to_string(),
            image_link: form.optional_text("image_link"),
            facebook_link: form.optional_text("facebook_link"),
            website_link: form.optional_text("website_link"),
            genres: form.all("genres").into_iter().map(String::from).collect(),
            seeking_talent: form.flag("seeking_talent"),
            seeking_description: form.optional_text("seeking_description"),
        })
    }
}

impl VenueForm {
    /// Overwrite every user-editable column of `model`.
    pub fn apply_to(self, model: &mut venue::ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.address = Set(self.address);
        model.phone = Set(self.phone);
        model.image_link = Set(self.image_link);
        model.facebook_link = Set(self.facebook_link);
        model.website_link = Set(self.website_link);
        model.genres = Set(encode_genres(&self.genres));
        model.seeking_talent = Set(self.seeking_talent);
        model.seeking_description = Set(self.seeking_description);
        model.updated_at = Set(Utc::now().into());
    }

    pub fn into_active_model(self) -> venue::ActiveModel {
        let now = Utc::now();
        let mut model = venue::ActiveModel {
            id: NotSet,
            created_at: Set(now.into()),
            ..Default::default()
        };
        self.apply_to(&mut model);
        model
    }
}

/// Prefill an edit form from a stored venue.
pub fn form_data_from(venue: &venue::Model) -> FormData {
    let mut form = FormData::from_pairs([
        ("name", venue.name.as_str()),
        ("city", venue.city.as_str()),
        ("state", venue.state.as_str()),
        ("address", venue.address.as_str()),
        ("phone", venue.phone.as_str()),
        ("image_link", venue.image_link.as_deref().unwrap_or("")),
        ("facebook_link", venue.facebook_link.as_deref().unwrap_or("")),
        ("website_link", venue.website_link.as_deref().unwrap_or("")),
        (
            "seeking_description",
            venue.seeking_description.as_deref().unwrap_or(""),
        ),
    ]);
    for genre in venue.genre_list() {
        form.push("genres", genre);
    }
    if venue.seeking_talent {
        form.push("seeking_talent", "y");
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ValidationError;
    use pretty_assertions::assert_eq;

    fn musical_hop() -> FormData {
        FormData::from_pairs([
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("genres", "Jazz"),
            ("genres", "Reggae"),
            ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
            ("website_link", "https://www.themusicalhop.com"),
            ("seeking_talent", "y"),
            ("seeking_description", "We are on the lookout for a local artist"),
        ])
    }

    #[test]
    fn test_valid_venue_builds() {
        let form = VenueForm::from_form(&musical_hop(), &Catalog::standard()).unwrap();

        assert_eq!(form.name, "The Musical Hop");
        assert_eq!(form.genres, vec!["Jazz".to_string(), "Reggae".to_string()]);
        assert!(form.seeking_talent);
        assert_eq!(form.image_link, None);
    }

    #[test]
    fn test_unknown_state_rejected() {
        let data = FormData::from_pairs([("name", "The Musical Hop"), ("state", "ZZ")]);
        let errors = VenueForm::from_form(&data, &Catalog::standard()).unwrap_err();

        assert!(errors.contains("state", ValidationError::InvalidState));
        assert!(errors.contains("city", ValidationError::RequiredFieldMissing));
        assert!(errors.get("name").is_empty());
    }

    #[test]
    fn test_empty_genres_is_required_error() {
        let data = FormData::from_pairs([
            ("name", "Hall"),
            ("city", "Austin"),
            ("state", "TX"),
            ("address", "1 Main St"),
            ("phone", "512-555-0101"),
            ("facebook_link", "https://www.facebook.com/hall"),
        ]);
        let errors = VenueForm::from_form(&data, &Catalog::standard()).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("genres"), &[ValidationError::RequiredFieldMissing]);
    }

    #[test]
    fn test_prefill_from_model() {
        let now = Utc::now().into();
        let model = venue::Model {
            id: 1,
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "123-123-1234".to_string(),
            image_link: None,
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website_link: None,
            genres: encode_genres(&["Jazz".to_string(), "Folk".to_string()]),
            seeking_talent: true,
            seeking_description: None,
            created_at: now,
            updated_at: now,
        };

        let prefilled = form_data_from(&model);

        assert_eq!(prefilled.text("state"), "CA");
        assert_eq!(prefilled.all("genres"), vec!["Jazz", "Folk"]);
        assert!(prefilled.flag("seeking_talent"));
        assert_eq!(prefilled.optional_text("image_link"), None);
        assert!(VenueForm::from_form(&prefilled, &Catalog::standard()).is_ok());
    }
}
