use chrono::Utc;
use sea_orm::{prelude::DateTimeWithTimeZone, NotSet, Set};

use super::{validators, FieldCheck, FormData, FormErrors, Rule, SubmissionForm};
use crate::db::entities::show;

/// The artists and venues a show may reference, as `(id, name)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShowChoices {
    pub artists: Vec<(i32, String)>,
    pub venues: Vec<(i32, String)>,
    artist_ids: Vec<i32>,
    venue_ids: Vec<i32>,
}

impl ShowChoices {
    pub fn new(artists: Vec<(i32, String)>, venues: Vec<(i32, String)>) -> Self {
        let artist_ids = artists.iter().map(|(id, _)| *id).collect();
        let venue_ids = venues.iter().map(|(id, _)| *id).collect();
        Self {
            artists,
            venues,
            artist_ids,
            venue_ids,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTimeWithTimeZone,
}

impl SubmissionForm for ShowForm {
    type Context = ShowChoices;

    fn checks(choices: &ShowChoices) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::new(
                "artist_id",
                vec![Rule::Required, Rule::Choice(&choices.artist_ids)],
            ),
            FieldCheck::new(
                "venue_id",
                vec![Rule::Required, Rule::Choice(&choices.venue_ids)],
            ),
            FieldCheck::new("start_time", vec![Rule::Required, Rule::DateTime]),
        ]
    }

    fn build(form: &FormData, choices: &ShowChoices) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::new();

        let artist_id = validators::validate_choice(form.text("artist_id"), &choices.artist_ids)
            .map_err(|e| errors.add("artist_id", e))
            .ok();
        let venue_id = validators::validate_choice(form.text("venue_id"), &choices.venue_ids)
            .map_err(|e| errors.add("venue_id", e))
            .ok();
        let start_time = validators::validate_datetime(form.text("start_time"))
            .map_err(|e| errors.add("start_time", e))
            .ok();

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) => Ok(Self {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}

impl ShowForm {
    pub fn into_active_model(self) -> show::ActiveModel {
        show::ActiveModel {
            id: NotSet,
            artist_id: Set(self.artist_id),
            venue_id: Set(self.venue_id),
            start_time: Set(self.start_time),
            created_at: Set(Utc::now().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ValidationError;
    use chrono::{TimeZone, Utc};

    fn choices() -> ShowChoices {
        ShowChoices::new(
            vec![(4, "Guns N Petals".to_string())],
            vec![(1, "The Musical Hop".to_string())],
        )
    }

    #[test]
    fn test_valid_show_builds() {
        let data = FormData::from_pairs([
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "2035-05-21 21:30:00"),
        ]);

        let form = ShowForm::from_form(&data, &choices()).unwrap();

        assert_eq!(form.artist_id, 4);
        assert_eq!(form.venue_id, 1);
        let expected: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2035, 5, 21, 21, 30, 0).unwrap().into();
        assert_eq!(form.start_time, expected);
    }

    #[test]
    fn test_show_rejects_unknown_references() {
        let data = FormData::from_pairs([
            ("artist_id", "99"),
            ("venue_id", "1"),
            ("start_time", "tomorrow"),
        ]);

        let errors = ShowForm::from_form(&data, &choices()).unwrap_err();

        assert_eq!(errors.get("artist_id"), &[ValidationError::InvalidChoice]);
        assert!(errors.get("venue_id").is_empty());
        assert_eq!(errors.get("start_time"), &[ValidationError::InvalidDateTime]);
    }

    #[test]
    fn test_show_requires_all_fields() {
        let errors = ShowForm::from_form(&FormData::new(), &choices()).unwrap_err();

        for field in ["artist_id", "venue_id", "start_time"] {
            assert_eq!(errors.get(field), &[ValidationError::RequiredFieldMissing]);
        }
    }
}
