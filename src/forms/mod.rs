//! Raw form payloads, per-field validation and the typed inputs built from them.

pub mod artist;
pub mod show;
pub mod validators;
pub mod venue;

pub use artist::ArtistForm;
pub use show::{ShowChoices, ShowForm};
pub use validators::ValidationError;
pub use venue::VenueForm;

use serde::Serialize;

use crate::db::enums::Choices;

/// Submitted fields exactly as received, in order. Multi-valued fields
/// (select-multiple) appear once per value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, N, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value submitted for `name`, or an empty string.
    pub fn text(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    /// Trimmed first value, `None` when blank.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        let value = self.text(name).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// All non-blank values submitted for `name`.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(field, value)| field == name && !value.trim().is_empty())
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Checkbox semantics: present with any value other than `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, value)| {
            field == name && !value.is_empty() && !value.eq_ignore_ascii_case("false")
        })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Validation failures keyed by field, in the order fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(String, Vec<ValidationError>)>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, error: ValidationError) {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, errors)) => errors.push(error),
            None => self.fields.push((field.to_string(), vec![error])),
        }
    }

    pub fn get(&self, field: &str) -> &[ValidationError] {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, errors)| errors.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, field: &str, error: ValidationError) -> bool {
        self.get(field).contains(&error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidationError])> {
        self.fields
            .iter()
            .map(|(name, errors)| (name.as_str(), errors.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Rule<'a> {
    Required,
    Phone,
    State(&'a Choices),
    Genres(&'a Choices),
    Url,
    DateTime,
    Choice(&'a [i32]),
}

impl Rule<'_> {
    fn is_structural(&self) -> bool {
        matches!(self, Rule::Required)
    }

    fn check(&self, form: &FormData, field: &str) -> Result<(), ValidationError> {
        match self {
            Rule::Required => {
                if form.all(field).is_empty() {
                    Err(ValidationError::RequiredFieldMissing)
                } else {
                    Ok(())
                }
            }
            Rule::Phone => validators::validate_phone(form.text(field)),
            Rule::State(states) => validators::validate_state(form.text(field), states),
            Rule::Genres(genres) => validators::validate_genres(form.all(field).as_slice(), genres),
            Rule::Url => validators::validate_url(form.text(field)),
            Rule::DateTime => validators::validate_datetime(form.text(field)).map(|_| ()),
            Rule::Choice(allowed) => validators::validate_choice(form.text(field), allowed).map(|_| ()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldCheck<'a> {
    pub field: &'static str,
    pub rules: Vec<Rule<'a>>,
}

impl<'a> FieldCheck<'a> {
    pub fn new(field: &'static str, rules: Vec<Rule<'a>>) -> Self {
        Self { field, rules }
    }
}

/// Run every check and collect all failures per field.
///
/// Structural rules run first; when one fails the remaining rules for that
/// field are skipped.
pub fn run_checks(form: &FormData, checks: &[FieldCheck<'_>]) -> FormErrors {
    let mut errors = FormErrors::new();

    for check in checks {
        let structural_failure = check
            .rules
            .iter()
            .filter(|rule| rule.is_structural())
            .find_map(|rule| rule.check(form, check.field).err());

        if let Some(error) = structural_failure {
            errors.add(check.field, error);
            continue;
        }

        for rule in check.rules.iter().filter(|rule| !rule.is_structural()) {
            if let Err(error) = rule.check(form, check.field) {
                errors.add(check.field, error);
            }
        }
    }

    errors
}

/// A typed input record built from a [`FormData`] once all checks pass.
pub trait SubmissionForm: Sized {
    /// Data the checks need beyond the submitted fields.
    type Context;

    fn checks(ctx: &Self::Context) -> Vec<FieldCheck<'_>>;

    /// Copy the checked fields into the typed record.
    fn build(form: &FormData, ctx: &Self::Context) -> Result<Self, FormErrors>;

    fn from_form(form: &FormData, ctx: &Self::Context) -> Result<Self, FormErrors> {
        let errors = run_checks(form, &Self::checks(ctx));
        if !errors.is_empty() {
            return Err(errors);
        }
        Self::build(form, ctx)
    }
}
