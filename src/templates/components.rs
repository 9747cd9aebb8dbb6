use maud::{html, Markup};
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::db::enums::Choices;
use crate::forms::{FormData, FormErrors, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// "Monday May, 21, 2035 at 9:30PM"
    Full,
    /// "Mon 05, 21, 2035 9:30PM"
    Medium,
}

pub fn format_datetime(value: &DateTimeWithTimeZone, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
    };
    value.format(pattern).to_string()
}

pub fn notice_banner(message: &str) -> Markup {
    html! {
        div class="mb-6 rounded-md bg-green-50 border border-green-200 p-4 text-green-800" role="status" {
            (message)
        }
    }
}

pub fn error_banner(message: &str) -> Markup {
    html! {
        div class="mb-6 rounded-md bg-red-50 border border-red-200 p-4 text-red-800" role="alert" {
            (message)
        }
    }
}

fn field_errors(errors: &[ValidationError]) -> Markup {
    html! {
        @for error in errors {
            p class="mt-1 text-sm text-red-600 field-error" { (error) }
        }
    }
}

fn input_class(errors: &[ValidationError]) -> &'static str {
    if errors.is_empty() {
        "w-full px-3 py-2 border border-gray-300 rounded-md"
    } else {
        "w-full px-3 py-2 border border-red-500 rounded-md"
    }
}

pub fn text_field(label: &str, name: &str, form: &FormData, errors: &FormErrors) -> Markup {
    let field_errors_list = errors.get(name);
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                value=(form.text(name))
                class=(input_class(field_errors_list));
            (field_errors(field_errors_list))
        }
    }
}

pub fn datetime_field(label: &str, name: &str, form: &FormData, errors: &FormErrors) -> Markup {
    let field_errors_list = errors.get(name);
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
            input
                type="text"
                id=(name)
                name=(name)
                placeholder="YYYY-MM-DD HH:MM"
                value=(form.text(name))
                class=(input_class(field_errors_list));
            (field_errors(field_errors_list))
        }
    }
}

/// A select over `(code, label)` options. `multiple` renders a multi-select
/// where every submitted value stays selected.
pub fn select_field<'a>(
    label: &str,
    name: &str,
    options: impl Iterator<Item = (&'a str, &'a str)>,
    form: &FormData,
    errors: &FormErrors,
    multiple: bool,
) -> Markup {
    let selected = form.all(name);
    let field_errors_list = errors.get(name);
    html! {
        div class="mb-4" {
            label for=(name) class="block text-sm font-medium text-gray-700 mb-1" { (label) }
            select id=(name) name=(name) multiple[multiple] class=(input_class(field_errors_list)) {
                @if !multiple {
                    option value="" { "Select..." }
                }
                @for (code, text) in options {
                    option value=(code) selected[selected.contains(&code)] { (text) }
                }
            }
            (field_errors(field_errors_list))
        }
    }
}

pub fn choices_select(
    label: &str,
    name: &str,
    choices: &Choices,
    form: &FormData,
    errors: &FormErrors,
    multiple: bool,
) -> Markup {
    select_field(label, name, choices.iter(), form, errors, multiple)
}

pub fn checkbox_field(label: &str, name: &str, form: &FormData) -> Markup {
    html! {
        div class="mb-4 flex items-center" {
            input type="checkbox" id=(name) name=(name) value="y" checked[form.flag(name)] class="mr-2";
            label for=(name) class="text-sm font-medium text-gray-700" { (label) }
        }
    }
}

pub fn search_box(action: &str, placeholder: &str, term: &str) -> Markup {
    html! {
        form method="post" action=(action) class="mb-6 flex gap-2" {
            input
                type="search"
                name="search_term"
                value=(term)
                placeholder=(placeholder)
                class="flex-grow px-3 py-2 border border-gray-300 rounded-md";
            button type="submit" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                "Search"
            }
        }
    }
}

pub fn genre_tags(genres: &[String]) -> Markup {
    html! {
        div class="flex flex-wrap gap-2" {
            @for genre in genres {
                span class="px-2 py-1 bg-gray-100 text-gray-700 text-sm rounded" { (genre) }
            }
        }
    }
}

pub fn entity_link_card(href: &str, name: &str, detail: Option<String>) -> Markup {
    html! {
        a href=(href) class="entity-card block bg-white rounded-lg shadow-sm p-4 transition" {
            h3 class="font-semibold text-gray-900" { (name) }
            @if let Some(detail) = detail {
                p class="text-sm text-gray-600" { (detail) }
            }
        }
    }
}

pub fn show_card(
    image_link: Option<&str>,
    title: &str,
    href: &str,
    start_time: &DateTimeWithTimeZone,
) -> Markup {
    let image = image_link.unwrap_or("https://via.placeholder.com/150x150/1a1a1a/ffffff?text=Fyyur");
    html! {
        div class="entity-card bg-white rounded-lg shadow-md overflow-hidden" {
            img src=(image) alt=(title) class="w-full h-40 object-cover" loading="lazy";
            div class="p-4" {
                a href=(href) class="font-semibold text-gray-900 hover:underline" { (title) }
                p class="text-xs text-gray-500 mt-1" {
                    (format_datetime(start_time, DateFormat::Full))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_datetime_full() {
        let when: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2035, 5, 21, 21, 30, 0).unwrap().into();
        assert_eq!(
            format_datetime(&when, DateFormat::Full),
            "Monday May, 21, 2035 at 9:30PM"
        );
    }

    #[test]
    fn test_format_datetime_medium() {
        let when: DateTimeWithTimeZone = Utc.with_ymd_and_hms(2035, 5, 21, 9, 5, 0).unwrap().into();
        assert_eq!(format_datetime(&when, DateFormat::Medium), "Mon 05, 21, 2035 9:05AM");
    }

    #[test]
    fn test_text_field_shows_errors() {
        let form = FormData::from_pairs([("phone", "555")]);
        let mut errors = FormErrors::new();
        errors.add("phone", ValidationError::InvalidPhone);

        let markup = text_field("Phone", "phone", &form, &errors).into_string();

        assert!(markup.contains("value=\"555\""));
        assert!(markup.contains("Invalid phone"));
    }

    #[test]
    fn test_multi_select_keeps_selection() {
        let genres = Choices::from_codes(["Jazz", "Folk"]);
        let form = FormData::from_pairs([("genres", "Folk")]);

        let markup =
            choices_select("Genres", "genres", &genres, &form, &FormErrors::new(), true).into_string();

        assert!(markup.contains("<option value=\"Folk\" selected>"));
        assert!(markup.contains("<option value=\"Jazz\">"));
    }
}
