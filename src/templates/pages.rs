use axum::http::StatusCode;
use maud::{html, Markup};

use super::components::{
    checkbox_field, choices_select, datetime_field, entity_link_card, error_banner,
    format_datetime, genre_tags, notice_banner, search_box, select_field, show_card, text_field,
    DateFormat,
};
use super::layout::base_layout;
use crate::db::entities::artist;
use crate::db::enums::Catalog;
use crate::db::repositories::ShowListingRow;
use crate::forms::{FormData, FormErrors, ShowChoices};
use crate::services::listings::{Area, ArtistDetail, SearchResults, VenueDetail};

fn notice(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            (notice_banner(message))
        }
    }
}

fn upcoming_label(count: usize) -> String {
    format!("{} upcoming shows", count)
}

pub fn home_page(message: Option<&str>) -> Markup {
    base_layout(
        "Home",
        html! {
            (notice(message))
            div class="text-center py-12" {
                h1 class="text-4xl font-bold text-gray-900 mb-4" { "Fyyur" }
                p class="text-gray-600 mb-8" { "Find venues, discover artists, book shows." }
                div class="flex justify-center gap-4" {
                    a href="/venues/create" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                        "Post a venue"
                    }
                    a href="/artists/create" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                        "Post an artist"
                    }
                    a href="/shows/create" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                        "Post a show"
                    }
                }
            }
        },
    )
}

pub fn venues_page(areas: &[Area], message: Option<&str>) -> Markup {
    base_layout(
        "Venues",
        html! {
            (notice(message))
            (search_box("/venues/search", "Find a venue", ""))

            @if areas.is_empty() {
                p class="text-gray-600 text-lg" { "No venues listed yet." }
            }
            @for area in areas {
                section class="mb-8 area" {
                    h2 class="text-xl font-semibold text-gray-900 mb-3" {
                        (area.key("city").map(String::as_str).unwrap_or(""))
                        ", "
                        (area.key("state").map(String::as_str).unwrap_or(""))
                    }
                    div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                        @for venue in area.values() {
                            (entity_link_card(
                                &format!("/venues/{}", venue.id),
                                &venue.name,
                                Some(upcoming_label(venue.num_upcoming_shows)),
                            ))
                        }
                    }
                }
            }
        },
    )
}

pub fn artists_page(artists: &[artist::Model], message: Option<&str>) -> Markup {
    base_layout(
        "Artists",
        html! {
            (notice(message))
            (search_box("/artists/search", "Find an artist", ""))

            @if artists.is_empty() {
                p class="text-gray-600 text-lg" { "No artists listed yet." }
            }
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                @for artist in artists {
                    (entity_link_card(&format!("/artists/{}", artist.id), &artist.name, None))
                }
            }
        },
    )
}

/// Search results for either venues or artists; `base` is `/venues` or `/artists`.
pub fn search_results_page(title: &str, base: &str, term: &str, results: &SearchResults) -> Markup {
    base_layout(
        title,
        html! {
            (search_box(&format!("{}/search", base), "Search", term))
            h2 class="text-lg text-gray-700 mb-4" {
                "Number of search results for " strong { (term) } ": " (results.count)
            }
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                @for result in &results.data {
                    (entity_link_card(
                        &format!("{}/{}", base, result.id),
                        &result.name,
                        Some(upcoming_label(result.num_upcoming_shows)),
                    ))
                }
            }
        },
    )
}

fn contact_details(
    address: Option<&str>,
    city: &str,
    state: &str,
    phone: &str,
    website_link: Option<&str>,
    facebook_link: Option<&str>,
) -> Markup {
    html! {
        dl class="space-y-2 text-gray-700" {
            @if let Some(address) = address {
                div { dt class="text-sm text-gray-500" { "Address" } dd { (address) } }
            }
            div { dt class="text-sm text-gray-500" { "Location" } dd { (city) ", " (state) } }
            div { dt class="text-sm text-gray-500" { "Phone" } dd { (phone) } }
            @if let Some(link) = website_link {
                div { dt class="text-sm text-gray-500" { "Website" } dd { a href=(link) target="_blank" { (link) } } }
            }
            @if let Some(link) = facebook_link {
                div { dt class="text-sm text-gray-500" { "Facebook" } dd { a href=(link) target="_blank" { (link) } } }
            }
        }
    }
}

fn seeking_block(seeking: bool, description: Option<&str>, yes: &str, no: &str) -> Markup {
    html! {
        div class="mt-4 p-4 rounded-md bg-gray-100" {
            @if seeking {
                p class="font-semibold" { (yes) }
                @if let Some(description) = description {
                    p class="text-gray-700" { (description) }
                }
            } @else {
                p class="text-gray-600" { (no) }
            }
        }
    }
}

pub fn venue_detail_page(detail: &VenueDetail, message: Option<&str>) -> Markup {
    let venue = &detail.venue;
    base_layout(
        &venue.name,
        html! {
            (notice(message))
            div class="flex flex-col md:flex-row gap-8" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (venue.name) }
                    p class="text-sm text-gray-500 mb-4" { "ID: " (venue.id) }
                    (genre_tags(&detail.genres))
                    (contact_details(
                        Some(venue.address.as_str()),
                        &venue.city,
                        &venue.state,
                        &venue.phone,
                        venue.website_link.as_deref(),
                        venue.facebook_link.as_deref(),
                    ))
                    (seeking_block(
                        venue.seeking_talent,
                        venue.seeking_description.as_deref(),
                        "Currently seeking talent",
                        "Not currently seeking talent",
                    ))
                    div class="mt-4 flex gap-3" {
                        a href=(format!("/venues/{}/edit", venue.id)) class="px-4 py-2 bg-blue-500 text-white rounded-md" {
                            "Edit"
                        }
                        form method="post" action=(format!("/venues/{}/delete", venue.id)) {
                            button type="submit" class="px-4 py-2 bg-red-500 text-white rounded-md" { "Delete" }
                        }
                    }
                }
                @if let Some(image) = &venue.image_link {
                    img src=(image) alt=(venue.name) class="w-full md:w-64 rounded-lg shadow-md";
                }
            }

            section class="mt-8" {
                h2 class="text-xl font-semibold mb-3" { (detail.upcoming_shows.len()) " Upcoming Shows" }
                div class="grid grid-cols-1 md:grid-cols-4 gap-4" {
                    @for show in &detail.upcoming_shows {
                        (show_card(show.artist_image_link.as_deref(), &show.artist_name, &format!("/artists/{}", show.artist_id), &show.start_time))
                    }
                }
            }
            section class="mt-8" {
                h2 class="text-xl font-semibold mb-3" { (detail.past_shows.len()) " Past Shows" }
                div class="grid grid-cols-1 md:grid-cols-4 gap-4" {
                    @for show in &detail.past_shows {
                        (show_card(show.artist_image_link.as_deref(), &show.artist_name, &format!("/artists/{}", show.artist_id), &show.start_time))
                    }
                }
            }
        },
    )
}

pub fn artist_detail_page(detail: &ArtistDetail, message: Option<&str>) -> Markup {
    let artist = &detail.artist;
    base_layout(
        &artist.name,
        html! {
            (notice(message))
            div class="flex flex-col md:flex-row gap-8" {
                div class="flex-grow" {
                    h1 class="text-3xl font-bold text-gray-900" { (artist.name) }
                    p class="text-sm text-gray-500 mb-4" { "ID: " (artist.id) }
                    (genre_tags(&detail.genres))
                    (contact_details(
                        None,
                        &artist.city,
                        &artist.state,
                        &artist.phone,
                        artist.website_link.as_deref(),
                        artist.facebook_link.as_deref(),
                    ))
                    (seeking_block(
                        artist.seeking_venue,
                        artist.seeking_description.as_deref(),
                        "Currently seeking performance venues",
                        "Not currently seeking performance venues",
                    ))
                    div class="mt-4" {
                        a href=(format!("/artists/{}/edit", artist.id)) class="px-4 py-2 bg-blue-500 text-white rounded-md" {
                            "Edit"
                        }
                    }
                }
                @if let Some(image) = &artist.image_link {
                    img src=(image) alt=(artist.name) class="w-full md:w-64 rounded-lg shadow-md";
                }
            }

            section class="mt-8" {
                h2 class="text-xl font-semibold mb-3" { (detail.upcoming_shows.len()) " Upcoming Shows" }
                div class="grid grid-cols-1 md:grid-cols-4 gap-4" {
                    @for show in &detail.upcoming_shows {
                        (show_card(show.venue_image_link.as_deref(), &show.venue_name, &format!("/venues/{}", show.venue_id), &show.start_time))
                    }
                }
            }
            section class="mt-8" {
                h2 class="text-xl font-semibold mb-3" { (detail.past_shows.len()) " Past Shows" }
                div class="grid grid-cols-1 md:grid-cols-4 gap-4" {
                    @for show in &detail.past_shows {
                        (show_card(show.venue_image_link.as_deref(), &show.venue_name, &format!("/venues/{}", show.venue_id), &show.start_time))
                    }
                }
            }
        },
    )
}

pub fn shows_page(shows: &[ShowListingRow], message: Option<&str>) -> Markup {
    base_layout(
        "Shows",
        html! {
            (notice(message))
            @if shows.is_empty() {
                p class="text-gray-600 text-lg" { "No shows booked yet." }
            }
            div class="grid grid-cols-1 md:grid-cols-3 gap-4" {
                @for show in shows {
                    div class="entity-card bg-white rounded-lg shadow-md p-4" {
                        p class="text-xs text-gray-500" { (format_datetime(&show.start_time, DateFormat::Medium)) }
                        a href=(format!("/artists/{}", show.artist_id)) class="font-semibold text-gray-900 hover:underline" {
                            (show.artist_name)
                        }
                        " playing at "
                        a href=(format!("/venues/{}", show.venue_id)) class="text-gray-700 hover:underline" {
                            (show.venue_name)
                        }
                    }
                }
            }
        },
    )
}

/// Everything a create/edit form page needs besides its fields.
pub struct FormPage<'a> {
    pub title: &'a str,
    pub action: &'a str,
    pub form: &'a FormData,
    pub errors: &'a FormErrors,
    pub banner: Option<&'a str>,
}

fn form_shell(page: &FormPage<'_>, fields: Markup) -> Markup {
    base_layout(
        page.title,
        html! {
            h1 class="text-2xl font-bold text-gray-900 mb-6" { (page.title) }
            @if let Some(message) = page.banner {
                (error_banner(message))
            }
            form method="post" action=(page.action) class="bg-white rounded-lg shadow-sm p-6 max-w-2xl" {
                (fields)
                button type="submit" class="px-4 py-2 bg-primary text-white font-semibold rounded-md" {
                    (page.title)
                }
            }
        },
    )
}

pub fn venue_form_page(page: &FormPage<'_>, catalog: &Catalog) -> Markup {
    let (form, errors) = (page.form, page.errors);
    form_shell(
        page,
        html! {
            (text_field("Name", "name", form, errors))
            (text_field("City", "city", form, errors))
            (choices_select("State", "state", &catalog.states, form, errors, false))
            (text_field("Address", "address", form, errors))
            (text_field("Phone", "phone", form, errors))
            (choices_select("Genres", "genres", &catalog.genres, form, errors, true))
            (text_field("Facebook Link", "facebook_link", form, errors))
            (text_field("Image Link", "image_link", form, errors))
            (text_field("Website Link", "website_link", form, errors))
            (checkbox_field("Seeking Talent", "seeking_talent", form))
            (text_field("Seeking Description", "seeking_description", form, errors))
        },
    )
}

pub fn artist_form_page(page: &FormPage<'_>, catalog: &Catalog) -> Markup {
    let (form, errors) = (page.form, page.errors);
    form_shell(
        page,
        html! {
            (text_field("Name", "name", form, errors))
            (text_field("City", "city", form, errors))
            (choices_select("State", "state", &catalog.states, form, errors, false))
            (text_field("Phone", "phone", form, errors))
            (choices_select("Genres", "genres", &catalog.genres, form, errors, true))
            (text_field("Facebook Link", "facebook_link", form, errors))
            (text_field("Image Link", "image_link", form, errors))
            (text_field("Website Link", "website_link", form, errors))
            (checkbox_field("Seeking Venue", "seeking_venue", form))
            (text_field("Seeking Description", "seeking_description", form, errors))
        },
    )
}

pub fn show_form_page(page: &FormPage<'_>, choices: &ShowChoices) -> Markup {
    let (form, errors) = (page.form, page.errors);
    let artists: Vec<(String, &str)> = choices
        .artists
        .iter()
        .map(|(id, name)| (id.to_string(), name.as_str()))
        .collect();
    let venues: Vec<(String, &str)> = choices
        .venues
        .iter()
        .map(|(id, name)| (id.to_string(), name.as_str()))
        .collect();

    form_shell(
        page,
        html! {
            (select_field("Artist", "artist_id", artists.iter().map(|(id, name)| (id.as_str(), *name)), form, errors, false))
            (select_field("Venue", "venue_id", venues.iter().map(|(id, name)| (id.as_str(), *name)), form, errors, false))
            (datetime_field("Start Time", "start_time", form, errors))
        },
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = match status {
        StatusCode::NOT_FOUND => "404 - Not Found",
        _ => "500 - Server Error",
    };
    base_layout(
        heading,
        html! {
            div class="text-center py-12" {
                h1 class="text-3xl font-bold text-gray-900 mb-4" { (heading) }
                p class="text-gray-600" { (message) }
                a href="/" class="mt-6 inline-block text-primary hover:underline" { "Back to home" }
            }
        },
    )
}
