pub mod artist;
pub mod show;
pub mod venue;

pub use artist::Entity as Artist;
pub use show::Entity as Show;
pub use venue::Entity as Venue;

/// Genres are stored as a JSON array in a text column.
pub fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
