use serde::Serialize;

/// An ordered, closed set of `(code, label)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choices {
    pairs: Vec<(String, String)>,
}

impl Choices {
    pub fn new<I, C, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (C, L)>,
        C: Into<String>,
        L: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(code, label)| (code.into(), label.into()))
                .collect(),
        }
    }

    /// Build a set where every code doubles as its own label.
    pub fn from_codes<I, C>(codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self::new(codes.into_iter().map(|code| {
            let code = code.into();
            (code.clone(), code)
        }))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.pairs.iter().any(|(c, _)| c == code)
    }

    pub fn label(&self, code: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(c, l)| (c.as_str(), l.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

const STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// The fixed enumerations the input forms validate against. Built once at
/// startup and shared read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    pub states: Choices,
    pub genres: Choices,
}

impl Catalog {
    pub fn new(states: Choices, genres: Choices) -> Self {
        Self { states, genres }
    }

    pub fn standard() -> Self {
        Self {
            states: Choices::new(STATES.iter().copied()),
            genres: Choices::from_codes(GENRES.iter().copied()),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_contents() {
        let catalog = Catalog::standard();

        assert_eq!(catalog.states.len(), 51);
        assert!(catalog.states.contains("CA"));
        assert!(catalog.states.contains("DC"));
        assert!(!catalog.states.contains("ZZ"));
        assert_eq!(catalog.states.label("NY"), Some("New York"));

        assert!(catalog.genres.contains("Rock n Roll"));
        assert!(!catalog.genres.contains("rock n roll"));
        assert_eq!(catalog.genres.label("Jazz"), Some("Jazz"));
    }

    #[test]
    fn test_choices_preserve_order() {
        let choices = Choices::new([("b", "Bee"), ("a", "Ay")]);
        let codes: Vec<&str> = choices.iter().map(|(code, _)| code).collect();
        assert_eq!(codes, vec!["b", "a"]);
    }
}
