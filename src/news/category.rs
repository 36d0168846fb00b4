use std::fmt;
use std::str::FromStr;

/// Sections accepted by the Top Stories endpoint.
pub const CATEGORIES: &[&str] = &[
    "home",
    "opinion",
    "world",
    "national",
    "politics",
    "upshot",
    "nyregion",
    "business",
    "technology",
    "science",
    "health",
    "sports",
    "arts",
    "books",
    "movies",
    "theater",
    "sundayreview",
    "fashion",
    "tmagazine",
    "food",
    "travel",
    "magazine",
    "realestate",
    "automobiles",
    "obituaries",
    "insider",
];

/// A section name already checked against [`CATEGORIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category(&'static str);

impl Category {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is not a valid category.", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        CATEGORIES
            .iter()
            .copied()
            .find(|c| *c == wanted)
            .map(Category)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

/// Splits a space separated list, validating each entry independently.
pub fn parse_list(input: &str) -> Vec<Result<Category, UnknownCategory>> {
    input.split_whitespace().map(str::parse).collect()
}

pub fn joined() -> String {
    CATEGORIES.join(", ")
}
