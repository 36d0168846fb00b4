use serde::Deserialize;

/// One entry of the `results` array. Any other fields the API sends are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Story {
    pub title: String,
    #[serde(default)]
    pub byline: Option<String>,
}
