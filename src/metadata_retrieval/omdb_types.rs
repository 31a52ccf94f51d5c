/// OMDb API response types for deserialization.
///
/// These structures mirror the JSON response format of the OMDb API. OMDb
/// reports numbers as strings and signals "not found" with HTTP 200 plus a
/// `Response: "False"` field, so every payload field besides the envelope is
/// optional and validated during conversion.
use serde::Deserialize;

/// The top-level response for a title query (`t=`).
#[derive(Debug, Deserialize)]
pub(super) struct OmdbShow {
    /// Success flag, the literal string "True" or "False"
    #[serde(rename = "Response")]
    pub response: String,
    /// The show's title
    #[serde(rename = "Title")]
    pub title: Option<String>,
    /// URL of the poster artwork, or the literal "N/A"
    #[serde(rename = "Poster")]
    pub poster: Option<String>,
    /// Overall IMDb rating as a string, or "N/A"
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    /// Season count as a string
    #[serde(rename = "totalSeasons")]
    pub total_seasons: Option<String>,
}

/// The response for a season query (`t=` plus `Season=`).
#[derive(Debug, Deserialize)]
pub(super) struct OmdbSeason {
    /// Success flag, the literal string "True" or "False"
    #[serde(rename = "Response")]
    pub response: String,
    /// Episodes of this season, in API order
    #[serde(rename = "Episodes", default)]
    pub episodes: Vec<OmdbEpisode>,
}

/// A single episode entry within a season response.
#[derive(Debug, Deserialize)]
pub(super) struct OmdbEpisode {
    /// Episode title
    #[serde(rename = "Title")]
    pub title: String,
    /// Episode number within the season, as a string
    #[serde(rename = "Episode")]
    pub episode: String,
    /// IMDb rating as a string, or "N/A"
    #[serde(rename = "imdbRating")]
    pub imdb_rating: String,
}
