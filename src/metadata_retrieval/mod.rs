/// Data structures and traits for show metadata retrieval.
///
/// This module provides structures to represent a show and its per-season
/// episode listings as reported by the metadata API, as well as a trait for
/// implementing metadata providers.
mod omdb;
mod omdb_types;

pub(crate) use omdb::OmdbProvider;

use crate::grade::Rating;
use image::DynamicImage;
use thiserror::Error;

/// Errors that can occur during metadata retrieval operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Request to the metadata provider failed
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Failed to parse the provider's JSON response
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// The requested show was not found
    #[error("Unable to get details about '{0}'")]
    ShowNotFound(String),

    /// The API returned invalid or unexpected data
    #[error("API returned invalid data: {0}")]
    InvalidData(String),
}

/// Top-level details of a show, fetched once per run.
#[derive(Debug, Clone)]
pub(crate) struct ShowRecord {
    /// The show's title as reported by the API
    pub title: String,
    /// URL of the show's poster artwork
    pub poster_url: String,
    /// The show's overall rating
    pub overall_rating: Rating,
    /// Number of seasons the API reports for this show
    pub total_seasons: usize,
}

/// One episode as it appears on the wire: untouched string fields.
///
/// Parsing the episode number and rating is the extractor's job, so that
/// format problems surface as data-format errors naming the bad field.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RawEpisode {
    /// Episode title
    pub title: String,
    /// Episode number within the season, as a string
    pub number: String,
    /// Rating string, numeric or the literal `N/A`
    pub rating: String,
}

/// Trait for metadata providers that can fetch show information.
///
/// Implementors retrieve show and per-season episode metadata from a remote
/// source. A missing season is an `Ok(None)`, never an error: callers
/// substitute an empty season and keep going.
pub(crate) trait MetadataProvider {
    /// Fetches the top-level record for a show by name.
    fn fetch_show(&self, name: &str) -> Result<ShowRecord, MetadataError>;

    /// Fetches the episode list for one season of a show.
    ///
    /// Returns `Ok(None)` when the provider has no such season.
    fn fetch_season(
        &self,
        show_title: &str,
        season: usize,
    ) -> Result<Option<Vec<RawEpisode>>, MetadataError>;

    /// Downloads and decodes the show's poster artwork.
    fn fetch_poster(&self, url: &str) -> Result<DynamicImage, MetadataError>;
}
