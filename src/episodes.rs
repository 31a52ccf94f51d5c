//! Episode extraction: turns per-season API payloads into the episode matrix.
//!
//! The matrix always has one entry per season reported by the show record.
//! A season the API could not find becomes an empty list, indistinguishable
//! downstream from a season that simply has no episodes.

use crate::grade::Rating;
use crate::metadata_retrieval::RawEpisode;
use thiserror::Error;

/// A season/episode payload did not have the expected shape.
#[derive(Debug, Error)]
#[error("Data does not conform to the expected format: field `{field}` has value {value:?}")]
pub struct DataFormatError {
    /// Name of the offending field on the wire
    pub field: &'static str,
    /// The value that could not be interpreted
    pub value: String,
}

/// A single episode with parsed fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Episode {
    /// Episode title
    pub title: String,
    /// Episode number within its season
    pub number: usize,
    /// The episode's rating
    pub rating: Rating,
}

/// Per-season episode lists; index 0 is season 1.
pub(crate) type EpisodeMatrix = Vec<Vec<Episode>>;

/// Flattens fetched seasons into the episode matrix.
///
/// Absent seasons (`None`) become empty lists so the matrix keeps one entry
/// per season. Episodes are sorted numerically by episode number within each
/// season; the API does not guarantee response order.
pub(crate) fn extract_matrix(
    seasons: Vec<Option<Vec<RawEpisode>>>,
) -> Result<EpisodeMatrix, DataFormatError> {
    seasons
        .into_iter()
        .map(|season| match season {
            None => Ok(Vec::new()),
            Some(episodes) => extract_season(episodes),
        })
        .collect()
}

fn extract_season(episodes: Vec<RawEpisode>) -> Result<Vec<Episode>, DataFormatError> {
    let mut parsed = episodes
        .into_iter()
        .map(parse_episode)
        .collect::<Result<Vec<_>, _>>()?;

    parsed.sort_by_key(|episode| episode.number);
    Ok(parsed)
}

fn parse_episode(raw: RawEpisode) -> Result<Episode, DataFormatError> {
    let number = raw.number.parse().map_err(|_| DataFormatError {
        field: "Episode",
        value: raw.number.clone(),
    })?;

    let rating = Rating::parse(&raw.rating).ok_or_else(|| DataFormatError {
        field: "imdbRating",
        value: raw.rating.clone(),
    })?;

    Ok(Episode {
        title: raw.title,
        number,
        rating,
    })
}
