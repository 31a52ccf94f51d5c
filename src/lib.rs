//! ratrix - render a TV show's per-episode ratings as a matrix image
//!
//! This library fetches show metadata and per-episode ratings from the OMDb
//! API and draws a seasons-by-episodes grid, color-coded by rating tier and
//! blended over the show's blurred poster.

mod config;
mod episodes;
mod grade;
mod layout;
mod metadata_retrieval;
mod output;
mod render;
mod text;

use episodes::extract_matrix;
use metadata_retrieval::{MetadataProvider, OmdbProvider};
use render::{DEFAULT_OPACITY, MatrixRenderer, Palette};
use text::{LoadedFont, TextShaper};

// Re-export error types
pub use config::ConfigError;
pub use episodes::DataFormatError;
pub use metadata_retrieval::MetadataError;
pub use output::OutputError;
pub use text::FontError;

pub use config::{Config, PaletteName};
pub use grade::GradeThresholds;

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Pixel size of the grid/rating font
const BODY_FONT_PX: f32 = 15.0;
/// Pixel size of the show-title font
const TITLE_FONT_PX: f32 = 35.0;

/// Progress event emitted while generating the matrix
///
/// These events allow library users to track progress and provide feedback
/// while the pipeline runs.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Looking up the show by name
    Searching { query: String },

    /// The show was found
    ShowFound {
        title: String,
        total_seasons: usize,
    },

    /// Fetching the episode list of one season
    FetchingSeason { number: usize, total: usize },

    /// Downloading the poster artwork
    DownloadingPoster,

    /// Sizing the canvas and drawing the grid
    Rendering,

    /// Writing the output file
    Saving { path: PathBuf },

    /// The output file has been written
    Complete { path: PathBuf },
}

/// Top-level error type for ratrix operations
#[derive(Debug, Error)]
pub enum RatrixError {
    /// Error while loading the configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error while loading a font asset
    #[error(transparent)]
    Font(#[from] FontError),

    /// Error during metadata retrieval
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A payload did not have the expected shape
    #[error(transparent)]
    DataFormat(#[from] DataFormatError),

    /// Error while writing the output image
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Generates the ratings matrix image for a show.
///
/// Looks up the show on OMDb, fetches every season's episode list (a season
/// the API does not know simply stays blank in the grid), downloads the
/// poster, renders the matrix, and writes the image to `output_path`. The
/// output format follows the path's extension.
///
/// Progress events are emitted through the provided callback, allowing
/// library users to display status or remain silent.
///
/// # Examples
///
/// ```no_run
/// use ratrix::{Config, generate_matrix};
/// use std::path::Path;
///
/// let config = Config::load().unwrap();
/// generate_matrix("Breaking Bad", Path::new("matrix.png"), &config, |event| {
///     println!("{event:?}");
/// })
/// .unwrap();
/// ```
pub fn generate_matrix<F>(
    show_name: &str,
    output_path: &Path,
    config: &Config,
    progress_callback: F,
) -> Result<(), RatrixError>
where
    F: FnMut(ProgressEvent),
{
    // Fonts are required assets; fail before the first network call
    let body = LoadedFont::from_file(&config.body_font, BODY_FONT_PX)?;
    let title = LoadedFont::from_file(&config.title_font, TITLE_FONT_PX)?;
    let palette = match config.palette {
        PaletteName::Elementary => Palette::elementary(),
        PaletteName::Gruvbox => Palette::gruvbox(),
    };
    let renderer = MatrixRenderer::new(body, title, palette, config.thresholds, DEFAULT_OPACITY);

    let provider = OmdbProvider::new(config.api_key.clone())?;

    run_pipeline(&provider, &renderer, show_name, output_path, progress_callback)
}

/// Drives fetch, extract, render, and save against the given provider.
fn run_pipeline<P, T, F>(
    provider: &P,
    renderer: &MatrixRenderer<T>,
    show_name: &str,
    output_path: &Path,
    mut progress_callback: F,
) -> Result<(), RatrixError>
where
    P: MetadataProvider,
    T: TextShaper,
    F: FnMut(ProgressEvent),
{
    progress_callback(ProgressEvent::Searching {
        query: show_name.to_string(),
    });

    let show = provider.fetch_show(show_name)?;

    progress_callback(ProgressEvent::ShowFound {
        title: show.title.clone(),
        total_seasons: show.total_seasons,
    });

    // one lookup per season; a missing season stays in the matrix as empty
    let mut seasons = Vec::with_capacity(show.total_seasons);
    for number in 1..=show.total_seasons {
        progress_callback(ProgressEvent::FetchingSeason {
            number,
            total: show.total_seasons,
        });
        seasons.push(provider.fetch_season(&show.title, number)?);
    }

    let matrix = extract_matrix(seasons)?;

    progress_callback(ProgressEvent::DownloadingPoster);
    let poster = provider.fetch_poster(&show.poster_url)?;

    progress_callback(ProgressEvent::Rendering);
    let image = renderer.render(&show, &matrix, &poster);

    progress_callback(ProgressEvent::Saving {
        path: output_path.to_path_buf(),
    });
    output::save_image(&image, output_path)?;

    progress_callback(ProgressEvent::Complete {
        path: output_path.to_path_buf(),
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grade::Rating;
    use crate::metadata_retrieval::{RawEpisode, ShowRecord};
    use crate::text::testing::FixedAdvance;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::env;
    use std::fs;

    struct MockProvider {
        show: Option<ShowRecord>,
        seasons: Vec<Option<Vec<RawEpisode>>>,
    }

    impl MetadataProvider for MockProvider {
        fn fetch_show(&self, name: &str) -> Result<ShowRecord, MetadataError> {
            self.show
                .clone()
                .ok_or_else(|| MetadataError::ShowNotFound(name.to_string()))
        }

        fn fetch_season(
            &self,
            _show_title: &str,
            season: usize,
        ) -> Result<Option<Vec<RawEpisode>>, MetadataError> {
            Ok(self.seasons.get(season - 1).cloned().flatten())
        }

        fn fetch_poster(&self, _url: &str) -> Result<DynamicImage, MetadataError> {
            Ok(DynamicImage::ImageRgb8(RgbImage::from_pixel(
                20,
                30,
                Rgb([80, 80, 80]),
            )))
        }
    }

    fn stub_renderer() -> MatrixRenderer<FixedAdvance> {
        MatrixRenderer::new(
            FixedAdvance::new(4, 15),
            FixedAdvance::new(10, 35),
            Palette::elementary(),
            GradeThresholds::default(),
            DEFAULT_OPACITY,
        )
    }

    fn show_record(total_seasons: usize) -> ShowRecord {
        ShowRecord {
            title: "Mock Show".to_string(),
            poster_url: "https://example.com/poster.jpg".to_string(),
            overall_rating: Rating::Numeric(8.2),
            total_seasons,
        }
    }

    fn raw(number: &str, rating: &str) -> RawEpisode {
        RawEpisode {
            title: format!("Episode {number}"),
            number: number.to_string(),
            rating: rating.to_string(),
        }
    }

    fn event_name(event: &ProgressEvent) -> &'static str {
        match event {
            ProgressEvent::Searching { .. } => "searching",
            ProgressEvent::ShowFound { .. } => "show_found",
            ProgressEvent::FetchingSeason { .. } => "fetching_season",
            ProgressEvent::DownloadingPoster => "downloading_poster",
            ProgressEvent::Rendering => "rendering",
            ProgressEvent::Saving { .. } => "saving",
            ProgressEvent::Complete { .. } => "complete",
        }
    }

    #[test]
    fn test_unknown_show_fails_without_writing_output() {
        let provider = MockProvider {
            show: None,
            seasons: Vec::new(),
        };
        let output = env::temp_dir().join(format!("ratrix_b_{}.png", ulid::Ulid::new()));
        let mut events = Vec::new();

        let error = run_pipeline(&provider, &stub_renderer(), "gibberish", &output, |event| {
            events.push(event)
        })
        .unwrap_err();

        assert_eq!(error.to_string(), "Unable to get details about 'gibberish'");
        assert!(!output.exists());
        assert_eq!(events.len(), 1);
        assert_eq!(event_name(&events[0]), "searching");
    }

    #[test]
    fn test_pipeline_writes_a_decodable_image() {
        let provider = MockProvider {
            show: Some(show_record(2)),
            // season 2 is missing entirely; it must still render as blank
            seasons: vec![
                Some(vec![raw("2", "N/A"), raw("1", "9.1")]),
                None,
            ],
        };
        let output = env::temp_dir().join(format!("ratrix_e2e_{}.png", ulid::Ulid::new()));
        let mut events = Vec::new();

        run_pipeline(&provider, &stub_renderer(), "mock show", &output, |event| {
            events.push(event)
        })
        .unwrap();

        let image = image::open(&output).unwrap();
        assert!(image.width() > 0 && image.height() > 0);

        let names: Vec<_> = events.iter().map(event_name).collect();
        assert_eq!(
            names,
            vec![
                "searching",
                "show_found",
                "fetching_season",
                "fetching_season",
                "downloading_poster",
                "rendering",
                "saving",
                "complete",
            ]
        );
        let _ = fs::remove_file(output);
    }

    #[test]
    fn test_malformed_payload_is_a_data_format_error() {
        let provider = MockProvider {
            show: Some(show_record(1)),
            seasons: vec![Some(vec![raw("1", "superb")])],
        };
        let output = env::temp_dir().join(format!("ratrix_bad_{}.png", ulid::Ulid::new()));

        let error = run_pipeline(&provider, &stub_renderer(), "mock show", &output, |_| {})
            .unwrap_err();

        assert!(matches!(error, RatrixError::DataFormat(_)));
        assert!(!output.exists());
    }
}
