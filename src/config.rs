//! Run configuration and credential loading.
//!
//! The OMDb API key lives in a `.apikey` file in the working directory. It is
//! read once, before any network access, and handed to the provider at
//! construction time rather than living in process-global state.

use crate::grade::GradeThresholds;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default filename for the API key
const API_KEY_FILE: &str = ".apikey";

/// Default font assets, resolved relative to the working directory
const BODY_FONT_FILE: &str = "OpenSans-SemiBold.ttf";
const TITLE_FONT_FILE: &str = "OpenSans-Light.ttf";

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Unable to obtain the API key! Obtain an API key from omdb.com and \
         save it in `{0}` inside the present folder."
    )]
    MissingApiKey(String),
}

/// Selectable color palettes for the rendered matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteName {
    #[default]
    Elementary,
    Gruvbox,
}

impl PaletteName {
    /// Parses a palette name, falling back to the default for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "gruvbox" => PaletteName::Gruvbox,
            _ => PaletteName::Elementary,
        }
    }
}

/// Configuration for one rendering run
#[derive(Debug, Clone)]
pub struct Config {
    /// OMDb API key
    pub api_key: String,
    /// Font used for grid cells and the overall rating
    pub body_font: PathBuf,
    /// Font used for the show title
    pub title_font: PathBuf,
    /// Boundaries for the rating tiers
    pub thresholds: GradeThresholds,
    /// Color palette for the rendered matrix
    pub palette: PaletteName,
}

impl Config {
    /// Loads the configuration from the working directory.
    ///
    /// Fails with an instructive message when the API key file is absent or
    /// empty. Font paths are not checked here; font loading reports its own
    /// errors when the pipeline is constructed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(API_KEY_FILE))
    }

    /// Loads the configuration with an explicit API key file path.
    pub fn load_from(api_key_file: &Path) -> Result<Self, ConfigError> {
        let missing = || ConfigError::MissingApiKey(api_key_file.display().to_string());

        let api_key = fs::read_to_string(api_key_file)
            .map_err(|_| missing())?
            .trim()
            .to_string();

        if api_key.is_empty() {
            return Err(missing());
        }

        Ok(Self {
            api_key,
            body_font: PathBuf::from(BODY_FONT_FILE),
            title_font: PathBuf::from(TITLE_FONT_FILE),
            thresholds: GradeThresholds::default(),
            palette: PaletteName::default(),
        })
    }
}
