//! Output file writing.
//!
//! The image is encoded in memory, written to a uniquely named sibling file,
//! and renamed into place. A run that dies mid-write therefore never leaves
//! a partial output file at the destination path.

use image::{ImageFormat, RgbImage};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing the output image
#[derive(Debug, Error)]
pub enum OutputError {
    #[error(
        "Cannot determine an image format for {0}: use a known extension \
         such as .png or .jpg"
    )]
    UnknownFormat(PathBuf),

    #[error("Failed to encode the image: {0}")]
    Encode(String),

    #[error("Failed to write the output file: {0}")]
    Io(#[from] std::io::Error),
}

/// Saves the rendered image to `path`.
///
/// The format is chosen from the path's extension.
pub(crate) fn save_image(image: &RgbImage, path: &Path) -> Result<(), OutputError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| OutputError::UnknownFormat(path.to_path_buf()))?;

    let mut encoded = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut encoded), format)
        .map_err(|e| OutputError::Encode(e.to_string()))?;

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("ratrix");
    let temp_path = path.with_file_name(format!("{file_name}.{}.tmp", ulid::Ulid::new()));

    fs::write(&temp_path, &encoded)?;
    if let Err(e) = fs::rename(&temp_path, path) {
        // best effort: don't leave the temp sibling behind
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    Ok(())
}
