//! Font loading and text drawing.
//!
//! Layout and rendering only ever talk to the `TextShaper` trait, so sizing
//! arithmetic and grid drawing can be tested with a fixed-advance stub
//! instead of real font assets.

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading font assets
#[derive(Debug, Error)]
pub enum FontError {
    #[error(
        "Font file not found: {0} (place the OpenSans .ttf assets in the \
         present folder)"
    )]
    NotFound(PathBuf),

    #[error("Failed to parse font {0}: not a usable TrueType/OpenType file")]
    Invalid(PathBuf),
}

/// Pixel extent of a piece of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// Measures and rasterizes text at a fixed size.
pub(crate) trait TextShaper {
    /// Returns the pixel extent of `text`.
    fn measure(&self, text: &str) -> TextSize;

    /// Draws `text` with its top-left corner at `(x, y)`.
    ///
    /// Glyph coverage is alpha-blended into the canvas; writes outside the
    /// canvas bounds are discarded.
    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>);
}

/// A font loaded from disk together with its pixel scale.
pub(crate) struct LoadedFont {
    font: FontVec,
    scale: PxScale,
}

impl LoadedFont {
    /// Loads a TrueType/OpenType font from `path` at `px` pixels.
    pub fn from_file(path: &Path, px: f32) -> Result<Self, FontError> {
        let bytes = fs::read(path).map_err(|_| FontError::NotFound(path.to_path_buf()))?;
        let font =
            FontVec::try_from_vec(bytes).map_err(|_| FontError::Invalid(path.to_path_buf()))?;

        Ok(Self {
            font,
            scale: PxScale::from(px),
        })
    }
}

impl TextShaper for LoadedFont {
    fn measure(&self, text: &str) -> TextSize {
        let scaled = self.font.as_scaled(self.scale);

        let mut width = 0.0f32;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        TextSize {
            width: width.ceil() as u32,
            height: (scaled.ascent() - scaled.descent()).ceil() as u32,
        }
    }

    fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>) {
        let scaled = self.font.as_scaled(self.scale);
        let baseline = y as f32 + scaled.ascent();

        let mut caret = x as f32;
        let mut previous: Option<GlyphId> = None;
        for c in text.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(self.scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    if px < 0 || py < 0 {
                        return;
                    }
                    let (px, py) = (px as u32, py as u32);
                    if px >= canvas.width() || py >= canvas.height() {
                        return;
                    }
                    let pixel = canvas.get_pixel_mut(px, py);
                    for channel in 0..3 {
                        let blended = pixel.0[channel] as f32 * (1.0 - coverage)
                            + color.0[channel] as f32 * coverage;
                        pixel.0[channel] = blended.round() as u8;
                    }
                });
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Deterministic shaper for tests: every glyph is `advance` pixels wide,
    /// and drawing fills the measured extent with the given color.
    pub(crate) struct FixedAdvance {
        pub advance: u32,
        pub height: u32,
    }

    impl FixedAdvance {
        pub fn new(advance: u32, height: u32) -> Self {
            Self { advance, height }
        }
    }

    impl TextShaper for FixedAdvance {
        fn measure(&self, text: &str) -> TextSize {
            TextSize {
                width: self.advance * text.chars().count() as u32,
                height: self.height,
            }
        }

        fn draw(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>) {
            let size = self.measure(text);
            for dy in 0..size.height {
                for dx in 0..size.width {
                    let px = x + dx as i32;
                    let py = y + dy as i32;
                    if px >= 0
                        && py >= 0
                        && (px as u32) < canvas.width()
                        && (py as u32) < canvas.height()
                    {
                        canvas.put_pixel(px as u32, py as u32, color);
                    }
                }
            }
        }
    }

    #[test]
    fn test_fixed_advance_measure() {
        let shaper = FixedAdvance::new(4, 10);
        assert_eq!(shaper.measure("abc"), TextSize { width: 12, height: 10 });
        assert_eq!(shaper.measure(""), TextSize { width: 0, height: 10 });
    }
}
