//! Grid rendering and poster compositing.
//!
//! The grid is drawn on its own solid-background layer: header row, one row
//! per episode index, the rotated "Episodes" caption, and the title/rating
//! stat block. The poster is resized to the canvas, blurred, and the grid
//! layer is alpha-blended over it.

use crate::episodes::EpisodeMatrix;
use crate::grade::{GradeThresholds, Rating, Tier, classify};
use crate::layout::{
    LayoutState, MARKER_PADDING_HEIGHT, MARKER_WIDTH, NAME_RATING_SPACING, STAT_PADDING,
};
use crate::metadata_retrieval::ShowRecord;
use crate::text::TextShaper;
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

/// Blend weight of the grid layer over the poster (1.0 = grid only)
pub(crate) const DEFAULT_OPACITY: f32 = 0.85;

/// Gaussian blur sigma applied to the resized poster
const POSTER_BLUR_SIGMA: f32 = 5.0;

/// Colors used by the renderer.
///
/// Grade colors cover the three numeric tiers plus the dedicated
/// missing-data color for `N/A` ratings.
#[derive(Debug, Clone)]
pub(crate) struct Palette {
    pub background: Rgb<u8>,
    pub foreground: Rgb<u8>,
    pub worst: Rgb<u8>,
    pub medium: Rgb<u8>,
    pub best: Rgb<u8>,
    pub missing: Rgb<u8>,
}

impl Palette {
    /// elementary OS inspired colors (default)
    pub fn elementary() -> Self {
        Self {
            background: Rgb([0x10, 0x10, 0x10]),
            foreground: Rgb([0xf2, 0xf2, 0xf2]),
            worst: Rgb([0xe1, 0x32, 0x1a]),
            medium: Rgb([0xff, 0xc0, 0x05]),
            best: Rgb([0x6a, 0xb0, 0x17]),
            missing: Rgb([0x2a, 0xa7, 0xe7]),
        }
    }

    /// gruvbox colors
    pub fn gruvbox() -> Self {
        Self {
            background: Rgb([0x28, 0x28, 0x28]),
            foreground: Rgb([0xeb, 0xdb, 0xb2]),
            worst: Rgb([0xcc, 0x24, 0x1d]),
            medium: Rgb([0xd7, 0x99, 0x21]),
            best: Rgb([0x98, 0x97, 0x1a]),
            missing: Rgb([0x8e, 0xc0, 0x7c]),
        }
    }

    fn grade_color(&self, tier: Tier) -> Rgb<u8> {
        match tier {
            Tier::Worst => self.worst,
            Tier::Medium => self.medium,
            Tier::Best => self.best,
            Tier::Missing => self.missing,
        }
    }
}

/// One drawable cell of a grid row.
///
/// Absent positions in a row are `None` and are skipped entirely: no marker,
/// no text, not even an outline.
enum Cell {
    /// Header or row-label cell; its marker uses the background color
    Text(String),
    /// Rating cell; its marker color comes from the grade classifier
    Grade(Rating),
}

impl Cell {
    fn label(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Grade(rating) => rating.to_string(),
        }
    }
}

/// Draws the ratings matrix and composites it with the poster.
pub(crate) struct MatrixRenderer<T: TextShaper> {
    palette: Palette,
    thresholds: GradeThresholds,
    opacity: f32,
    body: T,
    title: T,
}

impl<T: TextShaper> MatrixRenderer<T> {
    pub fn new(
        body: T,
        title: T,
        palette: Palette,
        thresholds: GradeThresholds,
        opacity: f32,
    ) -> Self {
        Self {
            palette,
            thresholds,
            opacity,
            body,
            title,
        }
    }

    /// Renders the final image: sizes the canvas against the poster, draws
    /// the grid layer, and blends it over the resized, blurred poster.
    pub fn render(
        &self,
        show: &ShowRecord,
        matrix: &EpisodeMatrix,
        poster: &DynamicImage,
    ) -> RgbImage {
        let num_seasons = matrix.len();
        let max_episodes = matrix.iter().map(Vec::len).max().unwrap_or(0);

        let mut state = LayoutState::default();
        let (width, height) = state.fit_to_poster(
            (poster.width(), poster.height()),
            &show.title,
            &self.title,
            &self.body,
            num_seasons,
            max_episodes,
        );

        let layer = self.draw_layer(show, matrix, &state, width, height);
        self.composite(poster, &layer, width, height)
    }

    /// Draws the grid layer on a solid background canvas.
    pub(crate) fn draw_layer(
        &self,
        show: &ShowRecord,
        matrix: &EpisodeMatrix,
        state: &LayoutState,
        width: u32,
        height: u32,
    ) -> RgbImage {
        let mut canvas = RgbImage::from_pixel(width, height, self.palette.background);
        let max_episodes = matrix.iter().map(Vec::len).max().unwrap_or(0);

        self.draw_season_caption(&mut canvas, state, width);
        self.draw_episode_caption(&mut canvas, state, height);

        // header row: blank corner, then the season numbers
        let mut header: Vec<Option<Cell>> = vec![None];
        header.extend((1..=matrix.len()).map(|season| Some(Cell::Text(season.to_string()))));
        self.draw_row(&mut canvas, state, (state.padding, state.padding), &header);

        // one row per episode index; absent positions stay blank
        let mut top = state.padding + state.box_height;
        for index in 0..max_episodes {
            let mut cells: Vec<Option<Cell>> = vec![Some(Cell::Text((index + 1).to_string()))];
            cells.extend(
                matrix
                    .iter()
                    .map(|season| season.get(index).map(|episode| Cell::Grade(episode.rating))),
            );

            self.draw_row(&mut canvas, state, (state.padding, top), &cells);
            top += state.box_height;
        }

        self.draw_stat_block(&mut canvas, show, height);
        canvas
    }

    /// Centered "Seasons" caption above the grid.
    fn draw_season_caption(&self, canvas: &mut RgbImage, state: &LayoutState, width: u32) {
        let size = self.body.measure("Seasons");
        let x = (width.saturating_sub(size.width) / 2 + state.box_width / 2) as i32;
        let y = state.padding.saturating_sub(size.height) as i32;
        self.body
            .draw(canvas, "Seasons", x, y, self.palette.foreground);
    }

    /// Vertical "Episodes" caption along the left edge, reading bottom-up.
    fn draw_episode_caption(&self, canvas: &mut RgbImage, state: &LayoutState, height: u32) {
        let size = self.body.measure("Episodes");
        if size.width == 0 || size.height == 0 {
            return;
        }

        let mut strip = RgbImage::from_pixel(size.width, size.height, self.palette.background);
        self.body
            .draw(&mut strip, "Episodes", 0, 0, self.palette.foreground);
        let rotated = imageops::rotate270(&strip);

        let x = state.padding.saturating_sub(size.height) as i64;
        let y = (height.saturating_sub(size.width) / 2) as i64;
        imageops::overlay(canvas, &rotated, x, y);
    }

    /// Draws one grid row starting at `origin`.
    fn draw_row(
        &self,
        canvas: &mut RgbImage,
        state: &LayoutState,
        origin: (u32, u32),
        cells: &[Option<Cell>],
    ) {
        let mut left = origin.0;
        let top = origin.1;

        for cell in cells {
            let cell_left = left;
            left += state.box_width;

            let Some(cell) = cell else {
                continue;
            };

            let marker_color = match cell {
                Cell::Text(_) => self.palette.background,
                Cell::Grade(rating) => self
                    .palette
                    .grade_color(classify(*rating, &self.thresholds)),
            };

            fill_rect(
                canvas,
                cell_left,
                top + MARKER_PADDING_HEIGHT / 2,
                MARKER_WIDTH,
                state.box_height.saturating_sub(MARKER_PADDING_HEIGHT),
                marker_color,
            );

            let label = cell.label();
            let size = self.body.measure(&label);
            let pad_left = (state.box_width + MARKER_WIDTH).saturating_sub(size.width) / 2;
            let pad_top = state.box_height.saturating_sub(size.height) / 2;
            self.body.draw(
                canvas,
                &label,
                (cell_left + pad_left) as i32,
                (top + pad_top) as i32,
                self.palette.foreground,
            );
        }
    }

    /// Show title plus the grade-colored overall rating at the bottom left.
    fn draw_stat_block(&self, canvas: &mut RgbImage, show: &ShowRecord, height: u32) {
        let name = self.title.measure(&show.title);
        let top = height.saturating_sub(name.height + STAT_PADDING);

        self.title.draw(
            canvas,
            &show.title,
            STAT_PADDING as i32,
            top as i32,
            self.palette.foreground,
        );

        let rating_text = show.overall_rating.to_string();
        let rating_size = self.body.measure(&rating_text);
        let marker_left = STAT_PADDING + name.width + NAME_RATING_SPACING;
        let marker_width = MARKER_WIDTH / 2;

        fill_rect(
            canvas,
            marker_left,
            top,
            marker_width,
            rating_size.height,
            self.palette
                .grade_color(classify(show.overall_rating, &self.thresholds)),
        );

        self.body.draw(
            canvas,
            &rating_text,
            (marker_left + marker_width + 5) as i32,
            top as i32,
            self.palette.foreground,
        );
    }

    /// Resizes and blurs the poster, then blends the grid layer over it.
    fn composite(
        &self,
        poster: &DynamicImage,
        layer: &RgbImage,
        width: u32,
        height: u32,
    ) -> RgbImage {
        let resized = poster.resize_exact(width, height, FilterType::Triangle).to_rgb8();
        let blurred = imageops::blur(&resized, POSTER_BLUR_SIGMA);

        let alpha = self.opacity;
        let mut output = RgbImage::new(width, height);
        for (out, (back, front)) in output
            .pixels_mut()
            .zip(blurred.pixels().zip(layer.pixels()))
        {
            for channel in 0..3 {
                let blended = back.0[channel] as f32 * (1.0 - alpha)
                    + front.0[channel] as f32 * alpha;
                out.0[channel] = blended.round() as u8;
            }
        }
        output
    }
}

/// Fills a rectangle, clipped to the canvas bounds.
fn fill_rect(canvas: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}
