//! Pixel sinks and the row-major frame buffer
//!
//! Tracing and rasterizing address pixels in canvas space: the origin is the
//! center of the image and y grows upward. `Canvas` stores device space:
//! row 0 is the top row and columns grow to the right.

use std::path::Path;

use image::{Rgb, RgbImage};

use crate::color::Color;

/// UTF-8 character gradient from dark to light
pub const ASCII_GRADIENT: &str = " ·∙:;░▒▓█";

/// Receives clamped colors at canvas-space coordinates
pub trait PixelSink {
    /// Write one pixel. Coordinates outside the sink are ignored.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color);
}

/// Lowest canvas x (leftmost column)
fn min_x(width: u32) -> i32 {
    -((width / 2) as i32)
}

/// Highest canvas y (top row)
fn max_y(height: u32) -> i32 {
    (height - height / 2) as i32 - 1
}

/// Canvas-space `(x, y)` to device-space `(column, row)`
fn to_device(x: i32, y: i32, width: u32, height: u32) -> Option<(usize, usize)> {
    let col = x - min_x(width);
    let row = max_y(height) - y;
    if col < 0 || row < 0 || col >= width as i32 || row >= height as i32 {
        return None;
    }
    Some((col as usize, row as usize))
}

/// A full frame of pixels in row-major device order
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill.clamp(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, top row first
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Pixel at device `(col, row)`
    pub fn pixel(&self, col: usize, row: usize) -> Color {
        self.pixels[row * self.width as usize + col]
    }

    /// Pixel at canvas-space `(x, y)`, if inside the canvas
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        to_device(x, y, self.width, self.height).map(|(col, row)| self.pixel(col, row))
    }

    /// Canvas-space x coordinates, left to right
    pub fn canvas_columns(&self) -> std::ops::Range<i32> {
        let start = min_x(self.width);
        start..start + self.width as i32
    }

    /// Split the rows into `count` contiguous bands of equal height.
    ///
    /// The last band absorbs the remainder. `count` is capped at the number
    /// of rows so that no band is empty.
    pub fn bands_mut(&mut self, count: usize) -> Vec<CanvasBand<'_>> {
        let height = self.height as usize;
        let width = self.width as usize;
        let count = count.clamp(1, height.max(1));
        let band_rows = height / count;

        let mut bands = Vec::with_capacity(count);
        let mut rest: &mut [Color] = &mut self.pixels;
        for index in 0..count {
            let first_row = index * band_rows;
            let rows = if index == count - 1 { height - first_row } else { band_rows };
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(rows * width);
            rest = tail;
            bands.push(CanvasBand {
                canvas_width: self.width,
                canvas_height: self.height,
                first_row,
                rows,
                pixels: head,
            });
        }

        bands
    }

    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |col, row| {
            Rgb(self.pixel(col as usize, row as usize).to_rgb())
        })
    }

    /// Save as an image; the format follows the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_rgb_image().save(path)
    }

    /// Convert to a grayscale character picture
    pub fn to_ascii(&self) -> String {
        let gradient_chars: Vec<char> = ASCII_GRADIENT.chars().collect();
        let width = self.width as usize;
        let mut result = String::with_capacity(self.pixels.len() + self.height as usize);

        for row in self.pixels.chunks(width.max(1)) {
            for color in row {
                let [r, g, b] = color.to_rgb();
                let luminance = (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32) / 255.0;
                let index = ((luminance * (gradient_chars.len() - 1) as f32).round() as usize)
                    .min(gradient_chars.len() - 1);
                result.push(gradient_chars[index]);
            }
            result.push('\n');
        }

        result
    }

    /// Convert to half-block characters with 24-bit ANSI colors.
    ///
    /// Each `▀` covers two rows: the foreground is the upper pixel and the
    /// background is the lower one.
    pub fn to_ansi_halfblock(&self) -> String {
        let width = self.width as usize;
        let height = self.height as usize;
        let output_height = height.div_ceil(2);
        let mut result = String::with_capacity(width * output_height * 20);

        // Only emit escape codes when a color changes
        let mut last_fg: Option<[u8; 3]> = None;
        let mut last_bg: Option<[u8; 3]> = None;

        for y in 0..output_height {
            let top_row = y * 2;
            let bottom_row = top_row + 1;

            for x in 0..width {
                let fg = self.pixel(x, top_row).to_rgb();
                let bg = if bottom_row < height {
                    self.pixel(x, bottom_row).to_rgb()
                } else {
                    [0, 0, 0]
                };

                if last_fg != Some(fg) {
                    result.push_str(&format!("\x1b[38;2;{};{};{}m", fg[0], fg[1], fg[2]));
                    last_fg = Some(fg);
                }
                if last_bg != Some(bg) {
                    result.push_str(&format!("\x1b[48;2;{};{};{}m", bg[0], bg[1], bg[2]));
                    last_bg = Some(bg);
                }

                result.push('\u{2580}');
            }

            result.push_str("\x1b[0m\n");
            last_fg = None;
            last_bg = None;
        }

        result
    }
}

impl PixelSink for Canvas {
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some((col, row)) = to_device(x, y, self.width, self.height) {
            self.pixels[row * self.width as usize + col] = color.clamp();
        }
    }
}

/// Mutable view of a contiguous run of canvas rows
#[derive(Debug)]
pub struct CanvasBand<'a> {
    canvas_width: u32,
    canvas_height: u32,
    first_row: usize,
    rows: usize,
    pixels: &'a mut [Color],
}

impl CanvasBand<'_> {
    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Device rows covered by this band
    pub fn rows(&self) -> std::ops::Range<usize> {
        self.first_row..self.first_row + self.rows
    }

    /// Canvas-space y coordinates of this band, top to bottom
    pub fn canvas_rows(&self) -> impl Iterator<Item = i32> {
        let top = max_y(self.canvas_height) - self.first_row as i32;
        (0..self.rows as i32).map(move |i| top - i)
    }

    /// Canvas-space x coordinates, left to right
    pub fn canvas_columns(&self) -> std::ops::Range<i32> {
        let start = min_x(self.canvas_width);
        start..start + self.canvas_width as i32
    }
}

impl PixelSink for CanvasBand<'_> {
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        let Some((col, row)) = to_device(x, y, self.canvas_width, self.canvas_height) else {
            return;
        };
        if !self.rows().contains(&row) {
            return;
        }
        let local_row = row - self.first_row;
        self.pixels[local_row * self.canvas_width as usize + col] = color.clamp();
    }
}
