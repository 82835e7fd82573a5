//! RGB images with a per-image sample scale.

use crate::CodecResult;
use arith_codec_common::grid::{AnyGrid, Grid2, GridLayout};

/// Denominator used for every decompressed image.
pub const DEFAULT_DENOMINATOR: u16 = 255;

/// One pixel, each channel in `0..=denominator` of the owning [`Image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel
    pub red: u16,
    /// Green channel
    pub green: u16,
    /// Blue channel
    pub blue: u16,
}

impl Rgb {
    /// Creates a pixel from its three channels.
    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }
}

/// A `width` x `height` raster of [`Rgb`] pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pixels: AnyGrid<Rgb>,
    denominator: u16,
}

impl Image {
    /// Creates a black image whose pixels are stored using `layout`.
    pub fn new(
        layout: GridLayout,
        width: usize,
        height: usize,
        denominator: u16,
    ) -> CodecResult<Self> {
        Ok(Self {
            pixels: AnyGrid::new(layout, width, height)?,
            denominator,
        })
    }

    /// Wraps an existing pixel grid.
    pub fn from_pixels(pixels: AnyGrid<Rgb>, denominator: u16) -> Self {
        Self {
            pixels,
            denominator,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.height()
    }

    /// Value representing full intensity for every channel.
    #[inline]
    pub fn denominator(&self) -> u16 {
        self.denominator
    }

    /// The pixel storage.
    #[inline]
    pub fn pixels(&self) -> &AnyGrid<Rgb> {
        &self.pixels
    }

    /// The pixel storage, mutably.
    #[inline]
    pub fn pixels_mut(&mut self) -> &mut AnyGrid<Rgb> {
        &mut self.pixels
    }

    /// Drops the last column and/or row when the width and/or height is odd.
    ///
    /// Images which are already even are returned unchanged. The layout is preserved.
    pub fn trim_to_even(self) -> CodecResult<Self> {
        let width = self.width() & !1;
        let height = self.height() & !1;
        if width == self.width() && height == self.height() {
            return Ok(self);
        }

        let mut trimmed = Self::new(self.pixels.layout(), width, height, self.denominator)?;
        for row in 0..height {
            for col in 0..width {
                *trimmed.pixels.at_mut(col, row)? = *self.pixels.at(col, row)?;
            }
        }
        Ok(trimmed)
    }
}
