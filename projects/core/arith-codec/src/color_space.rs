//! Conversion between scaled RGB and luma/chroma (Y, Pb, Pr).

use crate::image::{Image, Rgb, DEFAULT_DENOMINATOR};
use crate::settings::Blocking;
use crate::traverse::try_fill;
use crate::CodecResult;
use arith_codec_common::grid::{BlockedGrid, Grid2, GridLayout};
use tracing::debug;

/// One pixel in luma/chroma space.
///
/// `y` is nominally in `[0, 1]`; `pb` and `pr` are centred on zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorPixel {
    /// Luma
    pub y: f32,
    /// Blue-difference chroma
    pub pb: f32,
    /// Red-difference chroma
    pub pr: f32,
}

impl ColorPixel {
    /// Converts an RGB pixel whose channels are in `0..=denominator`.
    pub fn from_rgb(pixel: Rgb, denominator: u16) -> Self {
        let scale = f32::from(denominator);
        let r = f32::from(pixel.red) / scale;
        let g = f32::from(pixel.green) / scale;
        let b = f32::from(pixel.blue) / scale;

        Self {
            y: 0.299 * r + 0.587 * g + 0.114 * b,
            pb: -0.168736 * r - 0.331264 * g + 0.5 * b,
            pr: 0.5 * r - 0.418688 * g - 0.081312 * b,
        }
    }

    /// Converts back to RGB with channels in `0..=denominator`.
    ///
    /// Each channel is clamped to `[0, 1]` before scaling and rounding.
    pub fn to_rgb(self, denominator: u16) -> Rgb {
        let Self { y, pb, pr } = self;
        let r = y + 1.402 * pr;
        let g = y - 0.344136 * pb - 0.714136 * pr;
        let b = y + 1.772 * pb;

        Rgb::new(
            scale_channel(r, denominator),
            scale_channel(g, denominator),
            scale_channel(b, denominator),
        )
    }
}

/// Converts every pixel of `image` to luma/chroma.
///
/// The image is consumed; the returned grid is blocked according to `blocking`.
pub fn to_color_space(image: Image, blocking: Blocking) -> CodecResult<BlockedGrid<ColorPixel>> {
    debug!(
        width = image.width(),
        height = image.height(),
        ?blocking,
        "converting to luma/chroma"
    );

    let denominator = image.denominator();
    let mut colors = blocking.grid(image.width(), image.height())?;
    try_fill(&mut colors, |col, row, color| {
        *color = ColorPixel::from_rgb(*image.pixels().at(col, row)?, denominator);
        Ok(())
    })?;
    Ok(colors)
}

/// Converts a luma/chroma grid back to an RGB image with denominator
/// [`DEFAULT_DENOMINATOR`], storing its pixels using `layout`.
pub fn from_color_space(colors: BlockedGrid<ColorPixel>, layout: GridLayout) -> CodecResult<Image> {
    debug!(
        width = colors.width(),
        height = colors.height(),
        ?layout,
        "converting to RGB"
    );

    let mut image = Image::new(layout, colors.width(), colors.height(), DEFAULT_DENOMINATOR)?;
    try_fill(image.pixels_mut(), |col, row, pixel| {
        *pixel = colors.at(col, row)?.to_rgb(DEFAULT_DENOMINATOR);
        Ok(())
    })?;
    Ok(image)
}

#[inline]
fn scale_channel(value: f32, denominator: u16) -> u16 {
    // NaN clamps to NaN, which the saturating cast turns into 0.
    (value.clamp(0.0, 1.0) * f32::from(denominator)).round() as u16
}
