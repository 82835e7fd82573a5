//! Common test imports and fixtures shared by the unit tests.

pub use crate::image::{Image, Rgb};
pub use arith_codec_common::grid::{Grid2, GridLayout};
pub use rstest::rstest;

/// Every pixel layout an [`Image`] can use.
pub(crate) fn all_layouts() -> impl Iterator<Item = GridLayout> {
    GridLayout::all_values().iter().copied()
}

/// An image with denominator 255 where every pixel has a distinct, predictable colour.
pub(crate) fn gradient_image(layout: GridLayout, width: usize, height: usize) -> Image {
    let mut image = Image::new(layout, width, height, 255).unwrap();
    image.pixels_mut().for_each_default_mut(|col, row, pixel| {
        *pixel = Rgb::new(
            ((col * 37 + row * 11) % 256) as u16,
            ((col * 5 + row * 53) % 256) as u16,
            ((col * 101 + row * 29 + 7) % 256) as u16,
        )
    });
    image
}

/// An image where every pixel is `pixel`.
pub(crate) fn solid_image(
    layout: GridLayout,
    width: usize,
    height: usize,
    denominator: u16,
    pixel: Rgb,
) -> Image {
    let mut image = Image::new(layout, width, height, denominator).unwrap();
    image
        .pixels_mut()
        .for_each_default_mut(|_, _, value| *value = pixel);
    image
}
