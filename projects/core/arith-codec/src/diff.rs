//! Root mean square difference between two images.

use crate::image::{Image, Rgb};
use crate::{CodecError, CodecResult};
use arith_codec_common::grid::Grid2;

/// Returns the root mean square difference of `first` and `second`.
///
/// Channels are compared as fractions of each image's own denominator, over the columns and
/// rows both images have. Images of zero area differ by `0.0`.
///
/// # Errors
///
/// [`CodecError::DimensionMismatch`] if the widths or heights differ by more than one.
pub fn rms_difference(first: &Image, second: &Image) -> CodecResult<f64> {
    if first.width().abs_diff(second.width()) > 1 || first.height().abs_diff(second.height()) > 1
    {
        return Err(CodecError::DimensionMismatch {
            first_width: first.width(),
            first_height: first.height(),
            second_width: second.width(),
            second_height: second.height(),
        });
    }

    let width = first.width().min(second.width());
    let height = first.height().min(second.height());
    if width == 0 || height == 0 {
        return Ok(0.0);
    }

    let first_scale = f64::from(first.denominator());
    let second_scale = f64::from(second.denominator());
    let mut sum = 0.0;
    for row in 0..height {
        for col in 0..width {
            let a = channels(first.pixels().at(col, row)?, first_scale);
            let b = channels(second.pixels().at(col, row)?, second_scale);
            sum += a.iter().zip(&b).map(|(a, b)| (a - b) * (a - b)).sum::<f64>();
        }
    }

    Ok((sum / (3 * width * height) as f64).sqrt())
}

#[inline]
fn channels(pixel: &Rgb, scale: f64) -> [f64; 3] {
    [
        f64::from(pixel.red) / scale,
        f64::from(pixel.green) / scale,
        f64::from(pixel.blue) / scale,
    ]
}
