#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod block_transform;
pub mod chroma;
pub mod codeword;
pub mod color_space;
pub mod diff;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod ppm;
pub mod quantize;
pub mod settings;

mod traverse;

pub use error::*;
pub use image::{Image, Rgb};
pub use settings::*;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
