//! Codec configuration.
//!
//! None of these settings change the compressed format; they only select how intermediate
//! images are stored in memory.

use crate::block_transform::BLOCK_SIDE;
use arith_codec_common::grid::{BlockedGrid, GridError, GridLayout};

/// Blocking factor of the luma/chroma grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Blocking {
    /// One storage block per 2x2 transform block.
    #[default]
    Transform,
    /// The largest block which fits in 64KiB, see [`BlockedGrid::with_default_blocking`].
    Default,
    /// A fixed block side.
    Fixed(usize),
}

impl Blocking {
    /// Creates a `width` x `height` grid of default elements blocked according to `self`.
    pub fn grid<T: Clone + Default>(
        self,
        width: usize,
        height: usize,
    ) -> Result<BlockedGrid<T>, GridError> {
        match self {
            Self::Transform => BlockedGrid::new(width, height, BLOCK_SIDE),
            Self::Default => BlockedGrid::with_default_blocking(width, height),
            Self::Fixed(block_size) => BlockedGrid::new(width, height, block_size),
        }
    }
}

/// Settings shared by compression and decompression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecSettings {
    /// Storage used for the pixels of decoded and reconstructed images.
    pub pixel_layout: GridLayout,
    /// Blocking factor used for the luma/chroma grid.
    pub color_blocking: Blocking,
}

/// Builds [`CodecSettings`].
///
/// Unset options keep their defaults: [`GridLayout::Blocked`] pixels and
/// [`Blocking::Transform`] colour grids.
///
/// ```
/// use arith_codec::{Blocking, CodecSettingsBuilder};
/// use arith_codec_common::grid::GridLayout;
///
/// let settings = CodecSettingsBuilder::new()
///     .pixel_layout(GridLayout::Plain)
///     .color_blocking(Blocking::Fixed(16))
///     .build();
/// assert_eq!(settings.color_blocking, Blocking::Fixed(16));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CodecSettingsBuilder {
    pixel_layout: Option<GridLayout>,
    color_blocking: Option<Blocking>,
}

impl CodecSettingsBuilder {
    /// Create a new settings builder.
    pub fn new() -> Self {
        Self {
            pixel_layout: None,
            color_blocking: None,
        }
    }

    /// Set the storage used for image pixels.
    pub fn pixel_layout(mut self, layout: GridLayout) -> Self {
        self.pixel_layout = Some(layout);
        self
    }

    /// Set the blocking factor of the luma/chroma grid.
    pub fn color_blocking(mut self, blocking: Blocking) -> Self {
        self.color_blocking = Some(blocking);
        self
    }

    /// Build the settings.
    pub fn build(self) -> CodecSettings {
        CodecSettings {
            pixel_layout: self.pixel_layout.unwrap_or_default(),
            color_blocking: self.color_blocking.unwrap_or_default(),
        }
    }
}
