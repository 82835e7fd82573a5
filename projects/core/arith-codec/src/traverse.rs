use crate::CodecResult;
use arith_codec_common::grid::Grid2;

/// Calls `fill(col, row, element)` for every element of `grid` in its default order, stopping
/// at the first error.
pub(crate) fn try_fill<T, G, F>(grid: &mut G, mut fill: F) -> CodecResult<()>
where
    G: Grid2<T>,
    F: FnMut(usize, usize, &mut T) -> CodecResult<()>,
{
    let mut status = Ok(());
    grid.for_each_default_mut(|col, row, element| {
        if status.is_ok() {
            status = fill(col, row, element);
        }
    });
    status
}
