pub(crate) mod bleed;
pub(crate) mod pipeline;
pub(crate) mod resample;
pub(crate) mod shade;
pub(crate) mod story;
pub(crate) mod tile;
pub(crate) mod tile_id;

use rayon::prelude::*;

/// Run `f(y, row)` for every `stride`-byte scanline of `data`.
///
/// Parallel runs use the current rayon pool; rows are disjoint so output is identical either way.
pub(crate) fn fill_rows<F>(data: &mut [u8], stride: usize, parallel: bool, f: F)
where
    F: Fn(u32, &mut [u8]) + Sync + Send,
{
    if stride == 0 {
        return;
    }
    if parallel {
        data.par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| f(y as u32, row));
    } else {
        for (y, row) in data.chunks_mut(stride).enumerate() {
            f(y as u32, row);
        }
    }
}
