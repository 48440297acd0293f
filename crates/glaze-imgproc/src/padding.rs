use glaze_image::{Image, ImageError};
use rayon::prelude::*;

/// Maps index `i` to a valid index within `[0, len)` by mirroring it across
/// the nearest boundary.
///
/// Negative overflow mirrors around the first element without repeating it
/// (`-1 -> 1`), while overflow past the end mirrors starting with the last
/// element itself (`len -> len - 1`). The reflection is applied repeatedly,
/// so the mapping stays valid when the overflow exceeds the dimension.
///
/// # Arguments
/// - `i`: The (possibly out-of-range) coordinate index.
/// - `len`: The valid length of the dimension.
///
/// # Returns
/// A valid mapped index within `[0, len)`.
#[inline]
pub fn reflect_index(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let len = len as isize;
    let mut i = i;
    while i < 0 || i >= len {
        if i < 0 {
            i = -i;
        } else {
            i = 2 * len - 1 - i;
        }
    }
    i as usize
}

/// Creates a mirror-padded copy of an image, extending it by `radius` pixels
/// on every side.
///
/// The source pixels are copied to the center of `dst` and the border region
/// is filled by reflecting the source across its edges, with the row and
/// column reflections applied independently (corners compose both).
///
/// # Arguments
///
/// * `src` - The source image to pad.
/// * `dst` - The destination image, sized `(W + 2 * radius, H + 2 * radius)`.
/// * `radius` - The padding extent in pixels on each side.
///
/// # Errors
///
/// Returns an error if `src` is empty or if `dst` does not have the expected
/// padded dimensions.
///
/// # Example
///
/// ```rust
/// use glaze_image::{Image, ImageSize};
/// use glaze_imgproc::padding::mirror_pad;
///
/// let src = Image::<u8, 3>::new(
///     ImageSize { width: 2, height: 2 },
///     vec![1u8; 2 * 2 * 3],
/// ).unwrap();
///
/// let mut dst = Image::<u8, 3>::from_size_val(
///     ImageSize { width: 4, height: 4 },
///     0u8,
/// ).unwrap();
///
/// mirror_pad(&src, &mut dst, 1).unwrap();
///
/// assert!(dst.as_slice().iter().all(|&v| v == 1));
/// ```
pub fn mirror_pad<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    radius: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    if src.width() == 0 || src.height() == 0 {
        return Err(ImageError::InvalidImageSize(src.width(), src.height(), 1, 1));
    }

    let old_width = src.width();
    let old_height = src.height();
    let new_width = old_width + 2 * radius;
    let new_height = old_height + 2 * radius;

    if dst.width() != new_width || dst.height() != new_height {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            new_width,
            new_height,
        ));
    }

    let row_stride = new_width * C;
    let old_stride = old_width * C;

    let old_data = src.as_slice();
    let new_data = dst.as_slice_mut();

    // copy the source image into the center of the padded buffer
    let row_offset = radius * row_stride + radius * C;
    for (src_row, dst_row) in old_data
        .chunks_exact(old_stride)
        .zip(new_data[row_offset..].chunks_exact_mut(row_stride))
    {
        dst_row[..old_stride].copy_from_slice(src_row);
    }

    // top border rows, copied from the already-filled center rows
    {
        let (top_section, rest) = new_data.split_at_mut(radius * row_stride);

        top_section
            .par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(y, dst_row)| {
                let src_y = reflect_index(y as isize - radius as isize, old_height);
                let src_row = &rest[src_y * row_stride..(src_y + 1) * row_stride];
                dst_row.copy_from_slice(src_row);
            });
    }

    // bottom border rows
    {
        let split_point = (new_height - radius) * row_stride;
        let (rest, bottom_section) = new_data.split_at_mut(split_point);

        bottom_section
            .par_chunks_exact_mut(row_stride)
            .enumerate()
            .for_each(|(idx, dst_row)| {
                let y = new_height - radius + idx;
                let src_y = reflect_index(y as isize - radius as isize, old_height);
                let src_start = (src_y + radius) * row_stride;
                let src_row = &rest[src_start..src_start + row_stride];
                dst_row.copy_from_slice(src_row);
            });
    }

    // left and right border columns, per row; this also fixes the corner
    // cells of the border rows filled above
    new_data.par_chunks_exact_mut(row_stride).for_each(|row| {
        for x in 0..radius {
            let src_x = reflect_index(x as isize - radius as isize, old_width);
            let src_idx = (radius + src_x) * C;
            row.copy_within(src_idx..src_idx + C, x * C);
        }

        for x in (new_width - radius)..new_width {
            let src_x = reflect_index(x as isize - radius as isize, old_width);
            let src_idx = (radius + src_x) * C;
            row.copy_within(src_idx..src_idx + C, x * C);
        }
    });

    Ok(())
}
