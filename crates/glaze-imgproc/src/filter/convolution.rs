use glaze_image::{Image, ImageDtype, ImageError};
use rayon::prelude::*;

/// Apply a dense 2D convolution to a mirror-padded image.
///
/// For every output pixel the full `(2 * radius + 1)^2` window of the padded
/// buffer is accumulated per channel in f64, then converted back to the
/// channel type (clamped and truncated for `u8`). Output rows are computed
/// in parallel; each row only reads the shared padded buffer and the kernel.
///
/// # Arguments
///
/// * `padded` - The padded source image, sized `(W + 2 * radius, H + 2 * radius)`.
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The row-major square kernel of side `2 * radius + 1`.
/// * `radius` - The kernel radius.
///
/// # Errors
///
/// Returns an error if `dst` is empty, if the kernel length does not match
/// the radius, or if `padded` does not have the expected padded dimensions.
pub fn conv2d<T, const C: usize>(
    padded: &Image<T, C>,
    dst: &mut Image<T, C>,
    kernel: &[f64],
    radius: usize,
) -> Result<(), ImageError>
where
    T: ImageDtype,
{
    let side = 2 * radius + 1;
    if kernel.len() != side * side {
        return Err(ImageError::InvalidChannelShape(kernel.len(), side * side));
    }

    if dst.width() == 0 || dst.height() == 0 {
        return Err(ImageError::InvalidImageSize(dst.width(), dst.height(), 1, 1));
    }

    if padded.width() != dst.width() + 2 * radius || padded.height() != dst.height() + 2 * radius {
        return Err(ImageError::InvalidImageSize(
            padded.width(),
            padded.height(),
            dst.width() + 2 * radius,
            dst.height() + 2 * radius,
        ));
    }

    let dst_width = dst.width();
    let pad_stride = padded.width() * C;
    let pad_data = padded.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_width * C)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst_pix) in dst_row.chunks_exact_mut(C).enumerate() {
                let mut acc = [0.0f64; C];

                for j in 0..side {
                    let row_start = (y + j) * pad_stride + x * C;
                    let window_row = &pad_data[row_start..row_start + side * C];
                    let kernel_row = &kernel[j * side..(j + 1) * side];

                    for (pix, &w) in window_row.chunks_exact(C).zip(kernel_row) {
                        for (a, &p) in acc.iter_mut().zip(pix) {
                            *a += p.into() * w;
                        }
                    }
                }

                for (d, &a) in dst_pix.iter_mut().zip(acc.iter()) {
                    *d = T::from_f64(a);
                }
            }
        });

    Ok(())
}
