use std::f64::consts::PI;

/// The standard deviation used for a gaussian kernel of the given radius.
///
/// Fixed heuristic mapping the kernel support to sigma; half the kernel side.
pub fn gaussian_sigma(radius: usize) -> f64 {
    (2 * radius + 1) as f64 / 2.0
}

/// Create a full 2D gaussian blur kernel.
///
/// The kernel is a `(2 * radius + 1)` sided square matrix in row-major order,
/// holding the isotropic gaussian density evaluated at each integer offset
/// from the center and normalized so the weights sum to 1.0. The
/// normalization corrects for the truncation of the gaussian to a finite
/// support.
///
/// The construction is a pure function of `radius`, so callers that blur
/// repeatedly with the same radius can build the kernel once and reuse it.
///
/// # Arguments
///
/// * `radius` - The kernel radius; `radius = 0` yields the identity kernel `[1.0]`.
///
/// # Returns
///
/// A vector of `(2 * radius + 1)^2` non-negative weights summing to 1.0.
pub fn gaussian_kernel_2d(radius: usize) -> Vec<f64> {
    let side = 2 * radius + 1;
    let sigma = gaussian_sigma(radius);
    let two_sigma_sq = 2.0 * sigma * sigma;
    let scale = 1.0 / (PI * two_sigma_sq);

    let mut kernel = Vec::with_capacity(side * side);
    let r = radius as isize;

    for dy in -r..=r {
        for dx in -r..=r {
            let dist_sq = (dx * dx + dy * dy) as f64;
            kernel.push(scale * (-dist_sq / two_sigma_sq).exp());
        }
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f64>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}
