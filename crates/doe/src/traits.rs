use crate::errors::Result;
use linfa::Float;
use ndarray::Array2;

/// A sampling method generates `ns` points in a box-shaped sample space
/// `[lower_0, upper_0] x ... x [lower_nx-1, upper_nx-1]`.
pub trait SamplingMethod<F: Float> {
    /// Bounds of the sample space as a (nx, 2) matrix, one `[lower, upper]` row per dimension.
    fn sampling_space(&self) -> &Array2<F>;

    /// Generates a (ns, nx) matrix of points in the unit hypercube `[0, 1[^nx`.
    fn normalized_sample(&self, ns: usize) -> Result<Array2<F>>;

    /// Generates a (ns, nx) matrix of points scaled into [`SamplingMethod::sampling_space`].
    fn sample(&self, ns: usize) -> Result<Array2<F>>;
}
