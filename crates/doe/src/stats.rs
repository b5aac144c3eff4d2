use crate::errors::{DoeError, Result};
use linfa::Float;
use ndarray::{ArrayBase, Axis, Data, Ix2};
use ndarray_stats::QuantileExt;

/// Summary statistics of one dimension of a design
#[derive(Clone, Debug, PartialEq)]
pub struct DimensionStats<F: Float> {
    /// Arithmetic mean
    pub mean: F,
    /// Sample variance `sum((x - mean)^2) / (ns - 1)`, undefined with a single sample
    pub variance: Option<F>,
    /// Square root of the sample variance
    pub std_dev: Option<F>,
    /// Smallest value
    pub min: F,
    /// Largest value
    pub max: F,
}

/// Computes per column statistics of a (ns, nx) matrix of samples
pub fn summary<F: Float>(
    samples: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Vec<DimensionStats<F>>> {
    let ns = samples.nrows();
    if ns == 0 {
        return Err(DoeError::InvalidValueError("no sample to summarize".to_string()));
    }
    samples
        .axis_iter(Axis(1))
        .enumerate()
        .map(|(j, column)| {
            let mean = column.sum() / F::cast(ns);
            let variance = if ns > 1 {
                Some(column.mapv(|x| (x - mean) * (x - mean)).sum() / F::cast(ns - 1))
            } else {
                None
            };
            let min = *column
                .min()
                .map_err(|e| DoeError::InvalidValueError(format!("dimension {j}: {e}")))?;
            let max = *column
                .max()
                .map_err(|e| DoeError::InvalidValueError(format!("dimension {j}: {e}")))?;
            Ok(DimensionStats {
                mean,
                variance,
                std_dev: variance.map(|v| v.sqrt()),
                min,
                max,
            })
        })
        .collect()
}
