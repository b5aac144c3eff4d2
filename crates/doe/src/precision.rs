use crate::errors::{DoeError, Result};
use crate::jitter::JITTER_STEPS;
use linfa::Float;
use num_traits::ToPrimitive;

/// Number of decimals used to print a dimension whose strata have zero width
/// (lower bound equal to upper bound).
pub const DEGENERATE_PRECISION: usize = 6;

/// Minimum number of decimals such that `ratio * 10^precision >= JITTER_STEPS`,
/// `ratio` being the stratum width of a dimension.
///
/// With that many decimals two consecutive jitter offsets of a stratum print differently.
pub fn precision<F: Float>(ratio: F) -> Result<usize> {
    let ratio = ToPrimitive::to_f64(&ratio)
        .ok_or_else(|| DoeError::GenerationError("stratum width not representable".to_string()))?;
    if !ratio.is_finite() || ratio < 0. {
        return Err(DoeError::GenerationError(format!(
            "invalid stratum width {ratio}"
        )));
    }
    if ratio == 0. {
        return Ok(DEGENERATE_PRECISION);
    }
    let target = f64::from(JITTER_STEPS);
    let mut precision = 0;
    while ratio * 10f64.powi(precision) < target {
        precision += 1;
    }
    Ok(precision as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_values() {
        assert_eq!(precision(0.2).unwrap(), 3);
        assert_eq!(precision(1.).unwrap(), 2);
        assert_eq!(precision(2.).unwrap(), 2);
        assert_eq!(precision(99.9).unwrap(), 1);
        assert_eq!(precision(100.).unwrap(), 0);
        assert_eq!(precision(1e6).unwrap(), 0);
        assert_eq!(precision(0.001).unwrap(), 5);
        assert_eq!(precision(0.2f32).unwrap(), 3);
    }

    #[test]
    fn test_precision_sufficient_and_minimal() {
        for ratio in [1e-7, 3.3e-4, 0.0125, 0.5, 0.7, 1.5, 12.5, 64., 250., 1e9] {
            let p = precision(ratio).unwrap() as i32;
            assert!(ratio * 10f64.powi(p) >= 100., "{ratio} with {p} decimals");
            if p > 0 {
                assert!(ratio * 10f64.powi(p - 1) < 100., "{ratio} with {p} decimals");
            }
        }
    }

    #[test]
    fn test_degenerate_width() {
        assert_eq!(precision(0.).unwrap(), DEGENERATE_PRECISION);
    }

    #[test]
    fn test_invalid_width() {
        assert!(matches!(precision(-1.), Err(DoeError::GenerationError(_))));
        assert!(matches!(precision(f64::NAN), Err(DoeError::GenerationError(_))));
        assert!(matches!(
            precision(f64::INFINITY),
            Err(DoeError::GenerationError(_))
        ));
    }
}
