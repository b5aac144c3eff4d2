//! Parsers of command line values.
use crate::errors::{LhcubeError, Result};
use lhcube_doe::{JitterSelector, ScaleOverride};

fn parse_bound(s: &str, what: &str) -> Result<f64> {
    let v = s
        .trim()
        .parse::<f64>()
        .map_err(|_| LhcubeError::InvalidArgument(format!("invalid {what} '{}'", s.trim())))?;
    if !v.is_finite() {
        return Err(LhcubeError::InvalidArgument(format!(
            "{what} should be finite, got '{}'",
            s.trim()
        )));
    }
    Ok(v)
}

fn bounds(lower: &str, upper: &str) -> Result<(f64, f64)> {
    let lower = parse_bound(lower, "lower bound")?;
    let upper = parse_bound(upper, "upper bound")?;
    if lower > upper {
        return Err(LhcubeError::InvalidArgument(format!(
            "lower bound {lower} greater than upper bound {upper}"
        )));
    }
    Ok((lower, upper))
}

/// Parses `LO:HI` bounds
pub fn parse_scale(s: &str) -> Result<(f64, f64)> {
    match s.split(':').collect::<Vec<_>>()[..] {
        [lower, upper] => bounds(lower, upper),
        _ => Err(LhcubeError::InvalidArgument(format!(
            "invalid scale '{s}', expected LO:HI"
        ))),
    }
}

/// Parses `I:LO:HI` bounds of the `I`-th dimension
pub fn parse_override(s: &str) -> Result<ScaleOverride> {
    match s.split(':').collect::<Vec<_>>()[..] {
        [dim, lower, upper] => {
            let dim = dim.trim().parse::<usize>().map_err(|_| {
                LhcubeError::InvalidArgument(format!("invalid dimension index '{}'", dim.trim()))
            })?;
            let (lower, upper) = bounds(lower, upper)?;
            Ok(ScaleOverride { dim, lower, upper })
        }
        _ => Err(LhcubeError::InvalidArgument(format!(
            "invalid scale override '{s}', expected I:LO:HI"
        ))),
    }
}

/// Parses `false`, `true` or a comma separated list of dimension indices
pub fn parse_jitter(s: &str) -> Result<JitterSelector> {
    Ok(s.parse::<JitterSelector>()?)
}
