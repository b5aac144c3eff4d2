use crate::errors::{DoeError, Result};
use linfa::Float;
use ndarray_rand::rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Number of evenly spaced jitter offsets within a stratum: offsets are `k / JITTER_STEPS`
/// with `k` drawn uniformly in `0..JITTER_STEPS`.
pub const JITTER_STEPS: u32 = 100;

/// Selects the dimensions whose samples are moved randomly within their stratum.
///
/// Without jitter a sample sits on the lower edge of its stratum.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum JitterSelector {
    /// No dimension is jittered
    #[default]
    None,
    /// Every dimension is jittered
    All,
    /// Only the listed dimension indices are jittered
    Dims(Vec<usize>),
}

impl JitterSelector {
    /// Checks the selector against a design space of `nx` dimensions:
    /// at most `nx` distinct indices, each lower than `nx`.
    pub fn check(&self, nx: usize) -> Result<()> {
        if let JitterSelector::Dims(dims) = self {
            if dims.len() > nx {
                return Err(DoeError::InvalidConfigError(format!(
                    "jitter selects {} dimensions, design space only has {nx}",
                    dims.len()
                )));
            }
            let mut seen = HashSet::with_capacity(dims.len());
            for &d in dims {
                if d >= nx {
                    return Err(DoeError::InvalidConfigError(format!(
                        "jitter dimension {d} out of range [0, {nx})"
                    )));
                }
                if !seen.insert(d) {
                    return Err(DoeError::InvalidConfigError(format!(
                        "jitter dimension {d} listed more than once"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Whether the `dim`-th dimension is jittered. The selector is assumed checked.
    pub fn is_jittered(&self, dim: usize) -> bool {
        match self {
            JitterSelector::None => false,
            JitterSelector::All => true,
            JitterSelector::Dims(dims) => dims.contains(&dim),
        }
    }

    /// Jitter flag of each of the `nx` dimensions, fails if the selector does not fit `nx`.
    pub fn flags(&self, nx: usize) -> Result<Vec<bool>> {
        self.check(nx)?;
        Ok((0..nx).map(|d| self.is_jittered(d)).collect())
    }
}

impl FromStr for JitterSelector {
    type Err = DoeError;

    /// Parses `false`, `true` or a comma separated list of dimension indices such as `0,2`
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "false" => Ok(JitterSelector::None),
            "true" => Ok(JitterSelector::All),
            list => list
                .split(',')
                .map(|item| {
                    item.trim().parse::<usize>().map_err(|_| {
                        DoeError::InvalidConfigError(format!(
                            "invalid jitter dimension '{}', expected false, true or a list of indices",
                            item.trim()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(JitterSelector::Dims),
        }
    }
}

impl fmt::Display for JitterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JitterSelector::None => write!(f, "false"),
            JitterSelector::All => write!(f, "true"),
            JitterSelector::Dims(dims) => {
                let dims: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                write!(f, "{}", dims.join(","))
            }
        }
    }
}

/// Draws a jitter offset in `[0, 1[` quantized to `1 / JITTER_STEPS`
pub fn jitter_offset<F: Float, R: Rng + ?Sized>(rng: &mut R) -> F {
    F::cast(rng.gen_range(0..JITTER_STEPS)) / F::cast(JITTER_STEPS)
}
