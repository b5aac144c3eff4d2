//! Latin Hypercube generation configuration.
use crate::errors::{DoeError, Result};
use crate::jitter::JitterSelector;
use crate::strata::PermutationDraw;
use ndarray::Array2;

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Largest number of points a design may hold
pub const MAX_POINTS: usize = u32::MAX as usize;

/// Bounds of a single dimension replacing the base scale
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct ScaleOverride {
    /// Index of the overridden dimension
    pub dim: usize,
    /// Lower bound of the dimension
    pub lower: f64,
    /// Upper bound of the dimension
    pub upper: f64,
}

/// Keeps alphanumeric characters, underscores and spaces of a column heading.
pub fn sanitize_heading(heading: &str) -> String {
    heading
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ' ')
        .collect()
}

/// Heading of the `dim`-th column when none is given
pub fn default_heading(dim: usize) -> String {
    format!("dim{dim}")
}

/// Latin Hypercube generation configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct LhsConfig {
    /// Number of points of the design, also the number of strata of each dimension
    pub(crate) n_points: usize,
    /// Number of dimensions of the design space
    pub(crate) n_dims: usize,
    /// `(lower, upper)` bounds shared by every dimension not overridden
    pub(crate) base_scale: (f64, f64),
    /// Per dimension bounds, when a dimension is listed twice the last entry wins
    pub(crate) overrides: Vec<ScaleOverride>,
    /// Dimensions moved randomly within their stratum
    pub(crate) jitter: JitterSelector,
    /// Sanitized column headings, `dim0`, `dim1`, ... when not given
    pub(crate) headings: Option<Vec<String>>,
    /// Permutation strategy
    pub(crate) draw: PermutationDraw,
    /// Whether dimensions are generated concurrently
    pub(crate) parallel: bool,
    /// A random generator seed used to get reproducible designs
    pub(crate) seed: Option<u64>,
}

impl Default for LhsConfig {
    fn default() -> Self {
        LhsConfig {
            n_points: 10,
            n_dims: 1,
            base_scale: (0., 1.),
            overrides: vec![],
            jitter: JitterSelector::None,
            headings: None,
            draw: PermutationDraw::Shuffle,
            parallel: false,
            seed: None,
        }
    }
}

impl LhsConfig {
    /// Sets the number of points
    pub fn n_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Sets the number of dimensions
    pub fn n_dims(mut self, n_dims: usize) -> Self {
        self.n_dims = n_dims;
        self
    }

    /// Sets bounds used by every dimension which is not overridden
    pub fn base_scale(mut self, lower: f64, upper: f64) -> Self {
        self.base_scale = (lower, upper);
        self
    }

    /// Overrides bounds of the `dim`-th dimension
    pub fn scale_override(mut self, dim: usize, lower: f64, upper: f64) -> Self {
        self.overrides.push(ScaleOverride { dim, lower, upper });
        self
    }

    /// Sets the jittered dimensions
    pub fn jitter(mut self, jitter: JitterSelector) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets column headings, each one is sanitized with [`sanitize_heading`]
    pub fn headings<S: AsRef<str>>(mut self, headings: &[S]) -> Self {
        self.headings = Some(
            headings
                .iter()
                .map(|h| sanitize_heading(h.as_ref()))
                .collect(),
        );
        self
    }

    /// Uses `dim0`, `dim1`, ... headings
    pub fn default_headings(mut self) -> Self {
        self.headings = None;
        self
    }

    /// Sets the permutation strategy
    pub fn draw(mut self, draw: PermutationDraw) -> Self {
        self.draw = draw;
        self
    }

    /// Whether dimensions are generated concurrently, each one with its own random stream
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Allow to specify a seed for random number generator to allow
    /// reproducible designs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of points
    pub fn get_n_points(&self) -> usize {
        self.n_points
    }

    /// Number of dimensions
    pub fn get_n_dims(&self) -> usize {
        self.n_dims
    }

    /// Jitter selector
    pub fn get_jitter(&self) -> &JitterSelector {
        &self.jitter
    }

    /// Random seed if any
    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Column headings, defaulted when not given
    pub fn get_headings(&self) -> Vec<String> {
        match &self.headings {
            Some(headings) => headings.clone(),
            None => (0..self.n_dims).map(default_heading).collect(),
        }
    }

    /// Validates the configuration, no generation should start when it fails.
    pub fn check(&self) -> Result<()> {
        if self.n_points == 0 {
            return Err(DoeError::InvalidConfigError(
                "number of points should be positive".to_string(),
            ));
        }
        if self.n_points > MAX_POINTS {
            return Err(DoeError::InvalidConfigError(format!(
                "number of points {} exceeds {MAX_POINTS}",
                self.n_points
            )));
        }
        if self.n_dims == 0 {
            return Err(DoeError::InvalidConfigError(
                "number of dimensions should be positive".to_string(),
            ));
        }
        check_bounds("base scale", self.base_scale.0, self.base_scale.1)?;
        for o in self.overrides.iter() {
            if o.dim >= self.n_dims {
                return Err(DoeError::InvalidConfigError(format!(
                    "scale override dimension {} out of range [0, {})",
                    o.dim, self.n_dims
                )));
            }
            check_bounds(&format!("dimension {}", o.dim), o.lower, o.upper)?;
        }
        self.jitter.check(self.n_dims)?;
        if let Some(headings) = &self.headings {
            if headings.len() != self.n_dims {
                return Err(DoeError::InvalidConfigError(format!(
                    "{} headings given for {} dimensions",
                    headings.len(),
                    self.n_dims
                )));
            }
            if let Some(i) = headings.iter().position(|h| h.is_empty()) {
                return Err(DoeError::InvalidConfigError(format!(
                    "heading of dimension {i} is empty once sanitized"
                )));
            }
        }
        Ok(())
    }

    /// Design space as a (n_dims, 2) matrix \[\[lower bound, upper bound\], ...\]
    pub fn xlimits(&self) -> Result<Array2<f64>> {
        self.check()?;
        let mut xlimits = Array2::zeros((self.n_dims, 2));
        xlimits.column_mut(0).fill(self.base_scale.0);
        xlimits.column_mut(1).fill(self.base_scale.1);
        for o in self.overrides.iter() {
            xlimits[[o.dim, 0]] = o.lower;
            xlimits[[o.dim, 1]] = o.upper;
        }
        Ok(xlimits)
    }
}

fn check_bounds(what: &str, lower: f64, upper: f64) -> Result<()> {
    if !lower.is_finite() || !upper.is_finite() {
        return Err(DoeError::InvalidConfigError(format!(
            "{what} bounds should be finite, got [{lower}, {upper}]"
        )));
    }
    if lower > upper {
        return Err(DoeError::InvalidConfigError(format!(
            "{what} lower bound {lower} greater than upper bound {upper}"
        )));
    }
    Ok(())
}
