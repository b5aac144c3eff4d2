use crate::config::{LhsConfig, MAX_POINTS};
use crate::errors::{DoeError, Result};
use crate::jitter::{jitter_offset, JitterSelector};
use crate::precision::precision;
use crate::strata::{PermutationDraw, StrataPool};
use crate::tabular::write_csv;
use crate::SamplingMethod;
use linfa::Float;
use log::{debug, info};
use ndarray::{Array, Array1, Array2, ArrayBase, Data, Ix2, ShapeBuilder};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256Plus;
use rayon::prelude::*;
use std::io::Write;
use std::sync::{Arc, RwLock};

type RngRef<R> = Arc<RwLock<R>>;

/// One dimension of the design space as used during generation
#[derive(Clone, Debug, PartialEq)]
pub struct Dimension<F: Float> {
    index: usize,
    lower: F,
    upper: F,
    jittered: bool,
    width: F,
    precision: usize,
}

impl<F: Float> Dimension<F> {
    fn new(index: usize, lower: F, upper: F, ns: usize, jittered: bool) -> Result<Self> {
        let width = (upper - lower) / F::cast(ns);
        if !width.is_finite() {
            return Err(DoeError::GenerationError(format!(
                "stratum width of dimension {index} overflows with bounds [{lower}, {upper}]"
            )));
        }
        Ok(Dimension {
            index,
            lower,
            upper,
            jittered,
            width,
            precision: precision(width)?,
        })
    }

    /// Index of the dimension
    pub fn index(&self) -> usize {
        self.index
    }

    /// Lower bound
    pub fn lower(&self) -> F {
        self.lower
    }

    /// Upper bound
    pub fn upper(&self) -> F {
        self.upper
    }

    /// Whether samples are moved within their stratum
    pub fn jittered(&self) -> bool {
        self.jittered
    }

    /// Width of a stratum: `(upper - lower) / ns`
    pub fn width(&self) -> F {
        self.width
    }

    /// Number of decimals used to print the dimension values
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Coordinate of a sample lying in stratum `bin` moved by `offset` stratum width
    pub fn coordinate(&self, bin: usize, offset: F) -> F {
        (F::cast(bin) + offset) * self.width + self.lower
    }

    /// Draws the strata of the `ns` samples then one jitter offset per sample.
    /// Offsets are drawn even when the dimension is not jittered so that the random
    /// stream consumption does not depend on the jitter selection.
    /// Returns stratum coordinates (`bin + offset`) and bins.
    fn draw<R: Rng + ?Sized>(
        &self,
        ns: usize,
        method: PermutationDraw,
        rng: &mut R,
    ) -> (Array1<F>, Array1<usize>) {
        let bins = StrataPool::new(ns).draw(method, rng).into_bins();
        let units = bins
            .iter()
            .map(|&bin| {
                let offset: F = jitter_offset(&mut *rng);
                if self.jittered {
                    F::cast(bin) + offset
                } else {
                    F::cast(bin)
                }
            })
            .collect::<Array1<F>>();
        (units, bins)
    }
}

/// A generated Latin Hypercube design
#[derive(Clone, Debug)]
pub struct LhsDesign<F: Float> {
    samples: Array2<F>,
    strata: Array2<usize>,
    dimensions: Vec<Dimension<F>>,
}

impl<F: Float> LhsDesign<F> {
    /// (ns, nx) matrix of samples
    pub fn samples(&self) -> &Array2<F> {
        &self.samples
    }

    /// (ns, nx) matrix of the stratum index of each sample component
    pub fn strata(&self) -> &Array2<usize> {
        &self.strata
    }

    /// Dimensions used for the generation
    pub fn dimensions(&self) -> &[Dimension<F>] {
        &self.dimensions
    }

    /// Number of decimals of each dimension
    pub fn precisions(&self) -> Array1<usize> {
        self.dimensions.iter().map(|d| d.precision).collect()
    }

    /// Number of points
    pub fn n_points(&self) -> usize {
        self.samples.nrows()
    }

    /// Number of dimensions
    pub fn n_dims(&self) -> usize {
        self.samples.ncols()
    }

    /// Gives the samples up
    pub fn into_samples(self) -> Array2<F> {
        self.samples
    }

    /// Writes headings then samples as comma separated values (see [`write_csv`])
    pub fn write_csv<W: Write, S: AsRef<str>>(&self, writer: W, headings: &[S]) -> Result<()> {
        write_csv(writer, &self.samples, headings, &self.precisions())
    }
}

/// The LHS design is built as follows: each dimension space is divided into ns strata
/// where ns is the number of sampling points, strata are randomly permuted so that
/// exactly one point lies in each stratum of each dimension.
/// A point sits on the lower edge of its stratum unless its dimension is jittered
/// (see [`JitterSelector`]).
#[derive(Clone, Debug)]
pub struct Lhs<F: Float, R: Rng> {
    /// Sampling space definition as a (nx, 2) matrix
    /// The ith row is the [lower_bound, upper_bound] of xi, the ith component of x
    xlimits: Array2<F>,
    /// Jittered dimensions
    jitter: JitterSelector,
    /// Permutation strategy
    draw: PermutationDraw,
    /// Whether dimensions are generated concurrently
    parallel: bool,
    /// Random generator used for reproducibility
    rng: RngRef<R>,
}

/// LHS with default random generator
impl<F: Float> Lhs<F, Xoshiro256Plus> {
    /// Constructor given a design space given a (nx, 2) matrix \[\[lower bound, upper bound\], ...\]
    /// The random generator is seeded from system entropy.
    ///
    /// ```
    /// use lhcube_doe::Lhs;
    /// use ndarray::arr2;
    ///
    /// let doe = Lhs::new(&arr2(&[[0.0, 1.0], [5.0, 10.0]]));
    /// ```
    pub fn new(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Self {
        Self::new_with_rng(xlimits, Xoshiro256Plus::from_entropy())
    }
}

impl<F: Float, R: Rng> Lhs<F, R> {
    /// Constructor with given design space and random generator.
    /// * `xlimits`: (nx, 2) matrix where nx is the dimension of the samples and the ith row
    ///   is the definition interval of the ith component of x.
    /// * `rng`: random generator
    ///
    /// **Panics** if xlimits number of columns is different from 2.
    pub fn new_with_rng(xlimits: &ArrayBase<impl Data<Elem = F>, Ix2>, rng: R) -> Self {
        if xlimits.ncols() != 2 {
            panic!("xlimits must have 2 columns (lower, upper)");
        }
        Lhs {
            xlimits: xlimits.to_owned(),
            jitter: JitterSelector::default(),
            draw: PermutationDraw::default(),
            parallel: false,
            rng: Arc::new(RwLock::new(rng)),
        }
    }

    /// Sets the jittered dimensions
    pub fn jitter(mut self, jitter: JitterSelector) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the permutation strategy
    pub fn draw(mut self, draw: PermutationDraw) -> Self {
        self.draw = draw;
        self
    }

    /// Generates dimensions concurrently. Each dimension uses its own random stream
    /// seeded from the generator of the design.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random generator
    pub fn with_rng<R2: Rng>(self, rng: R2) -> Lhs<F, R2> {
        Lhs {
            xlimits: self.xlimits,
            jitter: self.jitter,
            draw: self.draw,
            parallel: self.parallel,
            rng: Arc::new(RwLock::new(rng)),
        }
    }

    /// Generates a design of `ns` points.
    ///
    /// Returns an error if the design space, the jitter selector or `ns` are invalid,
    /// or if an arithmetic failure happens.
    pub fn generate(&self, ns: usize) -> Result<LhsDesign<F>> {
        let dimensions = self.dimensions(ns)?;
        info!(
            "Generate LHS of {ns} points in {} dimensions",
            dimensions.len()
        );
        let (units, strata) = self.stratum_coordinates(ns, &dimensions)?;
        let mut samples = Array::zeros((ns, dimensions.len()).f());
        for dim in dimensions.iter() {
            let column = units
                .column(dim.index)
                .mapv(|u| u * dim.width + dim.lower);
            if column.iter().any(|v| !v.is_finite()) {
                return Err(DoeError::GenerationError(format!(
                    "non finite coordinate in dimension {}",
                    dim.index
                )));
            }
            samples.column_mut(dim.index).assign(&column);
        }
        Ok(LhsDesign {
            samples,
            strata,
            dimensions,
        })
    }

    fn dimensions(&self, ns: usize) -> Result<Vec<Dimension<F>>> {
        if ns == 0 {
            return Err(DoeError::InvalidConfigError(
                "number of points should be positive".to_string(),
            ));
        }
        if ns > MAX_POINTS {
            return Err(DoeError::InvalidConfigError(format!(
                "number of points {ns} exceeds {MAX_POINTS}"
            )));
        }
        let nx = self.xlimits.nrows();
        if nx == 0 {
            return Err(DoeError::InvalidConfigError(
                "design space has no dimension".to_string(),
            ));
        }
        let flags = self.jitter.flags(nx)?;
        self.xlimits
            .rows()
            .into_iter()
            .zip(flags)
            .enumerate()
            .map(|(i, (bounds, jittered))| {
                let (lower, upper) = (bounds[0], bounds[1]);
                if !lower.is_finite() || !upper.is_finite() || lower > upper {
                    return Err(DoeError::InvalidConfigError(format!(
                        "invalid bounds [{lower}, {upper}] for dimension {i}"
                    )));
                }
                let dim = Dimension::new(i, lower, upper, ns, jittered)?;
                debug!(
                    "Dimension {i}: bounds=[{lower}, {upper}] width={} jitter={jittered} precision={}",
                    dim.width, dim.precision
                );
                Ok(dim)
            })
            .collect()
    }

    /// (ns, nx) stratum coordinates `bin + offset` in `[0, ns[` and (ns, nx) bins
    fn stratum_coordinates(
        &self,
        ns: usize,
        dimensions: &[Dimension<F>],
    ) -> Result<(Array2<F>, Array2<usize>)> {
        let nx = dimensions.len();
        let mut rng = self
            .rng
            .write()
            .map_err(|_| DoeError::GenerationError("random generator lock poisoned".to_string()))?;
        let columns: Vec<(Array1<F>, Array1<usize>)> = if self.parallel {
            let seeds: Vec<u64> = (0..nx).map(|_| rng.gen::<u64>()).collect();
            let draw = self.draw;
            dimensions
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(dim, &seed)| {
                    let mut dim_rng = Xoshiro256Plus::seed_from_u64(seed);
                    dim.draw(ns, draw, &mut dim_rng)
                })
                .collect()
        } else {
            dimensions
                .iter()
                .map(|dim| dim.draw(ns, self.draw, &mut *rng))
                .collect()
        };

        let mut units = Array::zeros((ns, nx).f());
        let mut strata = Array::zeros((ns, nx).f());
        for (j, (u, bins)) in columns.into_iter().enumerate() {
            units.column_mut(j).assign(&u);
            strata.column_mut(j).assign(&bins);
        }
        Ok((units, strata))
    }
}

impl<F: Float, R: Rng> SamplingMethod<F> for Lhs<F, R> {
    fn sampling_space(&self) -> &Array2<F> {
        &self.xlimits
    }

    fn normalized_sample(&self, ns: usize) -> Result<Array2<F>> {
        let dimensions = self.dimensions(ns)?;
        let (units, _) = self.stratum_coordinates(ns, &dimensions)?;
        Ok(units / F::cast(ns))
    }

    /// Scales with each dimension stratum width, see [`Dimension::coordinate`]
    fn sample(&self, ns: usize) -> Result<Array2<F>> {
        Ok(self.generate(ns)?.into_samples())
    }
}

/// Generates the design described by `config`.
///
/// The configuration is checked before anything else, the random generator is seeded
/// with the configuration seed if any or from system entropy otherwise.
pub fn generate(config: &LhsConfig) -> Result<LhsDesign<f64>> {
    let xlimits = config.xlimits()?;
    let rng = match config.seed {
        Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
        None => Xoshiro256Plus::from_entropy(),
    };
    Lhs::new_with_rng(&xlimits, rng)
        .jitter(config.jitter.clone())
        .draw(config.draw)
        .parallel(config.parallel)
        .generate(config.n_points)
}
