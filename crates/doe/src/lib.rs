/*!
This library implements [Latin Hypercube sampling](https://en.wikipedia.org/wiki/Latin_hypercube_sampling):
`ns` points are generated in a `nx`-dimensional box such that, for each dimension taken
independently, the points occupy the `ns` equal-width strata of that dimension exactly once.

The design space is defined as a 2D ndarray `(nx, 2)`, specifying lower bound and upper bound
of each `nx` components of the samples `x`.

For each dimension, the strata are randomly permuted (see [PermutationDraw]), a point sits on
the lower edge of its stratum unless the dimension is jittered (see [JitterSelector]) in which
case it is moved by a random multiple of a hundredth of the stratum width.
The number of decimals needed to print the values of a dimension is given by [precision()].

Example:
```
use lhcube_doe::{JitterSelector, Lhs, SamplingMethod};
use ndarray::arr2;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

// Design space is defined as [5., 10.] x [0., 1.], samples are 2-dimensional.
let xlimits = arr2(&[[5., 10.], [0., 1.]]);
// We generate five samples, jittered in the second dimension only.
let design = Lhs::new(&xlimits)
    .with_rng(Xoshiro256Plus::seed_from_u64(42))
    .jitter(JitterSelector::Dims(vec![1]))
    .generate(5)
    .unwrap();
assert_eq!(design.samples().dim(), (5, 2));
// or only get the samples through the sampling method interface
let samples = Lhs::new(&xlimits).sample(5).unwrap();

// The design is written as comma separated values
let mut out = Vec::new();
design.write_csv(&mut out, &["x", "y"]).unwrap();
```

A whole generation can also be described with a [LhsConfig]:
```
use lhcube_doe::{generate, JitterSelector, LhsConfig};

let config = LhsConfig::default()
    .n_points(10)
    .n_dims(2)
    .base_scale(0., 1.)
    .scale_override(1, 10., 20.)
    .jitter(JitterSelector::All)
    .seed(42);
let design = generate(&config).unwrap();
assert_eq!(design.samples().dim(), (10, 2));
```
*/
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod config;
mod errors;
mod jitter;
mod lhs;
mod precision;
mod stats;
mod strata;
mod tabular;
mod traits;

pub use config::*;
pub use errors::*;
pub use jitter::*;
pub use lhs::*;
pub use precision::*;
pub use stats::*;
pub use strata::*;
pub use tabular::*;
pub use traits::*;
