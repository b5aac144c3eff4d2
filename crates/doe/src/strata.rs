use ndarray::Array1;
use ndarray_rand::rand::{seq::SliceRandom, Rng};

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Strategy used to assign each point of a dimension to a distinct stratum
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub enum PermutationDraw {
    /// Fisher-Yates shuffle of the stratum indices, linear in the number of points
    #[default]
    Shuffle,
    /// Points are processed in order: a stratum index is drawn uniformly and drawn again
    /// while it is already taken. Quadratic worst case as the pool empties.
    Rejection,
}

/// The stratum indices `0..ns` of one dimension.
///
/// A pool is consumed by [`StrataPool::draw`], so a dimension can only be permuted once.
#[derive(Clone, Debug)]
pub struct StrataPool {
    bins: Vec<usize>,
}

impl StrataPool {
    /// Pool of `ns` strata
    pub fn new(ns: usize) -> Self {
        StrataPool {
            bins: (0..ns).collect(),
        }
    }

    /// Number of strata in the pool
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether the pool holds no stratum
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Draws, without replacement, one stratum per point index.
    pub fn draw<R: Rng + ?Sized>(self, method: PermutationDraw, rng: &mut R) -> StratumAssignment {
        match method {
            PermutationDraw::Shuffle => self.shuffle_draw(rng),
            PermutationDraw::Rejection => self.rejection_draw(rng),
        }
    }

    fn shuffle_draw<R: Rng + ?Sized>(self, rng: &mut R) -> StratumAssignment {
        let mut bins = self.bins;
        bins.shuffle(rng);
        StratumAssignment {
            bins: Array1::from_vec(bins),
        }
    }

    fn rejection_draw<R: Rng + ?Sized>(self, rng: &mut R) -> StratumAssignment {
        let ns = self.bins.len();
        let mut taken = vec![false; ns];
        let mut bins = Vec::with_capacity(ns);
        for _ in 0..ns {
            let mut t = rng.gen_range(0..ns);
            while taken[t] {
                t = rng.gen_range(0..ns);
            }
            taken[t] = true;
            bins.push(self.bins[t]);
        }
        StratumAssignment {
            bins: Array1::from_vec(bins),
        }
    }
}

/// Bijection from point index to stratum index for one dimension
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StratumAssignment {
    bins: Array1<usize>,
}

impl StratumAssignment {
    /// Stratum assigned to the `point`-th sample
    pub fn bin(&self, point: usize) -> usize {
        self.bins[point]
    }

    /// Number of assigned points
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Whether no point is assigned
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Stratum indices ordered by point index
    pub fn bins(&self) -> &Array1<usize> {
        &self.bins
    }

    /// Inverse mapping: the point index lying in each stratum, ordered by stratum index.
    /// Returns `None` when the assignment is not a permutation.
    pub fn points_by_bin(&self) -> Option<Vec<usize>> {
        let ns = self.bins.len();
        let mut points = vec![None; ns];
        for (point, &bin) in self.bins.iter().enumerate() {
            match points.get_mut(bin) {
                Some(slot) if slot.is_none() => *slot = Some(point),
                _ => return None,
            }
        }
        points.into_iter().collect()
    }

    /// Checks every stratum `0..len` is used by exactly one point
    pub fn is_permutation(&self) -> bool {
        self.points_by_bin().is_some()
    }

    pub(crate) fn into_bins(self) -> Array1<usize> {
        self.bins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    fn sorted(assignment: &StratumAssignment) -> Vec<usize> {
        let mut bins = assignment.bins().to_vec();
        bins.sort_unstable();
        bins
    }

    #[test]
    fn test_shuffle_draw_is_permutation() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        for ns in [1, 2, 7, 100] {
            let pool = StrataPool::new(ns);
            assert_eq!(pool.len(), ns);
            let assignment = pool.draw(PermutationDraw::Shuffle, &mut rng);
            assert_eq!(assignment.len(), ns);
            assert!(assignment.is_permutation());
            assert_eq!(sorted(&assignment), (0..ns).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_rejection_draw_is_permutation() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        for ns in [1, 3, 10, 257] {
            let assignment = StrataPool::new(ns).draw(PermutationDraw::Rejection, &mut rng);
            assert!(assignment.is_permutation());
            assert_eq!(sorted(&assignment), (0..ns).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_single_stratum_is_identity() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        for method in [PermutationDraw::Shuffle, PermutationDraw::Rejection] {
            let assignment = StrataPool::new(1).draw(method, &mut rng);
            assert_eq!(assignment.bin(0), 0);
        }
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let pool = StrataPool::new(0);
        assert!(pool.is_empty());
        assert_eq!(pool.len(), 0);
        let assignment = pool.draw(PermutationDraw::Rejection, &mut rng);
        assert!(assignment.is_empty());
        assert_eq!(assignment.points_by_bin(), Some(vec![]));
    }

    #[test]
    fn test_points_by_bin_inverts() {
        let assignment = StratumAssignment {
            bins: Array1::from_vec(vec![2, 0, 3, 1]),
        };
        assert_eq!(assignment.points_by_bin(), Some(vec![1, 3, 0, 2]));
    }

    #[test]
    fn test_not_a_permutation() {
        let repeated = StratumAssignment {
            bins: Array1::from_vec(vec![0, 1, 1]),
        };
        assert!(!repeated.is_permutation());
        let out_of_range = StratumAssignment {
            bins: Array1::from_vec(vec![0, 3, 1]),
        };
        assert!(!out_of_range.is_permutation());
    }

    #[test]
    fn test_draws_differ() {
        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let a1 = StrataPool::new(50).draw(PermutationDraw::Shuffle, &mut rng);
        let a2 = StrataPool::new(50).draw(PermutationDraw::Shuffle, &mut rng);
        assert_ne!(a1, a2);
    }
}
