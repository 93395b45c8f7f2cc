//! Bounded real-valued genome operators.
//!
//! Initialization, one-point crossover, simulated binary crossover (SBX),
//! and polynomial mutation for fixed-dimension `f64` genomes. Every
//! operator respects the configured [`Bounds`]: offspring genes are
//! clipped back into their closed interval, so a gene outside its bounds
//! is impossible by construction.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous
//!   Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS)
//!   for Engineering Design"

use rand::Rng;

/// Per-dimension closed bounds `[low, high]` for a real-valued genome.
///
/// Bounds are part of the problem configuration: constructing them with
/// `low > high`, a non-finite endpoint, or zero dimensions is a
/// configuration error reported before any run starts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    dims: Vec<(f64, f64)>,
}

impl Bounds {
    /// Same `[low, high]` interval for every one of `dim` dimensions.
    pub fn uniform(low: f64, high: f64, dim: usize) -> Result<Self, String> {
        Self::per_dim(vec![(low, high); dim])
    }

    /// Individual `[low, high]` intervals per dimension.
    pub fn per_dim(dims: Vec<(f64, f64)>) -> Result<Self, String> {
        if dims.is_empty() {
            return Err("bounds must cover at least one dimension".into());
        }
        for (i, &(low, high)) in dims.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() {
                return Err(format!("bounds for dimension {i} must be finite"));
            }
            if low > high {
                return Err(format!(
                    "bounds for dimension {i} are inverted: low {low} > high {high}"
                ));
            }
        }
        Ok(Self { dims })
    }

    /// Number of dimensions.
    pub fn len(&self) -> usize {
        self.dims.len()
    }

    /// Always `false`: construction rejects zero dimensions.
    pub fn is_empty(&self) -> bool {
        self.dims.is_empty()
    }

    /// Lower bound of dimension `i`.
    pub fn low(&self, i: usize) -> f64 {
        self.dims[i].0
    }

    /// Upper bound of dimension `i`.
    pub fn high(&self, i: usize) -> f64 {
        self.dims[i].1
    }

    /// Clips every gene into its dimension's interval.
    pub fn clip(&self, genes: &mut [f64]) {
        for (gene, &(low, high)) in genes.iter_mut().zip(&self.dims) {
            *gene = gene.clamp(low, high);
        }
    }

    /// Returns `true` if every gene lies within its dimension's interval.
    pub fn contains(&self, genes: &[f64]) -> bool {
        genes.len() == self.dims.len()
            && genes
                .iter()
                .zip(&self.dims)
                .all(|(&g, &(low, high))| g >= low && g <= high)
    }
}

/// Samples a genome uniformly within `bounds`, independently per dimension.
pub fn random_vector<R: Rng>(bounds: &Bounds, rng: &mut R) -> Vec<f64> {
    bounds
        .dims
        .iter()
        .map(|&(low, high)| {
            if low == high {
                low
            } else {
                rng.random_range(low..high)
            }
        })
        .collect()
}

/// One-point crossover: swap the tails of two parents.
///
/// The cut point is drawn uniformly from `1..len`, never at the extremes.
/// Parents shorter than 2 genes are returned unchanged. Bounds need no
/// re-checking here: every offspring gene is one of the parents' genes.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn one_point_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    let n = parent1.len();
    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let point = rng.random_range(1..n);
    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();
    child1[point..].copy_from_slice(&parent2[point..]);
    child2[point..].copy_from_slice(&parent1[point..]);
    (child1, child2)
}

/// Simulated binary crossover, bounded.
///
/// Each gene pair recombines with probability 0.5 (a per-gene coin flip);
/// recombined values follow the SBX spread-factor distribution with
/// crowding factor `eta` (larger `eta` keeps offspring closer to the
/// parents) and are clipped to `bounds` afterwards. Genes that skip the
/// coin flip are inherited unchanged.
///
/// # Panics
/// Panics if the parents' lengths differ from each other or from `bounds`.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    eta: f64,
    bounds: &Bounds,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    assert_eq!(
        parent1.len(),
        bounds.len(),
        "genome length must match bounds"
    );
    let eta = eta.max(1.0);

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    for i in 0..parent1.len() {
        if !rng.random_bool(0.5) {
            continue;
        }
        let (v1, v2) = (parent1[i], parent2[i]);

        let u: f64 = rng.random_range(0.0..1.0);
        let beta = if u <= 0.5 {
            (2.0 * u).powf(1.0 / (eta + 1.0))
        } else {
            (1.0 / (2.0 * (1.0 - u))).powf(1.0 / (eta + 1.0))
        };

        let c1 = 0.5 * ((1.0 + beta) * v1 + (1.0 - beta) * v2);
        let c2 = 0.5 * ((1.0 - beta) * v1 + (1.0 + beta) * v2);

        child1[i] = c1.clamp(bounds.low(i), bounds.high(i));
        child2[i] = c2.clamp(bounds.low(i), bounds.high(i));
    }

    (child1, child2)
}

/// Polynomial mutation, bounded.
///
/// Each gene mutates independently with probability `indpb`; the
/// perturbation follows the polynomial distribution with crowding factor
/// `eta`, scaled by the dimension's range, and the result is clipped to
/// `bounds`. With `indpb = 0.0` the genome is unchanged.
///
/// # Panics
/// Panics if the genome length differs from `bounds`, or if `indpb` is
/// outside `[0, 1]`.
pub fn polynomial_mutation<R: Rng>(
    genes: &mut [f64],
    indpb: f64,
    eta: f64,
    bounds: &Bounds,
    rng: &mut R,
) {
    assert_eq!(genes.len(), bounds.len(), "genome length must match bounds");
    let eta = eta.max(1.0);

    for (i, gene) in genes.iter_mut().enumerate() {
        if !rng.random_bool(indpb) {
            continue;
        }
        let (low, high) = (bounds.low(i), bounds.high(i));
        let range = high - low;
        if range == 0.0 {
            continue;
        }

        let u: f64 = rng.random_range(0.0..1.0);
        let delta = if u < 0.5 {
            (2.0 * u).powf(1.0 / (eta + 1.0)) - 1.0
        } else {
            1.0 - (2.0 * (1.0 - u)).powf(1.0 / (eta + 1.0))
        };

        *gene = (*gene + delta * range).clamp(low, high);
    }
}
