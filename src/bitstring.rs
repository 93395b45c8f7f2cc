//! Bit-string genome operators.
//!
//! Initialization, one-point crossover, and per-gene flip mutation for
//! fixed-length `bool` genomes. All functions are pure slice-level
//! operators: they never touch shared state, and crossover never mutates
//! its parents.

use rand::Rng;

/// Samples a uniform random bit string of length `len`.
///
/// # Panics
/// Panics if `len` is 0.
pub fn random_bits<R: Rng>(len: usize, rng: &mut R) -> Vec<bool> {
    assert!(len > 0, "bit-string length must be at least 1");
    (0..len).map(|_| rng.random_bool(0.5)).collect()
}

/// One-point crossover: swap the tails of two parents.
///
/// The cut point is drawn uniformly from `1..len`, never at the extremes,
/// so both offspring always mix genes from both parents. Parents shorter
/// than 2 genes are returned unchanged.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn one_point_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
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

/// Flip mutation: each gene is flipped independently with probability
/// `indpb`.
///
/// With `indpb = 0.0` the genome is returned bit-for-bit unchanged.
///
/// # Panics
/// Panics if `indpb` is outside `[0, 1]`.
pub fn flip_mutation<R: Rng>(bits: &mut [bool], indpb: f64, rng: &mut R) {
    for bit in bits.iter_mut() {
        if rng.random_bool(indpb) {
            *bit = !*bit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    #[test]
    fn test_random_bits_length_and_mix() {
        let mut rng = create_rng(42);
        let bits = random_bits(1000, &mut rng);
        assert_eq!(bits.len(), 1000);

        let ones = bits.iter().filter(|&&b| b).count();
        assert!(
            (300..700).contains(&ones),
            "expected roughly balanced bits, got {ones}/1000"
        );
    }

    #[test]
    #[should_panic(expected = "length must be at least 1")]
    fn test_random_bits_zero_length_panics() {
        let mut rng = create_rng(42);
        random_bits(0, &mut rng);
    }

    #[test]
    fn test_crossover_swaps_tails() {
        let mut rng = create_rng(42);
        let p1 = vec![true; 8];
        let p2 = vec![false; 8];

        for _ in 0..100 {
            let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);
            // Heads come from the same-side parent, tails from the other.
            assert!(c1[0], "cut point is never 0");
            assert!(!c1[7], "cut point is never len");
            assert!(!c2[0]);
            assert!(c2[7]);
            // Gene conservation per position.
            for i in 0..8 {
                assert_ne!(c1[i], c2[i]);
            }
        }
    }

    #[test]
    fn test_crossover_parents_untouched() {
        let mut rng = create_rng(42);
        let p1 = vec![true, true, false, true];
        let p2 = vec![false, true, true, false];
        let (p1_before, p2_before) = (p1.clone(), p2.clone());

        let _ = one_point_crossover(&p1, &p2, &mut rng);
        assert_eq!(p1, p1_before);
        assert_eq!(p2, p2_before);
    }

    #[test]
    fn test_crossover_single_gene_passthrough() {
        let mut rng = create_rng(42);
        let (c1, c2) = one_point_crossover(&[true], &[false], &mut rng);
        assert_eq!(c1, vec![true]);
        assert_eq!(c2, vec![false]);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_crossover_length_mismatch_panics() {
        let mut rng = create_rng(42);
        one_point_crossover(&[true, false], &[true], &mut rng);
    }

    #[test]
    fn test_flip_mutation_indpb_zero_is_identity() {
        let mut rng = create_rng(42);
        let original = random_bits(64, &mut rng);
        let mut bits = original.clone();

        for _ in 0..100 {
            flip_mutation(&mut bits, 0.0, &mut rng);
        }
        assert_eq!(bits, original);
    }

    #[test]
    fn test_flip_mutation_indpb_one_flips_everything() {
        let mut rng = create_rng(42);
        let original = random_bits(32, &mut rng);
        let mut bits = original.clone();

        flip_mutation(&mut bits, 1.0, &mut rng);
        for (a, b) in bits.iter().zip(original.iter()) {
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_flip_mutation_rate_statistics() {
        let mut rng = create_rng(42);
        let mut flips = 0usize;
        let trials = 10_000;
        for _ in 0..trials {
            let mut bits = vec![false; 10];
            flip_mutation(&mut bits, 0.05, &mut rng);
            flips += bits.iter().filter(|&&b| b).count();
        }
        // Expected 0.05 * 10 * 10_000 = 5_000 flips.
        assert!(
            (4_000..6_000).contains(&flips),
            "flip count far from expectation: {flips}"
        );
    }

    proptest! {
        #[test]
        fn prop_crossover_conserves_genes_per_position(
            genes in proptest::collection::vec(any::<(bool, bool)>(), 2..64),
            seed in any::<u64>(),
        ) {
            let p1: Vec<bool> = genes.iter().map(|g| g.0).collect();
            let p2: Vec<bool> = genes.iter().map(|g| g.1).collect();
            let mut rng = create_rng(seed);

            let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);
            prop_assert_eq!(c1.len(), p1.len());
            prop_assert_eq!(c2.len(), p2.len());
            for i in 0..p1.len() {
                // Each position holds exactly the two parent genes.
                let mut have = [c1[i], c2[i]];
                let mut want = [p1[i], p2[i]];
                have.sort();
                want.sort();
                prop_assert_eq!(have, want);
            }
        }

        #[test]
        fn prop_indpb_zero_identity(
            original in proptest::collection::vec(any::<bool>(), 1..128),
            seed in any::<u64>(),
        ) {
            let mut bits = original.clone();
            let mut rng = create_rng(seed);
            flip_mutation(&mut bits, 0.0, &mut rng);
            prop_assert_eq!(bits, original);
        }
    }
}
