//! Per-generation statistics and the logbook.
//!
//! Each generation is summarized into a [`GenerationStats`] record
//! holding one [`Aggregate`] per statistic chapter ("fitness" always,
//! "size" when the genome reports one). Records are immutable once
//! appended to the [`Logbook`], which external reporting code consumes
//! after the run.

use std::collections::BTreeMap;

/// Chapter name for fitness statistics.
pub const FITNESS: &str = "fitness";

/// Chapter name for genome-size statistics.
pub const SIZE: &str = "size";

/// Aggregate measures over one set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aggregate {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
}

impl Aggregate {
    /// Computes min/max/mean/std over `values`.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
        }
        let mean = sum / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        Some(Self {
            min,
            max,
            mean,
            std: var.sqrt(),
        })
    }
}

/// Statistics for one generation: a chapter-name → aggregate map.
///
/// Immutable once recorded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Generation number (0 = initial population).
    pub generation: usize,
    /// Number of individuals summarized.
    pub population_size: usize,
    /// Aggregates keyed by chapter name ([`FITNESS`], [`SIZE`], ...).
    pub chapters: BTreeMap<String, Aggregate>,
}

impl GenerationStats {
    /// Looks up one chapter's aggregate.
    pub fn chapter(&self, name: &str) -> Option<&Aggregate> {
        self.chapters.get(name)
    }
}

/// Ordered sequence of per-generation statistics, indexed by generation.
///
/// One entry is appended for the initial population (generation 0) and
/// one after each replacement, so a completed run of `G` generations
/// yields `G + 1` entries.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Logbook {
    records: Vec<GenerationStats>,
}

impl Logbook {
    /// Creates an empty logbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one generation's record.
    ///
    /// # Panics
    /// Panics if `record.generation` is not the next expected generation
    /// number; the logbook is densely indexed.
    pub fn record(&mut self, record: GenerationStats) {
        assert_eq!(
            record.generation,
            self.records.len(),
            "logbook records must be appended in generation order"
        );
        self.records.push(record);
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[GenerationStats] {
        &self.records
    }

    /// Record for one generation, if present.
    pub fn generation(&self, generation: usize) -> Option<&GenerationStats> {
        self.records.get(generation)
    }

    /// Iterates one chapter's aggregates across all generations.
    ///
    /// Generations missing the chapter are skipped.
    pub fn chapter<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Aggregate> + 'a {
        self.records.iter().filter_map(move |r| r.chapter(name))
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_for(generation: usize, fitness: &[f64]) -> GenerationStats {
        let mut chapters = BTreeMap::new();
        chapters.insert(
            FITNESS.to_string(),
            Aggregate::from_values(fitness).unwrap(),
        );
        GenerationStats {
            generation,
            population_size: fitness.len(),
            chapters,
        }
    }

    #[test]
    fn test_aggregate_basic() {
        let agg = Aggregate::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(agg.min, 1.0);
        assert_eq!(agg.max, 4.0);
        assert!((agg.mean - 2.5).abs() < 1e-12);
        // population std of {1,2,3,4} = sqrt(1.25)
        assert!((agg.std - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_single_value() {
        let agg = Aggregate::from_values(&[7.0]).unwrap();
        assert_eq!(agg.min, 7.0);
        assert_eq!(agg.max, 7.0);
        assert_eq!(agg.mean, 7.0);
        assert_eq!(agg.std, 0.0);
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(Aggregate::from_values(&[]).is_none());
    }

    #[test]
    fn test_logbook_indexing() {
        let mut logbook = Logbook::new();
        logbook.record(stats_for(0, &[3.0, 1.0]));
        logbook.record(stats_for(1, &[2.0, 1.0]));

        assert_eq!(logbook.len(), 2);
        assert_eq!(logbook.generation(0).unwrap().generation, 0);
        assert_eq!(
            logbook.generation(1).unwrap().chapter(FITNESS).unwrap().min,
            1.0
        );
        assert!(logbook.generation(2).is_none());
    }

    #[test]
    fn test_logbook_chapter_series() {
        let mut logbook = Logbook::new();
        logbook.record(stats_for(0, &[4.0]));
        logbook.record(stats_for(1, &[2.0]));
        logbook.record(stats_for(2, &[1.0]));

        let mins: Vec<f64> = logbook.chapter(FITNESS).map(|a| a.min).collect();
        assert_eq!(mins, vec![4.0, 2.0, 1.0]);
        assert_eq!(logbook.chapter(SIZE).count(), 0);
    }

    #[test]
    #[should_panic(expected = "generation order")]
    fn test_logbook_rejects_out_of_order() {
        let mut logbook = Logbook::new();
        logbook.record(stats_for(1, &[1.0]));
    }
}
