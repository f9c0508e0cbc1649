//! Utilities for logging the state of a population during
//! an evolutionary run.

use crate::genomics::Genome;
use crate::populations::Population;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Summary statistics over a sequence of observations.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Computes the statistics of the passed iterator's items.
    /// Returns `None` if the iterator is empty. For an even
    /// item count, the median is the mean of the two middle
    /// items.
    ///
    /// # Panics
    /// This function will panic if any of the items is NaN.
    ///
    /// # Examples
    /// ```
    /// use roadneat::populations::logging::Stats;
    ///
    /// let stats = Stats::from(&mut [1.0, 2.0, 3.0, 4.0].iter().copied()).unwrap();
    ///
    /// assert_eq!(stats.maximum, 4.0);
    /// assert_eq!(stats.minimum, 1.0);
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.median, 2.5);
    /// ```
    pub fn from(items: &mut dyn Iterator<Item = f32>) -> Option<Stats> {
        let mut items: Vec<f32> = items.collect();
        if items.is_empty() {
            return None;
        }

        let total: f32 = items.iter().sum();
        let mid = items.len() / 2;
        let even_count = items.len() % 2 == 0;
        let (lesser, median, _) = items.select_nth_unstable_by(mid, |a, b| {
            a.partial_cmp(b).expect("NaN in stats items")
        });
        let mut median = *median;
        if even_count {
            let lower_middle = lesser.iter().copied().fold(f32::NEG_INFINITY, f32::max);
            median = (median + lower_middle) / 2.0;
        }

        let maximum = items
            .iter()
            .copied()
            .fold(f32::NEG_INFINITY, |a, b| if b > a { b } else { a });
        let minimum = items
            .iter()
            .copied()
            .fold(f32::INFINITY, |a, b| if b < a { b } else { a });

        Some(Stats {
            maximum,
            minimum,
            mean: total / items.len() as f32,
            median,
        })
    }
}

/// The degree of verbosity of genome sampling in logs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum ReportingLevel {
    /// Include every genome in the population.
    AllGenomes,
    /// Include each species' representative.
    SpeciesChampions,
    /// Include only the population's champion.
    PopulationChampion,
    /// Include no genomes.
    NoGenomes,
}

/// The genomes sampled by a [`Log`], as dictated by the
/// logger's [`ReportingLevel`].
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum GenerationSample {
    AllGenomes(Vec<Genome>),
    SpeciesChampions(Vec<Genome>),
    PopulationChampion(Genome),
    NoGenomes,
}

/// A snapshot of a population's state at a given generation.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Log {
    pub generation: usize,
    pub species_count: usize,
    pub species_sizes: Vec<usize>,
    pub fitness: Stats,
    pub node_counts: Stats,
    pub edge_counts: Stats,
    pub sample: GenerationSample,
}

/// Tracks the state of a population across generations,
/// storing one [`Log`] per call to [`log`](EvolutionLogger::log).
///
/// # Examples
/// ```
/// use roadneat::genomics::GeneticConfig;
/// use roadneat::populations::{
///     logging::{EvolutionLogger, ReportingLevel},
///     Population, PopulationConfig,
/// };
/// use std::num::NonZeroUsize;
///
/// let population = Population::new(
///     PopulationConfig {
///         size: NonZeroUsize::new(4).unwrap(),
///         ..PopulationConfig::zero()
///     },
///     GeneticConfig::zero(),
/// );
///
/// let mut logger = EvolutionLogger::new(ReportingLevel::NoGenomes);
/// logger.log(&population);
///
/// let log = logger.logs().last().unwrap();
/// assert_eq!(log.generation, 1);
/// // Every initial genome founds its own species.
/// assert_eq!(log.species_sizes, vec![1, 1, 1, 1]);
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct EvolutionLogger {
    reporting_level: ReportingLevel,
    logs: Vec<Log>,
}

impl EvolutionLogger {
    /// Returns a logger with the passed reporting level.
    pub fn new(reporting_level: ReportingLevel) -> EvolutionLogger {
        EvolutionLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Stores a snapshot of a population's state.
    ///
    /// # Panics
    /// This function will panic if the population is empty.
    pub fn log<R: Rng>(&mut self, population: &Population<R>) {
        let genomes: Vec<&Genome> = population.genomes().collect();
        self.logs.push(Log {
            generation: population.generation(),
            species_count: population.species().count(),
            species_sizes: population.species().map(|s| s.count()).collect(),
            fitness: Stats::from(&mut genomes.iter().map(|g| g.fitness()))
                .expect("cannot log an empty population"),
            node_counts: Stats::from(&mut genomes.iter().map(|g| g.nodes().count() as f32))
                .expect("cannot log an empty population"),
            edge_counts: Stats::from(&mut genomes.iter().map(|g| g.edges().count() as f32))
                .expect("cannot log an empty population"),
            sample: match self.reporting_level {
                ReportingLevel::AllGenomes => {
                    GenerationSample::AllGenomes(genomes.iter().copied().cloned().collect())
                }
                ReportingLevel::SpeciesChampions => GenerationSample::SpeciesChampions(
                    population
                        .species()
                        .map(|s| s.representative().clone())
                        .collect(),
                ),
                ReportingLevel::PopulationChampion => {
                    GenerationSample::PopulationChampion(population.champion().clone())
                }
                ReportingLevel::NoGenomes => GenerationSample::NoGenomes,
            },
        })
    }

    /// Returns the logs stored so far, in chronological order.
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genomics::GeneticConfig;
    use crate::populations::PopulationConfig;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use std::num::NonZeroUsize;

    #[test]
    fn stats_of_empty_iterator_are_none() {
        assert_eq!(Stats::from(&mut std::iter::empty()), None);
    }

    #[test]
    fn stats_of_single_item_are_that_item() {
        let stats = Stats::from(&mut std::iter::once(7.5)).unwrap();
        assert_eq!(stats.maximum, 7.5);
        assert_eq!(stats.minimum, 7.5);
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.median, 7.5);
    }

    #[test]
    fn stats_median_takes_the_middle_item_for_odd_counts() {
        let stats = Stats::from(&mut [5.0, 1.0, 3.0].iter().copied()).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn stats_median_averages_the_middle_items_for_even_counts() {
        let stats = Stats::from(&mut [4.0, 1.0, 2.0, 8.0].iter().copied()).unwrap();
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn log_snapshots_population_state() {
        let mut population = Population::with_rng(
            PopulationConfig {
                size: NonZeroUsize::new(6).unwrap(),
                ..PopulationConfig::zero()
            },
            GeneticConfig::zero(),
            StdRng::seed_from_u64(0),
        );
        population.evaluate_fitness(|_| 3.0);

        let mut logger = EvolutionLogger::new(ReportingLevel::PopulationChampion);
        logger.log(&population);

        let log = logger.logs().last().unwrap();
        assert_eq!(log.generation, 1);
        assert_eq!(log.species_count, 6);
        assert_eq!(log.species_sizes, vec![1; 6]);
        assert_eq!(log.fitness.maximum, 3.0);
        assert_eq!(log.fitness.minimum, 3.0);
        assert_eq!(log.node_counts.mean, 2.0);
        assert_eq!(log.edge_counts.mean, 1.0);
        assert!(matches!(
            log.sample,
            GenerationSample::PopulationChampion(_)
        ));
    }
}
