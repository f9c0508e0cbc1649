use crate::populations::Species;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// A species-scoring function, used to rank species during
/// selection.
pub type SpeciesScore = fn(&Species) -> f32;

/// Scores a species by the sum of its members' squared
/// fitnesses. Rewards species with standout members over
/// uniformly mediocre ones of the same size.
///
/// # Examples
/// ```
/// use roadneat::genomics::GeneticConfig;
/// use roadneat::populations::{sum_squared_fitness, Population, PopulationConfig};
/// use std::num::NonZeroUsize;
///
/// let mut population = Population::new(
///     PopulationConfig {
///         size: NonZeroUsize::new(3).unwrap(),
///         ..PopulationConfig::zero()
///     },
///     GeneticConfig::zero(),
/// );
///
/// population.evaluate_fitness(|_| 2.0);
///
/// // Each initial species holds one genome of fitness 2.
/// let species = population.species().next().unwrap();
/// assert_eq!(sum_squared_fitness(species), 4.0);
/// ```
pub fn sum_squared_fitness(species: &Species) -> f32 {
    species.genomes().map(|g| g.fitness().powi(2)).sum()
}

/// Configuration data for population-level operations:
/// speciation, selection and reproduction.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of genomes in the population, held constant
    /// across generations.
    pub size: NonZeroUsize,
    /// Genetic distance below which a genome joins an
    /// existing species instead of founding a new one.
    /// The bound is strict.
    pub distance_threshold: f32,
    /// Fraction of species that survive selection, rounded up.
    pub species_survival_rate: f32,
    /// Fraction of each surviving species' members that
    /// survive selection, rounded up.
    pub individual_survival_rate: f32,
    /// Function used to score species during selection.
    #[serde(skip, default = "default_species_score")]
    pub species_score: SpeciesScore,
}

fn default_species_score() -> SpeciesScore {
    sum_squared_fitness
}

impl PopulationConfig {
    /// Returns a zero-initialized configuration, with a
    /// population size of 1 and [`sum_squared_fitness`] as the
    /// species score.
    ///
    /// # Examples
    /// ```
    /// use roadneat::populations::PopulationConfig;
    ///
    /// let config = PopulationConfig::zero();
    ///
    /// assert_eq!(config.size.get(), 1);
    /// assert_eq!(config.distance_threshold, 0.0);
    /// ```
    pub const fn zero() -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::MIN,
            distance_threshold: 0.0,
            species_survival_rate: 0.0,
            individual_survival_rate: 0.0,
            species_score: sum_squared_fitness,
        }
    }
}
