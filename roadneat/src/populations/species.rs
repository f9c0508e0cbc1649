use crate::genomics::Genome;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Species are collections of reproductively compatible
/// genomes, grouped by genetic distance. Grouping shelters
/// young topological innovations from immediate competition
/// with the whole population.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Species {
    pub(super) genomes: Vec<Genome>,
    /// RGBA tint used when visualizing the species' members.
    color: [u8; 4],
}

impl Species {
    /// Creates a new species from a founding genome.
    pub(super) fn new(founder: Genome, color: [u8; 4]) -> Species {
        Species {
            genomes: vec![founder],
            color,
        }
    }

    /// Returns the species' current representative: its
    /// highest-fitness member. Ties keep the earliest member,
    /// so a freshly-speciated population is represented by
    /// each species' founder.
    ///
    /// # Panics
    /// This function will panic if any member's fitness is NaN.
    pub fn representative(&self) -> &Genome {
        self.genomes
            .iter()
            .reduce(|best, genome| {
                if genome.fitness() > best.fitness() {
                    genome
                } else {
                    best
                }
            })
            .expect("species cannot be empty")
    }

    /// Returns an iterator over the species' genomes.
    pub fn genomes(&self) -> impl Iterator<Item = &Genome> {
        self.genomes.iter()
    }

    /// Returns the number of genomes currently in the species.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::GeneticConfig;
    /// use roadneat::populations::{Population, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let population = Population::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(5).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     GeneticConfig::zero(),
    /// );
    ///
    /// // Every initial genome founds its own species.
    /// assert_eq!(population.species().count(), 5);
    /// assert!(population.species().all(|s| s.count() == 1));
    /// ```
    pub fn count(&self) -> usize {
        self.genomes.len()
    }

    /// Returns the species' assigned RGBA color.
    pub fn color(&self) -> [u8; 4] {
        self.color
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Species[{} member(s), #{:02x}{:02x}{:02x}{:02x}]",
            self.genomes.len(),
            self.color[0],
            self.color[1],
            self.color[2],
            self.color[3],
        )
    }
}
