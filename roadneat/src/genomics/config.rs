use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

/// Configuration data for genome generation,
/// mutation and comparison.
///
/// # Note
/// All quantities expressing probabilities
/// should be in the range [0.0, 1.0]. Using
/// values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of input nodes in a genome.
    pub input_count: NonZeroUsize,
    /// Number of output nodes in a genome.
    pub output_count: NonZeroUsize,
    /// Chance of a node-addition mutation taking
    /// place during a call to [`Genome::mutate`].
    ///
    /// [`Genome::mutate`]: crate::genomics::Genome::mutate
    pub node_addition_mutation_chance: f32,
    /// Chance of an edge-addition mutation taking
    /// place during a call to [`Genome::mutate`].
    ///
    /// [`Genome::mutate`]: crate::genomics::Genome::mutate
    pub edge_addition_mutation_chance: f32,
    /// Chance of a weight or bias perturbation taking
    /// place during a call to [`Genome::mutate`].
    ///
    /// [`Genome::mutate`]: crate::genomics::Genome::mutate
    pub param_mutation_chance: f32,
    /// Weighting of excess edges in genetic distance.
    pub excess_edge_factor: f32,
    /// Weighting of disjoint edges in genetic distance.
    pub disjoint_edge_factor: f32,
    /// Weighting of the summed weight difference of
    /// matching edges in genetic distance.
    pub weight_difference_factor: f32,
}

impl GeneticConfig {
    /// Returns a "zero-valued" default configuration.
    /// All values are 0, or in the case of node counts, 1.
    ///
    /// # Note
    /// This value is not suitable for use in most experiments.
    /// It is meant as a way to abbreviate configuration
    /// instantiation, or to fill in unused values.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::GeneticConfig;
    ///
    /// let cfg1 = GeneticConfig::zero();
    ///
    /// let cfg2 = GeneticConfig {
    ///     // Specify some values here...
    ///     node_addition_mutation_chance: 0.1,
    ///     // Default the rest...
    ///     ..GeneticConfig::zero()
    /// };
    /// ```
    pub const fn zero() -> GeneticConfig {
        GeneticConfig {
            input_count: NonZeroUsize::MIN,
            output_count: NonZeroUsize::MIN,
            node_addition_mutation_chance: 0.0,
            edge_addition_mutation_chance: 0.0,
            param_mutation_chance: 0.0,
            excess_edge_factor: 0.0,
            disjoint_edge_factor: 0.0,
            weight_difference_factor: 0.0,
        }
    }
}
