//! An implementation of the NEAT algorithm
//! (NeuroEvolution of Augmenting Topologies), in which
//! genomes double as their own phenotype: a feed-forward
//! network evaluated directly over the genome's graph.
//!
//! # Quick Start
//! Generally, use of this crate will involve the following:
//!
//! 1. Creation of a [`Population`] from a [`PopulationConfig`]
//! and a [`GeneticConfig`].
//! 2. Evaluation of the population's genomes on the problem
//! domain through [`Genome::feed_forward`], accumulating
//! fitness as they go.
//! 3. Calling [`Population::evolve`] to produce the next
//! generation, and repeating from step 2.
//!
//! ```
//! use roadneat::genomics::GeneticConfig;
//! use roadneat::populations::{Population, PopulationConfig};
//! use std::num::NonZeroUsize;
//!
//! let genetic_config = GeneticConfig {
//!     input_count: NonZeroUsize::new(2).unwrap(),
//!     output_count: NonZeroUsize::new(1).unwrap(),
//!     node_addition_mutation_chance: 0.05,
//!     edge_addition_mutation_chance: 0.05,
//!     param_mutation_chance: 0.5,
//!     weight_difference_factor: 1.0,
//!     ..GeneticConfig::zero()
//! };
//! let population_config = PopulationConfig {
//!     size: NonZeroUsize::new(20).unwrap(),
//!     distance_threshold: 3.0,
//!     species_survival_rate: 0.5,
//!     individual_survival_rate: 0.5,
//!     ..PopulationConfig::zero()
//! };
//!
//! let mut population = Population::new(population_config, genetic_config);
//! for _ in 0..5 {
//!     for genome in population.genomes_mut() {
//!         let outputs = genome.feed_forward(&[1.0, 0.0]).unwrap();
//!         // Reward outputs close to 1.
//!         genome.add_fitness(1.0 / (1.0 + (outputs[0] - 1.0).abs()));
//!     }
//!     population.evolve().unwrap();
//! }
//!
//! assert_eq!(population.generation(), 6);
//! println!(
//!     "{}",
//!     serde_json::to_string(&population.champion()).unwrap()
//! );
//! ```
//!
//! [`Population`]: crate::populations::Population
//! [`PopulationConfig`]: crate::populations::PopulationConfig
//! [`GeneticConfig`]: crate::genomics::GeneticConfig
//! [`Genome::feed_forward`]: crate::genomics::Genome::feed_forward
//! [`Population::evolve`]: crate::populations::Population::evolve

pub mod genomics;
pub mod populations;

/// Identifier of a node within a genome. Ids are assigned
/// contiguously from zero, inputs first, then outputs, then
/// hidden nodes in creation order, and are never reused.
pub type NodeId = usize;
