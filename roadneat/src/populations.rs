//! A population is a collection of genomes grouped into
//! species, which can be evolved generationally: fitter
//! genomes are selected, and their offspring, bred through
//! crossover and mutation, replace the culled remainder.
//!
//! The generational loop is driven externally: the caller
//! evaluates fitness however it likes (typically a
//! simulation window), then calls
//! [`evolve`](Population::evolve).

mod config;
mod errors;
pub mod logging;
mod species;

pub use config::{sum_squared_fitness, PopulationConfig, SpeciesScore};
pub use errors::EvolutionError;
pub use species::Species;

use crate::genomics::{GeneticConfig, Genome};

use rand::rngs::StdRng;
use rand::{seq::index, Rng, SeedableRng};

/// A speciated collection of genomes, paired with the
/// configuration and random source driving its evolution.
///
/// The population's genome count is restored to the
/// configured size at the end of every evolution cycle.
pub struct Population<R: Rng = StdRng> {
    species: Vec<Species>,
    generation: usize,
    population_config: PopulationConfig,
    genetic_config: GeneticConfig,
    rng: R,
}

impl Population {
    /// Creates a new population using the passed
    /// configurations, seeded from system entropy.
    ///
    /// Every initial genome founds its own single-member
    /// species; merging only happens to offspring, through
    /// speciation during later evolution cycles.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::GeneticConfig;
    /// use roadneat::populations::{Population, PopulationConfig};
    /// use std::num::NonZeroUsize;
    ///
    /// let population = Population::new(
    ///     PopulationConfig {
    ///         size: NonZeroUsize::new(10).unwrap(),
    ///         ..PopulationConfig::zero()
    ///     },
    ///     GeneticConfig::zero(),
    /// );
    ///
    /// assert_eq!(population.genome_count(), 10);
    /// assert_eq!(population.generation(), 1);
    /// ```
    pub fn new(population_config: PopulationConfig, genetic_config: GeneticConfig) -> Population {
        Population::with_rng(population_config, genetic_config, StdRng::from_entropy())
    }
}

impl<R: Rng> Population<R> {
    /// Creates a new population drawing all randomness from
    /// the passed generator. Two populations built from equal
    /// configurations and identically-seeded generators evolve
    /// identically.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::GeneticConfig;
    /// use roadneat::populations::{Population, PopulationConfig};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let population = Population::with_rng(
    ///     PopulationConfig::zero(),
    ///     GeneticConfig::zero(),
    ///     StdRng::seed_from_u64(42),
    /// );
    ///
    /// assert_eq!(population.genome_count(), 1);
    /// ```
    pub fn with_rng(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        rng: R,
    ) -> Population<R> {
        let mut population = Population {
            species: vec![],
            generation: 1,
            population_config,
            genetic_config,
            rng,
        };
        for _ in 0..population.population_config.size.get() {
            let genome = Genome::new(&population.genetic_config, &mut population.rng);
            let color = population.rng.gen();
            population.species.push(Species::new(genome, color));
        }
        population
    }

    /// Assigns to each genome the fitness returned by the
    /// evaluator. Fitness should be a positive quantity.
    ///
    /// Callers running tick-based simulations can instead
    /// accumulate through [`Genome::add_fitness`] on
    /// [`genomes_mut`](Population::genomes_mut).
    ///
    /// # Panics
    /// This function will panic if the evaluator returns a
    /// negative fitness.
    pub fn evaluate_fitness(&mut self, mut evaluator: impl FnMut(&Genome) -> f32) {
        for species in &mut self.species {
            for genome in &mut species.genomes {
                let fitness = evaluator(genome);
                assert!(fitness >= 0.0, "genome fitness cannot be negative");
                genome.set_fitness(fitness);
            }
        }
    }

    /// Advances the population by one generation: culls the
    /// lower-scoring species and the lower-fitness members of
    /// those that remain, then breeds mutated crossover
    /// offspring from the survivors until the configured size
    /// is restored. All fitness accumulators are reset to zero
    /// afterwards.
    ///
    /// # Errors
    /// Returns [`EvolutionError::EmptyPopulation`], without
    /// modifying the population, if selection would leave a
    /// single survivor with offspring still owed. Breeding
    /// requires two distinct parents.
    ///
    /// # Panics
    /// This function will panic if any genome's fitness or any
    /// species' score is NaN.
    pub fn evolve(&mut self) -> Result<(), EvolutionError> {
        let survivors = self.projected_survivor_count();
        if survivors < 2 && survivors < self.population_config.size.get() {
            return Err(EvolutionError::EmptyPopulation);
        }

        self.select();
        self.reproduce();
        self.generation += 1;
        for species in &mut self.species {
            for genome in &mut species.genomes {
                genome.set_fitness(0.0);
            }
        }
        Ok(())
    }

    /// Computes how many genomes selection would keep, without
    /// modifying the population.
    fn projected_survivor_count(&self) -> usize {
        let species_score = self.population_config.species_score;
        let mut sizes: Vec<(f32, usize)> = self
            .species
            .iter()
            .map(|s| (species_score(s), s.count()))
            .collect();
        sizes.sort_by(|a, b| b.0.partial_cmp(&a.0).expect("NaN in species scores"));

        let surviving_species =
            ceil_ratio(sizes.len(), self.population_config.species_survival_rate);
        sizes
            .iter()
            .take(surviving_species)
            .map(|(_, count)| ceil_ratio(*count, self.population_config.individual_survival_rate))
            .sum()
    }

    /// Culls the population down to the configured survival
    /// rates. Species are ranked by the configured score and
    /// members by fitness; both cutoffs round up, so a
    /// surviving species always keeps at least one member.
    /// Stable sorting keeps ties in their prior order.
    fn select(&mut self) {
        let species_score = self.population_config.species_score;
        self.species.sort_by(|a, b| {
            species_score(b)
                .partial_cmp(&species_score(a))
                .expect("NaN in species scores")
        });
        let surviving_species = ceil_ratio(
            self.species.len(),
            self.population_config.species_survival_rate,
        );
        self.species.truncate(surviving_species);

        for species in &mut self.species {
            species.genomes.sort_by(|a, b| {
                b.fitness()
                    .partial_cmp(&a.fitness())
                    .expect("NaN in genome fitness")
            });
            let survivors = ceil_ratio(
                species.count(),
                self.population_config.individual_survival_rate,
            );
            species.genomes.truncate(survivors);
        }
        self.species.retain(|s| !s.genomes.is_empty());
    }

    /// Breeds offspring until the population is back at the
    /// configured size. Each offspring is speciated as soon as
    /// it is bred, so it immediately joins the parent pool for
    /// subsequent pairings.
    fn reproduce(&mut self) {
        while self.genome_count() < self.population_config.size.get() {
            let child = self.breed_offspring();
            self.speciate(child);
        }
    }

    /// Breeds one offspring from two distinct parents sampled
    /// uniformly across all species, crossed over fitter-first
    /// (the first-sampled parent wins fitness ties) and then
    /// mutated.
    fn breed_offspring(&mut self) -> Genome {
        let pool: Vec<&Genome> = self.species.iter().flat_map(|s| s.genomes.iter()).collect();
        let picks = index::sample(&mut self.rng, pool.len(), 2);
        let (first, second) = (pool[picks.index(0)], pool[picks.index(1)]);
        let (more_fit, less_fit) = if second.fitness() > first.fitness() {
            (second, first)
        } else {
            (first, second)
        };

        let mut child = Genome::crossover(more_fit, less_fit, &mut self.rng);
        child.mutate(&self.genetic_config, &mut self.rng);
        child
    }

    /// Assigns a genome to the first species whose
    /// representative is at a genetic distance strictly below
    /// the distance threshold, or founds a new species with
    /// the genome if none is.
    fn speciate(&mut self, genome: Genome) {
        let genetic_config = &self.genetic_config;
        let threshold = self.population_config.distance_threshold;
        let home = self.species.iter().position(|species| {
            Genome::genetic_distance(&genome, species.representative(), genetic_config) < threshold
        });
        match home {
            Some(i) => self.species[i].genomes.push(genome),
            None => {
                let color = self.rng.gen();
                self.species.push(Species::new(genome, color));
            }
        }
    }

    /// Returns the population's current champion: the genome
    /// of highest fitness. Ties go to the genome encountered
    /// first in species order.
    ///
    /// # Panics
    /// This function will panic if any genome's fitness is NaN.
    pub fn champion(&self) -> &Genome {
        self.genomes()
            .reduce(|best, genome| {
                if genome.fitness() > best.fitness() {
                    genome
                } else {
                    best
                }
            })
            .expect("population cannot be empty")
    }

    /// Returns an iterator over the population's species.
    pub fn species(&self) -> impl Iterator<Item = &Species> {
        self.species.iter()
    }

    /// Returns an iterator over all genomes in the population.
    pub fn genomes(&self) -> impl Iterator<Item = &Genome> {
        self.species.iter().flat_map(|s| s.genomes.iter())
    }

    /// Returns a mutable iterator over all genomes in the
    /// population, e.g. to accumulate fitness during a
    /// simulation window.
    pub fn genomes_mut(&mut self) -> impl Iterator<Item = &mut Genome> {
        self.species.iter_mut().flat_map(|s| s.genomes.iter_mut())
    }

    /// Returns the number of genomes currently in the
    /// population.
    pub fn genome_count(&self) -> usize {
        self.species.iter().map(Species::count).sum()
    }

    /// Returns the current generation number. The initial
    /// population is generation 1.
    pub fn generation(&self) -> usize {
        self.generation
    }
}

/// Rounds `count * rate` up to a whole survivor count.
fn ceil_ratio(count: usize, rate: f32) -> usize {
    (count as f32 * rate).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use std::num::NonZeroUsize;

    fn population_config(size: usize) -> PopulationConfig {
        PopulationConfig {
            size: NonZeroUsize::new(size).unwrap(),
            distance_threshold: 0.0,
            species_survival_rate: 1.0,
            individual_survival_rate: 1.0,
            species_score: sum_squared_fitness,
        }
    }

    fn population(size: usize, seed: u64) -> Population<StdRng> {
        Population::with_rng(
            population_config(size),
            GeneticConfig::zero(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn new_population_founds_one_species_per_genome() {
        // Even under a threshold every genome clears, founders
        // are never merged during construction.
        let population = Population::with_rng(
            PopulationConfig {
                distance_threshold: 100.0,
                ..population_config(10)
            },
            GeneticConfig::zero(),
            StdRng::seed_from_u64(0),
        );

        assert_eq!(population.generation(), 1);
        assert_eq!(population.genome_count(), 10);
        assert_eq!(population.species.len(), 10);
        assert!(population.species().all(|s| s.count() == 1));
        assert!(population.genomes().all(|g| g.fitness() == 0.0));
        assert!(population.genomes().all(|g| g.layer_sizes() == [1, 0, 1]));
    }

    #[test]
    fn identically_seeded_populations_are_equal() {
        let first = population(8, 77);
        let second = population(8, 77);

        assert_eq!(first.species, second.species);
    }

    #[test]
    fn select_keeps_the_top_species_and_their_top_members() {
        let mut population = population(8, 0);
        population.population_config.species_survival_rate = 0.5;
        population.population_config.individual_survival_rate = 0.5;

        // Recarve the initial singleton species into four, with
        // scores 14, 12.5, 2 and 16 under sum_squared_fitness.
        let mut genomes: Vec<Genome> = population
            .species
            .drain(..)
            .flat_map(|s| s.genomes)
            .collect();
        for (sizes, fitnesses) in [
            (3, vec![3.0, 2.0, 1.0]),
            (2, vec![2.5, 2.5]),
            (2, vec![1.0, 1.0]),
            (1, vec![4.0]),
        ] {
            let mut members = genomes.split_off(genomes.len() - sizes);
            for (genome, fitness) in members.iter_mut().zip(&fitnesses) {
                genome.set_fitness(*fitness);
            }
            let founder = members.remove(0);
            let mut species = Species::new(founder, [0; 4]);
            species.genomes.extend(members);
            population.species.push(species);
        }

        assert_eq!(population.projected_survivor_count(), 3);

        population.select();

        // ceil(4 * 0.5) = 2 species survive, highest-scored
        // first; they keep ceil(1 * 0.5) = 1 and
        // ceil(3 * 0.5) = 2 members respectively.
        assert_eq!(population.species.len(), 2);
        assert_eq!(population.species[0].count(), 1);
        assert_eq!(population.species[0].genomes[0].fitness(), 4.0);
        assert_eq!(population.species[1].count(), 2);
        assert_eq!(population.species[1].genomes[0].fitness(), 3.0);
        assert_eq!(population.species[1].genomes[1].fitness(), 2.0);
    }

    #[test]
    fn evolve_restores_size_and_resets_fitness() {
        let mut population = population(4, 13);
        population.population_config.distance_threshold = 1.0;
        population.population_config.species_survival_rate = 0.5;

        let mut fitness = 0.0;
        population.evaluate_fitness(|_| {
            fitness += 1.0;
            fitness
        });

        population.evolve().unwrap();

        assert_eq!(population.generation(), 2);
        assert_eq!(population.genome_count(), 4);
        assert!(population.genomes().all(|g| g.fitness() == 0.0));
        // The two top-scored singleton species survive; with
        // mutation chances at zero both offspring carry the
        // parents' shared topology and join the first species.
        assert_eq!(population.species.len(), 2);
        assert_eq!(population.species[0].count(), 3);
        assert_eq!(population.species[1].count(), 1);
    }

    #[test]
    fn evolve_breeds_from_uniform_fitness_too() {
        let mut population = population(12, 4);
        population.population_config.species_survival_rate = 0.5;
        population.population_config.individual_survival_rate = 0.5;

        population.evolve().unwrap();

        assert_eq!(population.generation(), 2);
        assert_eq!(population.genome_count(), 12);
    }

    #[test]
    fn evolve_refuses_to_breed_from_a_single_survivor() {
        let mut population = population(2, 0);
        population.population_config.species_survival_rate = 0.1;
        population.evaluate_fitness(|_| 1.0);
        let species_before = population.species.clone();

        assert_eq!(population.evolve(), Err(EvolutionError::EmptyPopulation));

        // The failed cycle must leave the population untouched.
        assert_eq!(population.generation(), 1);
        assert_eq!(population.species, species_before);
    }

    #[test]
    fn speciation_joins_within_threshold_and_founds_beyond_it() {
        let genetic_config = GeneticConfig {
            disjoint_edge_factor: 1.0,
            ..GeneticConfig::zero()
        };
        let mut population = Population::with_rng(
            PopulationConfig {
                distance_threshold: 0.5,
                ..population_config(1)
            },
            genetic_config,
            StdRng::seed_from_u64(0),
        );

        // An exact copy is at distance zero.
        let near = population.champion().clone();
        population.speciate(near);
        assert_eq!(population.species.len(), 1);
        assert_eq!(population.species[0].count(), 2);

        // A copy with one split-off hidden node carries two
        // disjoint edges out of three, at distance 2/3.
        let mut far = population.champion().clone();
        let hidden = far.add_hidden_node(0.0);
        far.add_edge(0, hidden, 1.0);
        far.add_edge(hidden, 1, 1.0);
        population.speciate(far);
        assert_eq!(population.species.len(), 2);
        assert_eq!(population.species[1].count(), 1);
    }

    #[test]
    fn speciation_requires_distance_strictly_below_the_threshold() {
        let genetic_config = GeneticConfig {
            disjoint_edge_factor: 1.0,
            ..GeneticConfig::zero()
        };
        let mut population = Population::with_rng(
            PopulationConfig {
                distance_threshold: 0.5,
                ..population_config(1)
            },
            genetic_config,
            StdRng::seed_from_u64(0),
        );

        // One disjoint edge out of two puts this genome at a
        // distance of exactly 0.5 from the representative, which
        // must found a new species rather than join.
        let mut boundary = population.champion().clone();
        let hidden = boundary.add_hidden_node(0.0);
        boundary.add_edge(0, hidden, 1.0);
        population.speciate(boundary);

        assert_eq!(population.species.len(), 2);
        assert_eq!(population.species[1].count(), 1);
    }

    #[test]
    fn representative_is_the_fittest_member_earliest_on_ties() {
        let mut population = population(3, 0);

        // Merge the singleton founder species into one.
        let extras: Vec<Genome> = population
            .species
            .drain(1..)
            .flat_map(|s| s.genomes)
            .collect();
        population.species[0].genomes.extend(extras);

        let mut fitness = 0.0;
        population.evaluate_fitness(|_| {
            fitness += 1.0;
            fitness
        });

        let species = &population.species[0];
        assert_eq!(species.representative().fitness(), 3.0);

        population.evaluate_fitness(|_| 2.0);
        let species = &population.species[0];
        assert!(std::ptr::eq(species.representative(), &species.genomes[0]));
    }

    #[test]
    fn champion_has_the_highest_fitness() {
        let mut population = population(5, 0);
        let mut fitness = 5.0;
        population.evaluate_fitness(|_| {
            fitness -= 1.0;
            fitness
        });

        assert_eq!(population.champion().fitness(), 4.0);
    }
}
