use roadneat::genomics::{GeneticConfig, Genome};
use roadneat::populations::{
    logging::{EvolutionLogger, ReportingLevel},
    Population, PopulationConfig,
};

use std::error::Error;
use std::num::NonZeroUsize;

const GENERATIONS: usize = 50;
const TICKS_PER_GENERATION: usize = 200;
const TIME_STEP: f32 = 0.1;

/// A minimal lane-keeping plant: the network reads lateral
/// offset and heading, and outputs a steering rate.
struct Car {
    offset: f32,
    heading: f32,
}

impl Car {
    fn new() -> Car {
        Car {
            offset: 1.0,
            heading: 0.0,
        }
    }

    fn tick(&mut self, steering: f32) {
        self.heading += steering.clamp(-1.0, 1.0) * TIME_STEP;
        self.offset += self.heading * TIME_STEP;
    }
}

/// Rewards staying centered in the lane; each tick pays out
/// more the smaller the lateral offset.
fn drive(genome: &Genome) -> Result<f32, Box<dyn Error>> {
    let mut car = Car::new();
    let mut fitness = 0.0;
    for _ in 0..TICKS_PER_GENERATION {
        let outputs = genome.feed_forward(&[car.offset, car.heading])?;
        car.tick(outputs[0]);
        fitness += 1.0 / (1.0 + car.offset.abs());
    }
    Ok(fitness)
}

fn main() -> Result<(), Box<dyn Error>> {
    let genetic_config = GeneticConfig {
        input_count: NonZeroUsize::new(2).unwrap(),
        output_count: NonZeroUsize::new(1).unwrap(),
        node_addition_mutation_chance: 0.1,
        edge_addition_mutation_chance: 0.1,
        param_mutation_chance: 1.0,
        excess_edge_factor: 1.0,
        disjoint_edge_factor: 1.0,
        weight_difference_factor: 1.0,
    };
    let population_config = PopulationConfig {
        size: NonZeroUsize::new(10).unwrap(),
        distance_threshold: 1.0,
        species_survival_rate: 0.6,
        individual_survival_rate: 0.2,
        ..PopulationConfig::zero()
    };

    let mut population = Population::new(population_config, genetic_config);
    let mut logger = EvolutionLogger::new(ReportingLevel::PopulationChampion);

    for _ in 0..GENERATIONS {
        for genome in population.genomes_mut() {
            let fitness = drive(genome)?;
            genome.add_fitness(fitness);
        }
        logger.log(&population);

        let champion = population.champion();
        println!(
            "generation {:3}: {} species, champion fitness {:.3} ({} nodes, {} edges)",
            population.generation(),
            population.species().count(),
            champion.fitness(),
            champion.nodes().count(),
            champion.edges().count(),
        );

        population.evolve()?;
    }

    if let Some(log) = logger.logs().last() {
        println!("{}", ron::to_string(&log.sample)?);
    }
    Ok(())
}
