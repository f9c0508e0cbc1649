//! Genomes are the focus of evolution in NEAT.
//! They are a graph of nodes and edges that doubles as its
//! own phenotype: a feed-forward network evaluated directly
//! over the genome. Genomes are progressively mutated,
//! thus adding complexity and functionality.

mod config;
mod edges;
mod errors;
mod nodes;

pub use config::GeneticConfig;
pub use edges::Edge;
use errors::EdgeValidityError;
pub use errors::EvaluationError;
pub use nodes::{Node, NodeRole};

use crate::NodeId;

use ahash::RandomState;
use rand::prelude::{Rng, SliceRandom};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use std::collections::HashSet;
use std::fmt;

/// A mutable graph of nodes and edges: one individual's
/// network topology and parameters, together with its
/// fitness accumulator.
///
/// Node ids are assigned monotonically from zero and never
/// reused: inputs first, then outputs, then hidden nodes in
/// order of creation. Edges are identified by their ordered
/// `(source, target)` node pair and kept in insertion order,
/// which is also the network evaluation order.
///
/// Supports Serde for convenient genome saving and loading.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Genome {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_pairings: HashSet<(NodeId, NodeId), RandomState>,
    layer_size: [usize; 3],
    fitness: f32,
}

impl Genome {
    /// Creates a new genome with the specified configuration:
    /// a fully-connected bipartite graph from every input node
    /// to every output node, with weights and biases drawn
    /// uniformly from [-1, 1].
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome, NodeRole};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let genome = Genome::new(&config, &mut rand::thread_rng());
    ///
    /// // As configured, the genome should have 3 inputs + 2 outputs.
    /// assert_eq!(genome.nodes().count(), 3 + 2);
    /// assert_eq!(genome.nodes().filter(|n| n.role() == NodeRole::Input).count(), 3);
    /// assert_eq!(genome.nodes().filter(|n| n.role() == NodeRole::Output).count(), 2);
    ///
    /// // And there is an enabled edge for every input-output pair.
    /// assert_eq!(genome.edges().count(), 3 * 2);
    /// assert!(genome.edges().all(|e| e.enabled()));
    /// assert!(genome.edges().all(|e| e.weight().abs() <= 1.0));
    /// ```
    pub fn new(config: &GeneticConfig, rng: &mut impl Rng) -> Genome {
        let input_count = config.input_count.get();
        let output_count = config.output_count.get();

        let mut genome = Genome {
            nodes: Vec::with_capacity(input_count + output_count),
            edges: Vec::with_capacity(input_count * output_count),
            node_pairings: HashSet::default(),
            layer_size: [input_count, 0, output_count],
            fitness: 0.0,
        };

        for i in 0..input_count {
            genome
                .nodes
                .push(Node::new(i, NodeRole::Input, Self::random_bias(rng)));
        }
        for o in 0..output_count {
            genome.nodes.push(Node::new(
                o + input_count,
                NodeRole::Output,
                Self::random_bias(rng),
            ));
        }

        for i in 0..input_count {
            for o in 0..output_count {
                genome.insert_edge(Edge::new(i, o + input_count, Self::random_weight(rng)));
            }
        }

        genome
    }

    /// Returns a random weight, drawn uniformly from [-1, 1].
    fn random_weight(rng: &mut impl Rng) -> f32 {
        rng.gen_range(-1.0..=1.0)
    }

    /// Returns a random bias, drawn uniformly from [-1, 1].
    fn random_bias(rng: &mut impl Rng) -> f32 {
        rng.gen_range(-1.0..=1.0)
    }

    /// Evaluates the genome's network at the given inputs,
    /// returning the output nodes' values in node-id order.
    ///
    /// Every node's working value starts at its bias; inputs are
    /// added to the input nodes positionally; then a single pass
    /// over the enabled edges, in insertion order, accumulates
    /// `value[source] * weight` into each edge's target.
    ///
    /// # Known limitation
    /// No topological sorting or multi-pass propagation is done.
    /// A hidden node feeding another hidden node contributes its
    /// fully-accumulated value only if its incoming edges were
    /// inserted before the outgoing one; the insertion order is
    /// therefore part of the network's observable behavior.
    ///
    /// # Errors
    /// Returns [`EvaluationError::InvalidInputSize`] if
    /// `inputs.len()` differs from the genome's input node count.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let genome = Genome::new(&config, &mut rand::thread_rng());
    ///
    /// let outputs = genome.feed_forward(&[0.5, -1.0]).unwrap();
    /// assert_eq!(outputs.len(), 1);
    ///
    /// assert!(genome.feed_forward(&[0.5]).is_err());
    /// ```
    pub fn feed_forward(&self, inputs: &[f32]) -> Result<Vec<f32>, EvaluationError> {
        let input_count = self.layer_size[NodeRole::Input as usize];
        if inputs.len() != input_count {
            return Err(EvaluationError::InvalidInputSize {
                expected: input_count,
                actual: inputs.len(),
            });
        }

        // Input ids coincide with input positions by construction.
        let mut values: Vec<f32> = self.nodes.iter().map(Node::bias).collect();
        for (value, input) in values.iter_mut().zip(inputs) {
            *value += input;
        }

        for edge in self.edges.iter().filter(|e| e.enabled()) {
            values[edge.target()] += values[edge.source()] * edge.weight();
        }

        Ok(self
            .nodes
            .iter()
            .filter(|n| n.role() == NodeRole::Output)
            .map(|n| values[n.id()])
            .collect())
    }

    /// Mutates the genome. Each operator (node addition, edge
    /// addition, parameter perturbation) fires independently,
    /// at most once, with its configured chance.
    pub fn mutate(&mut self, config: &GeneticConfig, rng: &mut impl Rng) {
        if rng.gen::<f32>() < config.node_addition_mutation_chance {
            self.mutate_add_node(rng);
        }
        if rng.gen::<f32>() < config.edge_addition_mutation_chance {
            self.mutate_add_edge(rng);
        }
        if rng.gen::<f32>() < config.param_mutation_chance {
            self.mutate_update_param(rng);
        }
    }

    /// Splits a randomly-chosen enabled edge in two. The old
    /// edge is disabled and retained for lineage purposes, and
    /// a new hidden node with a fresh random bias is bridged
    /// into its place: source -> new (weight 1.0) and
    /// new -> target (the old edge's weight).
    ///
    /// Returns the new node's id, or `None` if the genome has
    /// no enabled edges.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let mut rng = rand::thread_rng();
    /// let mut genome = Genome::new(&config, &mut rng);
    ///
    /// let new_node = genome.mutate_add_node(&mut rng).unwrap();
    ///
    /// assert_eq!(new_node, 5);
    /// assert_eq!(genome.nodes().count(), 3 + 2 + 1);
    /// assert_eq!(genome.edges().count(), 3 * 2 + 2);
    /// assert_eq!(genome.edges().filter(|e| !e.enabled()).count(), 1);
    /// ```
    pub fn mutate_add_node(&mut self, rng: &mut impl Rng) -> Option<NodeId> {
        let enabled: Vec<usize> = self
            .edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.enabled())
            .map(|(i, _)| i)
            .collect();
        let split = *enabled.choose(rng)?;

        let (source, target) = self.edges[split].endpoints();
        let weight = self.edges[split].weight();
        self.edges[split].set_enabled(false);

        let new_node = self.add_hidden_node(Self::random_bias(rng));
        self.insert_edge(Edge::new(source, new_node, 1.0));
        self.insert_edge(Edge::new(new_node, target, weight));

        Some(new_node)
    }

    /// Creates an edge between a random non-output source and a
    /// random non-input target, with a fresh random weight.
    /// The target is resampled while it equals the source.
    ///
    /// Returns the new edge's endpoints, or `None` if the chosen
    /// pair was already connected (the mutation is dropped for
    /// this call, not retried).
    pub fn mutate_add_edge(&mut self, rng: &mut impl Rng) -> Option<(NodeId, NodeId)> {
        let sources: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.role() != NodeRole::Output)
            .map(Node::id)
            .collect();
        let targets: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|n| n.role() != NodeRole::Input)
            .map(Node::id)
            .collect();

        let source = *sources.choose(rng)?;
        let mut target = *targets.choose(rng)?;
        // Output nodes are always valid targets and never valid
        // sources, so the resampling terminates.
        while target == source {
            target = *targets.choose(rng)?;
        }

        if self.node_pairings.contains(&(source, target)) {
            return None;
        }
        self.insert_edge(Edge::new(source, target, Self::random_weight(rng)));
        Some((source, target))
    }

    /// Perturbs either a random edge's weight or a random node's
    /// bias (an even coin flip) by Gaussian noise with mean 0 and
    /// standard deviation 1. No clamping is applied; unbounded
    /// drift over generations is accepted behavior.
    pub fn mutate_update_param(&mut self, rng: &mut impl Rng) {
        let delta: f32 = rng.sample(StandardNormal);
        if rng.gen::<bool>() {
            if let Some(edge) = self.edges.choose_mut(rng) {
                edge.set_weight(edge.weight() + delta);
            }
        } else if let Some(node) = self.nodes.choose_mut(rng) {
            node.set_bias(node.bias() + delta);
        }
    }

    /// Calculates the _genetic distance_ between `first` and
    /// `second`, weighting excess and disjoint edges and the
    /// weight differences of matching edges as specified in
    /// `config`.
    ///
    /// Edges match by endpoint pair alone; the enabled flag is
    /// ignored. Disjoint edges are counted from `first`'s
    /// perspective and excess edges from `second`'s, so the
    /// metric is deliberately asymmetric in that split.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(3).unwrap(),
    ///     output_count: NonZeroUsize::new(2).unwrap(),
    ///     excess_edge_factor: 1.0,
    ///     disjoint_edge_factor: 1.0,
    ///     weight_difference_factor: 1.0,
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// // Identical genomes are at distance zero.
    /// let genome1 = Genome::new(&config, &mut StdRng::seed_from_u64(42));
    /// let genome2 = Genome::new(&config, &mut StdRng::seed_from_u64(42));
    ///
    /// assert_eq!(Genome::genetic_distance(&genome1, &genome2, &config), 0.0);
    /// ```
    pub fn genetic_distance(first: &Genome, second: &Genome, config: &GeneticConfig) -> f32 {
        let mut matching_edges = 0;
        let mut disjoint_edges = 0;
        let mut weight_difference = 0.0;

        for edge in &first.edges {
            match second.find_edge(edge.source(), edge.target()) {
                Some(other) => {
                    matching_edges += 1;
                    weight_difference += (edge.weight() - other.weight()).abs();
                }
                None => disjoint_edges += 1,
            }
        }

        // Endpoint pairs are unique within a genome, so every match
        // consumes a distinct edge of `second`.
        let excess_edges = second.edges.len() - matching_edges;
        // Floor of 1 avoids dividing by zero on edgeless genomes.
        let num_edges = first.edges.len().max(second.edges.len()).max(1);

        config.excess_edge_factor * excess_edges as f32 / num_edges as f32
            + config.disjoint_edge_factor * disjoint_edges as f32 / num_edges as f32
            + config.weight_difference_factor * weight_difference
    }

    /// Combines two parent genomes into a child genome.
    ///
    /// The child takes all nodes (including biases) and layer
    /// bookkeeping from the fitter parent. For every edge of the
    /// fitter parent, if the less-fit parent carries the same
    /// endpoint pair the inherited copy (weight and enabled flag)
    /// is chosen between the two by an even coin flip; otherwise
    /// the fitter parent's copy is inherited unconditionally.
    /// Edges unique to the less-fit parent are never inherited.
    ///
    /// The child's fitness starts at zero.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let mut rng = rand::thread_rng();
    /// let more_fit = Genome::new(&config, &mut rng);
    /// let less_fit = Genome::new(&config, &mut rng);
    ///
    /// let child = Genome::crossover(&more_fit, &less_fit, &mut rng);
    ///
    /// // The child's structure mirrors the fitter parent's.
    /// assert_eq!(child.nodes().count(), more_fit.nodes().count());
    /// assert_eq!(child.edges().count(), more_fit.edges().count());
    /// assert_eq!(child.fitness(), 0.0);
    /// ```
    pub fn crossover(more_fit: &Genome, less_fit: &Genome, rng: &mut impl Rng) -> Genome {
        let mut child = Genome {
            nodes: more_fit.nodes.clone(),
            edges: Vec::with_capacity(more_fit.edges.len()),
            node_pairings: HashSet::default(),
            layer_size: more_fit.layer_size,
            fitness: 0.0,
        };

        for edge in &more_fit.edges {
            let inherited = match less_fit.find_edge(edge.source(), edge.target()) {
                Some(other) if rng.gen::<bool>() => other.clone(),
                _ => edge.clone(),
            };
            child.insert_edge(inherited);
        }

        child
    }

    /// Adds a new hidden node with the given bias to the genome
    /// and returns its id.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let mut genome = Genome::new(&config, &mut rand::thread_rng());
    ///
    /// // Ids 0-1 are the inputs and 2 the output.
    /// assert_eq!(genome.add_hidden_node(0.5), 3);
    /// assert_eq!(genome.layer_sizes(), [2, 1, 1]);
    /// ```
    pub fn add_hidden_node(&mut self, bias: f32) -> NodeId {
        // Ids are contiguous, so the next id equals the node count.
        let id = self.nodes.len();
        self.nodes.push(Node::new(id, NodeRole::Hidden, bias));
        self.layer_size[NodeRole::Hidden as usize] += 1;
        id
    }

    /// Adds a new edge to the genome and returns a reference
    /// to it.
    ///
    /// # Panics
    /// This function will panic if the endpoints do not exist,
    /// if `source == target`, if `source` is an output node or
    /// `target` an input node, or if an edge with the same
    /// endpoint pair already exists.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    /// use std::num::NonZeroUsize;
    ///
    /// let config = GeneticConfig {
    ///     input_count: NonZeroUsize::new(2).unwrap(),
    ///     output_count: NonZeroUsize::new(1).unwrap(),
    ///     ..GeneticConfig::zero()
    /// };
    ///
    /// let mut genome = Genome::new(&config, &mut rand::thread_rng());
    /// let hidden = genome.add_hidden_node(0.0);
    ///
    /// genome.add_edge(0, hidden, 0.5);
    /// genome.add_edge(hidden, 2, -0.5);
    ///
    /// assert_eq!(genome.edges().count(), 2 + 2);
    /// ```
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: f32) -> &mut Edge {
        self.check_edge_viability(source, target)
            .unwrap_or_else(|e| panic!("{} in {}", e, self));
        self.insert_edge(Edge::new(source, target, weight))
    }

    fn check_edge_viability(&self, source: NodeId, target: NodeId) -> Result<(), EdgeValidityError> {
        if source == target {
            return Err(EdgeValidityError::SelfLoop(source));
        }
        let (source_node, target_node) = match (self.nodes.get(source), self.nodes.get(target)) {
            (Some(s), Some(t)) => (s, t),
            _ => return Err(EdgeValidityError::NonexistentEndpoints(source, target)),
        };
        if source_node.role() == NodeRole::Output {
            return Err(EdgeValidityError::OutputSource(source));
        }
        if target_node.role() == NodeRole::Input {
            return Err(EdgeValidityError::InputTarget(target));
        }
        if self.node_pairings.contains(&(source, target)) {
            return Err(EdgeValidityError::DuplicateEdge(source, target));
        }
        Ok(())
    }

    /// Appends an edge, recording its endpoint pair.
    /// Assumes the edge is valid for the genome.
    fn insert_edge(&mut self, edge: Edge) -> &mut Edge {
        self.node_pairings.insert(edge.endpoints());
        self.edges.push(edge);
        self.edges.last_mut().unwrap()
    }

    /// Looks up an edge by its endpoint pair.
    fn find_edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        if !self.node_pairings.contains(&(source, target)) {
            return None;
        }
        self.edges
            .iter()
            .find(|e| e.endpoints() == (source, target))
    }

    /// Returns an iterator over the genome's nodes, in id order.
    ///
    /// The view is read-only; consumers must not rely on being
    /// able to mutate the genome through it.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Returns an iterator over the genome's edges, in
    /// insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Returns the genome's node counts per layer role:
    /// `[inputs, hidden, outputs]`.
    pub fn layer_sizes(&self) -> [usize; 3] {
        self.layer_size
    }

    /// Returns the genome's input node count.
    pub fn input_count(&self) -> usize {
        self.layer_size[NodeRole::Input as usize]
    }

    /// Returns the genome's output node count.
    pub fn output_count(&self) -> usize {
        self.layer_size[NodeRole::Output as usize]
    }

    /// Returns the genome's accumulated fitness.
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    /// Adds to the genome's fitness accumulator. The external
    /// evaluator calls this once per simulation tick during a
    /// generation window.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{GeneticConfig, Genome};
    ///
    /// let mut genome = Genome::new(&GeneticConfig::zero(), &mut rand::thread_rng());
    ///
    /// genome.add_fitness(2.0);
    /// genome.add_fitness(0.5);
    ///
    /// assert_eq!(genome.fitness(), 2.5);
    /// ```
    pub fn add_fitness(&mut self, fitness: f32) {
        self.fitness += fitness;
    }

    /// Sets the genome's fitness to the value passed.
    /// Fitness should be a positive quantity.
    pub fn set_fitness(&mut self, fitness: f32) {
        self.fitness = fitness;
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Genome[{}i/{}h/{}o, fitness {:.3}]{{{}}}",
            self.layer_size[NodeRole::Input as usize],
            self.layer_size[NodeRole::Hidden as usize],
            self.layer_size[NodeRole::Output as usize],
            self.fitness,
            self.edges
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}
