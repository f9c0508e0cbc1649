use crate::NodeId;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Edges are the principal components of genomes.
/// Each connects a source node to a target node with
/// an associated weight, and at most one edge exists
/// per ordered node pair.
///
/// A disabled edge takes no part in network evaluation
/// but is retained in the genome for lineage purposes.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Edge {
    source: NodeId,
    target: NodeId,
    weight: f32,
    enabled: bool,
}

impl Edge {
    /// Returns a new _enabled_ edge with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::Edge;
    ///
    /// let edge = Edge::new(3, 9, 2.0);
    ///
    /// assert!(edge.enabled());
    /// ```
    pub fn new(source: NodeId, target: NodeId, weight: f32) -> Edge {
        Edge {
            source,
            target,
            weight,
            enabled: true,
        }
    }

    /// Returns the id of the edge's source node.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::Edge;
    ///
    /// let edge = Edge::new(3, 9, 2.0);
    ///
    /// assert_eq!(edge.source(), 3);
    /// ```
    pub fn source(&self) -> NodeId {
        self.source
    }

    /// Returns the id of the edge's target node.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::Edge;
    ///
    /// let edge = Edge::new(3, 9, 2.0);
    ///
    /// assert_eq!(edge.target(), 9);
    /// ```
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Returns the edge's source and target node ids.
    /// The ordered pair is the edge's structural identity.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.source, self.target)
    }

    /// Returns the edge's weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Sets the edge's weight.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::Edge;
    ///
    /// let mut edge = Edge::new(3, 9, 2.0);
    ///
    /// edge.set_weight(-5.0);
    ///
    /// assert_eq!(edge.weight(), -5.0);
    /// ```
    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }

    /// Returns whether the edge is enabled.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the edge.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::Edge;
    ///
    /// let mut edge = Edge::new(3, 9, 2.0);
    ///
    /// edge.set_enabled(false);
    ///
    /// assert!(!edge.enabled());
    /// ```
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{:?}->{:?}, {:.3}]{}",
            if self.enabled { "" } else { "(" },
            self.source,
            self.target,
            self.weight,
            if self.enabled { "" } else { ")" },
        )
    }
}
