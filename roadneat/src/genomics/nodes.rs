use crate::NodeId;

use serde::{Deserialize, Serialize};

use std::fmt;

/// A NodeRole indicates the function of a node
/// within its network.
///
/// The role constrains edge endpoints: output nodes
/// are never edge sources, and input nodes are never
/// edge targets. Roles are fixed at node creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// Input nodes, created at genome construction.
    Input = 0,
    /// Hidden nodes, created only by node-addition mutations.
    Hidden = 1,
    /// Output nodes, created at genome construction.
    Output = 2,
}

/// Nodes are the structural elements of genomes
/// between which edges are created.
///
/// A node's id and role never change once created;
/// only its bias is mutable.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Node {
    id: NodeId,
    role: NodeRole,
    bias: f32,
}

impl Node {
    /// Returns a new node with the specified parameters.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{Node, NodeRole};
    ///
    /// let node = Node::new(5, NodeRole::Hidden, 0.25);
    /// ```
    pub fn new(id: NodeId, role: NodeRole, bias: f32) -> Node {
        Node { id, role, bias }
    }

    /// Returns the node's id.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{Node, NodeRole};
    ///
    /// let node = Node::new(5, NodeRole::Hidden, 0.25);
    ///
    /// assert_eq!(node.id(), 5);
    /// ```
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node's role.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{Node, NodeRole};
    ///
    /// let node = Node::new(5, NodeRole::Hidden, 0.25);
    ///
    /// assert_eq!(node.role(), NodeRole::Hidden);
    /// ```
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// Returns the node's bias.
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// Sets the node's bias.
    ///
    /// # Examples
    /// ```
    /// use roadneat::genomics::{Node, NodeRole};
    ///
    /// let mut node = Node::new(5, NodeRole::Hidden, 0.25);
    ///
    /// node.set_bias(-1.5);
    ///
    /// assert_eq!(node.bias(), -1.5);
    /// ```
    pub fn set_bias(&mut self, bias: f32) {
        self.bias = bias;
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}[{:?}, bias {:.3}]", self.id, self.role, self.bias)
    }
}
