use crate::NodeId;

use std::error::Error;
use std::fmt;

/// An error type indicating a failed network evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvaluationError {
    /// The number of input values fed to the network
    /// did not match the genome's input node count.
    InvalidInputSize {
        /// The genome's input node count.
        expected: usize,
        /// The number of input values supplied.
        actual: usize,
    },
}

/// An error type indicating the edge being created
/// or added is invalid.
#[derive(Debug)]
pub(crate) enum EdgeValidityError {
    /// The edge's source and target are the same node.
    SelfLoop(NodeId),
    /// One of the edge's endpoints does not exist.
    NonexistentEndpoints(NodeId, NodeId),
    /// The edge's source is an output node.
    OutputSource(NodeId),
    /// The edge's target is an input node.
    InputTarget(NodeId),
    /// An edge with the same endpoint pair already exists.
    DuplicateEdge(NodeId, NodeId),
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInputSize { expected, actual } => write!(
                f,
                "network fed {} input values, expected {}",
                actual, expected
            ),
        }
    }
}

impl fmt::Display for EdgeValidityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop(id) => write!(f, "edge insertion with self-loop on node {}", id),
            Self::NonexistentEndpoints(source, target) => write!(
                f,
                "edge insertion between nonexistent endpoint(s) {} -> {}",
                source, target
            ),
            Self::OutputSource(id) => {
                write!(f, "edge insertion with output node {} as source", id)
            }
            Self::InputTarget(id) => {
                write!(f, "edge insertion with input node {} as target", id)
            }
            Self::DuplicateEdge(source, target) => write!(
                f,
                "edge insertion with endpoints {} -> {} shadows edge with same endpoints",
                source, target
            ),
        }
    }
}

impl Error for EvaluationError {}
impl Error for EdgeValidityError {}
