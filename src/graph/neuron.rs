use std::collections::HashSet;

use super::leaf::{InputId, WeightId};

/// Handle of a [`Neuron`] inside a [`Graph`](super::Graph).
///
/// Neurons only connect to nodes added before them, so ordering handles by
/// index gives a topological order of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NeuronId(pub(crate) usize);

impl NeuronId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Element a neuron can take its inputs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Input(InputId),
    Neuron(NeuronId),
}

impl From<InputId> for Node {
    fn from(id: InputId) -> Self {
        Node::Input(id)
    }
}

impl From<NeuronId> for Node {
    fn from(id: NeuronId) -> Self {
        Node::Neuron(id)
    }
}

/// Neuron of the net.
///
/// Another way to think of it is as the sub-network starting at this neuron
/// and going back to the inputs. `children[i]` is connected through
/// `weights[i]`.
#[derive(Debug, Clone)]
pub struct Neuron {
    pub(super) children: Box<[Node]>,
    pub(super) weights: Box<[WeightId]>,

    /// Every weight this neuron depends on, directly or through its children.
    /// Fixed once the neuron is built, since topology never changes.
    pub(super) connected_weights: HashSet<WeightId>,
}

impl Neuron {
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn weights(&self) -> &[WeightId] {
        &self.weights
    }

    pub fn connected_weights(&self) -> &HashSet<WeightId> {
        &self.connected_weights
    }

    /// Returns true if this neuron's output depends on `weight`.
    pub fn depends_on(&self, weight: WeightId) -> bool {
        self.connected_weights.contains(&weight)
    }

    /// Position of `weight` among this neuron's own weights (first one if it
    /// is used several times).
    pub fn weight_index(&self, weight: WeightId) -> Option<usize> {
        self.weights.iter().position(|&w| w == weight)
    }
}

/// Sigmoid function.
/// Implements the formula:
/// `1 / (1 + exp(-x))`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Sigmoid derivative function, expressed in terms of sigmoid itself.
/// Implements the formula:
/// `s * (1 - s)`.
pub fn sigmoid_derivative_from_output(s: f64) -> f64 {
    s * (1.0 - s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_values() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(1.0) - 0.7310585786).abs() < 1e-9);
        assert!((sigmoid(-1.0) - (1.0 - 0.7310585786)).abs() < 1e-9);
        // Saturates instead of producing NaN
        assert_eq!(sigmoid(-1000.0), 0.0);
        assert_eq!(sigmoid(1000.0), 1.0);
    }

    #[test]
    fn sigmoid_derivative_peaks_at_half() {
        assert_eq!(sigmoid_derivative_from_output(0.5), 0.25);
        assert_eq!(sigmoid_derivative_from_output(0.0), 0.0);
        assert_eq!(sigmoid_derivative_from_output(1.0), 0.0);
    }
}
