use pyo3::prelude::*;

use super::network::Network;
use crate::graph::{
    BuildError, Graph as InnerGraph, InputId, Network as InnerNetwork, NeuronId, Node,
    PerformanceTester, ValueError, WeightId,
};
use crate::{Impl_to_PyErr, MakeConsumable};

MakeConsumable!(ConsumableGraph, InnerGraph, Graph);

/// Graph builder. Handles are plain integers on the Python side; a neuron's
/// children are `("input", handle)` or `("neuron", handle)` pairs.
#[pyclass]
pub struct Graph {
    pub(super) graph: ConsumableGraph,
}

fn parse_child(kind: &str, index: usize) -> PyResult<Node> {
    match kind {
        "input" => Ok(Node::Input(InputId(index))),
        "neuron" => Ok(Node::Neuron(NeuronId(index))),
        _ => Err(pyo3::exceptions::PyValueError::new_err(format!(
            "Child kind must be \"input\" or \"neuron\", but got \"{}\"!",
            kind
        ))),
    }
}

#[pymethods]
impl Graph {
    #[new]
    pub fn new() -> Self {
        Self {
            graph: ConsumableGraph::acquire(InnerGraph::new()),
        }
    }

    pub fn add_weight(&mut self, value: f64) -> PyResult<usize> {
        Ok(self.graph.get_ref_mut()?.add_weight(value)?.index())
    }

    /// Adds `count` weights with random values from range [-1,1].
    pub fn add_random_weights(&mut self, count: usize) -> PyResult<Vec<usize>> {
        let mut rng = rand::thread_rng();
        Ok(self
            .graph
            .get_ref_mut()?
            .add_random_weights(&mut rng, count)
            .into_iter()
            .map(WeightId::index)
            .collect())
    }

    pub fn add_input(&mut self, value: f64, constant: bool) -> PyResult<usize> {
        Ok(self.graph.get_ref_mut()?.add_input(value, constant)?.index())
    }

    pub fn add_bias(&mut self) -> PyResult<usize> {
        Ok(self.graph.get_ref_mut()?.add_bias().index())
    }

    pub fn add_neuron(
        &mut self,
        children: Vec<(String, usize)>,
        weights: Vec<usize>,
    ) -> PyResult<usize> {
        let children = children
            .iter()
            .map(|(kind, index)| parse_child(kind, *index))
            .collect::<PyResult<Vec<Node>>>()?;
        let weights: Vec<WeightId> = weights.into_iter().map(WeightId).collect();
        Ok(self
            .graph
            .get_ref_mut()?
            .add_neuron(&children, &weights)?
            .index())
    }

    pub fn neurons_count(&self) -> PyResult<usize> {
        Ok(self.graph.get_ref()?.neurons_count())
    }

    /// Consumes the graph and builds a network from it.
    ///
    /// `testers` are the output neurons, `neurons` every neuron of the network.
    pub fn build_network(&mut self, testers: Vec<usize>, neurons: Vec<usize>) -> PyResult<Network> {
        let testers = testers
            .into_iter()
            .map(|n| PerformanceTester::new(NeuronId(n)))
            .collect();
        let neurons = neurons.into_iter().map(NeuronId).collect();
        // Validate before giving the graph away
        let graph = self.graph.get_ref()?.clone();
        let net = InnerNetwork::new(graph, testers, neurons)?;
        self.graph.release()?;
        Ok(Network { net })
    }
}

Impl_to_PyErr!(for BuildError, ValueError);
