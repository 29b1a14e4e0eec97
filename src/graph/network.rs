use log::debug;
use std::collections::HashSet;

use super::arena::Graph;
use super::error::{check_finite, BuildError, ProcessError, SizeMismatch};
use super::leaf::{Input, InputId, Weight, WeightId};
use super::neuron::{NeuronId, Node};
use super::pass::Pass;
use super::tester::PerformanceTester;

/// Result of running the network forward.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// The network has a single performance tester.
    Scalar(f64),
    /// Outputs of every tester's neuron, in tester order.
    Vector(Vec<f64>),
}

impl Output {
    pub fn scalar(&self) -> Option<f64> {
        match self {
            Output::Scalar(value) => Some(*value),
            Output::Vector(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Output::Scalar(value) => vec![value],
            Output::Vector(values) => values,
        }
    }
}

/// Neural network structure
///
/// Owns the [`Graph`] it was built from, the performance testers attached to
/// its output neurons and the cache of the current evaluation pass.
#[derive(Debug, Clone)]
pub struct Network {
    pub(super) graph: Graph,
    pub(super) testers: Vec<PerformanceTester>,
    pub(super) neurons: Vec<NeuronId>,

    /// Weights of all `neurons`, without duplicates, in first-seen order.
    pub(super) weights: Vec<WeightId>,

    /// Inputs feeding `neurons` directly, without duplicates, in first-seen order.
    pub(super) inputs: Vec<InputId>,

    pub(super) pass: Pass,
}

impl Network {
    /// Builds network from a graph.
    ///
    /// # Arguments
    /// * `graph` - graph holding every node of the network;
    /// * `testers` - performance testers, one per output neuron;
    /// * `neurons` - every neuron of the network. Only their weights are trained.
    ///
    /// # Returns
    /// * `Ok(Network)` if there is at least one tester, neuron and weight, and
    /// every tester is attached to one of `neurons`;
    /// * `Err(BuildError)` otherwise.
    ///
    /// # Examples
    /// ```
    /// # use rpnnet::graph::{Graph, Network, PerformanceTester};
    /// let mut graph = Graph::new();
    /// let bias = graph.add_bias();
    /// let x = graph.add_input(1.0, false).unwrap();
    /// let weights = [graph.add_weight(0.0).unwrap(), graph.add_weight(2.0).unwrap()];
    /// let n = graph.add_neuron(&[bias.into(), x.into()], &weights).unwrap();
    ///
    /// let mut net = Network::new(graph, vec![PerformanceTester::new(n)], vec![n]).unwrap();
    /// assert!(net.output().scalar().unwrap() > 0.8);
    /// ```
    pub fn new(
        graph: Graph,
        testers: Vec<PerformanceTester>,
        neurons: Vec<NeuronId>,
    ) -> Result<Network, BuildError> {
        if testers.is_empty() {
            return Err(BuildError::NoTesters);
        }
        if neurons.is_empty() {
            return Err(BuildError::NoNeurons);
        }

        let mut seen_weights = HashSet::new();
        let mut weights = Vec::new();
        let mut seen_inputs = HashSet::new();
        let mut inputs = Vec::new();

        for &id in &neurons {
            let neuron = graph.neuron(id).ok_or(BuildError::UnknownNeuron(id))?;
            for &w in neuron.weights() {
                if seen_weights.insert(w) {
                    weights.push(w);
                }
            }
            for &child in neuron.children() {
                if let Node::Input(i) = child {
                    if seen_inputs.insert(i) {
                        inputs.push(i);
                    }
                }
            }
        }

        if weights.is_empty() {
            return Err(BuildError::NoWeights);
        }
        let listed: HashSet<NeuronId> = neurons.iter().copied().collect();
        if let Some(tester) = testers.iter().find(|t| !listed.contains(&t.neuron())) {
            return Err(BuildError::UnlistedNeuron(tester.neuron()));
        }

        debug!(
            "Network: {} tester(s), {} neuron(s), {} weight(s), {} input(s)",
            testers.len(),
            neurons.len(),
            weights.len(),
            inputs.len()
        );

        Ok(Network {
            graph,
            testers,
            neurons,
            weights,
            inputs,
            pass: Pass::new(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn testers(&self) -> &[PerformanceTester] {
        &self.testers
    }

    pub fn neurons(&self) -> &[NeuronId] {
        &self.neurons
    }

    pub fn weights(&self) -> &[WeightId] {
        &self.weights
    }

    pub fn inputs(&self) -> &[InputId] {
        &self.inputs
    }

    /// Inputs that receive sample values, in the order samples are read.
    pub fn free_inputs(&self) -> Vec<InputId> {
        self.inputs
            .iter()
            .copied()
            .filter(|&i| !self.graph.inputs[i.0].is_constant())
            .collect()
    }

    /// Mutable access to an input. The current pass is dropped, since its
    /// values may no longer match the graph.
    pub fn input_mut(&mut self, id: InputId) -> Option<&mut Input> {
        self.pass.reset();
        self.graph.input_mut(id)
    }

    /// Mutable access to a weight. Drops the current pass, like `input_mut`.
    pub fn weight_mut(&mut self, id: WeightId) -> Option<&mut Weight> {
        self.pass.reset();
        self.graph.weight_mut(id)
    }

    /// Cache of the current evaluation pass.
    pub fn pass(&self) -> &Pass {
        &self.pass
    }

    /// Resets the caches of every neuron.
    pub fn reset_cache(&mut self) {
        self.pass.reset();
    }

    /// Outputs of every tester's neuron, in tester order.
    pub fn outputs(&mut self) -> Vec<f64> {
        self.reset_cache();
        let Network {
            graph,
            testers,
            pass,
            ..
        } = self;
        testers
            .iter()
            .map(|t| graph.neuron_output(t.neuron(), pass))
            .collect()
    }

    /// Returns the output of the network: a scalar if it has one performance
    /// tester, the outputs of every tester's neuron otherwise.
    pub fn output(&mut self) -> Output {
        let mut outputs = self.outputs();
        if outputs.len() == 1 {
            Output::Scalar(outputs.remove(0))
        } else {
            Output::Vector(outputs)
        }
    }

    /// Assigns values to the non-constant inputs, in declaration order.
    /// Nothing is changed unless every value fits.
    pub(super) fn assign_inputs(&mut self, values: &[f64]) -> Result<(), ProcessError> {
        let free = self.free_inputs();
        if values.len() != free.len() {
            return Err(ProcessError::BadInputs(SizeMismatch {
                expected: free.len(),
                got: values.len(),
            }));
        }
        for &value in values {
            check_finite(value)?;
        }
        for (id, &value) in free.into_iter().zip(values) {
            self.graph.inputs[id.0].set_value(value)?;
        }
        self.pass.reset();
        Ok(())
    }

    /// Sets the desired output of every tester, in tester order.
    pub fn set_desired_outputs(&mut self, values: &[f64]) -> Result<(), ProcessError> {
        if values.len() != self.testers.len() {
            return Err(ProcessError::BadDesiredOutputs(SizeMismatch {
                expected: self.testers.len(),
                got: values.len(),
            }));
        }
        for (tester, &value) in self.testers.iter_mut().zip(values) {
            tester.set_desired_output(value);
        }
        Ok(())
    }

    /// Calculates output of the network using given input.
    ///
    /// # Arguments
    /// * `inputs` - values of the non-constant inputs, in declaration order.
    ///
    /// # Returns
    /// * `Ok(Output)` if amount of inputs is right;
    /// * `Err(ProcessError)` otherwise.
    pub fn process(&mut self, inputs: &[f64]) -> Result<Output, ProcessError> {
        self.assign_inputs(inputs)?;
        Ok(self.output())
    }

    /// Runs `process` on every sample.
    pub fn predict<S: AsRef<[f64]>>(&mut self, samples: &[S]) -> Result<Vec<Output>, ProcessError> {
        samples
            .iter()
            .map(|sample| self.process(sample.as_ref()))
            .collect()
    }

    /// Sum of the outputs of all performance testers.
    pub fn performance_output(&mut self) -> f64 {
        self.reset_cache();
        let Network {
            graph,
            testers,
            pass,
            ..
        } = self;
        testers.iter().map(|t| t.output(graph, pass)).sum()
    }

    /// Derivative of the sum of performance testers outputs with respect
    /// to `weight`, computed within the current pass.
    pub fn performance_derivative(&mut self, weight: WeightId) -> f64 {
        let Network {
            graph,
            testers,
            pass,
            ..
        } = self;
        testers.iter().map(|t| t.derivative(graph, weight, pass)).sum()
    }

    /// Exports values of the network's weights, in `Network::weights` order.
    pub fn export(&self) -> Vec<f64> {
        self.weights
            .iter()
            .map(|w| self.graph.weights[w.0].value())
            .collect()
    }

    /// Restores weights previously saved with `Network::export`.
    /// Weights are left untouched if any value is rejected.
    pub fn load_weights(&mut self, values: &[f64]) -> Result<(), ProcessError> {
        if values.len() != self.weights.len() {
            return Err(ProcessError::BadWeights(SizeMismatch {
                expected: self.weights.len(),
                got: values.len(),
            }));
        }
        for &value in values {
            check_finite(value)?;
        }
        for (w, &value) in self.weights.iter().zip(values) {
            self.graph.weights[w.0].set_value(value)?;
        }
        self.reset_cache();
        Ok(())
    }
}
