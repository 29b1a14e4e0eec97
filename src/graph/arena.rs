use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use std::collections::HashSet;

use super::error::{BuildError, SizeMismatch, ValueError};
use super::leaf::{Input, InputId, Weight, WeightId};
use super::neuron::{sigmoid, sigmoid_derivative_from_output, Neuron, NeuronId, Node};
use super::pass::Pass;

/// Arena holding every node of a computation graph.
///
/// Nodes are added once and addressed by the handles the `add_*` methods
/// return. A neuron may only reference nodes that already exist, so the
/// graph is a DAG by construction, and nodes may be shared by several
/// parents. After construction only weight and input values change.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(super) weights: Vec<Weight>,
    pub(super) inputs: Vec<Input>,
    pub(super) neurons: Vec<Neuron>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    pub fn add_weight(&mut self, value: f64) -> Result<WeightId, ValueError> {
        self.weights.push(Weight::new(value)?);
        Ok(WeightId(self.weights.len() - 1))
    }

    /// Adds a weight with a random value from range [-1,1].
    pub fn add_random_weight<R: Rng + ?Sized>(&mut self, rng: &mut R) -> WeightId {
        let weights_between = Uniform::from(-1.0..=1.0);
        self.weights.push(Weight::from_sample(weights_between.sample(rng)));
        WeightId(self.weights.len() - 1)
    }

    /// Adds `count` weights with random values from range [-1,1].
    pub fn add_random_weights<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Vec<WeightId> {
        (0..count).map(|_| self.add_random_weight(rng)).collect()
    }

    pub fn add_input(&mut self, value: f64, constant: bool) -> Result<InputId, ValueError> {
        self.inputs.push(Input::new(value, constant)?);
        Ok(InputId(self.inputs.len() - 1))
    }

    /// Adds a constant `-1` input (see `Input::bias`).
    pub fn add_bias(&mut self) -> InputId {
        self.inputs.push(Input::bias());
        InputId(self.inputs.len() - 1)
    }

    /// Adds a neuron computing `sigmoid(sum(weights[i] * children[i]))`.
    ///
    /// # Returns
    /// * `Ok(NeuronId)` if every handle is known and there is one weight per child;
    /// * `Err(BuildError)` otherwise.
    ///
    /// # Examples
    /// ```
    /// # use rpnnet::graph::{Graph, Pass};
    /// let mut graph = Graph::new();
    /// let bias = graph.add_bias();
    /// let x = graph.add_input(2.0, false).unwrap();
    /// let y = graph.add_input(4.0, false).unwrap();
    /// let weights = [
    ///     graph.add_weight(2.0).unwrap(),
    ///     graph.add_weight(0.5).unwrap(),
    ///     graph.add_weight(0.5).unwrap(),
    /// ];
    /// let n = graph
    ///     .add_neuron(&[bias.into(), x.into(), y.into()], &weights)
    ///     .unwrap();
    ///
    /// let output = graph.neuron_output(n, &mut Pass::new());
    /// assert!((output - 0.7310585786).abs() < 1e-9);
    /// ```
    pub fn add_neuron(
        &mut self,
        children: &[Node],
        weights: &[WeightId],
    ) -> Result<NeuronId, BuildError> {
        if children.len() != weights.len() {
            return Err(BuildError::ChildrenWeightsMismatch(SizeMismatch {
                expected: children.len(),
                got: weights.len(),
            }));
        }
        if children.is_empty() {
            return Err(BuildError::EmptyNeuron);
        }

        let mut connected_weights = HashSet::with_capacity(weights.len());
        for &weight in weights {
            if weight.0 >= self.weights.len() {
                return Err(BuildError::UnknownWeight(weight));
            }
            connected_weights.insert(weight);
        }
        for &child in children {
            match child {
                Node::Input(input) => {
                    if input.0 >= self.inputs.len() {
                        return Err(BuildError::UnknownInput(input));
                    }
                }
                Node::Neuron(neuron) => {
                    let neuron = self
                        .neurons
                        .get(neuron.0)
                        .ok_or(BuildError::UnknownNeuron(neuron))?;
                    connected_weights.extend(neuron.connected_weights.iter().copied());
                }
            }
        }

        let id = NeuronId(self.neurons.len());
        debug!(
            "Graph: {:?} with {} children, depends on {} weight(s)",
            id,
            children.len(),
            connected_weights.len()
        );
        self.neurons.push(Neuron {
            children: children.into(),
            weights: weights.into(),
            connected_weights,
        });
        Ok(id)
    }

    pub fn weight(&self, id: WeightId) -> Option<&Weight> {
        self.weights.get(id.0)
    }

    pub fn weight_mut(&mut self, id: WeightId) -> Option<&mut Weight> {
        self.weights.get_mut(id.0)
    }

    pub fn input(&self, id: InputId) -> Option<&Input> {
        self.inputs.get(id.0)
    }

    pub fn input_mut(&mut self, id: InputId) -> Option<&mut Input> {
        self.inputs.get_mut(id.0)
    }

    pub fn neuron(&self, id: NeuronId) -> Option<&Neuron> {
        self.neurons.get(id.0)
    }

    pub fn weights_count(&self) -> usize {
        self.weights.len()
    }

    pub fn inputs_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn neurons_count(&self) -> usize {
        self.neurons.len()
    }

    /// Output of any node of the graph.
    ///
    /// # Panics
    /// If a handle was not issued by this graph.
    pub fn output(&self, node: Node, pass: &mut Pass) -> f64 {
        match node {
            Node::Input(input) => self.inputs[input.0].output(),
            Node::Neuron(neuron) => self.neuron_output(neuron, pass),
        }
    }

    /// Derivative of any node of the graph with respect to `weight`.
    ///
    /// # Panics
    /// If a handle was not issued by this graph.
    pub fn derivative(&self, node: Node, weight: WeightId, pass: &mut Pass) -> f64 {
        match node {
            Node::Input(input) => self.inputs[input.0].derivative(weight),
            Node::Neuron(neuron) => self.neuron_derivative(neuron, weight, pass),
        }
    }

    /// Weighted sum of the neuron's children outputs.
    fn weighted_sum(&self, neuron: &Neuron, pass: &mut Pass) -> f64 {
        neuron
            .children
            .iter()
            .zip(neuron.weights.iter())
            .map(|(&child, weight)| self.weights[weight.0].value() * self.output(child, pass))
            .sum()
    }

    /// Activation of the neuron, computed once per pass.
    ///
    /// # Panics
    /// If a handle was not issued by this graph.
    pub fn neuron_output(&self, id: NeuronId, pass: &mut Pass) -> f64 {
        if let Some(output) = pass.cached_output(id) {
            return output;
        }
        let output = sigmoid(self.weighted_sum(&self.neurons[id.0], pass));
        pass.store_output(id, output);
        output
    }

    /// Derivative of the neuron's activation with respect to `weight`,
    /// computed once per pass.
    ///
    /// # Panics
    /// If a handle was not issued by this graph.
    pub fn neuron_derivative(&self, id: NeuronId, weight: WeightId, pass: &mut Pass) -> f64 {
        if let Some(derivative) = pass.cached_derivative(id, weight) {
            return derivative;
        }
        let derivative = self.compute_neuron_derivative(id, weight, pass);
        pass.store_derivative(id, weight, derivative);
        derivative
    }

    /// Chain rule over the sub-network starting at neuron `id`.
    fn compute_neuron_derivative(&self, id: NeuronId, weight: WeightId, pass: &mut Pass) -> f64 {
        let neuron = &self.neurons[id.0];
        // Sub-networks that don't depend on `weight` are never traversed
        if !neuron.depends_on(weight) {
            return 0.0;
        }

        let s = sigmoid(self.weighted_sum(neuron, pass));
        let ds = sigmoid_derivative_from_output(s);

        match neuron.weight_index(weight) {
            Some(i) => ds * self.output(neuron.children[i], pass),
            None => {
                ds * neuron
                    .children
                    .iter()
                    .zip(neuron.weights.iter())
                    .map(|(&child, w)| {
                        self.weights[w.0].value() * self.derivative(child, weight, pass)
                    })
                    .sum::<f64>()
            }
        }
    }
}
