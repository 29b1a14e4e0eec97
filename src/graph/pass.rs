use std::collections::HashMap;

use super::leaf::WeightId;
use super::neuron::NeuronId;

/// Memo tables of one evaluation pass.
///
/// Values are only valid as long as no weight or input changed since they
/// were computed: call `reset` (or `reset_neuron` for every neuron) after any
/// such change. Kept apart from the [`Graph`](super::Graph) so the graph
/// stays immutable while a pass runs.
#[derive(Debug, Clone, Default)]
pub struct Pass {
    outputs: HashMap<NeuronId, f64>,
    derivatives: HashMap<(NeuronId, WeightId), f64>,
}

impl Pass {
    pub fn new() -> Pass {
        Pass::default()
    }

    pub fn cached_output(&self, neuron: NeuronId) -> Option<f64> {
        self.outputs.get(&neuron).copied()
    }

    pub fn cached_derivative(&self, neuron: NeuronId, weight: WeightId) -> Option<f64> {
        self.derivatives.get(&(neuron, weight)).copied()
    }

    pub(super) fn store_output(&mut self, neuron: NeuronId, output: f64) {
        self.outputs.insert(neuron, output);
    }

    pub(super) fn store_derivative(&mut self, neuron: NeuronId, weight: WeightId, value: f64) {
        self.derivatives.insert((neuron, weight), value);
    }

    /// Drops everything cached for `neuron`.
    pub fn reset_neuron(&mut self, neuron: NeuronId) {
        self.outputs.remove(&neuron);
        self.derivatives.retain(|&(n, _), _| n != neuron);
    }

    /// Drops everything cached for every neuron.
    pub fn reset(&mut self) {
        self.outputs.clear();
        self.derivatives.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.derivatives.is_empty()
    }
}
