//! Graphs shared by the unit tests.

use super::{Graph, InputId, NeuronId, WeightId};

/// Or-gate from hand-tuned weights: `c(bias, a(bias, x, y), b(bias, x, y))`.
pub(crate) struct OrGate {
    pub graph: Graph,
    pub bias: InputId,
    pub x: InputId,
    pub y: InputId,
    pub a: NeuronId,
    pub b: NeuronId,
    pub c: NeuronId,
    pub a_weights: [WeightId; 3],
    pub b_weights: [WeightId; 3],
    pub c_weights: [WeightId; 3],
}

impl OrGate {
    pub fn all_weights(&self) -> Vec<WeightId> {
        self.a_weights
            .iter()
            .chain(&self.b_weights)
            .chain(&self.c_weights)
            .copied()
            .collect()
    }
}

pub(crate) fn or_gate() -> OrGate {
    let mut graph = Graph::new();
    let bias = graph.add_bias();
    let x = graph.add_input(0.0, false).unwrap();
    let y = graph.add_input(1.0, false).unwrap();

    let mut weights = |values: [f64; 3]| {
        [
            graph.add_weight(values[0]).unwrap(),
            graph.add_weight(values[1]).unwrap(),
            graph.add_weight(values[2]).unwrap(),
        ]
    };
    let a_weights = weights([2.6737, 4.5273, 4.5070]);
    let b_weights = weights([-2.4721, -4.1961, -4.2173]);
    let c_weights = weights([0.5750, 7.8100, -7.3000]);

    let a = graph
        .add_neuron(&[bias.into(), x.into(), y.into()], &a_weights)
        .unwrap();
    let b = graph
        .add_neuron(&[bias.into(), x.into(), y.into()], &b_weights)
        .unwrap();
    let c = graph
        .add_neuron(&[bias.into(), a.into(), b.into()], &c_weights)
        .unwrap();

    OrGate {
        graph,
        bias,
        x,
        y,
        a,
        b,
        c,
        a_weights,
        b_weights,
        c_weights,
    }
}
