use super::arena::Graph;
use super::leaf::WeightId;
use super::neuron::NeuronId;
use super::pass::Pass;

/// Performance function attached to an output neuron.
///
/// Implements `-0.5 * (output - desired)^2`, which has its maximum (zero)
/// when the neuron returns the desired value. Training climbs it.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceTester {
    neuron: NeuronId,
    desired_output: f64,
}

impl PerformanceTester {
    pub fn new(neuron: NeuronId) -> PerformanceTester {
        PerformanceTester {
            neuron,
            desired_output: 0.0,
        }
    }

    pub fn neuron(&self) -> NeuronId {
        self.neuron
    }

    pub fn desired_output(&self) -> f64 {
        self.desired_output
    }

    pub fn set_desired_output(&mut self, value: f64) {
        self.desired_output = value;
    }

    pub fn output(&self, graph: &Graph, pass: &mut Pass) -> f64 {
        let diff = graph.neuron_output(self.neuron, pass) - self.desired_output;
        -0.5 * diff * diff
    }

    pub fn derivative(&self, graph: &Graph, weight: WeightId, pass: &mut Pass) -> f64 {
        (self.desired_output - graph.neuron_output(self.neuron, pass))
            * graph.neuron_derivative(self.neuron, weight, pass)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::or_gate;
    use super::*;

    #[test]
    fn performance_is_zero_when_matched() {
        let gate = or_gate();
        let mut pass = Pass::new();
        let output = gate.graph.neuron_output(gate.c, &mut pass);

        let mut tester = PerformanceTester::new(gate.c);
        assert_eq!(tester.desired_output(), 0.0);
        tester.set_desired_output(output);
        assert_eq!(tester.output(&gate.graph, &mut pass), 0.0);
        for w in gate.all_weights() {
            assert_eq!(tester.derivative(&gate.graph, w, &mut pass), 0.0);
        }

        tester.set_desired_output(output - 0.5);
        assert!((tester.output(&gate.graph, &mut pass) + 0.125).abs() < 1e-12);
    }

    #[test]
    fn derivative_points_uphill() {
        let mut gate = or_gate();
        let mut tester = PerformanceTester::new(gate.c);
        tester.set_desired_output(0.0);
        let w = gate.c_weights[1];

        let mut pass = Pass::new();
        let before = tester.output(&gate.graph, &mut pass);
        let derivative = tester.derivative(&gate.graph, w, &mut pass);
        assert!(derivative < 0.0);

        let value = gate.graph.weight(w).unwrap().value();
        gate.graph
            .weight_mut(w)
            .unwrap()
            .set_value(value + 0.1 * derivative)
            .unwrap();
        let after = tester.output(&gate.graph, &mut Pass::new());
        assert!(after > before);
    }
}
