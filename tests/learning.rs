use rand::rngs::StdRng;
use rand::SeedableRng;
use rpnnet::graph::{
    GradientMode, Graph, InputId, Network, NeuronId, Node, Output, PerformanceTester,
    TrainingConfig,
};

/// `c(bias, a(bias, x, y), b(bias, x, y))`, plus `d` shaped like `c` when
/// `two_outputs` is set.
struct TwoLayer {
    net: Network,
    x: InputId,
    y: InputId,
}

fn two_layer(seed: u64, two_outputs: bool) -> TwoLayer {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    let bias = graph.add_bias();
    let x = graph.add_input(0.0, false).unwrap();
    let y = graph.add_input(1.0, false).unwrap();

    let mut layer = |graph: &mut Graph, children: &[Node]| -> NeuronId {
        let weights = graph.add_random_weights(&mut rng, children.len());
        graph.add_neuron(children, &weights).unwrap()
    };
    let a = layer(&mut graph, &[bias.into(), x.into(), y.into()]);
    let b = layer(&mut graph, &[bias.into(), x.into(), y.into()]);
    let c = layer(&mut graph, &[bias.into(), a.into(), b.into()]);

    let mut testers = vec![PerformanceTester::new(c)];
    let mut neurons = vec![a, b, c];
    if two_outputs {
        let d = layer(&mut graph, &[bias.into(), a.into(), b.into()]);
        testers.push(PerformanceTester::new(d));
        neurons.push(d);
    }

    TwoLayer {
        net: Network::new(graph, testers, neurons).unwrap(),
        x,
        y,
    }
}

#[test_log::test]
fn learns_the_sign_of_a_number() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut graph = Graph::new();
    let bias = graph.add_bias();
    let x = graph.add_input(1.0, false).unwrap();
    let weights = graph.add_random_weights(&mut rng, 2);
    let n = graph.add_neuron(&[bias.into(), x.into()], &weights).unwrap();
    let mut net = Network::new(graph, vec![PerformanceTester::new(n)], vec![n]).unwrap();

    let inputs = [[-3.0], [-2.0], [-1.0], [1.0], [2.0], [3.0]];
    let desired_outputs = [[0.0], [0.0], [0.0], [1.0], [1.0], [1.0]];
    let config = TrainingConfig::default().with_max_iterations(10000);
    let performances = net.train(&inputs, &desired_outputs, &config).unwrap();
    assert_eq!(performances.len(), 10);

    for (input, desired) in inputs.iter().zip(&desired_outputs) {
        net.input_mut(x).unwrap().set_value(input[0]).unwrap();
        let output = net.output().scalar().unwrap();
        assert!((output - desired[0]).abs() < 0.1, "{} -> {}", input[0], output);
    }
}

#[test_log::test]
fn learns_or() {
    let TwoLayer { mut net, x, y } = two_layer(11, false);

    let inputs = [[0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
    let desired_outputs = [[1.0], [1.0], [1.0], [0.0]];
    let config = TrainingConfig::default().with_max_iterations(10000);
    net.train(&inputs, &desired_outputs, &config).unwrap();

    for (input, desired) in inputs.iter().zip(&desired_outputs) {
        net.input_mut(x).unwrap().set_value(input[0]).unwrap();
        net.input_mut(y).unwrap().set_value(input[1]).unwrap();
        let output = net.output().scalar().unwrap();
        assert!((output - desired[0]).abs() < 0.1, "{:?} -> {}", input, output);
    }
}

#[test_log::test]
fn learns_identity_with_two_outputs() {
    let TwoLayer { mut net, .. } = two_layer(5, true);

    let inputs = [[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]];
    let config = TrainingConfig::default().with_max_iterations(10000);
    let performances = net.train(&inputs, &inputs, &config).unwrap();
    assert!(performances.last().unwrap() > performances.first().unwrap());

    let outputs = net.predict(&inputs).unwrap();
    for (input, output) in inputs.iter().zip(outputs) {
        match output {
            Output::Vector(values) => {
                assert_eq!(values.len(), 2);
                for (v, expected) in values.iter().zip(input) {
                    assert!((v - expected).abs() < 0.1, "{:?} -> {:?}", input, values);
                }
            }
            Output::Scalar(_) => panic!("two testers must give a vector"),
        }
    }
}

#[test_log::test]
fn backprop_gradient_also_learns_or() {
    let TwoLayer { mut net, .. } = two_layer(23, false);

    let inputs = [[0.0, 1.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]];
    let desired_outputs = [[1.0], [1.0], [1.0], [0.0]];
    let config = TrainingConfig::default()
        .with_max_iterations(10000)
        .with_gradient(GradientMode::Backprop);
    net.train(&inputs, &desired_outputs, &config).unwrap();

    for (input, desired) in inputs.iter().zip(&desired_outputs) {
        let output = net.process(input).unwrap().scalar().unwrap();
        assert!((output - desired[0]).abs() < 0.1, "{:?} -> {}", input, output);
    }
}
