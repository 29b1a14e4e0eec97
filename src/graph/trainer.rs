use log::{info, trace};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::arena::Graph;
use super::error::{SizeMismatch, TrainError};
use super::leaf::WeightId;
use super::network::Network;
use super::neuron::{sigmoid_derivative_from_output, NeuronId, Node};

/// How the per-weight gradient is computed for every sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMode {
    /// Every weight's derivative is computed by its own recursive chain-rule
    /// evaluation, memoized within the pass.
    Recursive,
    /// Single reverse accumulation over the graph per sample.
    ///
    /// Equals `Recursive` as long as no weight is used twice within the
    /// sub-network of one neuron; for shared weights it sums every use.
    Backprop,
}

impl Default for GradientMode {
    fn default() -> Self {
        GradientMode::Recursive
    }
}

/// Parameters of `Network::train`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of passes over the whole set of samples.
    pub max_iterations: usize,
    /// Gradient multiplier of every weight update.
    pub step_size: f64,
    pub gradient: GradientMode,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            max_iterations: 500,
            step_size: 1.0,
            gradient: GradientMode::Recursive,
        }
    }
}

impl TrainingConfig {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_step_size(mut self, step_size: f64) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_gradient(mut self, gradient: GradientMode) -> Self {
        self.gradient = gradient;
        self
    }

    /// Performance is sampled once every this many iterations.
    pub fn sampling_interval(&self) -> usize {
        (self.max_iterations / 10).max(1)
    }
}

impl Network {
    /// Gradient of the summed performance with respect to every weight of
    /// `Network::weights`, for the current inputs and desired outputs.
    pub fn gradient(&mut self, mode: GradientMode) -> Vec<f64> {
        self.reset_cache();
        match mode {
            GradientMode::Recursive => {
                let weights = self.weights.clone();
                weights
                    .into_iter()
                    .map(|w| self.performance_derivative(w))
                    .collect()
            }
            GradientMode::Backprop => self.backprop_gradient(),
        }
    }

    /// Accumulates `d performance / d output` of every neuron, walking the
    /// arena from the last neuron to the first (parents before children).
    fn backprop_gradient(&mut self) -> Vec<f64> {
        let Network {
            graph,
            testers,
            weights,
            pass,
            ..
        } = self;
        let graph: &Graph = graph;

        let mut adjoints = vec![0.0; graph.neurons.len()];
        for tester in testers.iter() {
            let neuron = tester.neuron();
            adjoints[neuron.0] += tester.desired_output() - graph.neuron_output(neuron, pass);
        }

        let mut gradient: HashMap<WeightId, f64> = HashMap::with_capacity(weights.len());
        for index in (0..graph.neurons.len()).rev() {
            let adjoint = adjoints[index];
            if adjoint == 0.0 {
                continue;
            }
            let neuron = &graph.neurons[index];
            let s = graph.neuron_output(NeuronId(index), pass);
            let delta = adjoint * sigmoid_derivative_from_output(s);

            for (&child, &w) in neuron.children.iter().zip(neuron.weights.iter()) {
                *gradient.entry(w).or_insert(0.0) += delta * graph.output(child, pass);
                if let Node::Neuron(child) = child {
                    adjoints[child.0] += delta * graph.weights[w.0].value();
                }
            }
        }

        weights
            .iter()
            .map(|w| gradient.get(w).copied().unwrap_or(0.0))
            .collect()
    }

    /// Stages `value + step_size * derivative` for every weight. Derivatives
    /// are computed one weight at a time, all from the active values.
    fn stage_recursive(&mut self, step_size: f64) {
        let Network {
            graph,
            testers,
            weights,
            pass,
            ..
        } = self;
        for &w in weights.iter() {
            let derivative: f64 = testers.iter().map(|t| t.derivative(graph, w, pass)).sum();
            let weight = &mut graph.weights[w.0];
            weight.stage(weight.value() + step_size * derivative);
        }
    }

    fn stage_gradient(&mut self, gradient: &[f64], step_size: f64) {
        for (w, derivative) in self.weights.iter().zip(gradient) {
            let weight = &mut self.graph.weights[w.0];
            weight.stage(weight.value() + step_size * derivative);
        }
    }

    /// Sets the weights in the network to their staged values.
    fn commit(&mut self) {
        for w in &self.weights {
            self.graph.weights[w.0].commit();
        }
    }

    /// Checks every sample before anything is changed.
    fn check_samples<I: AsRef<[f64]>, D: AsRef<[f64]>>(
        &self,
        inputs: &[I],
        desired_outputs: &[D],
    ) -> Result<(), TrainError> {
        if inputs.len() != desired_outputs.len() {
            return Err(TrainError::UnpairedSamples(SizeMismatch {
                expected: inputs.len(),
                got: desired_outputs.len(),
            }));
        }

        let inputs_count = self.free_inputs().len();
        let outputs_count = self.testers.len();
        for (i, (sample_inputs, sample_outputs)) in inputs.iter().zip(desired_outputs).enumerate() {
            let (sample_inputs, sample_outputs) = (sample_inputs.as_ref(), sample_outputs.as_ref());
            if sample_inputs.len() != inputs_count {
                return Err(TrainError::WrongSampleInputsCount(
                    i,
                    inputs_count,
                    sample_inputs.len(),
                ));
            }
            if sample_outputs.len() != outputs_count {
                return Err(TrainError::WrongSampleDesiredOutputsCount(
                    i,
                    outputs_count,
                    sample_outputs.len(),
                ));
            }
            if !sample_inputs.iter().chain(sample_outputs).all(|v| v.is_finite()) {
                return Err(TrainError::NonFiniteSample(i));
            }
        }
        Ok(())
    }

    /// Trains the network to produce the desired outputs from the inputs.
    ///
    /// For every iteration, each sample in turn is assigned to the
    /// non-constant inputs and the testers, then every weight moves along its
    /// performance derivative. All weights of one sample are updated at once,
    /// from the same configuration.
    ///
    /// # Arguments
    /// * `inputs` - values of the non-constant inputs, one slice per sample;
    /// * `desired_outputs` - desired output of every tester, one slice per sample;
    /// * `config` - iterations count, step size and gradient mode.
    ///
    /// # Returns
    /// * `Ok(Vec<f64>)` - performance sampled every `config.sampling_interval()`
    /// iterations;
    /// * `Err(TrainError)` if a sample doesn't fit the network. Nothing is
    /// changed in that case.
    ///
    /// # Examples
    /// ```
    /// # use rpnnet::graph::{Graph, Network, PerformanceTester, TrainingConfig};
    /// # use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mut graph = Graph::new();
    /// let bias = graph.add_bias();
    /// let x = graph.add_input(0.0, false).unwrap();
    /// let weights = graph.add_random_weights(&mut rng, 2);
    /// let n = graph.add_neuron(&[bias.into(), x.into()], &weights).unwrap();
    /// let mut net = Network::new(graph, vec![PerformanceTester::new(n)], vec![n]).unwrap();
    ///
    /// let inputs = [[-2.0], [-1.0], [1.0], [2.0]];
    /// let desired_outputs = [[0.0], [0.0], [1.0], [1.0]];
    /// let config = TrainingConfig::default().with_max_iterations(100);
    /// let performances = net.train(&inputs, &desired_outputs, &config).unwrap();
    ///
    /// assert_eq!(performances.len(), 10);
    /// assert!(performances[9] > performances[0]);
    /// ```
    pub fn train<I: AsRef<[f64]>, D: AsRef<[f64]>>(
        &mut self,
        inputs: &[I],
        desired_outputs: &[D],
        config: &TrainingConfig,
    ) -> Result<Vec<f64>, TrainError> {
        if !config.step_size.is_finite() {
            return Err(TrainError::BadStepSize(config.step_size));
        }
        self.check_samples(inputs, desired_outputs)?;

        let sampling_interval = config.sampling_interval();
        info!(
            "Trainer: {} iteration(s) over {} sample(s), step size {}, {:?} gradient",
            config.max_iterations,
            inputs.len(),
            config.step_size,
            config.gradient
        );

        let mut performances = Vec::with_capacity(config.max_iterations / sampling_interval + 1);
        for iteration in 0..config.max_iterations {
            for (sample_inputs, sample_outputs) in inputs.iter().zip(desired_outputs) {
                self.assign_inputs(sample_inputs.as_ref())?;
                self.set_desired_outputs(sample_outputs.as_ref())?;
                self.reset_cache();

                match config.gradient {
                    GradientMode::Recursive => self.stage_recursive(config.step_size),
                    GradientMode::Backprop => {
                        let gradient = self.backprop_gradient();
                        self.stage_gradient(&gradient, config.step_size);
                    }
                }
                self.commit();
                self.reset_cache();
            }

            if iteration % sampling_interval == 0 {
                let performance = self.performance_output();
                trace!("Trainer: iteration {}, performance {}", iteration, performance);
                performances.push(performance);
            }
        }

        info!(
            "Trainer: done, last sampled performance {:?}",
            performances.last()
        );
        Ok(performances)
    }
}
