use pyo3::prelude::*;

use crate::graph::{GradientMode, Network as InnerNetwork, ProcessError, TrainError, TrainingConfig};
use crate::Impl_to_PyErr;

#[pyclass]
pub struct Network {
    pub(super) net: InnerNetwork,
}

#[pymethods]
impl Network {
    /// Outputs of every output neuron.
    pub fn output(&mut self) -> Vec<f64> {
        self.net.outputs()
    }

    pub fn process(&mut self, inputs: Vec<f64>) -> Result<Vec<f64>, ProcessError> {
        Ok(self.net.process(&inputs)?.into_vec())
    }

    pub fn performance_output(&mut self) -> f64 {
        self.net.performance_output()
    }

    pub fn export(&self) -> Vec<f64> {
        self.net.export()
    }

    pub fn load_weights(&mut self, values: Vec<f64>) -> Result<(), ProcessError> {
        self.net.load_weights(&values)
    }

    #[args(max_iterations = "500", step_size = "1.0", backprop = "false")]
    pub fn train(
        &mut self,
        inputs: Vec<Vec<f64>>,
        desired_outputs: Vec<Vec<f64>>,
        max_iterations: usize,
        step_size: f64,
        backprop: bool,
    ) -> Result<Vec<f64>, TrainError> {
        let gradient = if backprop {
            GradientMode::Backprop
        } else {
            GradientMode::Recursive
        };
        let config = TrainingConfig {
            max_iterations,
            step_size,
            gradient,
        };
        self.net.train(&inputs, &desired_outputs, &config)
    }
}

Impl_to_PyErr!(for ProcessError, TrainError);
