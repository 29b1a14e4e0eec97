use thiserror::Error;

use super::leaf::{InputId, WeightId};
use super::neuron::NeuronId;

/// Error structure for collections size mismatch
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Expected {expected} values, but got {got}!")]
pub struct SizeMismatch {
    pub expected: usize,
    pub got: usize,
}

/// Error for values that can't be stored in a weight or an input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("Value must be a finite number, but got {0}!")]
    NotFinite(f64),
}

/// Checks that `value` can be held by a graph leaf.
pub(super) fn check_finite(value: f64) -> Result<f64, ValueError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValueError::NotFinite(value))
    }
}

/// Error structure for `Graph::add_neuron` and `Network::new`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    #[error("Neuron must have one weight per child: {0}")]
    ChildrenWeightsMismatch(SizeMismatch),
    #[error("Neuron must have at least one child!")]
    EmptyNeuron,
    #[error("Unknown weight {0:?}!")]
    UnknownWeight(WeightId),
    #[error("Unknown input {0:?}!")]
    UnknownInput(InputId),
    #[error("Unknown neuron {0:?}!")]
    UnknownNeuron(NeuronId),
    #[error("Network must have at least one performance tester!")]
    NoTesters,
    #[error("Network must have at least one neuron!")]
    NoNeurons,
    #[error("Network must have at least one weight!")]
    NoWeights,
    #[error("Performance tester is attached to {0:?}, which is not part of the network!")]
    UnlistedNeuron(NeuronId),
}

/// Error structure for `Network::process` and weight loading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessError {
    #[error("Expected {} input(s), but got {}!", .0.expected, .0.got)]
    BadInputs(SizeMismatch),
    #[error("Expected {} desired output(s), but got {}!", .0.expected, .0.got)]
    BadDesiredOutputs(SizeMismatch),
    #[error("Expected {} weight value(s), but got {}!", .0.expected, .0.got)]
    BadWeights(SizeMismatch),
    #[error(transparent)]
    BadValue(#[from] ValueError),
}

/// Error structure for `Network::train`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainError {
    #[error("Expected {} desired output vector(s) to pair with the inputs, but got {}!", .0.expected, .0.got)]
    UnpairedSamples(SizeMismatch),
    #[error("Expected {1} input(s), but samples[{0}] got {2}!")]
    WrongSampleInputsCount(usize, usize, usize),
    #[error("Expected {1} desired output(s), but samples[{0}] got {2}!")]
    WrongSampleDesiredOutputsCount(usize, usize, usize),
    #[error("samples[{0}] holds a value that is not a finite number!")]
    NonFiniteSample(usize),
    #[error("Step size must be a finite number, but got {0}!")]
    BadStepSize(f64),
    #[error(transparent)]
    Process(#[from] ProcessError),
}
