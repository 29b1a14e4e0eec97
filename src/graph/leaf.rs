use super::error::{check_finite, ValueError};

/// Handle of a [`Weight`] inside a [`Graph`](super::Graph).
///
/// Weights are addressed by identity: two weights holding the same value are
/// still different nodes with different handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeightId(pub(crate) usize);

impl WeightId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an [`Input`] inside a [`Graph`](super::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub(crate) usize);

impl InputId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Weight of a connection in the net.
///
/// Updates are two-phase: `stage` records the next value, `commit` makes it
/// active. Training stages every weight from the same configuration before
/// committing any of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weight {
    value: f64,
    pending: f64,
}

impl Weight {
    pub fn new(value: f64) -> Result<Weight, ValueError> {
        let value = check_finite(value)?;
        Ok(Weight {
            value,
            pending: value,
        })
    }

    /// Weight from a value drawn by an already bounded distribution.
    pub(super) fn from_sample(value: f64) -> Weight {
        Weight {
            value,
            pending: value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the active value right away, dropping any staged value.
    ///
    /// # Returns
    /// * `Ok(&mut Weight)` so calls can be chained;
    /// * `Err(ValueError)` if `value` is NaN or infinite.
    pub fn set_value(&mut self, value: f64) -> Result<&mut Weight, ValueError> {
        self.value = check_finite(value)?;
        self.pending = self.value;
        Ok(self)
    }

    /// Records the value this weight takes on the next `commit`.
    pub fn stage(&mut self, value: f64) {
        self.pending = value;
    }

    pub fn pending(&self) -> f64 {
        self.pending
    }

    pub fn commit(&mut self) {
        self.value = self.pending;
    }
}

/// Input of the net.
///
/// A constant input (a bias) is never overwritten with sample data when
/// training.
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    value: f64,
    constant: bool,
}

impl Default for Input {
    fn default() -> Self {
        Input {
            value: -1.0,
            constant: false,
        }
    }
}

impl Input {
    pub fn new(value: f64, constant: bool) -> Result<Input, ValueError> {
        Ok(Input {
            value: check_finite(value)?,
            constant,
        })
    }

    /// Constant `-1` input, used to shift a neuron's threshold.
    pub fn bias() -> Input {
        Input {
            value: -1.0,
            constant: true,
        }
    }

    pub fn set_value(&mut self, value: f64) -> Result<&mut Input, ValueError> {
        self.value = check_finite(value)?;
        Ok(self)
    }

    pub fn is_constant(&self) -> bool {
        self.constant
    }

    pub fn output(&self) -> f64 {
        self.value
    }

    /// Inputs don't depend on any weight.
    pub fn derivative(&self, _weight: WeightId) -> f64 {
        0.0
    }
}
