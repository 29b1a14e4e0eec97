//! Feedforward neural networks built as explicit computation graphs.
//!
//! Networks are assembled node by node in a [`graph::Graph`] arena, evaluated
//! through recursive memoized chain-rule passes, and fitted by gradient ascent
//! on a squared-error performance function. See the [`graph`] module.

pub mod graph;

#[cfg(feature = "python")]
mod python_ffi;
