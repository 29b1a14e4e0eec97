//! Neural networks as explicit computation graphs, trained by gradient ascent
//!
//! A network is made of
//! * inputs and weights, the leaves of the graph;
//! * neurons, which apply `1 / (1 + exp(-z))` to `z = sum(weight * child output)`;
//! * performance testers attached to the output neurons, whose summed output
//! is climbed during training.
//!
//! Nodes live in a [`Graph`] arena and are referenced by handles, so a node
//! can feed several parents. Outputs and derivatives are computed by
//! recursion over the graph and memoized in a [`Pass`], which must be reset
//! whenever a weight or an input changes. [`Network`] does that on its own.

mod arena;
mod error;
mod leaf;
mod network;
mod neuron;
mod pass;
mod tester;
mod trainer;

#[cfg(test)]
mod fixtures;

pub use arena::*;
pub use error::*;
pub use leaf::*;
pub use network::*;
pub use neuron::*;
pub use pass::*;
pub use tester::*;
pub use trainer::*;
