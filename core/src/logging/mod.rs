//! Operational logging around request handling

mod boundary;

#[cfg(test)]
mod tests;

pub use boundary::{Invocation, MethodBoundaryLogger};
