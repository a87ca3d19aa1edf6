//! Text generation domain - produce a response with the routed model

mod generator;

pub use generator::{Generation, Generator};

#[cfg(test)]
pub use generator::mock::MockGenerator;
