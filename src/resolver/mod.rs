//! Outcome resolver: table lookup, modifier pipeline, weighted draw.

pub mod outcome;

pub use outcome::{Outcome, OutcomeResolver, ResolutionContext};
