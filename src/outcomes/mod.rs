//! Outcome categories, weight tables, balance data and the sampler.
//!
//! Every random decision in the engine is a draw from a `WeightTable`
//! through `weighted_choice`.

pub mod category;
pub mod sampler;
pub mod table;
pub mod tables;

pub use category::{Category, OutcomeCategory, PitchResult, PitchType, SwingOutcome, TakeOutcome};
pub use sampler::weighted_choice;
pub use table::WeightTable;
pub use tables::OutcomeTables;
