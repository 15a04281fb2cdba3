//! CPU decision models for the non-human side.

pub mod policy;

pub use policy::{CpuPolicy, StandardCpu};
