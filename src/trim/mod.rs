pub mod loop_classifier;
pub use loop_classifier::*;
