//! Calculator parameters
//!
//! Every parameter struct provides defaults equal to the published
//! methodology constants.

mod nitrous_oxide;

pub use nitrous_oxide::NitrousOxideParameters;
