//! Soil nitrous oxide (N2O) emission calculations
//!
//! The [`nitrous_oxide::NitrousOxideCalculator`] implements the
//! ecodistrict-specific soil N2O methodology for a single year. Parameters
//! default to the published constants and can be overridden from TOML.

pub mod nitrous_oxide;
pub mod parameters;
