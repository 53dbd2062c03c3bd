//! Core types for farm-level nitrous oxide (N2O) emission accounting
//!
//! This crate holds everything the emission calculations read but do not
//! compute themselves:
//!
//! - the farm, soil, climate and field-year data model ([`farm`], [`crop`])
//! - livestock results consumed by the manure calculations ([`animals`])
//! - land-application emission results ([`land_application`])
//! - the area-weighted averaging utility ([`weighted`])
//! - provider traits and table-backed implementations for lookup tables and
//!   livestock services ([`providers`])

pub mod animals;
pub mod crop;
pub mod errors;
pub mod farm;
pub mod land_application;
pub mod providers;
pub mod weighted;

/// Floating point type used for every quantity
pub type FloatValue = f64;
