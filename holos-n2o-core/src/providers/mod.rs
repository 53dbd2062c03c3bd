//! Providers for the external collaborators of the emission calculations
//!
//! Lookup tables are configuration and can be serialised; livestock services
//! are runtime collaborators and are registered in code.

mod ecodistrict;
mod livestock;
mod soil;

pub use ecodistrict::{EcodistrictDefaults, EcodistrictEntry, EcodistrictTable};
pub use livestock::{AnimalResultsProvider, ManureResultService, ManureResultServices};
pub use soil::{
    CroppingSystemFactor, NitrogenSourceFactor, NitrogenSourceType, SoilN2OEmissionFactors,
    SoilTextureFactor, TableEmissionFactors, TillageFactor,
};
