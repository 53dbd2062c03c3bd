//! Farm-level soil nitrous oxide (N2O) emissions
//!
//! Re-exports the data model from `holos-n2o-core` and the calculator from
//! `holos-n2o-components`.
//!
//! ```
//! use holos_n2o::weighted::{weighted_average, WeightedAverageInput};
//!
//! let factor = weighted_average([
//!     WeightedAverageInput::new(0.01, 30.0),
//!     WeightedAverageInput::new(0.02, 10.0),
//! ])
//! .unwrap();
//! assert!((factor - 0.0125).abs() < 1e-12);
//! ```

pub use holos_n2o_components::nitrous_oxide::{
    FertilizerDemand, FieldN2OEmissions, FieldNitrogenInputs, ManureEmissionsCache,
    MoistureRegime, NitrousOxideCalculator, NitrousOxideCalculatorBuilder,
};
pub use holos_n2o_components::parameters::NitrousOxideParameters;
pub use holos_n2o_core::errors::{N2OError, N2OResult};
pub use holos_n2o_core::{animals, crop, farm, land_application, providers, weighted};
pub use holos_n2o_core::FloatValue;
