//! Soil N2O Parameters
//!
//! Scalar constants of the ecodistrict-specific soil N2O methodology.
//!
//! # Reference
//!
//! Rochette et al. (2008) topography/moisture emission factor, the
//! Liang et al. (2020) regional modifiers, Bouwman et al. (2002) volatilization
//! coefficients, and IPCC (2006) indirect emission factors.

use holos_n2o_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters for the soil N2O calculations
///
/// # Topography emission factor
///
/// Both single-variable emission factors share one exponential form:
///
/// $$EF = \exp(a \cdot x + b)$$
///
/// where $x$ is either growing-season precipitation or potential
/// evapotranspiration (mm).
///
/// # Leaching
///
/// $$Frac_{leach} = \mathrm{clamp}(s \cdot P/PE - c, min, max)$$
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NitrousOxideParameters {
    /// Slope of the moisture-driven exponential emission factor (a)
    /// unit: mm^-1
    /// default: 0.00558
    pub moisture_slope: FloatValue,

    /// Intercept of the moisture-driven exponential emission factor (b)
    /// unit: dimensionless
    /// default: -7.7
    pub moisture_intercept: FloatValue,

    /// Fraction of annual emissions occurring in the growing season; the
    /// winter correction is its reciprocal
    /// unit: fraction
    /// default: 0.645
    pub growing_season_emission_fraction: FloatValue,

    /// Carbon concentration of plant dry matter, used to convert carbon inputs
    /// back to biomass
    /// unit: kg C (kg DM)^-1
    /// default: 0.45
    pub carbon_concentration: FloatValue,

    /// Slope of the leaching fraction against P/PE (s)
    /// unit: dimensionless
    /// default: 0.3247
    pub leaching_slope: FloatValue,

    /// Offset subtracted in the leaching fraction (c)
    /// unit: dimensionless
    /// default: 0.0247
    pub leaching_offset: FloatValue,

    /// Lower bound of the leaching fraction
    /// unit: fraction
    /// default: 0.05
    pub minimum_leaching_fraction: FloatValue,

    /// Upper bound of the leaching fraction
    /// unit: fraction
    /// default: 0.3
    pub maximum_leaching_fraction: FloatValue,

    /// Emission factor for volatilized nitrogen redeposited on soils
    /// unit: kg N2O-N (kg N)^-1
    /// default: 0.01
    pub volatilization_emission_factor: FloatValue,

    /// Emission factor for leached and runoff nitrogen
    /// unit: kg N2O-N (kg N)^-1
    /// default: 0.011
    pub leaching_emission_factor: FloatValue,

    /// Mass ratio converting N2O-N to N2O (44/28)
    /// unit: kg N2O (kg N2O-N)^-1
    pub n2on_to_n2o: FloatValue,
}

impl NitrousOxideParameters {
    /// Correction for emissions outside the growing season
    pub fn winter_correction(&self) -> FloatValue {
        1.0 / self.growing_season_emission_fraction
    }
}

impl Default for NitrousOxideParameters {
    fn default() -> Self {
        Self {
            moisture_slope: 0.00558,
            moisture_intercept: -7.7,
            growing_season_emission_fraction: 0.645,
            carbon_concentration: 0.45,
            leaching_slope: 0.3247,
            leaching_offset: 0.0247,
            minimum_leaching_fraction: 0.05,
            maximum_leaching_fraction: 0.3,
            volatilization_emission_factor: 0.01,
            leaching_emission_factor: 0.011,
            n2on_to_n2o: 44.0 / 28.0,
        }
    }
}
