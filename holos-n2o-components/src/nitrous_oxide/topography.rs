//! Topography and moisture emission factor
//!
//! Growing-season emissions scale exponentially with water input:
//!
//! $$EF_P = \exp(0.00558 \cdot P - 7.7)$$
//! $$EF_{PE} = \exp(0.00558 \cdot PE - 7.7)$$
//!
//! The ecodistrict is then classified by its moisture regime and the two
//! factors are combined with the fraction of land in lower landscape
//! positions ($f$), which stay wet in otherwise dry climates:
//!
//! | Regime    | Condition          | $EF_{Topo}$                          |
//! |-----------|--------------------|--------------------------------------|
//! | Irrigated | $P = PE$           | $EF_{PE}$                            |
//! | Humid     | $P / PE > 1$       | $EF_P$                               |
//! | Dry       | $P / PE \le 1$     | $EF_{PE} \cdot f + EF_P (1 - f)$     |
//!
//! The conditions are applied in that order and a later match overrides an
//! earlier one, so $P = PE$ is classified as dry.

use super::NitrousOxideCalculator;
use holos_n2o_core::FloatValue;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Moisture regime of an ecodistrict
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoistureRegime {
    Irrigated,
    Humid,
    Dry,
}

impl MoistureRegime {
    /// Classify growing-season precipitation against evapotranspiration
    ///
    /// Returns `None` when no regime applies, which happens for zero or
    /// non-finite inputs.
    pub fn classify(precipitation: FloatValue, evapotranspiration: FloatValue) -> Option<Self> {
        if evapotranspiration == 0.0 {
            return None;
        }

        let ratio = precipitation / evapotranspiration;
        let mut regime = None;
        if precipitation == evapotranspiration {
            regime = Some(MoistureRegime::Irrigated);
        }
        if ratio > 1.0 {
            regime = Some(MoistureRegime::Humid);
        }
        if ratio <= 1.0 {
            regime = Some(MoistureRegime::Dry);
        }
        regime
    }
}

impl NitrousOxideCalculator {
    /// Equation 2.5.1-1
    fn emission_factor_using_precipitation(&self, precipitation: FloatValue) -> FloatValue {
        (self.parameters.moisture_slope * precipitation + self.parameters.moisture_intercept).exp()
    }

    /// Equation 2.5.1-2
    fn emission_factor_using_potential_evapotranspiration(
        &self,
        evapotranspiration: FloatValue,
    ) -> FloatValue {
        (self.parameters.moisture_slope * evapotranspiration
            + self.parameters.moisture_intercept)
            .exp()
    }

    /// Emission factor driven by the larger of precipitation and potential
    /// evapotranspiration
    ///
    /// Equations 2.5.1-1 and 2.5.1-2
    pub fn ecodistrict_emission_factor(
        &self,
        precipitation: FloatValue,
        evapotranspiration: FloatValue,
    ) -> FloatValue {
        if precipitation > evapotranspiration {
            self.emission_factor_using_precipitation(precipitation)
        } else {
            self.emission_factor_using_potential_evapotranspiration(evapotranspiration)
        }
    }

    /// Topography emission factor ($EF_{Topo}$)
    ///
    /// Equations 2.5.1-3 to 2.5.1-5
    ///
    /// # Arguments
    ///
    /// * `fraction_of_land_in_lower_landscape` - fraction of the ecodistrict
    ///   occupied by lower portions of the landscape
    /// * `precipitation` - growing-season precipitation (mm)
    /// * `evapotranspiration` - growing-season potential evapotranspiration (mm)
    pub fn topography_emissions(
        &self,
        fraction_of_land_in_lower_landscape: FloatValue,
        precipitation: FloatValue,
        evapotranspiration: FloatValue,
    ) -> FloatValue {
        if evapotranspiration == 0.0 {
            warn!(
                "Growing season evapotranspiration is zero (precipitation {}), topography emission factor set to 0",
                precipitation
            );
            return 0.0;
        }

        let emissions = match MoistureRegime::classify(precipitation, evapotranspiration) {
            Some(MoistureRegime::Irrigated) => {
                self.emission_factor_using_potential_evapotranspiration(evapotranspiration)
            }
            Some(MoistureRegime::Humid) => {
                self.ecodistrict_emission_factor(precipitation, evapotranspiration)
            }
            Some(MoistureRegime::Dry) => {
                let fraction = fraction_of_land_in_lower_landscape;
                self.emission_factor_using_potential_evapotranspiration(evapotranspiration)
                    * fraction
                    + self.emission_factor_using_precipitation(precipitation) * (1.0 - fraction)
            }
            None => 0.0,
        };

        debug!(
            "Topography emission factor {} (P = {}, PE = {}, f = {})",
            emissions, precipitation, evapotranspiration, fraction_of_land_in_lower_landscape
        );
        emissions
    }
}
