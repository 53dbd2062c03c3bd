//! Nitrogen loss fractions
//!
//! # Volatilization
//!
//! Ammonia volatilization from applied fertilizer follows the empirical model
//! of Bouwman et al. (2002), a sum of categorical coefficients:
//!
//! $$Frac_{volat} = \frac{100 \cdot \exp(c_{crop} + c_{fert} + c_{method} + c_{pH} + c_{CEC} + c_{temp})}{100}$$
//!
//! # Leaching and runoff
//!
//! $$Frac_{leach} = \mathrm{clamp}(0.3247 \cdot P/PE - 0.0247, 0.05, 0.3)$$

use super::NitrousOxideCalculator;
use holos_n2o_core::crop::{
    CropType, CropViewItem, FertilizerApplicationMethodology, NitrogenFertilizerType,
};
use holos_n2o_core::errors::{N2OError, N2OResult};
use holos_n2o_core::farm::Farm;
use holos_n2o_core::FloatValue;
use log::debug;

/// Climate (temperature) coefficient, fixed for Canadian conditions
const TEMPERATURE_COEFFICIENT: FloatValue = -0.402;

fn crop_type_coefficient(crop_type: CropType) -> FloatValue {
    if crop_type.is_perennial() {
        -0.158
    } else {
        -0.045
    }
}

fn fertilizer_type_coefficient(fertilizer_type: NitrogenFertilizerType) -> FloatValue {
    match fertilizer_type {
        NitrogenFertilizerType::Urea => 0.666,
        NitrogenFertilizerType::UreaAmmoniumNitrate => 0.282,
        NitrogenFertilizerType::AnhydrousAmmonia => -1.151,
        NitrogenFertilizerType::AmmoniumNitrate | NitrogenFertilizerType::Other => -0.238,
    }
}

fn application_method_coefficient(methodology: FertilizerApplicationMethodology) -> FloatValue {
    match methodology {
        FertilizerApplicationMethodology::Broadcast => -1.305,
        FertilizerApplicationMethodology::Incorporation
        | FertilizerApplicationMethodology::Injection => -1.895,
    }
}

fn soil_ph_coefficient(soil_ph: FloatValue) -> FloatValue {
    if soil_ph < 7.25 {
        -1.0
    } else {
        -0.608
    }
}

fn soil_cec_coefficient(soil_cec: FloatValue) -> FloatValue {
    if soil_cec < 250.0 {
        0.0507
    } else {
        0.0848
    }
}

impl NitrousOxideCalculator {
    /// Fraction of applied synthetic nitrogen lost as ammonia
    ///
    /// Equation 2.5.3-5
    pub fn fraction_of_nitrogen_lost_by_volatilization(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
    ) -> FloatValue {
        let soil = &farm.default_soil_data;
        let sum = crop_type_coefficient(field_year.crop_type)
            + fertilizer_type_coefficient(field_year.nitrogen_fertilizer_type)
            + application_method_coefficient(field_year.fertilizer_application_methodology)
            + soil_ph_coefficient(soil.soil_ph)
            + soil_cec_coefficient(soil.soil_cec)
            + TEMPERATURE_COEFFICIENT;

        // Bouwman et al. report the loss as a percentage
        let percentage = 100.0 * sum.exp();
        percentage / 100.0
    }

    /// Fraction of nitrogen lost by leaching and runoff
    ///
    /// Equation 2.5.3-1
    pub fn fraction_of_nitrogen_lost_by_leaching_and_runoff(
        &self,
        precipitation: FloatValue,
        evapotranspiration: FloatValue,
    ) -> N2OResult<FloatValue> {
        if !precipitation.is_finite() || !evapotranspiration.is_finite() {
            return Err(N2OError::InvalidInput(format!(
                "non-finite climate normals (P = {}, PE = {})",
                precipitation, evapotranspiration
            )));
        }
        if evapotranspiration <= 0.0 {
            return Err(N2OError::InvalidInput(format!(
                "evapotranspiration must be positive to compute leaching, got {}",
                evapotranspiration
            )));
        }

        let parameters = &self.parameters;
        let fraction = parameters.leaching_slope * (precipitation / evapotranspiration)
            - parameters.leaching_offset;
        let clamped = fraction
            .max(parameters.minimum_leaching_fraction)
            .min(parameters.maximum_leaching_fraction);
        debug!(
            "Leaching fraction {} (unclamped {}, P/PE = {})",
            clamped,
            fraction,
            precipitation / evapotranspiration
        );
        Ok(clamped)
    }
}
