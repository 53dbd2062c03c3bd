//! Residue nitrogen and fertilizer demand
//!
//! Carbon inputs to each plant pool are converted back to biomass and then to
//! nitrogen using the pool's nitrogen concentration:
//!
//! $$N_{pool} = \frac{C_{pool}}{0.45} \cdot [N]_{pool}$$
//!
//! The synthetic fertilizer rate is back-calculated from plant demand:
//!
//! $$N_{fert} = \max\left(0, \frac{N_{plant} (1 - f_{fix}) - N_{soil} - N_{dep}}{E}\right)$$
//!
//! where $f_{fix}$ only applies to nitrogen-fixing crops.

use super::NitrousOxideCalculator;
use holos_n2o_core::errors::{N2OError, N2OResult};
use holos_n2o_core::FloatValue;
use serde::{Deserialize, Serialize};

/// Inputs to the fertilizer demand mass balance
///
/// Nitrogen quantities are in kg N ha^-1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FertilizerDemand {
    pub grain_nitrogen: FloatValue,
    pub straw_nitrogen: FloatValue,
    pub root_nitrogen: FloatValue,
    pub extraroot_nitrogen: FloatValue,
    /// unit: fraction
    pub fertilizer_efficiency_fraction: FloatValue,
    pub soil_test_nitrogen: FloatValue,
    pub is_nitrogen_fixing_crop: bool,
    /// Share of plant nitrogen supplied by biological fixation
    /// unit: fraction
    pub nitrogen_fixation: FloatValue,
    pub atmospheric_nitrogen_deposition: FloatValue,
}

impl FertilizerDemand {
    pub fn total_plant_nitrogen(&self) -> FloatValue {
        self.grain_nitrogen + self.straw_nitrogen + self.root_nitrogen + self.extraroot_nitrogen
    }
}

impl NitrousOxideCalculator {
    fn nitrogen_from_carbon_input(
        &self,
        carbon_input: FloatValue,
        nitrogen_concentration: FloatValue,
    ) -> FloatValue {
        (carbon_input / self.parameters.carbon_concentration) * nitrogen_concentration
    }

    /// Equation 2.5.2-10
    pub fn grain_nitrogen(
        &self,
        carbon_input_from_product: FloatValue,
        nitrogen_concentration_in_product: FloatValue,
    ) -> FloatValue {
        self.nitrogen_from_carbon_input(carbon_input_from_product, nitrogen_concentration_in_product)
    }

    /// Equation 2.5.2-11
    pub fn straw_nitrogen(
        &self,
        carbon_input_from_straw: FloatValue,
        nitrogen_concentration_in_straw: FloatValue,
    ) -> FloatValue {
        self.nitrogen_from_carbon_input(carbon_input_from_straw, nitrogen_concentration_in_straw)
    }

    /// Equation 2.5.2-12
    pub fn root_nitrogen(
        &self,
        carbon_input_from_roots: FloatValue,
        nitrogen_concentration_in_roots: FloatValue,
    ) -> FloatValue {
        self.nitrogen_from_carbon_input(carbon_input_from_roots, nitrogen_concentration_in_roots)
    }

    /// Equation 2.5.2-13
    pub fn extraroot_nitrogen(
        &self,
        carbon_input_from_extraroots: FloatValue,
        nitrogen_concentration_in_extraroots: FloatValue,
    ) -> FloatValue {
        self.nitrogen_from_carbon_input(
            carbon_input_from_extraroots,
            nitrogen_concentration_in_extraroots,
        )
    }

    /// Equation 2.5.2-14
    pub fn above_ground_residue_nitrogen(
        &self,
        grain_nitrogen: FloatValue,
        straw_nitrogen: FloatValue,
    ) -> FloatValue {
        grain_nitrogen + straw_nitrogen
    }

    /// Below-ground residue nitrogen, spread over the stand for perennials
    ///
    /// Equation 2.5.2-15
    pub fn below_ground_residue_nitrogen(
        &self,
        root_nitrogen: FloatValue,
        extraroot_nitrogen: FloatValue,
        is_perennial: bool,
        perennial_stand_length: u32,
    ) -> N2OResult<FloatValue> {
        let total = root_nitrogen + extraroot_nitrogen;
        if !is_perennial {
            return Ok(total);
        }
        if perennial_stand_length == 0 {
            return Err(N2OError::InvalidInput(
                "perennial stand length must be at least one year".to_string(),
            ));
        }
        Ok(total / FloatValue::from(perennial_stand_length))
    }

    /// Synthetic fertilizer required to meet plant nitrogen demand
    /// (kg N ha^-1), never negative
    ///
    /// Equation 2.5.2-5
    pub fn synthetic_fertilizer_applied(&self, demand: &FertilizerDemand) -> N2OResult<FloatValue> {
        if demand.fertilizer_efficiency_fraction <= 0.0 {
            return Err(N2OError::InvalidInput(format!(
                "fertilizer efficiency must be positive, got {}",
                demand.fertilizer_efficiency_fraction
            )));
        }

        let mut plant_nitrogen = demand.total_plant_nitrogen();
        if demand.is_nitrogen_fixing_crop {
            plant_nitrogen *= 1.0 - demand.nitrogen_fixation;
        }

        let required = (plant_nitrogen
            - demand.soil_test_nitrogen
            - demand.atmospheric_nitrogen_deposition)
            / demand.fertilizer_efficiency_fraction;
        Ok(required.max(0.0))
    }
}
