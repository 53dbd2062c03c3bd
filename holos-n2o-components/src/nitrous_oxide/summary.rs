//! Direct and indirect N2O-N for one field-year
//!
//! Combines the emission factors with nitrogen inputs on a field:
//!
//! $$N_2O\text{-}N_{direct} = N_{syn} \cdot EF_{syn} + N_{res} \cdot EF_{res} + N_{manure} \cdot EF_{org}$$
//! $$N_2O\text{-}N_{volat} = N_{syn} \cdot Frac_{volat} \cdot EF_{volat}$$
//! $$N_2O\text{-}N_{leach} = (N_{syn} + N_{res}) \cdot Frac_{leach} \cdot EF_{leach}$$
//!
//! Indirect losses from manure are reported by the livestock manure services
//! and are not repeated here.

use super::NitrousOxideCalculator;
use holos_n2o_core::crop::{CropViewItem, FieldId};
use holos_n2o_core::errors::N2OResult;
use holos_n2o_core::farm::Farm;
use holos_n2o_core::FloatValue;
use log::debug;
use serde::{Deserialize, Serialize};

/// Nitrogen inputs of a field-year
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldNitrogenInputs {
    /// unit: kg N ha^-1
    pub synthetic_nitrogen_applied: FloatValue,
    /// unit: kg N ha^-1
    pub above_ground_residue_nitrogen: FloatValue,
    /// unit: kg N ha^-1
    pub below_ground_residue_nitrogen: FloatValue,
}

impl FieldNitrogenInputs {
    pub fn residue_nitrogen(&self) -> FloatValue {
        self.above_ground_residue_nitrogen + self.below_ground_residue_nitrogen
    }
}

/// Soil N2O-N emissions of one field-year
///
/// All quantities are whole-field totals in kg N2O-N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldN2OEmissions {
    pub field_id: FieldId,
    pub year: i32,
    pub direct_n2on_from_synthetic_nitrogen: FloatValue,
    pub direct_n2on_from_crop_residues: FloatValue,
    pub direct_n2on_from_manure: FloatValue,
    pub indirect_n2on_from_volatilization: FloatValue,
    pub indirect_n2on_from_leaching: FloatValue,
}

impl FieldN2OEmissions {
    pub fn total_direct_n2on(&self) -> FloatValue {
        self.direct_n2on_from_synthetic_nitrogen
            + self.direct_n2on_from_crop_residues
            + self.direct_n2on_from_manure
    }

    pub fn total_indirect_n2on(&self) -> FloatValue {
        self.indirect_n2on_from_volatilization + self.indirect_n2on_from_leaching
    }

    pub fn total_n2on(&self) -> FloatValue {
        self.total_direct_n2on() + self.total_indirect_n2on()
    }
}

impl NitrousOxideCalculator {
    /// Convert N2O-N to N2O
    pub fn n2o_from_n2on(&self, n2on: FloatValue) -> FloatValue {
        n2on * self.parameters.n2on_to_n2o
    }

    /// Total N2O of a field-year (kg N2O)
    pub fn total_n2o(&self, emissions: &FieldN2OEmissions) -> FloatValue {
        self.n2o_from_n2on(emissions.total_n2on())
    }

    /// Direct and indirect N2O-N of a field-year
    pub fn field_emissions(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
        inputs: &FieldNitrogenInputs,
    ) -> N2OResult<FieldN2OEmissions> {
        let climate = &farm.climate_data;
        let synthetic_nitrogen = inputs.synthetic_nitrogen_applied * field_year.area;
        let residue_nitrogen = inputs.residue_nitrogen() * field_year.area;

        let synthetic_factor = self.synthetic_nitrogen_emission_factor(field_year, farm)?;
        let residue_factor = self.crop_residue_emission_factor(field_year, farm)?;
        let direct_n2on_from_manure =
            self.direct_n2on_emissions_from_field_specific_manure_spreading(field_year, farm)?;

        let volatilization = self.fraction_of_nitrogen_lost_by_volatilization(field_year, farm);
        let leaching = self.fraction_of_nitrogen_lost_by_leaching_and_runoff(
            climate.growing_season_precipitation,
            climate.growing_season_evapotranspiration,
        )?;

        let emissions = FieldN2OEmissions {
            field_id: field_year.field_id,
            year: field_year.year,
            direct_n2on_from_synthetic_nitrogen: synthetic_nitrogen * synthetic_factor,
            direct_n2on_from_crop_residues: residue_nitrogen * residue_factor,
            direct_n2on_from_manure,
            indirect_n2on_from_volatilization: synthetic_nitrogen
                * volatilization
                * self.parameters.volatilization_emission_factor,
            indirect_n2on_from_leaching: (synthetic_nitrogen + residue_nitrogen)
                * leaching
                * self.parameters.leaching_emission_factor,
        };
        debug!(
            "Field {} in {}: {} kg N2O-N direct, {} kg N2O-N indirect",
            emissions.field_id,
            emissions.year,
            emissions.total_direct_n2on(),
            emissions.total_indirect_n2on()
        );
        Ok(emissions)
    }
}
