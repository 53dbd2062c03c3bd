//! Base ecodistrict emission factor
//!
//! The topography factor is adjusted for soil texture and corrected for
//! emissions outside the growing season:
//!
//! $$EF_{CT} = EF_{Topo} \cdot RF_{TX} \cdot \frac{1}{0.645}$$

use super::NitrousOxideCalculator;
use holos_n2o_core::errors::N2OResult;
use holos_n2o_core::farm::{Farm, Region, SoilTexture};
use holos_n2o_core::FloatValue;
use log::debug;

impl NitrousOxideCalculator {
    /// Soil texture modifier ($RF_{TX}$)
    ///
    /// Equation 2.5.1-6
    pub fn modifier_based_on_texture(
        &self,
        soil_texture: SoilTexture,
        region: Region,
        fraction_of_texture: FloatValue,
    ) -> N2OResult<FloatValue> {
        let factor = self
            .emission_factors
            .factor_for_soil_texture(soil_texture, region)?;
        Ok(factor * fraction_of_texture)
    }

    /// Equation 2.5.1-7
    pub fn base_ecodistrict_value(
        &self,
        topography_emission: FloatValue,
        soil_texture: SoilTexture,
        region: Region,
    ) -> N2OResult<FloatValue> {
        // A field is treated as a single soil texture
        let texture_modifier = self.modifier_based_on_texture(soil_texture, region, 1.0)?;
        Ok(topography_emission * texture_modifier * self.parameters.winter_correction())
    }

    /// Base ecodistrict emission factor ($EF_{CT}$) for a farm's default
    /// soil and climate
    pub fn base_ecodistrict_factor(&self, farm: &Farm) -> N2OResult<FloatValue> {
        let soil = &farm.default_soil_data;
        let climate = &farm.climate_data;

        let fraction_of_land_in_lower_landscape = self
            .ecodistrict_defaults
            .fraction_of_land_occupied_by_lower_portions_of_landscape(
                soil.ecodistrict_id,
                soil.province,
            )?;
        let topography_emission = self.topography_emissions(
            fraction_of_land_in_lower_landscape,
            climate.growing_season_precipitation,
            climate.growing_season_evapotranspiration,
        );

        let base = self.base_ecodistrict_value(
            topography_emission,
            soil.soil_texture,
            soil.province.region(),
        )?;
        debug!(
            "Base ecodistrict emission factor {} for farm {} (ecodistrict {})",
            base, farm.id, soil.ecodistrict_id
        );
        Ok(base)
    }
}
