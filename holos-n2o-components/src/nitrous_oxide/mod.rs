//! Single-year soil nitrous oxide calculator
//!
//! Turns farm, field, climate and soil inputs into emission factors and
//! N2O-N quantities for one year. The calculation cascades as follows:
//!
//! 1. Growing-season precipitation ($P$) and potential evapotranspiration
//!    ($PE$) give a topography/moisture emission factor $EF_{Topo}$
//!    (Equations 2.5.1-1 to 2.5.1-5).
//! 2. A soil texture modifier and a winter correction turn it into the base
//!    ecodistrict factor $EF_{CT}$ (Equations 2.5.1-6 and 2.5.1-7).
//! 3. Cropping system, tillage and nitrogen source modifiers give the
//!    source-specific factor (Equation 2.5.1-8):
//!    $$EF = EF_{CT} \cdot RF_{CS} \cdot RF_{TILL} \cdot RF_{NS}$$
//! 4. Factors are multiplied by nitrogen quantities from residues, synthetic
//!    fertilizer and manure, and combined across fields by area.
//!
//! The calculator holds only read-only providers. Every method is a pure
//! function of its arguments and those providers, so one calculator can be
//! shared between threads.

mod cache;
mod ecodistrict;
mod emission_factors;
mod fractions;
mod manure;
mod residue;
mod summary;
mod topography;

pub use cache::ManureEmissionsCache;
pub use residue::FertilizerDemand;
pub use summary::{FieldN2OEmissions, FieldNitrogenInputs};
pub use topography::MoistureRegime;

use crate::parameters::NitrousOxideParameters;
use holos_n2o_core::animals::ComponentCategory;
use holos_n2o_core::errors::{N2OError, N2OResult};
use holos_n2o_core::providers::{
    AnimalResultsProvider, EcodistrictDefaults, ManureResultService, ManureResultServices,
    SoilN2OEmissionFactors,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Livestock collaborators used by the manure calculations
///
/// These are runtime services and are never serialised.
#[derive(Debug, Clone, Default)]
struct LivestockServices {
    animal_results: Option<Arc<dyn AnimalResultsProvider>>,
    manure_services: ManureResultServices,
}

/// Soil N2O emission calculator for a single year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NitrousOxideCalculator {
    #[serde(default)]
    parameters: NitrousOxideParameters,
    emission_factors: Arc<dyn SoilN2OEmissionFactors>,
    ecodistrict_defaults: Arc<dyn EcodistrictDefaults>,
    #[serde(skip)]
    livestock: LivestockServices,
}

impl NitrousOxideCalculator {
    pub fn parameters(&self) -> &NitrousOxideParameters {
        &self.parameters
    }

    /// Attach the livestock services after the calculator was loaded from a
    /// configuration document
    pub fn attach_livestock_services(
        &mut self,
        animal_results: Arc<dyn AnimalResultsProvider>,
        manure_services: ManureResultServices,
    ) {
        self.livestock = LivestockServices {
            animal_results: Some(animal_results),
            manure_services,
        };
    }

    /// Load parameters and lookup tables from a TOML document
    pub fn from_toml_str(document: &str) -> N2OResult<Self> {
        let calculator: Self =
            toml::from_str(document).map_err(|e| N2OError::Configuration(e.to_string()))?;
        validate_parameters(&calculator.parameters)?;
        Ok(calculator)
    }

    /// Serialise parameters and lookup tables to TOML
    pub fn to_toml_string(&self) -> N2OResult<String> {
        toml::to_string(self).map_err(|e| N2OError::Configuration(e.to_string()))
    }
}

fn validate_parameters(parameters: &NitrousOxideParameters) -> N2OResult<()> {
    let values = [
        ("moisture_slope", parameters.moisture_slope),
        ("moisture_intercept", parameters.moisture_intercept),
        (
            "growing_season_emission_fraction",
            parameters.growing_season_emission_fraction,
        ),
        ("carbon_concentration", parameters.carbon_concentration),
        ("leaching_slope", parameters.leaching_slope),
        ("leaching_offset", parameters.leaching_offset),
        ("minimum_leaching_fraction", parameters.minimum_leaching_fraction),
        ("maximum_leaching_fraction", parameters.maximum_leaching_fraction),
        (
            "volatilization_emission_factor",
            parameters.volatilization_emission_factor,
        ),
        ("leaching_emission_factor", parameters.leaching_emission_factor),
        ("n2on_to_n2o", parameters.n2on_to_n2o),
    ];
    if let Some((name, value)) = values.iter().find(|(_, value)| !value.is_finite()) {
        return Err(N2OError::Configuration(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }

    for (name, value) in [
        (
            "growing_season_emission_fraction",
            parameters.growing_season_emission_fraction,
        ),
        ("carbon_concentration", parameters.carbon_concentration),
    ] {
        if value <= 0.0 {
            return Err(N2OError::Configuration(format!(
                "{} must be positive, got {}",
                name, value
            )));
        }
    }

    if parameters.minimum_leaching_fraction > parameters.maximum_leaching_fraction {
        return Err(N2OError::Configuration(format!(
            "leaching fraction bounds are inverted: [{}, {}]",
            parameters.minimum_leaching_fraction, parameters.maximum_leaching_fraction
        )));
    }
    Ok(())
}

/// Build a calculator from its providers.
///
/// The lookup-table providers are required. Livestock services are only needed
/// by the manure calculations and may be omitted.
#[derive(Debug, Default)]
pub struct NitrousOxideCalculatorBuilder {
    parameters: NitrousOxideParameters,
    emission_factors: Option<Arc<dyn SoilN2OEmissionFactors>>,
    ecodistrict_defaults: Option<Arc<dyn EcodistrictDefaults>>,
    animal_results: Option<Arc<dyn AnimalResultsProvider>>,
    manure_services: ManureResultServices,
}

impl NitrousOxideCalculatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(&mut self, parameters: NitrousOxideParameters) -> &mut Self {
        self.parameters = parameters;
        self
    }

    pub fn with_emission_factors(
        &mut self,
        emission_factors: Arc<dyn SoilN2OEmissionFactors>,
    ) -> &mut Self {
        self.emission_factors = Some(emission_factors);
        self
    }

    pub fn with_ecodistrict_defaults(
        &mut self,
        ecodistrict_defaults: Arc<dyn EcodistrictDefaults>,
    ) -> &mut Self {
        self.ecodistrict_defaults = Some(ecodistrict_defaults);
        self
    }

    pub fn with_animal_results(
        &mut self,
        animal_results: Arc<dyn AnimalResultsProvider>,
    ) -> &mut Self {
        self.animal_results = Some(animal_results);
        self
    }

    /// Register the manure service for one livestock category
    pub fn with_manure_service(
        &mut self,
        category: ComponentCategory,
        service: Arc<dyn ManureResultService>,
    ) -> &mut Self {
        self.manure_services.insert(category, service);
        self
    }

    pub fn with_manure_services(&mut self, manure_services: ManureResultServices) -> &mut Self {
        self.manure_services = manure_services;
        self
    }

    pub fn build(&self) -> N2OResult<NitrousOxideCalculator> {
        validate_parameters(&self.parameters)?;

        let emission_factors = self
            .emission_factors
            .clone()
            .ok_or(N2OError::MissingProvider("soil N2O emission factor table"))?;
        let ecodistrict_defaults = self
            .ecodistrict_defaults
            .clone()
            .ok_or(N2OError::MissingProvider("ecodistrict defaults table"))?;

        Ok(NitrousOxideCalculator {
            parameters: self.parameters.clone(),
            emission_factors,
            ecodistrict_defaults,
            livestock: LivestockServices {
                animal_results: self.animal_results.clone(),
                manure_services: self.manure_services.clone(),
            },
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use holos_n2o_core::crop::{CropType, CropViewItem, CroppingSystem, FieldId, TillageType};
    use holos_n2o_core::farm::{ClimateData, Farm, Province, Region, SoilData, SoilTexture};
    use holos_n2o_core::providers::{
        CroppingSystemFactor, EcodistrictEntry, EcodistrictTable, NitrogenSourceFactor,
        NitrogenSourceType, SoilTextureFactor, TableEmissionFactors, TillageFactor,
    };

    pub(crate) const LOWER_LANDSCAPE_FRACTION: f64 = 0.2;

    pub(crate) fn emission_factor_table() -> TableEmissionFactors {
        let mut tillage = Vec::new();
        for (region, reduced) in [(Region::WesternCanada, 0.7), (Region::EasternCanada, 1.1)] {
            tillage.push(TillageFactor {
                region,
                tillage_type: TillageType::Intensive,
                factor: 1.0,
            });
            for tillage_type in [TillageType::Reduced, TillageType::NoTill] {
                tillage.push(TillageFactor {
                    region,
                    tillage_type,
                    factor: reduced,
                });
            }
        }

        let mut soil_texture = Vec::new();
        for region in [Region::WesternCanada, Region::EasternCanada] {
            for (soil_texture_type, factor) in [
                (SoilTexture::Fine, 1.0),
                (SoilTexture::Medium, 0.8),
                (SoilTexture::Coarse, 0.5),
            ] {
                soil_texture.push(SoilTextureFactor {
                    region,
                    soil_texture: soil_texture_type,
                    factor,
                });
            }
        }

        TableEmissionFactors {
            cropping_system: vec![
                CroppingSystemFactor {
                    cropping_system: CroppingSystem::Annual,
                    factor: 1.0,
                },
                CroppingSystemFactor {
                    cropping_system: CroppingSystem::Perennial,
                    factor: 0.19,
                },
            ],
            tillage,
            nitrogen_source: vec![
                NitrogenSourceFactor {
                    nitrogen_source_type: NitrogenSourceType::SyntheticNitrogen,
                    factor: 1.0,
                },
                NitrogenSourceFactor {
                    nitrogen_source_type: NitrogenSourceType::OrganicNitrogen,
                    factor: 0.84,
                },
                NitrogenSourceFactor {
                    nitrogen_source_type: NitrogenSourceType::CropResidueNitrogen,
                    factor: 0.28,
                },
            ],
            soil_texture,
        }
    }

    pub(crate) fn ecodistrict_table() -> EcodistrictTable {
        EcodistrictTable::new(vec![EcodistrictEntry {
            ecodistrict_id: 851,
            province: Province::Saskatchewan,
            fraction_of_land_occupied_by_lower_portions_of_landscape: LOWER_LANDSCAPE_FRACTION,
        }])
    }

    pub(crate) fn calculator() -> NitrousOxideCalculator {
        NitrousOxideCalculatorBuilder::new()
            .with_emission_factors(Arc::new(emission_factor_table()))
            .with_ecodistrict_defaults(Arc::new(ecodistrict_table()))
            .build()
            .unwrap()
    }

    pub(crate) fn farm() -> Farm {
        Farm {
            id: 1,
            name: "Test farm".to_string(),
            default_soil_data: SoilData {
                ecodistrict_id: 851,
                province: Province::Saskatchewan,
                soil_texture: SoilTexture::Medium,
                soil_ph: 6.8,
                soil_cec: 180.0,
            },
            climate_data: ClimateData {
                growing_season_precipitation: 300.0,
                growing_season_evapotranspiration: 500.0,
            },
            crop_view_items: vec![
                CropViewItem::new(FieldId(1), 2020, CropType::Wheat, 40.0),
                CropViewItem::new(FieldId(2), 2020, CropType::TameGrass, 10.0),
            ],
        }
    }
}
