//! Soil N2O emission-factor modifiers
//!
//! The modifiers scale the ecodistrict base factor for cropping system,
//! tillage practice, nitrogen source and soil texture. [`TableEmissionFactors`]
//! is a table-backed provider whose rows are normally loaded from TOML:
//!
//! ```toml
//! [[cropping_system]]
//! cropping_system = "Annual"
//! factor = 1.0
//!
//! [[tillage]]
//! region = "WesternCanada"
//! tillage_type = "NoTill"
//! factor = 0.7
//! ```

use crate::crop::{CropType, CropViewItem, CroppingSystem, TillageType};
use crate::errors::{N2OError, N2OResult};
use crate::farm::{Region, SoilTexture};
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Source of the nitrogen an emission factor applies to
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NitrogenSourceType {
    SyntheticNitrogen,
    OrganicNitrogen,
    CropResidueNitrogen,
}

/// Lookup of the dimensionless soil N2O modifiers
///
/// Implementations must be read-only after construction. A missing entry is
/// reported as [`N2OError::MissingLookupEntry`], never as a silent default.
#[typetag::serde]
pub trait SoilN2OEmissionFactors: Debug + Send + Sync {
    /// Cropping system modifier (RF_CS)
    fn factor_for_cropping_system(&self, crop_type: CropType) -> N2OResult<FloatValue>;

    /// Tillage modifier (RF_TILL)
    fn factor_for_tillage_practice(
        &self,
        region: Region,
        field_year: &CropViewItem,
    ) -> N2OResult<FloatValue>;

    /// Nitrogen source modifier (RF_NS)
    fn factor_for_nitrogen_source(
        &self,
        nitrogen_source_type: NitrogenSourceType,
        field_year: &CropViewItem,
    ) -> N2OResult<FloatValue>;

    /// Soil texture modifier (RF_TX)
    fn factor_for_soil_texture(
        &self,
        soil_texture: SoilTexture,
        region: Region,
    ) -> N2OResult<FloatValue>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CroppingSystemFactor {
    pub cropping_system: CroppingSystem,
    pub factor: FloatValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TillageFactor {
    pub region: Region,
    pub tillage_type: TillageType,
    pub factor: FloatValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NitrogenSourceFactor {
    pub nitrogen_source_type: NitrogenSourceType,
    pub factor: FloatValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilTextureFactor {
    pub region: Region,
    pub soil_texture: SoilTexture,
    pub factor: FloatValue,
}

/// Table-backed soil N2O modifiers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableEmissionFactors {
    #[serde(default)]
    pub cropping_system: Vec<CroppingSystemFactor>,
    #[serde(default)]
    pub tillage: Vec<TillageFactor>,
    #[serde(default)]
    pub nitrogen_source: Vec<NitrogenSourceFactor>,
    #[serde(default)]
    pub soil_texture: Vec<SoilTextureFactor>,
}

impl TableEmissionFactors {
    /// Parse a table from a TOML document
    pub fn from_toml_str(document: &str) -> N2OResult<Self> {
        toml::from_str(document).map_err(|e| N2OError::Configuration(e.to_string()))
    }
}

#[typetag::serde]
impl SoilN2OEmissionFactors for TableEmissionFactors {
    fn factor_for_cropping_system(&self, crop_type: CropType) -> N2OResult<FloatValue> {
        let cropping_system = crop_type.cropping_system();
        self.cropping_system
            .iter()
            .find(|row| row.cropping_system == cropping_system)
            .map(|row| row.factor)
            .ok_or_else(|| N2OError::MissingLookupEntry {
                table: "cropping system modifiers",
                key: format!("{:?} ({:?})", cropping_system, crop_type),
            })
    }

    fn factor_for_tillage_practice(
        &self,
        region: Region,
        field_year: &CropViewItem,
    ) -> N2OResult<FloatValue> {
        let tillage_type = field_year.tillage_type;
        self.tillage
            .iter()
            .find(|row| row.region == region && row.tillage_type == tillage_type)
            .map(|row| row.factor)
            .ok_or_else(|| N2OError::MissingLookupEntry {
                table: "tillage modifiers",
                key: format!("{:?}/{:?}", region, tillage_type),
            })
    }

    fn factor_for_nitrogen_source(
        &self,
        nitrogen_source_type: NitrogenSourceType,
        _field_year: &CropViewItem,
    ) -> N2OResult<FloatValue> {
        self.nitrogen_source
            .iter()
            .find(|row| row.nitrogen_source_type == nitrogen_source_type)
            .map(|row| row.factor)
            .ok_or_else(|| N2OError::MissingLookupEntry {
                table: "nitrogen source modifiers",
                key: format!("{:?}", nitrogen_source_type),
            })
    }

    fn factor_for_soil_texture(
        &self,
        soil_texture: SoilTexture,
        region: Region,
    ) -> N2OResult<FloatValue> {
        self.soil_texture
            .iter()
            .find(|row| row.region == region && row.soil_texture == soil_texture)
            .map(|row| row.factor)
            .ok_or_else(|| N2OError::MissingLookupEntry {
                table: "soil texture modifiers",
                key: format!("{:?}/{:?}", region, soil_texture),
            })
    }
}
