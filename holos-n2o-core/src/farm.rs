//! Farm-level inputs shared by every field on the farm
//!
//! A [`Farm`] is configured once before a calculation pass and is treated as
//! immutable while emissions are calculated. It carries the default soil
//! description of the farm's ecodistrict, the growing-season climate normals
//! and the full history of field-year records.

use crate::crop::{CropViewItem, FieldId};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Canadian province in which a farm is located
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Province {
    Alberta,
    BritishColumbia,
    Saskatchewan,
    Manitoba,
    Ontario,
    Quebec,
    NewBrunswick,
    NovaScotia,
    PrinceEdwardIsland,
    Newfoundland,
}

impl Province {
    /// The emission-factor region the province belongs to
    pub fn region(&self) -> Region {
        match self {
            Province::Alberta
            | Province::BritishColumbia
            | Province::Saskatchewan
            | Province::Manitoba => Region::WesternCanada,
            Province::Ontario
            | Province::Quebec
            | Province::NewBrunswick
            | Province::NovaScotia
            | Province::PrinceEdwardIsland
            | Province::Newfoundland => Region::EasternCanada,
        }
    }
}

/// Region used to key the soil N2O modifier tables
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    WesternCanada,
    EasternCanada,
}

/// Dominant soil texture of an ecodistrict
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoilTexture {
    Fine,
    Medium,
    Coarse,
}

/// Default soil description for the farm's ecodistrict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilData {
    /// Ecodistrict identifier
    pub ecodistrict_id: u32,
    pub province: Province,
    pub soil_texture: SoilTexture,
    /// Soil pH
    /// unit: dimensionless
    pub soil_ph: FloatValue,
    /// Cation-exchange capacity
    /// unit: cmol(+) kg^-1
    pub soil_cec: FloatValue,
}

/// Growing-season (May - October) climate normals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateData {
    /// unit: mm
    pub growing_season_precipitation: FloatValue,
    /// Potential evapotranspiration
    /// unit: mm
    pub growing_season_evapotranspiration: FloatValue,
}

/// A farm and the history of all of its fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: u32,
    pub name: String,
    pub default_soil_data: SoilData,
    pub climate_data: ClimateData,
    /// One record per field per year
    #[serde(default)]
    pub crop_view_items: Vec<CropViewItem>,
}

impl Farm {
    /// Region derived from the farm's province
    pub fn region(&self) -> Region {
        self.default_soil_data.province.region()
    }

    /// All field-year records for a single year
    pub fn field_years_in(&self, year: i32) -> impl Iterator<Item = &CropViewItem> + '_ {
        self.crop_view_items
            .iter()
            .filter(move |item| item.year == year)
    }

    /// The record for one field in one year, if present
    pub fn field_year(&self, field_id: FieldId, year: i32) -> Option<&CropViewItem> {
        self.crop_view_items
            .iter()
            .find(|item| item.field_id == field_id && item.year == year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prairie_provinces_are_western() {
        for province in [
            Province::Alberta,
            Province::BritishColumbia,
            Province::Saskatchewan,
            Province::Manitoba,
        ] {
            assert_eq!(province.region(), Region::WesternCanada);
        }
    }

    #[test]
    fn test_central_and_atlantic_provinces_are_eastern() {
        for province in [
            Province::Ontario,
            Province::Quebec,
            Province::NewBrunswick,
            Province::NovaScotia,
            Province::PrinceEdwardIsland,
            Province::Newfoundland,
        ] {
            assert_eq!(province.region(), Region::EasternCanada);
        }
    }
}
