//! Field-year records
//!
//! A [`CropViewItem`] describes one field in one year. The sequence of records
//! sharing a [`FieldId`] forms the history of that field; `(field_id, year)`
//! identifies a record uniquely.

use crate::animals::AnimalType;
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a field on a farm
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {}", self.0)
    }
}

/// Crop grown on a field in a given year
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropType {
    Barley,
    Wheat,
    Durum,
    Oats,
    Canola,
    Flax,
    GrainCorn,
    SilageCorn,
    Potatoes,
    Soybeans,
    DryPeas,
    Lentils,
    Chickpeas,
    DryBeans,
    SummerFallow,
    TameGrass,
    TameLegume,
    TameMixed,
    ForageForSeed,
    RangelandNative,
}

impl CropType {
    pub fn is_perennial(&self) -> bool {
        matches!(
            self,
            CropType::TameGrass
                | CropType::TameLegume
                | CropType::TameMixed
                | CropType::ForageForSeed
                | CropType::RangelandNative
        )
    }

    /// Pulses and legume forages credit part of their nitrogen demand to
    /// biological fixation
    pub fn is_nitrogen_fixing(&self) -> bool {
        matches!(
            self,
            CropType::Soybeans
                | CropType::DryPeas
                | CropType::Lentils
                | CropType::Chickpeas
                | CropType::DryBeans
                | CropType::TameLegume
        )
    }

    pub fn cropping_system(&self) -> CroppingSystem {
        if self.is_perennial() {
            CroppingSystem::Perennial
        } else {
            CroppingSystem::Annual
        }
    }
}

/// Cropping system used to select the cropping-system modifier
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CroppingSystem {
    Annual,
    Perennial,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TillageType {
    #[default]
    Intensive,
    Reduced,
    NoTill,
}

/// Synthetic nitrogen fertilizer product applied to the field
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NitrogenFertilizerType {
    #[default]
    Urea,
    UreaAmmoniumNitrate,
    AnhydrousAmmonia,
    AmmoniumNitrate,
    Other,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FertilizerApplicationMethodology {
    #[default]
    Broadcast,
    Incorporation,
    Injection,
}

/// Where applied manure came from
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManureLocationSource {
    /// Produced by livestock on this farm
    Livestock,
    /// Brought onto the farm from elsewhere
    Imported,
}

/// A single manure application made to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManureApplication {
    pub manure_source: ManureLocationSource,
    pub animal_type: AnimalType,
    /// unit: kg N ha^-1
    pub amount_of_nitrogen_applied_per_hectare: FloatValue,
}

/// One field's agronomic record for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropViewItem {
    pub field_id: FieldId,
    #[serde(default)]
    pub field_name: String,
    pub year: i32,
    pub crop_type: CropType,
    /// unit: ha
    pub area: FloatValue,
    #[serde(default)]
    pub tillage_type: TillageType,
    #[serde(default)]
    pub nitrogen_fertilizer_type: NitrogenFertilizerType,
    #[serde(default)]
    pub fertilizer_application_methodology: FertilizerApplicationMethodology,
    #[serde(default)]
    pub manure_applications: Vec<ManureApplication>,
}

impl CropViewItem {
    /// Create a record with default management and no manure applications
    pub fn new(field_id: FieldId, year: i32, crop_type: CropType, area: FloatValue) -> Self {
        Self {
            field_id,
            field_name: String::new(),
            year,
            crop_type,
            area,
            tillage_type: TillageType::default(),
            nitrogen_fertilizer_type: NitrogenFertilizerType::default(),
            fertilizer_application_methodology: FertilizerApplicationMethodology::default(),
            manure_applications: Vec::new(),
        }
    }

    /// Total nitrogen applied to the whole field from manure produced on the
    /// farm. Imported manure is excluded.
    ///
    /// unit: kg N
    pub fn total_manure_nitrogen_applied_from_livestock_in_year(&self) -> FloatValue {
        self.manure_applications
            .iter()
            .filter(|application| application.manure_source == ManureLocationSource::Livestock)
            .map(|application| application.amount_of_nitrogen_applied_per_hectare * self.area)
            .sum()
    }
}
