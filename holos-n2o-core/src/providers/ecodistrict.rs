//! Ecodistrict default values

use crate::errors::{N2OError, N2OResult};
use crate::farm::Province;
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Lookup of per-ecodistrict landscape defaults
#[typetag::serde]
pub trait EcodistrictDefaults: Debug + Send + Sync {
    /// Fraction of land occupied by lower portions of the landscape
    /// (Rochette et al. 2008)
    fn fraction_of_land_occupied_by_lower_portions_of_landscape(
        &self,
        ecodistrict_id: u32,
        province: Province,
    ) -> N2OResult<FloatValue>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcodistrictEntry {
    pub ecodistrict_id: u32,
    pub province: Province,
    /// unit: fraction
    pub fraction_of_land_occupied_by_lower_portions_of_landscape: FloatValue,
}

/// Table-backed ecodistrict defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EcodistrictTable {
    #[serde(default)]
    pub ecodistricts: Vec<EcodistrictEntry>,
}

impl EcodistrictTable {
    pub fn new(ecodistricts: Vec<EcodistrictEntry>) -> Self {
        Self { ecodistricts }
    }

    /// Parse a table from a TOML document with `[[ecodistricts]]` rows
    pub fn from_toml_str(document: &str) -> N2OResult<Self> {
        toml::from_str(document).map_err(|e| N2OError::Configuration(e.to_string()))
    }
}

#[typetag::serde]
impl EcodistrictDefaults for EcodistrictTable {
    fn fraction_of_land_occupied_by_lower_portions_of_landscape(
        &self,
        ecodistrict_id: u32,
        province: Province,
    ) -> N2OResult<FloatValue> {
        self.ecodistricts
            .iter()
            .find(|entry| entry.ecodistrict_id == ecodistrict_id && entry.province == province)
            .map(|entry| entry.fraction_of_land_occupied_by_lower_portions_of_landscape)
            .ok_or_else(|| N2OError::MissingLookupEntry {
                table: "ecodistrict defaults",
                key: format!("ecodistrict {} ({:?})", ecodistrict_id, province),
            })
    }
}
