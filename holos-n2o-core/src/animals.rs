//! Livestock emission results consumed by the manure calculations
//!
//! Herd simulation and manure storage are modelled elsewhere. This module only
//! describes the shape of their results: per-component, per-group sequences of
//! daily emission records, each component tagged with its [`ComponentCategory`].

use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Category of a livestock component on the farm
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComponentCategory {
    BeefProduction,
    Dairy,
    Poultry,
    Swine,
    Sheep,
    OtherLivestock,
}

impl ComponentCategory {
    /// Livestock categories in the order their manure results are reported
    pub const LIVESTOCK: [ComponentCategory; 6] = [
        ComponentCategory::BeefProduction,
        ComponentCategory::Dairy,
        ComponentCategory::Poultry,
        ComponentCategory::Swine,
        ComponentCategory::Sheep,
        ComponentCategory::OtherLivestock,
    ];

    /// Animal (manure) type reported for this category
    pub fn animal_type(&self) -> AnimalType {
        match self {
            ComponentCategory::BeefProduction => AnimalType::Beef,
            ComponentCategory::Dairy => AnimalType::Dairy,
            ComponentCategory::Poultry => AnimalType::Poultry,
            ComponentCategory::Swine => AnimalType::Swine,
            ComponentCategory::Sheep => AnimalType::Sheep,
            ComponentCategory::OtherLivestock => AnimalType::OtherLivestock,
        }
    }
}

/// Animal type of the manure
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimalType {
    Beef,
    Dairy,
    Poultry,
    Swine,
    Sheep,
    OtherLivestock,
}

/// Emissions and manure flows of one animal group on one day
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupEmissionsByDay {
    pub year: i32,
    /// Day of year, 1-based
    pub julian_day: u16,
    /// unit: kg N
    pub nitrogen_available_for_land_application: FloatValue,
    /// Total ammoniacal nitrogen available for land application
    /// unit: kg N
    pub tan_available_for_land_application: FloatValue,
    /// unit: kg
    pub volume_of_manure_available_for_land_application: FloatValue,
    /// unit: kg NH3-N
    pub ammonia_emissions_from_storage: FloatValue,
}

/// Results for one animal group within a component
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimalGroupEmissionResults {
    pub group_name: String,
    pub daily_emissions: Vec<GroupEmissionsByDay>,
}

/// Back-reference to the component that produced a set of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalComponent {
    pub name: String,
    pub category: ComponentCategory,
}

/// Farm-wide results for one livestock component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalComponentEmissionsResults {
    pub component: AnimalComponent,
    #[serde(default)]
    pub groups: Vec<AnimalGroupEmissionResults>,
}

impl AnimalComponentEmissionsResults {
    /// Daily records of every group of the component, in group order
    pub fn daily_emissions(&self) -> impl Iterator<Item = &GroupEmissionsByDay> + '_ {
        self.groups.iter().flat_map(|group| group.daily_emissions.iter())
    }
}
