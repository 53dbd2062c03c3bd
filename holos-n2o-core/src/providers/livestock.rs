//! Livestock result services
//!
//! Herd and manure-storage models live outside this crate. They are reached
//! through two capabilities: an [`AnimalResultsProvider`] that returns every
//! livestock component's daily results for a farm, and one
//! [`ManureResultService`] per [`ComponentCategory`] that turns daily records
//! into land-application emissions per field-year.

use crate::animals::{
    AnimalComponentEmissionsResults, AnimalType, ComponentCategory, GroupEmissionsByDay,
};
use crate::errors::N2OResult;
use crate::farm::Farm;
use crate::land_application::LandApplicationEmissionResult;
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Farm-wide livestock results
pub trait AnimalResultsProvider: Debug + Send + Sync {
    fn animal_results(&self, farm: &Farm) -> N2OResult<Vec<AnimalComponentEmissionsResults>>;
}

/// Species-specific calculation of emissions from land-applied manure
pub trait ManureResultService: Debug + Send + Sync {
    /// Ammonia and indirect N2O from manure spread on the farm's fields,
    /// one result per field-year that received manure of `animal_type`
    fn ammonia_emissions_from_land_applied_manure(
        &self,
        farm: &Farm,
        daily_emissions: &[GroupEmissionsByDay],
        category: ComponentCategory,
        animal_type: AnimalType,
    ) -> N2OResult<Vec<LandApplicationEmissionResult>>;
}

/// Manure result services keyed by livestock category
#[derive(Debug, Clone, Default)]
pub struct ManureResultServices {
    services: BTreeMap<ComponentCategory, Arc<dyn ManureResultService>>,
}

impl ManureResultServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the service for a category
    pub fn insert(&mut self, category: ComponentCategory, service: Arc<dyn ManureResultService>) {
        self.services.insert(category, service);
    }

    /// Register one service for every livestock category
    pub fn uniform(service: Arc<dyn ManureResultService>) -> Self {
        let mut services = Self::new();
        for category in ComponentCategory::LIVESTOCK {
            services.insert(category, service.clone());
        }
        services
    }

    pub fn get(&self, category: ComponentCategory) -> Option<&Arc<dyn ManureResultService>> {
        self.services.get(&category)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct NoEmissions;

    impl ManureResultService for NoEmissions {
        fn ammonia_emissions_from_land_applied_manure(
            &self,
            _farm: &Farm,
            _daily_emissions: &[GroupEmissionsByDay],
            _category: ComponentCategory,
            _animal_type: AnimalType,
        ) -> N2OResult<Vec<LandApplicationEmissionResult>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_uniform_registers_every_category() {
        let services = ManureResultServices::uniform(Arc::new(NoEmissions));
        assert_eq!(services.len(), 6);
        for category in ComponentCategory::LIVESTOCK {
            assert!(services.get(category).is_some());
        }
    }

    #[test]
    fn test_insert_replaces_single_category() {
        let mut services = ManureResultServices::new();
        assert!(services.is_empty());
        services.insert(ComponentCategory::Sheep, Arc::new(NoEmissions));
        services.insert(ComponentCategory::Sheep, Arc::new(NoEmissions));

        assert_eq!(services.len(), 1);
        assert!(services.get(ComponentCategory::Dairy).is_none());
    }
}
