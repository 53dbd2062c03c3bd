//! Cache of farm-wide manure land-application results
//!
//! [`NitrousOxideCalculator::total_indirect_emissions_from_field_specific_manure_spreading`]
//! recomputes the farm-wide pass on every call. [`ManureEmissionsCache`]
//! keeps the results per (farm, year) together with a fingerprint of every
//! field-year's manure applications. An entry is reused until that
//! fingerprint changes.
//!
//! The cache does not track the calculator or its services. Clear it when
//! either is replaced.

use super::NitrousOxideCalculator;
use holos_n2o_core::crop::CropViewItem;
use holos_n2o_core::errors::N2OResult;
use holos_n2o_core::farm::Farm;
use holos_n2o_core::land_application::LandApplicationEmissionResult;
use log::{debug, warn};
use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap};
use std::hash::{Hash, Hasher};

#[derive(Debug)]
struct CacheEntry {
    fingerprint: u64,
    results: Vec<LandApplicationEmissionResult>,
}

/// Farm-wide manure results keyed by farm id and year
#[derive(Debug, Default)]
pub struct ManureEmissionsCache {
    entries: HashMap<(u32, i32), CacheEntry>,
}

/// Hash of the manure inputs of every field-year on the farm
fn manure_fingerprint(farm: &Farm) -> u64 {
    let mut hasher = DefaultHasher::new();
    for field_year in &farm.crop_view_items {
        field_year.field_id.hash(&mut hasher);
        field_year.year.hash(&mut hasher);
        field_year.area.to_bits().hash(&mut hasher);
        field_year.manure_applications.len().hash(&mut hasher);
        for application in &field_year.manure_applications {
            application.manure_source.hash(&mut hasher);
            application.animal_type.hash(&mut hasher);
            application
                .amount_of_nitrogen_applied_per_hectare
                .to_bits()
                .hash(&mut hasher);
        }
    }
    hasher.finish()
}

impl ManureEmissionsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Land-application results of one year, computing the farm-wide pass
    /// only when no valid entry exists
    pub fn results_for_year(
        &mut self,
        calculator: &NitrousOxideCalculator,
        farm: &Farm,
        year: i32,
    ) -> N2OResult<&[LandApplicationEmissionResult]> {
        let fingerprint = manure_fingerprint(farm);
        let key = (farm.id, year);

        let cached_fingerprint = self.entries.get(&key).map(|entry| entry.fingerprint);
        match cached_fingerprint {
            Some(cached) if cached == fingerprint => {}
            Some(_) => {
                warn!(
                    "Manure inputs of farm {} changed, invalidating cached results",
                    farm.id
                );
                self.invalidate(farm.id);
                self.fill(calculator, farm, year, fingerprint)?;
            }
            None => self.fill(calculator, farm, year, fingerprint)?,
        }

        Ok(self
            .entries
            .get(&key)
            .map(|entry| entry.results.as_slice())
            .unwrap_or_default())
    }

    /// Cached equivalent of
    /// [`NitrousOxideCalculator::total_indirect_emissions_from_field_specific_manure_spreading`]
    pub fn total_for_field_year(
        &mut self,
        calculator: &NitrousOxideCalculator,
        field_year: &CropViewItem,
        farm: &Farm,
    ) -> N2OResult<LandApplicationEmissionResult> {
        let results = self.results_for_year(calculator, farm, field_year.year)?;
        Ok(LandApplicationEmissionResult::total_for(
            results,
            field_year.field_id,
            field_year.year,
        ))
    }

    /// Drop every entry belonging to a farm
    pub fn invalidate(&mut self, farm_id: u32) {
        self.entries.retain(|(id, _), _| *id != farm_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached (farm, year) entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the farm-wide pass once and store an entry for every year it
    /// covers, including `year`
    fn fill(
        &mut self,
        calculator: &NitrousOxideCalculator,
        farm: &Farm,
        year: i32,
        fingerprint: u64,
    ) -> N2OResult<()> {
        let results = calculator.indirect_emission_results_from_land_applied_manure(farm)?;

        let mut years: BTreeSet<i32> = farm.crop_view_items.iter().map(|item| item.year).collect();
        years.extend(results.iter().map(|result| result.year));
        years.insert(year);

        for cached_year in years {
            let year_results = results
                .iter()
                .filter(|result| result.year == cached_year)
                .cloned()
                .collect();
            self.entries.insert(
                (farm.id, cached_year),
                CacheEntry {
                    fingerprint,
                    results: year_results,
                },
            );
        }
        debug!(
            "Cached {} manure land application results for farm {}",
            results.len(),
            farm.id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::manure::fakes::{FixedAnimalResults, SpreadEvenly};
    use super::super::test_support::{ecodistrict_table, emission_factor_table, farm};
    use super::super::NitrousOxideCalculatorBuilder;
    use super::*;
    use holos_n2o_core::animals::{AnimalType, ComponentCategory};
    use holos_n2o_core::crop::{ManureApplication, ManureLocationSource};
    use holos_n2o_core::providers::ManureResultServices;
    use std::sync::Arc;

    fn setup() -> (Arc<FixedAnimalResults>, NitrousOxideCalculator) {
        let animal_results = Arc::new(FixedAnimalResults::new(
            vec![ComponentCategory::BeefProduction],
            5,
        ));
        let calculator = NitrousOxideCalculatorBuilder::new()
            .with_emission_factors(Arc::new(emission_factor_table()))
            .with_ecodistrict_defaults(Arc::new(ecodistrict_table()))
            .with_animal_results(animal_results.clone())
            .with_manure_services(ManureResultServices::uniform(Arc::new(SpreadEvenly)))
            .build()
            .unwrap();
        (animal_results, calculator)
    }

    #[test]
    fn test_single_farm_wide_pass_for_many_field_years() {
        let (animal_results, calculator) = setup();
        let farm = farm();
        let mut cache = ManureEmissionsCache::new();

        for field_year in &farm.crop_view_items {
            let cached = cache
                .total_for_field_year(&calculator, field_year, &farm)
                .unwrap();
            let direct = calculator
                .total_indirect_emissions_from_field_specific_manure_spreading(field_year, &farm)
                .unwrap();
            assert_eq!(cached, direct);
        }

        // One cached pass plus one uncached pass per field-year
        assert_eq!(animal_results.calls(), 1 + farm.crop_view_items.len());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_changed_manure_inputs_invalidate() {
        let (animal_results, calculator) = setup();
        let mut farm = farm();
        let mut cache = ManureEmissionsCache::new();

        cache.results_for_year(&calculator, &farm, 2020).unwrap();
        cache.results_for_year(&calculator, &farm, 2020).unwrap();
        assert_eq!(animal_results.calls(), 1);

        farm.crop_view_items[0]
            .manure_applications
            .push(ManureApplication {
                manure_source: ManureLocationSource::Livestock,
                animal_type: AnimalType::Beef,
                amount_of_nitrogen_applied_per_hectare: 20.0,
            });
        cache.results_for_year(&calculator, &farm, 2020).unwrap();
        assert_eq!(animal_results.calls(), 2);
    }

    #[test]
    fn test_unrelated_changes_keep_entry() {
        let (animal_results, calculator) = setup();
        let mut farm = farm();
        let mut cache = ManureEmissionsCache::new();

        cache.results_for_year(&calculator, &farm, 2020).unwrap();
        farm.name = "Renamed".to_string();
        farm.default_soil_data.soil_ph = 7.8;
        cache.results_for_year(&calculator, &farm, 2020).unwrap();
        assert_eq!(animal_results.calls(), 1);
    }

    #[test]
    fn test_invalidate_and_clear() {
        let (animal_results, calculator) = setup();
        let farm = farm();
        let mut cache = ManureEmissionsCache::new();

        let results = cache.results_for_year(&calculator, &farm, 2020).unwrap();
        assert_eq!(results.len(), 12);

        // A year with no field-years gets an empty entry of its own
        for _ in 0..2 {
            assert!(cache
                .results_for_year(&calculator, &farm, 2019)
                .unwrap()
                .is_empty());
        }
        assert_eq!(animal_results.calls(), 2);
        assert_eq!(cache.len(), 2);

        cache.invalidate(farm.id);
        assert!(cache.is_empty());
        cache.results_for_year(&calculator, &farm, 2020).unwrap();
        assert_eq!(animal_results.calls(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }
}
