//! Indirect emissions from land-applied manure
//!
//! Livestock categories are visited in [`ComponentCategory::LIVESTOCK`] order
//! and each category's daily records are handed to its registered
//! [`ManureResultService`](holos_n2o_core::providers::ManureResultService).
//! The per-category result lists are concatenated in that order.

use super::NitrousOxideCalculator;
use holos_n2o_core::animals::{ComponentCategory, GroupEmissionsByDay};
use holos_n2o_core::crop::CropViewItem;
use holos_n2o_core::errors::{N2OError, N2OResult};
use holos_n2o_core::farm::Farm;
use holos_n2o_core::land_application::LandApplicationEmissionResult;
use log::trace;

impl NitrousOxideCalculator {
    /// Land-application emission results for every field-year on the farm
    pub fn indirect_emission_results_from_land_applied_manure(
        &self,
        farm: &Farm,
    ) -> N2OResult<Vec<LandApplicationEmissionResult>> {
        let provider = self
            .livestock
            .animal_results
            .as_ref()
            .ok_or(N2OError::MissingProvider("animal results provider"))?;
        let animal_results = provider.animal_results(farm)?;

        let mut results = Vec::new();
        for category in ComponentCategory::LIVESTOCK {
            let daily_emissions: Vec<GroupEmissionsByDay> = animal_results
                .iter()
                .filter(|result| result.component.category == category)
                .flat_map(|result| result.daily_emissions())
                .cloned()
                .collect();

            match self.livestock.manure_services.get(category) {
                Some(service) => {
                    let category_results = service.ammonia_emissions_from_land_applied_manure(
                        farm,
                        &daily_emissions,
                        category,
                        category.animal_type(),
                    )?;
                    trace!(
                        "{:?}: {} daily records, {} land application results",
                        category,
                        daily_emissions.len(),
                        category_results.len()
                    );
                    results.extend(category_results);
                }
                None if daily_emissions.is_empty() => {
                    trace!("{:?}: no daily records and no service registered", category);
                }
                None => return Err(N2OError::MissingManureService(category)),
            }
        }
        Ok(results)
    }

    /// Land-application emissions summed over every result for one field-year
    ///
    /// Runs the whole farm-wide calculation on each call. Use
    /// [`ManureEmissionsCache`](super::ManureEmissionsCache) when totals are
    /// needed for many field-years.
    pub fn total_indirect_emissions_from_field_specific_manure_spreading(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
    ) -> N2OResult<LandApplicationEmissionResult> {
        let results = self.indirect_emission_results_from_land_applied_manure(farm)?;
        Ok(LandApplicationEmissionResult::total_for(
            &results,
            field_year.field_id,
            field_year.year,
        ))
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use holos_n2o_core::animals::{
        AnimalComponent, AnimalComponentEmissionsResults, AnimalGroupEmissionResults, AnimalType,
        ComponentCategory, GroupEmissionsByDay,
    };
    use holos_n2o_core::errors::N2OResult;
    use holos_n2o_core::farm::Farm;
    use holos_n2o_core::land_application::LandApplicationEmissionResult;
    use holos_n2o_core::providers::{AnimalResultsProvider, ManureResultService};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// One component per listed category, each with `days` daily records
    #[derive(Debug)]
    pub(crate) struct FixedAnimalResults {
        pub(crate) categories: Vec<ComponentCategory>,
        pub(crate) days: u16,
        pub(crate) calls: AtomicUsize,
    }

    impl FixedAnimalResults {
        pub(crate) fn new(categories: Vec<ComponentCategory>, days: u16) -> Self {
            Self {
                categories,
                days,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AnimalResultsProvider for FixedAnimalResults {
        fn animal_results(&self, _farm: &Farm) -> N2OResult<Vec<AnimalComponentEmissionsResults>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .categories
                .iter()
                .map(|category| AnimalComponentEmissionsResults {
                    component: AnimalComponent {
                        name: format!("{:?} herd", category),
                        category: *category,
                    },
                    groups: vec![AnimalGroupEmissionResults {
                        group_name: "Group".to_string(),
                        daily_emissions: (1..=self.days)
                            .map(|julian_day| GroupEmissionsByDay {
                                year: 2020,
                                julian_day,
                                nitrogen_available_for_land_application: 1.0,
                                ..Default::default()
                            })
                            .collect(),
                    }],
                })
                .collect())
        }
    }

    /// Emits one result per field-year in 2020, carrying the nitrogen in the
    /// daily records as the applied amount and the day count as the
    /// volatilized N2O-N
    #[derive(Debug)]
    pub(crate) struct SpreadEvenly;

    impl ManureResultService for SpreadEvenly {
        fn ammonia_emissions_from_land_applied_manure(
            &self,
            farm: &Farm,
            daily_emissions: &[GroupEmissionsByDay],
            category: ComponentCategory,
            animal_type: AnimalType,
        ) -> N2OResult<Vec<LandApplicationEmissionResult>> {
            assert_eq!(category.animal_type(), animal_type);
            let nitrogen: f64 = daily_emissions
                .iter()
                .map(|day| day.nitrogen_available_for_land_application)
                .sum();
            Ok(farm
                .field_years_in(2020)
                .map(|field_year| {
                    let mut result =
                        LandApplicationEmissionResult::new(field_year.field_id, field_year.year);
                    result
                        .emissions
                        .actual_amount_of_nitrogen_applied_from_land_application = nitrogen;
                    result.emissions.total_n2on_from_manure_volatilized =
                        daily_emissions.len() as f64;
                    result
                })
                .collect())
        }
    }
}
