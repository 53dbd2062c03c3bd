//! Nitrogen-source emission factors
//!
//! The base ecodistrict factor is scaled by three multiplicative modifiers
//! (Equation 2.5.1-8):
//!
//! $$EF = EF_{CT} \cdot RF_{CS} \cdot RF_{TILL} \cdot RF_{NS}$$
//!
//! Per-field factors are combined across fields by area (Equation 4.6.1-3).

use super::NitrousOxideCalculator;
use holos_n2o_core::crop::CropViewItem;
use holos_n2o_core::errors::N2OResult;
use holos_n2o_core::farm::Farm;
use holos_n2o_core::providers::NitrogenSourceType;
use holos_n2o_core::weighted::{weighted_average, WeightedAverageInput};
use holos_n2o_core::FloatValue;
use log::debug;

impl NitrousOxideCalculator {
    /// Equation 2.5.1-8
    pub fn emission_factor(
        &self,
        base_ecodistrict_emission_factor: FloatValue,
        cropping_system_modifier: FloatValue,
        tillage_modifier: FloatValue,
        nitrogen_source_modifier: FloatValue,
    ) -> FloatValue {
        base_ecodistrict_emission_factor
            * cropping_system_modifier
            * tillage_modifier
            * nitrogen_source_modifier
    }

    fn source_emission_factor(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
        nitrogen_source_type: NitrogenSourceType,
    ) -> N2OResult<FloatValue> {
        let base = self.base_ecodistrict_factor(farm)?;
        let cropping_system_modifier = self
            .emission_factors
            .factor_for_cropping_system(field_year.crop_type)?;
        let tillage_modifier = self
            .emission_factors
            .factor_for_tillage_practice(farm.region(), field_year)?;
        let nitrogen_source_modifier = self
            .emission_factors
            .factor_for_nitrogen_source(nitrogen_source_type, field_year)?;

        let factor = self.emission_factor(
            base,
            cropping_system_modifier,
            tillage_modifier,
            nitrogen_source_modifier,
        );
        debug!(
            "{:?} emission factor {} for field {} in {} (RF_CS = {}, RF_TILL = {}, RF_NS = {})",
            nitrogen_source_type,
            factor,
            field_year.field_id,
            field_year.year,
            cropping_system_modifier,
            tillage_modifier,
            nitrogen_source_modifier
        );
        Ok(factor)
    }

    /// Emission factor for synthetic fertilizer nitrogen
    pub fn synthetic_nitrogen_emission_factor(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
    ) -> N2OResult<FloatValue> {
        self.source_emission_factor(field_year, farm, NitrogenSourceType::SyntheticNitrogen)
    }

    /// Emission factor for organic (manure) nitrogen
    ///
    /// Returns 0 when there is no field-year.
    pub fn organic_nitrogen_emission_factor(
        &self,
        field_year: Option<&CropViewItem>,
        farm: &Farm,
    ) -> N2OResult<FloatValue> {
        match field_year {
            Some(field_year) => {
                self.source_emission_factor(field_year, farm, NitrogenSourceType::OrganicNitrogen)
            }
            None => Ok(0.0),
        }
    }

    /// Emission factor for crop residue nitrogen
    pub fn crop_residue_emission_factor(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
    ) -> N2OResult<FloatValue> {
        self.source_emission_factor(field_year, farm, NitrogenSourceType::CropResidueNitrogen)
    }

    /// Direct N2O-N from manure spread on a field (kg N2O-N)
    ///
    /// Only manure from the farm's own livestock is counted; imported manure
    /// is accounted for by the farm that produced it.
    ///
    /// Equation 4.6.1-1
    pub fn direct_n2on_emissions_from_field_specific_manure_spreading(
        &self,
        field_year: &CropViewItem,
        farm: &Farm,
    ) -> N2OResult<FloatValue> {
        let manure_nitrogen = field_year.total_manure_nitrogen_applied_from_livestock_in_year();
        let emission_factor = self.organic_nitrogen_emission_factor(Some(field_year), farm)?;
        Ok(manure_nitrogen * emission_factor)
    }

    /// Area-weighted mean of (value, weight) pairs
    ///
    /// Equation 2.5.2-20
    pub fn weighted_emission_factor<I>(&self, entries: I) -> N2OResult<FloatValue>
    where
        I: IntoIterator<Item = WeightedAverageInput>,
    {
        weighted_average(entries)
    }

    /// Organic nitrogen emission factor of several field-years weighted by
    /// their area
    ///
    /// Equation 4.6.1-3
    pub fn weighted_organic_nitrogen_emission_factor<'a, I>(
        &self,
        farm: &Farm,
        field_years: I,
    ) -> N2OResult<FloatValue>
    where
        I: IntoIterator<Item = &'a CropViewItem>,
    {
        let entries = field_years
            .into_iter()
            .map(|field_year| {
                let factor = self.organic_nitrogen_emission_factor(Some(field_year), farm)?;
                Ok(WeightedAverageInput::new(factor, field_year.area))
            })
            .collect::<N2OResult<Vec<_>>>()?;

        self.weighted_emission_factor(entries)
    }

    /// N2O-N attributed to manure exported off the farm (kg N2O-N)
    ///
    /// Equation 4.6.1-6
    ///
    /// # Arguments
    ///
    /// * `total_exported_manure_nitrogen` - nitrogen in exported manure (kg N)
    /// * `field_years` - fields whose organic emission factors represent the farm
    pub fn total_emissions_from_exported_manure<'a, I>(
        &self,
        farm: &Farm,
        total_exported_manure_nitrogen: FloatValue,
        field_years: I,
    ) -> N2OResult<FloatValue>
    where
        I: IntoIterator<Item = &'a CropViewItem>,
    {
        let weighted_factor = self.weighted_organic_nitrogen_emission_factor(farm, field_years)?;
        Ok(total_exported_manure_nitrogen * weighted_factor)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{calculator, farm};
    use super::*;
    use holos_n2o_core::animals::AnimalType;
    use holos_n2o_core::crop::{
        CropType, FieldId, ManureApplication, ManureLocationSource, TillageType,
    };
    use holos_n2o_core::errors::N2OError;
    use is_close::is_close;

    #[test]
    fn test_emission_factor_product() {
        let calculator = calculator();
        assert!(is_close!(
            calculator.emission_factor(0.02, 1.1, 0.9, 1.2),
            0.02376
        ));
    }

    #[test]
    fn test_source_factors_share_base() {
        let calculator = calculator();
        let farm = farm();
        let wheat = &farm.crop_view_items[0];
        let base = calculator.base_ecodistrict_factor(&farm).unwrap();

        assert!(is_close!(
            calculator
                .synthetic_nitrogen_emission_factor(wheat, &farm)
                .unwrap(),
            base
        ));
        assert!(is_close!(
            calculator
                .organic_nitrogen_emission_factor(Some(wheat), &farm)
                .unwrap(),
            base * 0.84
        ));
        assert!(is_close!(
            calculator.crop_residue_emission_factor(wheat, &farm).unwrap(),
            base * 0.28
        ));
    }

    #[test]
    fn test_modifiers_follow_field_year() {
        let calculator = calculator();
        let farm = farm();
        let base = calculator.base_ecodistrict_factor(&farm).unwrap();

        let mut grass = farm.crop_view_items[1].clone();
        grass.tillage_type = TillageType::NoTill;
        assert!(is_close!(
            calculator
                .synthetic_nitrogen_emission_factor(&grass, &farm)
                .unwrap(),
            base * 0.19 * 0.7
        ));
    }

    #[test]
    fn test_organic_factor_without_field_year() {
        let calculator = calculator();
        assert_eq!(
            calculator
                .organic_nitrogen_emission_factor(None, &farm())
                .unwrap(),
            0.0
        );
    }

    #[test]
    fn test_direct_manure_emissions_exclude_imported_manure() {
        let calculator = calculator();
        let farm = farm();
        let mut wheat = farm.crop_view_items[0].clone();
        wheat.manure_applications = vec![
            ManureApplication {
                manure_source: ManureLocationSource::Livestock,
                animal_type: AnimalType::Dairy,
                amount_of_nitrogen_applied_per_hectare: 50.0,
            },
            ManureApplication {
                manure_source: ManureLocationSource::Imported,
                animal_type: AnimalType::Swine,
                amount_of_nitrogen_applied_per_hectare: 100.0,
            },
        ];

        let factor = calculator
            .organic_nitrogen_emission_factor(Some(&wheat), &farm)
            .unwrap();
        let emissions = calculator
            .direct_n2on_emissions_from_field_specific_manure_spreading(&wheat, &farm)
            .unwrap();
        assert!(is_close!(emissions, 50.0 * 40.0 * factor));

        let no_manure = calculator
            .direct_n2on_emissions_from_field_specific_manure_spreading(
                &farm.crop_view_items[1],
                &farm,
            )
            .unwrap();
        assert_eq!(no_manure, 0.0);
    }

    #[test]
    fn test_weighted_emission_factor() {
        let calculator = calculator();
        let result = calculator
            .weighted_emission_factor(vec![
                WeightedAverageInput::new(2.0, 10.0),
                WeightedAverageInput::new(4.0, 30.0),
            ])
            .unwrap();
        assert!(is_close!(result, 3.5));
    }

    #[test]
    fn test_weighted_organic_factor_uses_area() {
        let calculator = calculator();
        let farm = farm();
        let base = calculator.base_ecodistrict_factor(&farm).unwrap();

        // 40 ha annual wheat and 10 ha perennial grass
        let expected = (base * 0.84 * 40.0 + base * 0.19 * 0.84 * 10.0) / 50.0;
        let weighted = calculator
            .weighted_organic_nitrogen_emission_factor(&farm, farm.field_years_in(2020))
            .unwrap();
        assert!(is_close!(weighted, expected));

        let exported = calculator
            .total_emissions_from_exported_manure(&farm, 1000.0, farm.field_years_in(2020))
            .unwrap();
        assert!(is_close!(exported, 1000.0 * expected));
    }

    #[test]
    fn test_weighted_organic_factor_zero_area() {
        let calculator = calculator();
        let farm = farm();
        let empty = CropViewItem::new(FieldId(9), 2020, CropType::Barley, 0.0);

        let err = calculator
            .weighted_organic_nitrogen_emission_factor(&farm, [&empty])
            .unwrap_err();
        assert!(matches!(err, N2OError::ZeroTotalWeight { entries: 1 }));

        let none = calculator
            .weighted_organic_nitrogen_emission_factor(&farm, farm.field_years_in(1990))
            .unwrap();
        assert_eq!(none, 0.0);
    }
}
