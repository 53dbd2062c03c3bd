//! Emissions from land-applied manure
//!
//! [`LandApplicationEmissionResult`] ties the seven additive manure quantities
//! ([`LandApplicationEmissions`]) to one field and year. Totals over several
//! results are plain sums of the quantities.

use crate::crop::FieldId;
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Additive nitrogen losses and flows from land application of manure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LandApplicationEmissions {
    /// unit: kg N2O-N
    pub total_n2on_from_manure_leaching: FloatValue,
    /// unit: kg N2O-N
    pub total_indirect_n2on_emissions: FloatValue,
    /// unit: kg NO3-N
    pub total_nitrate_leached: FloatValue,
    /// unit: kg N2O-N
    pub total_n2on_from_manure_volatilized: FloatValue,
    /// unit: kg
    pub total_volume_of_manure_used_during_application: FloatValue,
    /// unit: kg NH3-N
    pub ammoniacal_loss: FloatValue,
    /// unit: kg N
    pub actual_amount_of_nitrogen_applied_from_land_application: FloatValue,
}

impl AddAssign for LandApplicationEmissions {
    fn add_assign(&mut self, other: Self) {
        self.total_n2on_from_manure_leaching += other.total_n2on_from_manure_leaching;
        self.total_indirect_n2on_emissions += other.total_indirect_n2on_emissions;
        self.total_nitrate_leached += other.total_nitrate_leached;
        self.total_n2on_from_manure_volatilized += other.total_n2on_from_manure_volatilized;
        self.total_volume_of_manure_used_during_application +=
            other.total_volume_of_manure_used_during_application;
        self.ammoniacal_loss += other.ammoniacal_loss;
        self.actual_amount_of_nitrogen_applied_from_land_application +=
            other.actual_amount_of_nitrogen_applied_from_land_application;
    }
}

impl Add for LandApplicationEmissions {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sum for LandApplicationEmissions {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl<'a> Sum<&'a LandApplicationEmissions> for LandApplicationEmissions {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Manure land-application emissions for one field in one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandApplicationEmissionResult {
    pub field_id: FieldId,
    pub year: i32,
    pub emissions: LandApplicationEmissions,
}

impl LandApplicationEmissionResult {
    /// An empty result for a field-year
    pub fn new(field_id: FieldId, year: i32) -> Self {
        Self {
            field_id,
            year,
            emissions: LandApplicationEmissions::default(),
        }
    }

    pub fn matches(&self, field_id: FieldId, year: i32) -> bool {
        self.field_id == field_id && self.year == year
    }

    /// Sum every result belonging to `field_id` in `year`
    pub fn total_for<'a, I>(results: I, field_id: FieldId, year: i32) -> Self
    where
        I: IntoIterator<Item = &'a LandApplicationEmissionResult>,
    {
        let emissions = results
            .into_iter()
            .filter(|result| result.matches(field_id, year))
            .map(|result| &result.emissions)
            .sum();

        Self {
            field_id,
            year,
            emissions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emissions(scale: FloatValue) -> LandApplicationEmissions {
        LandApplicationEmissions {
            total_n2on_from_manure_leaching: 1.0 * scale,
            total_indirect_n2on_emissions: 2.0 * scale,
            total_nitrate_leached: 3.0 * scale,
            total_n2on_from_manure_volatilized: 4.0 * scale,
            total_volume_of_manure_used_during_application: 5.0 * scale,
            ammoniacal_loss: 6.0 * scale,
            actual_amount_of_nitrogen_applied_from_land_application: 7.0 * scale,
        }
    }

    #[test]
    fn test_sum_adds_every_quantity() {
        let total: LandApplicationEmissions = [emissions(1.0), emissions(2.0)].iter().sum();
        assert_eq!(total, emissions(3.0));
    }

    #[test]
    fn test_total_for_filters_by_field_and_year() {
        let results = vec![
            LandApplicationEmissionResult {
                field_id: FieldId(1),
                year: 2020,
                emissions: emissions(1.0),
            },
            LandApplicationEmissionResult {
                field_id: FieldId(1),
                year: 2021,
                emissions: emissions(10.0),
            },
            LandApplicationEmissionResult {
                field_id: FieldId(2),
                year: 2020,
                emissions: emissions(100.0),
            },
            LandApplicationEmissionResult {
                field_id: FieldId(1),
                year: 2020,
                emissions: emissions(0.5),
            },
        ];

        let total = LandApplicationEmissionResult::total_for(&results, FieldId(1), 2020);
        assert_eq!(total.field_id, FieldId(1));
        assert_eq!(total.year, 2020);
        assert_eq!(total.emissions, emissions(1.5));
    }

    #[test]
    fn test_total_for_without_matches_is_zero() {
        let total = LandApplicationEmissionResult::total_for(&[], FieldId(9), 2020);
        assert_eq!(total, LandApplicationEmissionResult::new(FieldId(9), 2020));
    }
}
