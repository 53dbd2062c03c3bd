//! Weighted averaging of per-field values
//!
//! Emission factors and loss fractions are field dependent. When one
//! representative value is needed for a farm or a crop-year, the per-field
//! values are combined with their areas as weights:
//!
//! $$ \bar{x} = \frac{\sum_i x_i w_i}{\sum_i w_i} $$
//!
//! ```rust
//! use holos_n2o_core::weighted::{weighted_average, WeightedAverageInput};
//!
//! let entries = vec![
//!     WeightedAverageInput::new(2.0, 10.0),
//!     WeightedAverageInput::new(4.0, 30.0),
//! ];
//! assert_eq!(weighted_average(entries).unwrap(), 3.5);
//! ```

use crate::errors::{N2OError, N2OResult};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// A value and the weight it carries in an average
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedAverageInput {
    pub value: FloatValue,
    pub weight: FloatValue,
}

impl WeightedAverageInput {
    pub fn new(value: FloatValue, weight: FloatValue) -> Self {
        Self { value, weight }
    }
}

/// Weighted mean of a sequence of entries
///
/// An empty sequence averages to `0.0`. A non-empty sequence whose weights sum
/// to zero has no defined mean and returns [`N2OError::ZeroTotalWeight`].
pub fn weighted_average<I>(entries: I) -> N2OResult<FloatValue>
where
    I: IntoIterator<Item = WeightedAverageInput>,
{
    let mut count = 0;
    let mut weighted_sum: FloatValue = 0.0;
    let mut total_weight: FloatValue = 0.0;

    for entry in entries {
        count += 1;
        weighted_sum += entry.value * entry.weight;
        total_weight += entry.weight;
    }

    if count == 0 {
        return Ok(0.0);
    }

    if total_weight == 0.0 {
        return Err(N2OError::ZeroTotalWeight { entries: count });
    }

    Ok(weighted_sum / total_weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_area_weighted_mean() {
        let entries = [
            WeightedAverageInput::new(2.0, 10.0),
            WeightedAverageInput::new(4.0, 30.0),
        ];
        assert_eq!(weighted_average(entries).unwrap(), 3.5);
    }

    #[test]
    fn test_single_entry_returns_its_value() {
        let result = weighted_average([WeightedAverageInput::new(0.0123, 55.0)]).unwrap();
        assert!(is_close!(result, 0.0123));
    }

    #[test]
    fn test_empty_sequence_is_zero() {
        let result = weighted_average(Vec::<WeightedAverageInput>::new()).unwrap();
        assert_eq!(result, 0.0);
    }

    #[test]
    fn test_zero_total_weight_is_an_error() {
        let entries = vec![
            WeightedAverageInput::new(1.0, 0.0),
            WeightedAverageInput::new(3.0, 0.0),
        ];
        match weighted_average(entries) {
            Err(N2OError::ZeroTotalWeight { entries }) => assert_eq!(entries, 2),
            other => panic!("Expected ZeroTotalWeight, got {:?}", other),
        }
    }

    #[test]
    fn test_tiny_positive_weights() {
        let entries = [
            WeightedAverageInput::new(2.0, 1e-17),
            WeightedAverageInput::new(4.0, 3e-17),
        ];
        assert!(is_close!(weighted_average(entries).unwrap(), 3.5));
    }

    #[test]
    fn test_equal_weights_are_arithmetic_mean() {
        let entries = (1..=4).map(|i| WeightedAverageInput::new(i as FloatValue, 2.5));
        assert!(is_close!(weighted_average(entries).unwrap(), 2.5));
    }
}
