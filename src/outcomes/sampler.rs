//! Weighted random selection over a category table.
//!
//! Pure function of the table and one uniform draw from the injected
//! `RandomSource`. Empty and zero-total tables are a data error and fail
//! with `DegenerateWeightTable`; there is no uniform fallback.

use super::category::Category;
use super::table::WeightTable;
use crate::core::error::{GameError, GameResult};
use crate::core::rng::RandomSource;

/// Pick one category with probability proportional to its weight.
///
/// Zero-weight categories are never returned. Consumes exactly one draw.
pub fn weighted_choice<K, R>(table: &WeightTable<K>, rng: &mut R) -> GameResult<K>
where
    K: Category,
    R: RandomSource + ?Sized,
{
    let total = table.total();
    if table.is_empty() || total <= 0.0 {
        return Err(GameError::DegenerateWeightTable);
    }

    let mut threshold = rng.next_f64() * total;
    let mut last_positive = None;

    for (key, weight) in table.iter() {
        if weight <= 0.0 {
            continue;
        }
        if threshold < weight {
            return Ok(key);
        }
        threshold -= weight;
        last_positive = Some(key);
    }

    // Floating point edge case - fall back to the last positive weight
    last_positive.ok_or(GameError::DegenerateWeightTable)
}
