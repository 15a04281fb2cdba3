//! Category → weight mapping.
//!
//! Entries are kept in canonical category order (`Category::ALL`), so two
//! tables with the same weights always iterate, and therefore sample, the
//! same way. Transforms build a new table over the same key set; nothing
//! downstream of construction can add or drop a category.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeMap;

use super::category::Category;
use crate::core::error::{GameError, GameResult};

/// Nonnegative weights over a closed category set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<K, f64>",
    into = "BTreeMap<K, f64>",
    bound(
        serialize = "K: Category + Serialize",
        deserialize = "K: Category + Deserialize<'de>"
    )
)]
pub struct WeightTable<K: Category> {
    entries: SmallVec<[(K, f64); 12]>,
}

impl<K: Category> WeightTable<K> {
    /// Build a table. Later duplicates replace earlier ones.
    ///
    /// Fails with `InvalidWeight` on negative or non-finite weights.
    pub fn new(entries: impl IntoIterator<Item = (K, f64)>) -> GameResult<Self> {
        let mut sorted: BTreeMap<K, f64> = BTreeMap::new();
        for (key, weight) in entries {
            if !weight.is_finite() || weight < 0.0 {
                return Err(GameError::InvalidWeight {
                    category: key.key().to_string(),
                    weight,
                });
            }
            sorted.insert(key, weight);
        }
        Ok(Self {
            entries: sorted.into_iter().collect(),
        })
    }

    /// Weight for a category, `None` if the category is not in the table.
    #[must_use]
    pub fn get(&self, key: K) -> Option<f64> {
        self.entries
            .binary_search_by(|(k, _)| k.cmp(&key))
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// Weight for a category, `0.0` when absent.
    #[must_use]
    pub fn weight(&self, key: K) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Iterate (category, weight) in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Categories in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    /// True when every variant of `K` has an entry.
    #[must_use]
    pub fn covers_all(&self) -> bool {
        self.entries.len() == K::ALL.len()
    }

    /// Categories of `K` missing from this table.
    #[must_use]
    pub fn missing(&self) -> Vec<K> {
        K::ALL.iter().copied().filter(|k| !self.contains(*k)).collect()
    }

    /// Reweight every entry, keeping the key set.
    ///
    /// Results are clamped to finite nonnegative values.
    #[must_use]
    pub fn map_weights(&self, mut f: impl FnMut(K, f64) -> f64) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|&(k, w)| {
                let adjusted = f(k, w);
                let adjusted = if adjusted.is_finite() { adjusted.max(0.0) } else { 0.0 };
                (k, adjusted)
            })
            .collect();
        Self { entries }
    }
}

impl<K: Category> TryFrom<BTreeMap<K, f64>> for WeightTable<K> {
    type Error = GameError;

    fn try_from(map: BTreeMap<K, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl<K: Category> From<WeightTable<K>> for BTreeMap<K, f64> {
    fn from(table: WeightTable<K>) -> Self {
        table.entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcomes::category::{SwingOutcome, TakeOutcome};

    fn take_table() -> WeightTable<TakeOutcome> {
        WeightTable::new([
            (TakeOutcome::StrikeCalled, 40.0),
            (TakeOutcome::Ball, 58.0),
            (TakeOutcome::HitByPitch, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_entries_sorted_canonically() {
        let keys: Vec<_> = take_table().keys().collect();
        assert_eq!(keys, TakeOutcome::ALL.to_vec());
    }

    #[test]
    fn test_lookup_and_total() {
        let table = take_table();
        assert_eq!(table.get(TakeOutcome::Ball), Some(58.0));
        assert_eq!(table.total(), 100.0);
        assert!(table.covers_all());
    }

    #[test]
    fn test_missing_categories() {
        let table = WeightTable::new([(SwingOutcome::Single, 1.0)]).unwrap();
        assert_eq!(table.weight(SwingOutcome::Homerun), 0.0);
        assert!(!table.covers_all());
        assert_eq!(table.missing().len(), SwingOutcome::ALL.len() - 1);
    }

    #[test]
    fn test_rejects_bad_weights() {
        let negative = WeightTable::new([(TakeOutcome::Ball, -1.0)]);
        assert!(matches!(negative, Err(GameError::InvalidWeight { .. })));

        let nan = WeightTable::new([(TakeOutcome::Ball, f64::NAN)]);
        assert!(matches!(nan, Err(GameError::InvalidWeight { .. })));
    }

    #[test]
    fn test_map_weights_preserves_keys() {
        let table = take_table();
        let doubled = table.map_weights(|_, w| w * 2.0);
        assert_eq!(doubled.keys().collect::<Vec<_>>(), table.keys().collect::<Vec<_>>());
        assert_eq!(doubled.weight(TakeOutcome::Ball), 116.0);

        let clamped = table.map_weights(|_, _| -5.0);
        assert_eq!(clamped.total(), 0.0);
    }

    #[test]
    fn test_serde_as_map() {
        let table = take_table();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"strike_called\":40.0"));

        let back: WeightTable<TakeOutcome> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        let bad: Result<WeightTable<TakeOutcome>, _> = serde_json::from_str(r#"{"ball": -3.0}"#);
        assert!(bad.is_err());
    }
}
