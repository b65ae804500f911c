use std::cmp::Ordering;
use std::ops::Range;

use crate::core::types::{BarData, DataRange};

/// Bar samples kept sorted by key.
///
/// Equal keys are allowed; insertion keeps them in arrival order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarDataContainer {
    points: Vec<BarData>,
}

impl BarDataContainer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a container from arbitrary-order samples.
    #[must_use]
    pub fn from_points(mut points: Vec<BarData>) -> Self {
        sort_by_key(&mut points);
        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[BarData] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BarData> {
        self.points.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<BarData> {
        self.points.get(index).copied()
    }

    /// Inserts one sample at its sorted position.
    pub fn add(&mut self, point: BarData) {
        let at = self.find_end(point.key);
        self.points.insert(at, point);
    }

    /// Inserts many samples.
    ///
    /// With `already_sorted`, a batch whose first key is not below the current
    /// last key is appended without re-sorting.
    pub fn add_many(&mut self, mut points: Vec<BarData>, already_sorted: bool) {
        if points.is_empty() {
            return;
        }
        if !already_sorted {
            sort_by_key(&mut points);
        }
        let appends_in_order = self
            .points
            .last()
            .is_none_or(|last| last.key <= points[0].key);
        self.points.extend(points);
        if !appends_in_order {
            sort_by_key(&mut self.points);
        }
    }

    /// Index of the first sample with `key >= key`.
    #[must_use]
    pub fn find_begin(&self, key: f64) -> usize {
        self.points.partition_point(|point| point.key < key)
    }

    /// Index one past the last sample with `key <= key`.
    #[must_use]
    pub fn find_end(&self, key: f64) -> usize {
        self.points.partition_point(|point| point.key <= key)
    }

    /// Index range of samples with keys inside `[lower, upper]`.
    #[must_use]
    pub fn range_indices(&self, lower: f64, upper: f64) -> Range<usize> {
        let begin = self.find_begin(lower);
        let end = self.find_end(upper).max(begin);
        begin..end
    }

    /// Key span of the stored samples, `None` when empty.
    #[must_use]
    pub fn key_range(&self) -> Option<DataRange> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        Some(DataRange::new(first.key, last.key))
    }
}

impl<'a> IntoIterator for &'a BarDataContainer {
    type Item = &'a BarData;
    type IntoIter = std::slice::Iter<'a, BarData>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

fn sort_by_key(points: &mut [BarData]) {
    points.sort_by(|a, b| a.key.partial_cmp(&b.key).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_keeps_keys_sorted_and_stable() {
        let mut data = BarDataContainer::new();
        data.add(BarData::new(3.0, 1.0));
        data.add(BarData::new(1.0, 2.0));
        data.add(BarData::new(3.0, 3.0));
        let keys: Vec<f64> = data.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![1.0, 3.0, 3.0]);
        assert_eq!(data.get(2).map(|p| p.value), Some(3.0));
    }

    #[test]
    fn range_queries_are_inclusive() {
        let data = BarDataContainer::from_points(vec![
            BarData::new(1.0, 0.0),
            BarData::new(2.0, 0.0),
            BarData::new(2.0, 0.0),
            BarData::new(4.0, 0.0),
        ]);
        assert_eq!(data.find_begin(2.0), 1);
        assert_eq!(data.find_end(2.0), 3);
        assert_eq!(data.range_indices(1.5, 3.0), 1..3);
        assert_eq!(data.range_indices(5.0, 6.0), 4..4);
    }

    #[test]
    fn unsorted_batch_is_merged() {
        let mut data = BarDataContainer::from_points(vec![BarData::new(5.0, 0.0)]);
        data.add_many(vec![BarData::new(7.0, 0.0), BarData::new(1.0, 0.0)], false);
        let keys: Vec<f64> = data.iter().map(|p| p.key).collect();
        assert_eq!(keys, vec![1.0, 5.0, 7.0]);
        assert_eq!(data.key_range(), Some(DataRange::new(1.0, 7.0)));
    }
}
