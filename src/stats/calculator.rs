//! Statistics Calculator Module
//! Group-by aggregations over in-memory records: mean, sum, ranking and pivot.

use statrs::statistics::Statistics;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

/// One aggregated value for a group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupValue<K> {
    pub key: K,
    pub value: f64,
}

/// A row-by-column grid of means, rows and columns sorted ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable<R, C> {
    pub rows: Vec<R>,
    pub columns: Vec<C>,
    /// `cells[row][column]`; `None` where no record falls in the cell.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl<R, C> PivotTable<R, C> {
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(row)?.get(column).copied().flatten()
    }

    /// Smallest and largest filled cell, `None` for an empty grid.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut values = self.cells.iter().flatten().filter_map(|v| *v);
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

/// Distinct items in first-seen order.
pub fn distinct<'a, I>(items: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}

/// Descending comparison with NaN ordered last.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Handles the aggregations behind every report and chart.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean ignoring NaN; NaN when nothing is left.
    pub fn mean<I>(values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        let present: Vec<f64> = values.into_iter().filter(|v| !v.is_nan()).collect();
        if present.is_empty() {
            return f64::NAN;
        }
        present.mean()
    }

    /// Sum ignoring NaN.
    pub fn sum<I>(values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        values.into_iter().filter(|v| !v.is_nan()).sum()
    }

    /// Mean of `value` per `key`, groups in first-seen order.
    pub fn group_mean<T, K, FK, FV>(items: &[T], key: FK, value: FV) -> Vec<GroupValue<K>>
    where
        K: Eq + Hash + Clone,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> f64,
    {
        Self::grouped(items, key, value)
            .into_iter()
            .map(|(key, values)| GroupValue {
                key,
                value: Self::mean(values),
            })
            .collect()
    }

    /// Sum of `value` per `key`, groups in first-seen order.
    pub fn group_sum<T, K, FK, FV>(items: &[T], key: FK, value: FV) -> Vec<GroupValue<K>>
    where
        K: Eq + Hash + Clone,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> f64,
    {
        Self::grouped(items, key, value)
            .into_iter()
            .map(|(key, values)| GroupValue {
                key,
                value: Self::sum(values),
            })
            .collect()
    }

    fn grouped<T, K, FK, FV>(items: &[T], key: FK, value: FV) -> Vec<(K, Vec<f64>)>
    where
        K: Eq + Hash + Clone,
        FK: Fn(&T) -> K,
        FV: Fn(&T) -> f64,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut groups: Vec<(K, Vec<f64>)> = Vec::new();

        for item in items {
            let k = key(item);
            let slot = *index.entry(k.clone()).or_insert_with(|| {
                groups.push((k, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(value(item));
        }

        groups
    }

    /// Stable sort, largest first; ties keep their incoming order.
    pub fn sort_descending<K>(mut groups: Vec<GroupValue<K>>) -> Vec<GroupValue<K>> {
        groups.sort_by(|a, b| descending(a.value, b.value));
        groups
    }

    /// The `n` largest groups, largest first.
    pub fn top_n<K>(groups: Vec<GroupValue<K>>, n: usize) -> Vec<GroupValue<K>> {
        let mut sorted = Self::sort_descending(groups);
        sorted.truncate(n);
        sorted
    }

    /// Mean of `value` for every (row, column) pair, filled into a grid.
    pub fn pivot_mean<T, R, C, FR, FC, FV>(
        items: &[T],
        row_key: FR,
        column_key: FC,
        value: FV,
    ) -> PivotTable<R, C>
    where
        R: Eq + Hash + Clone + Ord,
        C: Eq + Hash + Clone + Ord,
        FR: Fn(&T) -> R,
        FC: Fn(&T) -> C,
        FV: Fn(&T) -> f64,
    {
        let means = Self::group_mean(items, |item| (row_key(item), column_key(item)), value);

        let mut rows: Vec<R> = means.iter().map(|g| g.key.0.clone()).collect();
        rows.sort();
        rows.dedup();
        let mut columns: Vec<C> = means.iter().map(|g| g.key.1.clone()).collect();
        columns.sort();
        columns.dedup();

        let mut cells = vec![vec![None; columns.len()]; rows.len()];
        for GroupValue { key: (r, c), value } in means {
            if let (Ok(ri), Ok(ci)) = (rows.binary_search(&r), columns.binary_search(&c)) {
                cells[ri][ci] = Some(value);
            }
        }

        PivotTable {
            rows,
            columns,
            cells,
        }
    }
}
