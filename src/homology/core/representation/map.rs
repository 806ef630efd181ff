//! 有序映射列存储
//!
//! 每列是一个 `BTreeMap<行索引, 系数>`。列加法逐个插入/删除 source 的元素。

use std::collections::BTreeMap;

use super::super::super::types::{Coefficient, Index};
use super::super::field::Field;
use super::{elimination_factor, ColumnStore, Entry};

/// 有序映射列存储
#[derive(Debug, Clone)]
pub struct MapColumns<F: Field> {
    field: F,
    columns: Vec<BTreeMap<Index, Coefficient>>,
}

impl<F: Field> MapColumns<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            columns: Vec::new(),
        }
    }
}

impl<F: Field> ColumnStore for MapColumns<F> {
    fn set_num_columns(&mut self, n: Index) {
        self.columns = vec![BTreeMap::new(); n];
    }

    fn num_columns(&self) -> Index {
        self.columns.len()
    }

    fn set_column(&mut self, column: Index, entries: &[Entry]) {
        self.columns[column] = entries.iter().copied().collect();
    }

    fn column(&self, column: Index) -> Vec<Entry> {
        self.columns[column].iter().map(|(&r, &c)| (r, c)).collect()
    }

    fn clear_column(&mut self, column: Index) {
        self.columns[column].clear();
    }

    fn add_columns(&mut self, source: Index, target: Index) {
        let source_entries = self.column(source);
        let source_pivot = source_entries.last().copied();
        let target_coefficient =
            source_pivot.and_then(|(row, _)| self.columns[target].get(&row).copied());
        let factor = elimination_factor(&self.field, source_pivot, target_coefficient);

        let field = &self.field;
        let tgt = &mut self.columns[target];
        for (row, coeff) in source_entries {
            let current = tgt.get(&row).copied().unwrap_or(0);
            let sum = field.add(current, field.mul(factor, coeff));
            if field.is_zero(sum) {
                tgt.remove(&row);
            } else {
                tgt.insert(row, sum);
            }
        }
    }

    #[inline]
    fn maximum_index(&self, column: Index) -> Option<Index> {
        self.columns[column].last_key_value().map(|(&r, _)| r)
    }

    fn column_len(&self, column: Index) -> usize {
        self.columns[column].len()
    }

    fn characteristic(&self) -> u16 {
        self.field.characteristic()
    }

    fn empty_like(&self) -> Box<dyn ColumnStore> {
        Box::new(MapColumns::new(self.field.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::field::Z2;
    use super::*;

    #[test]
    fn test_map_columns_symmetric_difference() {
        let mut store = MapColumns::new(Z2);
        store.set_num_columns(8);
        store.set_column(6, &[(0, 1), (3, 1)]);
        store.set_column(7, &[(3, 1), (5, 1)]);

        store.add_columns(6, 7);
        assert_eq!(store.column(7), vec![(0, 1), (5, 1)]);
        assert_eq!(store.maximum_index(7), Some(5));

        // source 保持不变
        assert_eq!(store.column(6), vec![(0, 1), (3, 1)]);
    }
}
