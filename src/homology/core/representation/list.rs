//! 有序向量列存储
//!
//! 每列是按行索引升序排列的 `Vec<Entry>`，pivot 就是最后一个元素。
//! 列加法是两个有序序列的归并。

use super::super::super::types::{Coefficient, Index};
use super::super::field::Field;
use super::{elimination_factor, ColumnStore, Entry};

/// 有序向量列存储
#[derive(Debug, Clone)]
pub struct ListColumns<F: Field> {
    field: F,
    columns: Vec<Vec<Entry>>,
}

impl<F: Field> ListColumns<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            columns: Vec::new(),
        }
    }
}

impl<F: Field> ColumnStore for ListColumns<F> {
    fn set_num_columns(&mut self, n: Index) {
        self.columns = vec![Vec::new(); n];
    }

    fn num_columns(&self) -> Index {
        self.columns.len()
    }

    fn set_column(&mut self, column: Index, entries: &[Entry]) {
        self.columns[column] = entries.to_vec();
    }

    fn column(&self, column: Index) -> Vec<Entry> {
        self.columns[column].clone()
    }

    fn clear_column(&mut self, column: Index) {
        self.columns[column].clear();
    }

    fn add_columns(&mut self, source: Index, target: Index) {
        let merged = {
            let src = &self.columns[source];
            let tgt = &self.columns[target];

            let source_pivot = src.last().copied();
            let target_coefficient = source_pivot.and_then(|(row, _)| {
                tgt.binary_search_by(|e| e.0.cmp(&row))
                    .ok()
                    .map(|pos| tgt[pos].1)
            });
            let factor = elimination_factor(&self.field, source_pivot, target_coefficient);

            merge(&self.field, src, tgt, factor)
        };

        self.columns[target] = merged;
    }

    #[inline]
    fn maximum_index(&self, column: Index) -> Option<Index> {
        self.columns[column].last().map(|e| e.0)
    }

    fn column_len(&self, column: Index) -> usize {
        self.columns[column].len()
    }

    fn characteristic(&self) -> u16 {
        self.field.characteristic()
    }

    fn empty_like(&self) -> Box<dyn ColumnStore> {
        Box::new(ListColumns::new(self.field.clone()))
    }
}

/// 归并 `target + factor * source`，跳过相加后为零的元素
fn merge<F: Field>(field: &F, source: &[Entry], target: &[Entry], factor: Coefficient) -> Vec<Entry> {
    let mut result = Vec::with_capacity(source.len() + target.len());
    let (mut i, mut j) = (0, 0);

    while i < source.len() && j < target.len() {
        let (s_row, s_coeff) = source[i];
        let (t_row, t_coeff) = target[j];

        if s_row < t_row {
            result.push((s_row, field.mul(factor, s_coeff)));
            i += 1;
        } else if t_row < s_row {
            result.push((t_row, t_coeff));
            j += 1;
        } else {
            let sum = field.add(t_coeff, field.mul(factor, s_coeff));
            if !field.is_zero(sum) {
                result.push((t_row, sum));
            }
            i += 1;
            j += 1;
        }
    }

    result.extend(source[i..].iter().map(|&(row, c)| (row, field.mul(factor, c))));
    result.extend_from_slice(&target[j..]);

    result
}

#[cfg(test)]
mod tests {
    use super::super::super::field::{PrimeField, Z2};
    use super::*;

    #[test]
    fn test_merge_symmetric_difference() {
        let a = vec![(0, 1), (2, 1), (5, 1)];
        let b = vec![(1, 1), (2, 1), (7, 1)];

        let merged = merge(&Z2, &a, &b, 1);
        assert_eq!(merged, vec![(0, 1), (1, 1), (5, 1), (7, 1)]);
    }

    #[test]
    fn test_merge_with_factor() {
        let f = PrimeField::new(5).unwrap();
        let source = vec![(1, 1), (3, 2)];
        let target = vec![(1, 3), (3, 1)];

        // target + 2 * source = (1: 3+2=0), (3: 1+4=0)
        let merged = merge(&f, &source, &target, 2);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_pivot_is_last_entry() {
        let mut store = ListColumns::new(Z2);
        store.set_num_columns(10);
        store.set_column(9, &[(1, 1), (4, 1), (8, 1)]);

        assert_eq!(store.maximum_index(9), Some(8));
        assert_eq!(store.maximum_index(0), None);
    }
}
